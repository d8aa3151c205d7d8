use time::Date;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

use super::{repo, services};

/// Archive one past day: move every working-set entry dated exactly
/// `boundary` into the historical log, then refresh each touched owner's
/// historical total from the archive partition. Safe to re-run: a second
/// pass finds nothing left to move and the recompute lands on the same
/// sums. If the process dies between the move and the recomputes, the
/// entries are already archived exactly once and a retry finishes the
/// remaining recomputes.
pub async fn run(state: &AppState, boundary: Date) -> ApiResult<u64> {
    let moved = repo::move_day_to_history(&state.db, boundary).await?;

    // The owner set comes from the archive partition itself. A prior run
    // may have committed the move and died mid-recompute; those owners
    // would be invisible to this call's move step.
    let touched = repo::archived_owners_for_date(&state.db, boundary).await?;
    for user_id in &touched {
        services::recompute_historical_from_archive(&state.db, *user_id, boundary).await?;
    }

    info!(%boundary, moved, users = touched.len(), "rollover completed");
    Ok(moved)
}
