use sqlx::PgPool;
use time::{Date, Duration};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::utils::{safe_float, ISO_DATE};

use super::dto::{AddFoodRequest, QuickAddRequest, UpdateFoodRequest};
use super::repo::{self, EntryPatch, IntakeEntry, IntakeTotals};

/// Record a consumption event. The entry always lands in the daily working
/// set; back-dated entries are mirrored into the historical log right away
/// because the nightly rollover only ever looks at yesterday and would
/// never reach them.
pub async fn add_food(
    state: &AppState,
    payload: AddFoodRequest,
    today: Date,
) -> ApiResult<IntakeEntry> {
    ensure_positive_grams(payload.grams)?;
    let date = match payload.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => today,
    };

    let entry = IntakeEntry {
        id: Uuid::new_v4(),
        user_id: payload.user_id,
        date,
        description: payload.description,
        grams: payload.grams,
        calorias: safe_float(payload.calorias),
        proteinas: safe_float(payload.proteinas),
        carbo: safe_float(payload.carbo),
        gordura: safe_float(payload.gordura),
    };

    repo::insert_entry(&state.db, &entry).await?;
    if date != today {
        repo::archive_entry(&state.db, entry.id).await?;
    }
    recompute(&state.db, entry.user_id, entry.date).await?;
    Ok(entry)
}

/// Quick macro-only entry against today. Goes through the ledger like any
/// other entry so the totals stay a pure function of the log.
pub async fn quick_add(state: &AppState, payload: QuickAddRequest, today: Date) -> ApiResult<()> {
    let grams = match payload.grams {
        Some(g) => {
            ensure_positive_grams(g)?;
            g
        }
        // Unknown quantity; the macros are what the user actually tracked.
        None => 0.0,
    };

    let entry = IntakeEntry {
        id: Uuid::new_v4(),
        user_id: payload.user_id,
        date: today,
        description: payload.description.unwrap_or_else(|| "Avulso".into()),
        grams,
        calorias: safe_float(Some(payload.calorias)),
        proteinas: safe_float(Some(payload.proteinas)),
        carbo: safe_float(Some(payload.carbo)),
        gordura: safe_float(Some(payload.gordura)),
    };

    repo::insert_entry(&state.db, &entry).await?;
    recompute(&state.db, entry.user_id, entry.date).await
}

pub async fn update_food(
    state: &AppState,
    raw_id: &str,
    payload: UpdateFoodRequest,
) -> ApiResult<()> {
    let id = parse_entry_id(raw_id)?;
    if let Some(grams) = payload.grams {
        ensure_positive_grams(grams)?;
    }
    let date = match payload.date.as_deref() {
        Some(raw) => Some(parse_date(raw)?),
        None => None,
    };

    let existing = repo::find_entry(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Food not found".into()))?;

    let patch = EntryPatch {
        description: payload.description,
        grams: payload.grams,
        calorias: payload.calorias,
        proteinas: payload.proteinas,
        carbo: payload.carbo,
        gordura: payload.gordura,
        date,
    };
    let updated = repo::update_entry(&state.db, id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Food not found".into()))?;

    recompute(&state.db, updated.user_id, updated.date).await?;
    if existing.date != updated.date {
        // The entry changed days; the old day's totals must shrink too.
        recompute(&state.db, updated.user_id, existing.date).await?;
    }
    Ok(())
}

pub async fn delete_food(state: &AppState, raw_id: &str) -> ApiResult<IntakeEntry> {
    let id = parse_entry_id(raw_id)?;
    let deleted = repo::delete_entry(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Food not found".into()))?;

    recompute(&state.db, deleted.user_id, deleted.date).await?;
    Ok(deleted)
}

/// Refresh both cached totals for (owner, date) by re-summing the current
/// working-set entries from scratch. No increments anywhere, so the totals
/// cannot drift from the log no matter how operations interleave: the last
/// recompute to land is self-consistent.
pub async fn recompute(db: &PgPool, user_id: Uuid, date: Date) -> ApiResult<()> {
    let entries = repo::list_working_set(db, user_id, date).await?;
    let daily = sum_entries(user_id, date, &entries);
    repo::upsert_daily_total(db, &daily).await?;

    // Each total gets its own scan; the store may have moved in between.
    let entries = repo::list_working_set(db, user_id, date).await?;
    let historical = sum_entries(user_id, date, &entries);
    repo::upsert_historical_total(db, &historical).await?;

    debug!(%user_id, %date, calorias = daily.calorias, "totals recomputed");
    Ok(())
}

/// Rollover-time variant: once a day's entries live in the historical log,
/// its historical total must be derived from that partition instead.
pub async fn recompute_historical_from_archive(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
) -> ApiResult<()> {
    let entries = repo::list_history(db, user_id, date).await?;
    let totals = sum_entries(user_id, date, &entries);
    repo::upsert_historical_total(db, &totals).await?;
    Ok(())
}

/// What did this user eat on this date. Today always comes from the
/// working set. A past date reads the historical log first and falls back
/// to the working set, which covers a rollover that has not run yet.
/// An empty list is a normal answer, never an error.
pub async fn foods_for_date(
    state: &AppState,
    user_id: Uuid,
    date: Date,
    today: Date,
) -> ApiResult<Vec<IntakeEntry>> {
    if date == today {
        return Ok(repo::list_working_set(&state.db, user_id, date).await?);
    }

    let archived = repo::list_history(&state.db, user_id, date).await?;
    if !archived.is_empty() {
        return Ok(archived);
    }
    Ok(repo::list_working_set(&state.db, user_id, date).await?)
}

pub async fn today_totals(db: &PgPool, user_id: Uuid, today: Date) -> ApiResult<IntakeTotals> {
    let totals = repo::find_daily_total(db, user_id, today)
        .await?
        .unwrap_or_else(|| IntakeTotals::zero(user_id, today));
    Ok(totals)
}

pub async fn totals_history(
    db: &PgPool,
    user_id: Uuid,
    days: i64,
    today: Date,
) -> ApiResult<Vec<IntakeTotals>> {
    let days = days.max(1);
    let cutoff = today - Duration::days(days);
    Ok(repo::list_historical_totals(db, user_id, cutoff, days).await?)
}

pub fn sum_entries(user_id: Uuid, date: Date, entries: &[IntakeEntry]) -> IntakeTotals {
    let mut totals = IntakeTotals::zero(user_id, date);
    for entry in entries {
        totals.calorias += entry.calorias;
        totals.proteinas += entry.proteinas;
        totals.carbo += entry.carbo;
        totals.gordura += entry.gordura;
    }
    totals
}

pub fn parse_date(raw: &str) -> ApiResult<Date> {
    Date::parse(raw, ISO_DATE).map_err(|_| ApiError::Validation("Invalid date format".into()))
}

fn parse_entry_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation("Invalid ID format".into()))
}

fn ensure_positive_grams(grams: f64) -> ApiResult<()> {
    if grams > 0.0 {
        Ok(())
    } else {
        Err(ApiError::Validation("Grams must be greater than 0".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn entry(user_id: Uuid, date: Date, calorias: f64, proteinas: f64) -> IntakeEntry {
        IntakeEntry {
            id: Uuid::new_v4(),
            user_id,
            date,
            description: "Batata doce".into(),
            grams: 100.0,
            calorias,
            proteinas,
            carbo: 0.0,
            gordura: 0.0,
        }
    }

    #[test]
    fn test_sum_entries_is_plain_resummation() {
        let user = Uuid::new_v4();
        let day = date!(2024 - 03 - 09);
        let mut entries = vec![
            entry(user, day, 100.0, 3.0),
            entry(user, day, 50.5, 1.5),
            entry(user, day, 0.0, 0.0),
        ];

        let totals = sum_entries(user, day, &entries);
        assert!((totals.calorias - 150.5).abs() < 1e-9);
        assert!((totals.proteinas - 4.5).abs() < 1e-9);

        // Removing an entry and re-summing lands exactly on the remainder,
        // regardless of the order operations happened in.
        entries.remove(0);
        let totals = sum_entries(user, day, &entries);
        assert!((totals.calorias - 50.5).abs() < 1e-9);
    }

    #[test]
    fn test_sum_entries_empty_is_zero() {
        let user = Uuid::new_v4();
        let day = date!(2024 - 03 - 09);
        let totals = sum_entries(user, day, &[]);
        assert_eq!(totals.calorias, 0.0);
        assert_eq!(totals.gordura, 0.0);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-09").unwrap(), date!(2024 - 03 - 09));
        assert!(matches!(
            parse_date("09/03/2024"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(parse_date("not-a-date"), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_grams_validation() {
        assert!(ensure_positive_grams(150.0).is_ok());
        assert!(ensure_positive_grams(0.0).is_err());
        assert!(ensure_positive_grams(-10.0).is_err());
        assert!(ensure_positive_grams(f64::NAN).is_err());
    }

    #[test]
    fn test_entry_id_validation() {
        assert!(parse_entry_id("7f0d5f36-5d2c-4db5-a2ad-620e11b0b1a5").is_ok());
        assert!(matches!(
            parse_entry_id("abc123"),
            Err(ApiError::Validation(_))
        ));
    }
}
