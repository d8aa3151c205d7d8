use axum::{
    extract::{Query, State},
    Json,
};
use tracing::instrument;

use crate::error::ApiResult;
use crate::state::AppState;

use super::dto::{SearchHit, SearchParams};
use super::services;

#[instrument(skip(state))]
pub async fn search_combined(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<SearchHit>>> {
    let hits = services::combined_search(&state, &params.q).await?;
    Ok(Json(hits))
}
