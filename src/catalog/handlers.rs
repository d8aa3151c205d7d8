use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::repo::{self, FoodItem};

#[instrument(skip(state))]
pub async fn get_food_by_code(
    State(state): State<AppState>,
    Path(code): Path<i64>,
) -> ApiResult<Json<FoodItem>> {
    let food = repo::find_food_by_code(&state.db, code)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Food with code '{code}' not found")))?;

    Ok(Json(food))
}
