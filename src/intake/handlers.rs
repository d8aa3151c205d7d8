use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use time::{Duration, OffsetDateTime};
use tracing::instrument;

use crate::error::ApiResult;
use crate::state::AppState;

use super::dto::{
    AddFoodRequest, HistoryParams, QuickAddRequest, RolloverResponse, UpdateFoodRequest,
    UserParams,
};
use super::repo::{IntakeEntry, IntakeTotals};
use super::{rollover, services};

fn today() -> time::Date {
    OffsetDateTime::now_utc().date()
}

#[instrument(skip(state, payload))]
pub async fn add_food(
    State(state): State<AppState>,
    Json(payload): Json<AddFoodRequest>,
) -> ApiResult<Json<Value>> {
    services::add_food(&state, payload, today()).await?;
    Ok(Json(json!({ "msg": "Food added" })))
}

#[instrument(skip(state, payload))]
pub async fn update_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
    Json(payload): Json<UpdateFoodRequest>,
) -> ApiResult<Json<Value>> {
    services::update_food(&state, &food_id, payload).await?;
    Ok(Json(json!({ "msg": "Updated" })))
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> ApiResult<Json<Value>> {
    services::delete_food(&state, &food_id).await?;
    Ok(Json(json!({ "msg": "Deleted and totals recalculated" })))
}

#[instrument(skip(state))]
pub async fn daily_foods(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> ApiResult<Json<Vec<IntakeEntry>>> {
    let now = today();
    let entries = services::foods_for_date(&state, params.user_id, now, now).await?;
    Ok(Json(entries))
}

#[instrument(skip(state))]
pub async fn food_history(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(params): Query<UserParams>,
) -> ApiResult<Json<Vec<IntakeEntry>>> {
    let date = services::parse_date(&date)?;
    let entries = services::foods_for_date(&state, params.user_id, date, today()).await?;
    Ok(Json(entries))
}

#[instrument(skip(state))]
pub async fn intake_today(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> ApiResult<Json<IntakeTotals>> {
    let totals = services::today_totals(&state.db, params.user_id, today()).await?;
    Ok(Json(totals))
}

#[instrument(skip(state, payload))]
pub async fn intake_add(
    State(state): State<AppState>,
    Json(payload): Json<QuickAddRequest>,
) -> ApiResult<Json<Value>> {
    services::quick_add(&state, payload, today()).await?;
    Ok(Json(json!({ "message": "Intake recorded" })))
}

#[instrument(skip(state))]
pub async fn intake_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<Vec<IntakeTotals>>> {
    let totals =
        services::totals_history(&state.db, params.user_id, params.days, today()).await?;
    Ok(Json(totals))
}

/// Invoked by the external scheduler once a day; boundary is yesterday
/// relative to run time.
#[instrument(skip(state))]
pub async fn cron_rollover(State(state): State<AppState>) -> ApiResult<Json<RolloverResponse>> {
    let boundary = today() - Duration::days(1);
    let moved = rollover::run(&state, boundary).await?;
    Ok(Json(RolloverResponse {
        message: "Rollover completed",
        moved,
    }))
}
