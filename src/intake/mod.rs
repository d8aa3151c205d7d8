pub mod dto;
pub mod handlers;
pub mod repo;
pub mod rollover;
pub mod services;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/food/add", post(handlers::add_food))
        .route("/food/update/:food_id", put(handlers::update_food))
        .route("/food/delete/:food_id", delete(handlers::delete_food))
        .route("/food/daily", get(handlers::daily_foods))
        .route("/food/history/:date", get(handlers::food_history))
        .route("/intake/today", get(handlers::intake_today))
        .route("/intake/add", post(handlers::intake_add))
        .route("/intake/history", get(handlers::intake_history))
        .route("/cron/rollover", post(handlers::cron_rollover))
}
