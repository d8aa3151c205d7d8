pub mod dto;
pub mod fuzzy;
pub mod handlers;
pub mod services;
pub mod text;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/search/combined", get(handlers::search_combined))
}
