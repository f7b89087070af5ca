use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/holidays", post(handlers::calendar::add_holiday))
        .route("/api/holidays", get(handlers::calendar::get_holidays))
        .route("/api/events", post(handlers::calendar::add_event))
        .route("/api/events", get(handlers::calendar::get_events))
}
