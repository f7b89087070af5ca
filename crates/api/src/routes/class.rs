use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/classes", post(handlers::class::create_class))
        .route("/api/classes", get(handlers::class::list_classes))
}
