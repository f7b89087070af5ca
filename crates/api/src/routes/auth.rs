use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/me", get(handlers::auth::current_user))
        .route("/api/auth/faculties", get(handlers::auth::list_faculties))
        .route("/api/auth/assign-class", post(handlers::auth::assign_class))
}
