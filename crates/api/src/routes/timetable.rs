use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/timetable", post(handlers::timetable::create_timetable))
        .route(
            "/api/timetable/student",
            get(handlers::timetable::get_student_timetable),
        )
        .route(
            "/api/timetable/faculty",
            get(handlers::timetable::get_faculty_timetable),
        )
}
