use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use campusync_core::{
    errors::CampusError,
    models::{
        class::{Class, ClassSummary, CreateClassRequest},
        user::Role,
    },
};

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    stats,
    ApiState,
};

#[axum::debug_handler]
pub async fn create_class(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<Class>), AppError> {
    user.require_role(Role::Admin)?;

    if payload.id.trim().is_empty() {
        return Err(AppError(CampusError::Validation(
            "Class ID must not be empty".to_string(),
        )));
    }

    let existing = campusync_db::repositories::class::get_class_by_id(&state.db_pool, &payload.id)
        .await
        .map_err(CampusError::Database)?;
    if existing.is_some() {
        return Err(AppError(CampusError::Validation(format!(
            "Class {} already exists",
            payload.id
        ))));
    }

    let db_class = campusync_db::repositories::class::create_class(
        &state.db_pool,
        &payload.id,
        &payload.name,
        &payload.course,
    )
    .await
    .map_err(CampusError::Database)?;

    let class = Class {
        id: db_class.id,
        name: db_class.name,
        course: db_class.course,
        start_date: db_class.start_date,
        end_date: db_class.end_date,
        active_days: stats::parse_day_tags(&db_class.active_days)?,
        created_at: db_class.created_at,
    };

    Ok((StatusCode::CREATED, Json(class)))
}

#[axum::debug_handler]
pub async fn list_classes(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ClassSummary>>, AppError> {
    let classes = campusync_db::repositories::class::list_classes(&state.db_pool)
        .await
        .map_err(CampusError::Database)?;

    let summaries = classes
        .into_iter()
        .map(|c| ClassSummary {
            id: c.id,
            name: c.name,
        })
        .collect();

    Ok(Json(summaries))
}
