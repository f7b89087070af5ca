use axum::{extract::State, http::StatusCode, Json};
use chrono::Duration;
use std::sync::Arc;

use campusync_core::{
    errors::CampusError,
    models::user::{
        AssignClassRequest, AuthResponse, FacultySummary, LoginRequest, RegisterRequest, Role,
        UserResponse,
    },
};

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

fn user_response(user: campusync_db::models::DbUser) -> Result<UserResponse, AppError> {
    let role: Role = user
        .role
        .parse()
        .map_err(|e: String| AppError(CampusError::Internal(e.into())))?;

    Ok(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role,
        class_id: user.class_id,
    })
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    // Reject duplicate accounts up front
    let existing = campusync_db::repositories::user::get_user_by_email(&state.db_pool, &payload.email)
        .await
        .map_err(CampusError::Database)?;
    if existing.is_some() {
        return Err(AppError(CampusError::Validation(
            "User already exists".to_string(),
        )));
    }

    // Students must name an existing class at registration
    let class_id = match payload.role {
        Role::Student => {
            let class_id = payload.class_id.as_deref().ok_or_else(|| {
                CampusError::Validation("Class ID required for students".to_string())
            })?;
            campusync_db::repositories::class::get_class_by_id(&state.db_pool, class_id)
                .await
                .map_err(CampusError::Database)?
                .ok_or_else(|| CampusError::Validation("Class not found".to_string()))?;
            Some(class_id)
        }
        _ => None,
    };

    let password_hash = auth::hash_password(&payload.password)?;

    let db_user = campusync_db::repositories::user::create_user(
        &state.db_pool,
        &payload.name,
        &payload.email,
        &password_hash,
        payload.role.as_str(),
        class_id,
    )
    .await
    .map_err(CampusError::Database)?;

    let session = campusync_db::repositories::session::create_session(
        &state.db_pool,
        db_user.id,
        Duration::hours(state.session_ttl_hours),
    )
    .await
    .map_err(CampusError::Database)?;

    let response = AuthResponse {
        token: session.token,
        user: user_response(db_user)?,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let db_user = campusync_db::repositories::user::verify_credentials(
        &state.db_pool,
        &payload.email,
        &payload.password,
    )
    .await
    .map_err(CampusError::Database)?
    .ok_or_else(|| CampusError::Authentication("Invalid credentials".to_string()))?;

    let session = campusync_db::repositories::session::create_session(
        &state.db_pool,
        db_user.id,
        Duration::hours(state.session_ttl_hours),
    )
    .await
    .map_err(CampusError::Database)?;

    let response = AuthResponse {
        token: session.token,
        user: user_response(db_user)?,
    };

    Ok(Json(response))
}

pub async fn current_user(user: auth::AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        class_id: user.class_id,
    })
}

#[axum::debug_handler]
pub async fn list_faculties(
    State(state): State<Arc<ApiState>>,
    _user: auth::AuthUser,
) -> Result<Json<Vec<FacultySummary>>, AppError> {
    let faculties = campusync_db::repositories::user::list_faculty(&state.db_pool)
        .await
        .map_err(CampusError::Database)?;

    let summaries = faculties
        .into_iter()
        .map(|f| FacultySummary {
            id: f.id,
            name: f.name,
        })
        .collect();

    Ok(Json(summaries))
}

#[axum::debug_handler]
pub async fn assign_class(
    State(state): State<Arc<ApiState>>,
    user: auth::AuthUser,
    Json(payload): Json<AssignClassRequest>,
) -> Result<Json<UserResponse>, AppError> {
    user.require_role(Role::Admin)?;

    let target = campusync_db::repositories::user::get_user_by_id(&state.db_pool, payload.user_id)
        .await
        .map_err(CampusError::Database)?;
    match target {
        Some(ref u) if u.role == Role::Student.as_str() => {}
        _ => {
            return Err(AppError(CampusError::NotFound(
                "Student not found".to_string(),
            )))
        }
    }

    campusync_db::repositories::class::get_class_by_id(&state.db_pool, &payload.class_id)
        .await
        .map_err(CampusError::Database)?
        .ok_or_else(|| {
            CampusError::NotFound(format!("Class {} not found", payload.class_id))
        })?;

    let updated = campusync_db::repositories::user::set_user_class(
        &state.db_pool,
        payload.user_id,
        &payload.class_id,
    )
    .await
    .map_err(CampusError::Database)?;

    Ok(Json(user_response(updated)?))
}
