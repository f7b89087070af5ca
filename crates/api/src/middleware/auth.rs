//! # Authentication Module
//!
//! This module provides authentication for the CampuSync API: Argon2
//! password hashing for account credentials and a request extractor that
//! resolves a bearer session token to a verified identity and role.
//!
//! Role checks gate every mutating operation before any engine or storage
//! work happens; handlers call [`AuthUser::require_role`] first.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use eyre::Result;
use std::sync::Arc;
use uuid::Uuid;

use campusync_core::errors::CampusError;
use campusync_core::models::user::Role;

use crate::{middleware::error_handling::AppError, ApiState};

/// Hashes a password using the Argon2 algorithm
///
/// This function securely hashes passwords before storage in the database,
/// automatically generating a random salt and using industry-standard
/// parameters for Argon2.
///
/// # Security Notes
///
/// - Uses a random salt for each password
/// - Uses default Argon2 parameters (memory: 19MiB, iterations: 3, parallelism: 4)
/// - Returns password in PHC string format (includes algorithm, version, parameters, salt, and hash)
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// A verified caller identity, resolved from the `Authorization: Bearer`
/// session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub class_id: Option<String>,
}

impl AuthUser {
    /// Rejects the request unless the caller holds the given role.
    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError(CampusError::Authorization(format!(
                "Requires {} role",
                role
            ))))
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError(CampusError::Authentication(
                    "Missing authorization token".to_string(),
                ))
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError(CampusError::Authentication(
                "Authorization header must use the Bearer scheme".to_string(),
            ))
        })?;

        let token = Uuid::parse_str(token.trim()).map_err(|_| {
            AppError(CampusError::Authentication("Invalid token".to_string()))
        })?;

        let user = campusync_db::repositories::session::get_user_by_token(&state.db_pool, token)
            .await
            .map_err(|e| AppError(CampusError::Database(e)))?
            .ok_or_else(|| {
                AppError(CampusError::Authentication(
                    "Invalid or expired token".to_string(),
                ))
            })?;

        let role: Role = user
            .role
            .parse()
            .map_err(|e: String| AppError(CampusError::Internal(e.into())))?;

        Ok(AuthUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role,
            class_id: user.class_id,
        })
    }
}
