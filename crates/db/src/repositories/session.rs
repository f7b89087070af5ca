use crate::models::{DbSession, DbUser};
use chrono::{Duration, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_session(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    ttl: Duration,
) -> Result<DbSession> {
    let token = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating session for user {}", user_id);

    let session = sqlx::query_as::<_, DbSession>(
        r#"
        INSERT INTO sessions (token, user_id, created_at, expires_at)
        VALUES ($1, $2, $3, $4)
        RETURNING token, user_id, created_at, expires_at
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(now)
    .bind(now + ttl)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

/// Resolves a bearer token to its user. Expired tokens resolve to `None`.
pub async fn get_user_by_token(pool: &Pool<Postgres>, token: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT u.id, u.name, u.email, u.password_hash, u.role, u.class_id, u.created_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = $1 AND s.expires_at > NOW()
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
