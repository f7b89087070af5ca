use crate::models::DbUser;
use argon2::{Argon2, PasswordVerifier};
use campusync_core::models::user::Role;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_user(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    password_hash: &str,
    role: &str,
    class_id: Option<&str>,
) -> Result<DbUser> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Creating user: id={}, email={}, role={}, class_id={:?}",
        id,
        email,
        role,
        class_id
    );

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, class_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, email, password_hash, role, class_id, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(class_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, class_id, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, class_id, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list_faculty(pool: &Pool<Postgres>) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, class_id, created_at
        FROM users
        WHERE role = $1
        ORDER BY name ASC
        "#,
    )
    .bind(Role::Faculty.as_str())
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Returns the subset of `ids` that do not reference a faculty user.
pub async fn missing_faculty_ids(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<Vec<Uuid>> {
    let found: Vec<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id FROM users
        WHERE id = ANY($1) AND role = $2
        "#,
    )
    .bind(ids)
    .bind(Role::Faculty.as_str())
    .fetch_all(pool)
    .await?;

    Ok(ids
        .iter()
        .filter(|id| !found.contains(id))
        .copied()
        .collect())
}

pub async fn set_user_class(pool: &Pool<Postgres>, user_id: Uuid, class_id: &str) -> Result<DbUser> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET class_id = $2
        WHERE id = $1
        RETURNING id, name, email, password_hash, role, class_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(class_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("User not found"))?;

    Ok(user)
}

/// Checks an email/password pair. Returns the user when the password
/// matches, `None` when it does not or the email is unknown.
pub async fn verify_credentials(
    pool: &Pool<Postgres>,
    email: &str,
    password: &str,
) -> Result<Option<DbUser>> {
    let Some(user) = get_user_by_email(pool, email).await? else {
        return Ok(None);
    };

    let parsed_hash = argon2::PasswordHash::new(&user.password_hash)
        .map_err(|e| eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(is_valid.then_some(user))
}
