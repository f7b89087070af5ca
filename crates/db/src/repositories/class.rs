use crate::models::DbClass;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};

pub async fn create_class(
    pool: &Pool<Postgres>,
    id: &str,
    name: &str,
    course: &str,
) -> Result<DbClass> {
    tracing::debug!("Creating class: id={}, name={}", id, name);

    let class = sqlx::query_as::<_, DbClass>(
        r#"
        INSERT INTO classes (id, name, course)
        VALUES ($1, $2, $3)
        RETURNING id, name, course, start_date, end_date, active_days, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(course)
    .fetch_one(pool)
    .await?;

    Ok(class)
}

pub async fn get_class_by_id(pool: &Pool<Postgres>, id: &str) -> Result<Option<DbClass>> {
    let class = sqlx::query_as::<_, DbClass>(
        r#"
        SELECT id, name, course, start_date, end_date, active_days, created_at
        FROM classes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(class)
}

pub async fn list_classes(pool: &Pool<Postgres>) -> Result<Vec<DbClass>> {
    let classes = sqlx::query_as::<_, DbClass>(
        r#"
        SELECT id, name, course, start_date, end_date, active_days, created_at
        FROM classes
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(classes)
}

/// Replaces the class's term wholesale: start date, end date, and the set of
/// active weekdays.
pub async fn update_class_term(
    pool: &Pool<Postgres>,
    id: &str,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
    active_days: &[String],
) -> Result<DbClass> {
    let class = sqlx::query_as::<_, DbClass>(
        r#"
        UPDATE classes
        SET start_date = $2, end_date = $3, active_days = $4
        WHERE id = $1
        RETURNING id, name, course, start_date, end_date, active_days, created_at
        "#,
    )
    .bind(id)
    .bind(start_date)
    .bind(end_date)
    .bind(active_days)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Class not found"))?;

    Ok(class)
}
