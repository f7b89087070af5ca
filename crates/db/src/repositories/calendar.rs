use crate::models::{DbCalendarEvent, DbCalendarEventWithCreator, DbHoliday, DbHolidayWithCreator};
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn insert_holiday(
    pool: &Pool<Postgres>,
    name: &str,
    date: NaiveDate,
    created_by: Uuid,
) -> Result<DbHoliday> {
    tracing::debug!("Adding holiday {} on {}", name, date);

    let holiday = sqlx::query_as::<_, DbHoliday>(
        r#"
        INSERT INTO holidays (id, name, date, created_by)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, date, created_by, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(date)
    .bind(created_by)
    .fetch_one(pool)
    .await?;

    Ok(holiday)
}

/// Lists every stored holiday. Deliberately not filtered by year: all local
/// holidays participate in exclusion regardless of the term being computed.
pub async fn list_holidays(pool: &Pool<Postgres>) -> Result<Vec<DbHolidayWithCreator>> {
    let holidays = sqlx::query_as::<_, DbHolidayWithCreator>(
        r#"
        SELECT h.id, h.name, h.date, h.created_by, u.name AS created_by_name
        FROM holidays h
        JOIN users u ON u.id = h.created_by
        ORDER BY h.date ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(holidays)
}

pub async fn insert_event(
    pool: &Pool<Postgres>,
    name: &str,
    date: NaiveDate,
    description: Option<&str>,
    created_by: Uuid,
) -> Result<DbCalendarEvent> {
    tracing::debug!("Adding event {} on {}", name, date);

    let event = sqlx::query_as::<_, DbCalendarEvent>(
        r#"
        INSERT INTO calendar_events (id, name, date, description, created_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, date, description, created_by, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(date)
    .bind(description)
    .bind(created_by)
    .fetch_one(pool)
    .await?;

    Ok(event)
}

pub async fn list_events(pool: &Pool<Postgres>) -> Result<Vec<DbCalendarEventWithCreator>> {
    let events = sqlx::query_as::<_, DbCalendarEventWithCreator>(
        r#"
        SELECT e.id, e.name, e.date, e.description, e.created_by, u.name AS created_by_name
        FROM calendar_events e
        JOIN users u ON u.id = e.created_by
        ORDER BY e.date ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(events)
}
