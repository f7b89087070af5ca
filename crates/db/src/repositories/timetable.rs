use crate::models::{DbTimetableSlot, DbTimetableSlotWithFaculty, NewTimetableSlot};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Replaces a class's timetable with a new slot set.
///
/// Delete and insert run in one transaction so the replacement is
/// all-or-nothing; a failed insert leaves the previous timetable intact.
pub async fn replace_class_timetable(
    pool: &Pool<Postgres>,
    class_id: &str,
    slots: &[NewTimetableSlot],
) -> Result<Vec<DbTimetableSlot>> {
    tracing::debug!(
        "Replacing timetable for class {}: {} slots",
        class_id,
        slots.len()
    );

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM timetable_slots
        WHERE class_id = $1
        "#,
    )
    .bind(class_id)
    .execute(&mut *tx)
    .await?;

    let mut inserted = Vec::with_capacity(slots.len());
    for slot in slots {
        let row = sqlx::query_as::<_, DbTimetableSlot>(
            r#"
            INSERT INTO timetable_slots (id, class_id, faculty_id, day, start_time, end_time, subject)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, class_id, faculty_id, day, start_time, end_time, subject, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(class_id)
        .bind(slot.faculty_id)
        .bind(&slot.day)
        .bind(&slot.start_time)
        .bind(&slot.end_time)
        .bind(&slot.subject)
        .fetch_one(&mut *tx)
        .await?;
        inserted.push(row);
    }

    tx.commit().await?;

    Ok(inserted)
}

pub async fn get_slots_by_class(
    pool: &Pool<Postgres>,
    class_id: &str,
) -> Result<Vec<DbTimetableSlotWithFaculty>> {
    let slots = sqlx::query_as::<_, DbTimetableSlotWithFaculty>(
        r#"
        SELECT t.id, t.class_id, t.faculty_id, t.day, t.start_time, t.end_time, t.subject,
               u.name AS faculty_name
        FROM timetable_slots t
        JOIN users u ON u.id = t.faculty_id
        WHERE t.class_id = $1
        ORDER BY t.day ASC, t.start_time ASC
        "#,
    )
    .bind(class_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn get_slots_by_faculty(
    pool: &Pool<Postgres>,
    faculty_id: Uuid,
) -> Result<Vec<DbTimetableSlotWithFaculty>> {
    let slots = sqlx::query_as::<_, DbTimetableSlotWithFaculty>(
        r#"
        SELECT t.id, t.class_id, t.faculty_id, t.day, t.start_time, t.end_time, t.subject,
               u.name AS faculty_name
        FROM timetable_slots t
        JOIN users u ON u.id = t.faculty_id
        WHERE t.faculty_id = $1
        ORDER BY t.class_id ASC, t.day ASC, t.start_time ASC
        "#,
    )
    .bind(faculty_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}
