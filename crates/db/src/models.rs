use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub class_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub token: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClass {
    pub id: String,
    pub name: String,
    pub course: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub active_days: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimetableSlot {
    pub id: Uuid,
    pub class_id: String,
    pub faculty_id: Uuid,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub created_at: DateTime<Utc>,
}

/// Slot row joined with the teaching faculty member's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimetableSlotWithFaculty {
    pub id: Uuid,
    pub class_id: String,
    pub faculty_id: Uuid,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub faculty_name: String,
}

/// Column shape shared by a new slot before insertion.
#[derive(Debug, Clone)]
pub struct NewTimetableSlot {
    pub faculty_id: Uuid,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbHoliday {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Holiday row joined with the creating admin's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbHolidayWithCreator {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub created_by: Uuid,
    pub created_by_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCalendarEvent {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCalendarEventWithCreator {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_by_name: String,
}
