use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A locally stored holiday. Holidays exclude their date from lecture
/// counting. Created by admins; never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holiday {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A calendar event. Same shape as a holiday but purely advisory; events
/// never exclude lecture days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHolidayRequest {
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayResponse {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub created_by: Uuid,
    pub created_by_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_by_name: String,
}
