use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::Weekday;

/// A class together with its active term.
///
/// The term triple (`start_date`, `end_date`, `active_days`) is owned by the
/// class and replaced wholesale whenever its timetable is recreated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    /// Caller-chosen identifier, e.g. "CS-2025-A".
    pub id: String,
    pub name: String,
    pub course: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub active_days: Vec<Weekday>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassRequest {
    pub id: String,
    pub name: String,
    pub course: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSummary {
    pub id: String,
    pub name: String,
}
