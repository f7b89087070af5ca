use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CampusError, CampusResult};
use crate::stats::{LectureStats, Weekday};

/// One recurring weekly teaching slot.
///
/// Times are wall-clock `HH:MM` strings with no timezone. Slots for the same
/// class may overlap; no conflict detection is performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableSlot {
    pub id: Uuid,
    pub class_id: String,
    pub faculty_id: Uuid,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimetableRequest {
    pub class_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<Weekday>,
    pub timetable: Vec<CreateSlotRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    pub day: Weekday,
    pub subject: String,
    pub faculty: Uuid,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotResponse {
    pub id: Uuid,
    pub class_id: String,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub faculty_id: Uuid,
    pub faculty_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassTimetableResponse {
    pub timetable: Vec<SlotResponse>,
    pub days: Vec<Weekday>,
    #[serde(flatten)]
    pub stats: LectureStats,
}

/// Faculty view: slots across every class the member teaches, with a raw
/// per-subject slot tally instead of date-expanded lecture counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyTimetableResponse {
    pub timetable: Vec<SlotResponse>,
    pub days: Vec<Weekday>,
    pub subject_lectures: BTreeMap<String, u32>,
}

/// Parses a wall-clock `HH:MM` string.
pub fn parse_wall_clock(value: &str) -> CampusResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| CampusError::Validation(format!("Invalid wall-clock time: {}", value)))
}

impl CreateSlotRequest {
    /// Checks the slot shape: non-empty subject, parseable times, and a
    /// start strictly before the end.
    pub fn validate(&self) -> CampusResult<()> {
        if self.subject.trim().is_empty() {
            return Err(CampusError::Validation(
                "Timetable slots must include a subject".to_string(),
            ));
        }

        let start = parse_wall_clock(&self.start_time)?;
        let end = parse_wall_clock(&self.end_time)?;
        if start >= end {
            return Err(CampusError::Validation(format!(
                "Slot start time {} must be before end time {}",
                self.start_time, self.end_time
            )));
        }

        Ok(())
    }
}
