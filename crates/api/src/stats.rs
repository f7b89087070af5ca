//! # Stats Engine Orchestration
//!
//! Composes the pieces of a lecture-statistics computation:
//!
//! 1. Resolve the exclusion set: every locally stored holiday merged with
//!    the national holidays fetched from the external feed.
//! 2. Expand the class term's date range and aggregate per-subject lecture
//!    counts (`campusync_core::stats`).
//!
//! The external feed is the only network-bound step and is strictly
//! best-effort: a failed or malformed fetch logs a warning and the
//! computation proceeds with the local holiday set alone. Feed problems are
//! never surfaced to callers.
//!
//! There is no caching layer. Each computation reloads holidays and slots
//! and re-fetches the feed, so a snapshot is always a pure function of
//! current stored state plus the feed at computation time.

use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use campusync_core::errors::CampusError;
use campusync_core::models::timetable::{SlotResponse, TimetableSlot};
use campusync_core::stats::{self, LectureStats, Weekday};
use campusync_db::models::DbTimetableSlotWithFaculty;

use crate::feed::NationalHolidayFeed;

/// Builds the exclusion set for lecture counting.
///
/// Local holidays always participate, regardless of the year being
/// computed. The feed contributes the configured year's national holidays
/// when reachable; otherwise the local set stands alone.
pub async fn resolve_exclusions(
    local_dates: Vec<NaiveDate>,
    feed: &dyn NationalHolidayFeed,
) -> HashSet<NaiveDate> {
    let national = match feed.fetch().await {
        Ok(dates) => dates,
        Err(err) => {
            tracing::warn!("Failed to fetch national holidays: {}", err);
            Vec::new()
        }
    };

    stats::merge_exclusions(local_dates, national)
}

/// Converts a stored slot row into the domain slot the aggregator consumes.
/// A day tag that no longer parses indicates corrupted storage, not bad
/// caller input.
pub fn domain_slot(row: &DbTimetableSlotWithFaculty) -> Result<TimetableSlot, CampusError> {
    Ok(TimetableSlot {
        id: row.id,
        class_id: row.class_id.clone(),
        faculty_id: row.faculty_id,
        day: row
            .day
            .parse()
            .map_err(|e: String| CampusError::Internal(e.into()))?,
        start_time: row.start_time.clone(),
        end_time: row.end_time.clone(),
        subject: row.subject.clone(),
    })
}

pub fn slot_response(row: DbTimetableSlotWithFaculty) -> Result<SlotResponse, CampusError> {
    let day = row
        .day
        .parse()
        .map_err(|e: String| CampusError::Internal(e.into()))?;

    Ok(SlotResponse {
        id: row.id,
        class_id: row.class_id,
        day,
        start_time: row.start_time,
        end_time: row.end_time,
        subject: row.subject,
        faculty_id: row.faculty_id,
        faculty_name: row.faculty_name,
    })
}

/// Parses the stored weekday tags of a class term.
pub fn parse_day_tags(tags: &[String]) -> Result<Vec<Weekday>, CampusError> {
    tags.iter()
        .map(|tag| {
            tag.parse()
                .map_err(|e: String| CampusError::Internal(e.into()))
        })
        .collect()
}

/// Computes the statistics snapshot for one class term.
///
/// Loads the class's slots and the full holiday set, resolves exclusions
/// (including the external feed), and folds the date range. Returns the
/// slot list alongside the snapshot so callers can respond and broadcast
/// without a second load.
pub async fn class_snapshot(
    pool: &PgPool,
    feed: &dyn NationalHolidayFeed,
    class_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    days: &[Weekday],
) -> Result<(Vec<SlotResponse>, LectureStats), CampusError> {
    let rows = campusync_db::repositories::timetable::get_slots_by_class(pool, class_id)
        .await
        .map_err(CampusError::Database)?;

    let holidays = campusync_db::repositories::calendar::list_holidays(pool)
        .await
        .map_err(CampusError::Database)?;

    let exclusions =
        resolve_exclusions(holidays.iter().map(|h| h.date).collect(), feed).await;

    let slots = rows
        .iter()
        .map(domain_slot)
        .collect::<Result<Vec<_>, _>>()?;
    let active: HashSet<Weekday> = days.iter().copied().collect();
    let snapshot = stats::class_stats(start, end, &active, &exclusions, &slots);

    let responses = rows
        .into_iter()
        .map(slot_response)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((responses, snapshot))
}

/// Computes the faculty member's cross-class subject tally from their slot
/// rows. Raw weekly slot counts, not date-expanded lecture counts.
pub fn faculty_snapshot(
    rows: &[DbTimetableSlotWithFaculty],
) -> Result<std::collections::BTreeMap<String, u32>, CampusError> {
    let slots = rows
        .iter()
        .map(domain_slot)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(stats::faculty_subject_tally(&slots))
}

/// Faculty identities referenced by a slot set, deduplicated for broadcast
/// scoping.
pub fn faculty_ids(slots: &[SlotResponse]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = slots.iter().map(|slot| slot.faculty_id).collect();
    ids.sort();
    ids.dedup();
    ids
}
