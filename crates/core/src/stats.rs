//! # Lecture Statistics
//!
//! This module computes derived lecture-count statistics for a class term.
//! Given an inclusive date range, the set of weekdays on which the class
//! meets, and a set of excluded calendar dates (holidays), it classifies
//! every date in the range and aggregates per-subject lecture counts from
//! the weekly timetable.
//!
//! ## Counting Rules
//!
//! 1. Every date in `[start, end]` counts toward `total_days`.
//! 2. A date is a lecture day when its weekday is in the active set and its
//!    date is not excluded.
//! 3. Each lecture day contributes one lecture per timetable slot scheduled
//!    on that weekday; slots are tallied per subject.
//!
//! All computation is a pure fold from zero over the date range, so
//! recomputing with unchanged inputs always yields an identical snapshot.
//! Weekday classification uses an explicit ISO-numbered lookup table rather
//! than locale-formatted day names, so results do not depend on the runtime
//! environment.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::timetable::TimetableSlot;

/// Days of the week as stored in class schedules and timetable slots.
///
/// Serialized with the short English tags (`"Mon"` through `"Sun"`) used
/// throughout the API and the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// Lookup table indexed by ISO weekday number minus one (Monday = 1).
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

impl Weekday {
    /// Classifies a calendar date via the ISO weekday table.
    pub fn of(date: NaiveDate) -> Weekday {
        WEEKDAYS[(date.weekday().number_from_monday() - 1) as usize]
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mon" => Ok(Weekday::Mon),
            "Tue" => Ok(Weekday::Tue),
            "Wed" => Ok(Weekday::Wed),
            "Thu" => Ok(Weekday::Thu),
            "Fri" => Ok(Weekday::Fri),
            "Sat" => Ok(Weekday::Sat),
            "Sun" => Ok(Weekday::Sun),
            other => Err(format!("Unknown weekday tag: {}", other)),
        }
    }
}

/// Snapshot of lecture counts for one class term.
///
/// Derived on demand and never persisted. `subject_lectures` uses a
/// `BTreeMap` so key order is stable and snapshots compare deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LectureStats {
    pub total_days: u32,
    pub lecture_days: u32,
    pub total_lectures: u32,
    pub subject_lectures: BTreeMap<String, u32>,
}

/// Merges locally stored holiday dates with externally fetched national
/// holidays into a single exclusion set. Duplicates collapse under set
/// semantics.
pub fn merge_exclusions(
    local: impl IntoIterator<Item = NaiveDate>,
    national: impl IntoIterator<Item = NaiveDate>,
) -> HashSet<NaiveDate> {
    local.into_iter().chain(national).collect()
}

/// Walks every date in `[start, end]` in chronological order, pairing it
/// with whether it is a lecture day.
///
/// The sequence is lazy and restartable; an inverted range (`start > end`)
/// yields nothing rather than an error.
pub fn lecture_days<'a>(
    start: NaiveDate,
    end: NaiveDate,
    active: &'a HashSet<Weekday>,
    exclusions: &'a HashSet<NaiveDate>,
) -> impl Iterator<Item = (NaiveDate, bool)> + 'a {
    start
        .iter_days()
        .take_while(move |date| *date <= end)
        .map(move |date| {
            let is_lecture =
                active.contains(&Weekday::of(date)) && !exclusions.contains(&date);
            (date, is_lecture)
        })
}

/// Computes the lecture statistics snapshot for one class term.
///
/// Expands the date range, then for each lecture day counts the timetable
/// slots scheduled on that weekday, accumulating the overall total and a
/// per-subject tally.
pub fn class_stats(
    start: NaiveDate,
    end: NaiveDate,
    active: &HashSet<Weekday>,
    exclusions: &HashSet<NaiveDate>,
    slots: &[TimetableSlot],
) -> LectureStats {
    let mut stats = LectureStats::default();

    for (date, is_lecture) in lecture_days(start, end, active, exclusions) {
        stats.total_days += 1;
        if !is_lecture {
            continue;
        }
        stats.lecture_days += 1;

        let weekday = Weekday::of(date);
        for slot in slots.iter().filter(|slot| slot.day == weekday) {
            stats.total_lectures += 1;
            *stats
                .subject_lectures
                .entry(slot.subject.clone())
                .or_insert(0) += 1;
        }
    }

    stats
}

/// Tallies a faculty member's weekly slots across all classes they teach.
///
/// Keys are `"subject (class_id)"` so the same subject taught to different
/// classes stays distinct. This is a raw count of weekly slot occurrences,
/// not a date-expanded lecture count; the faculty view intentionally reports
/// the simpler figure.
pub fn faculty_subject_tally(slots: &[TimetableSlot]) -> BTreeMap<String, u32> {
    let mut tally = BTreeMap::new();
    for slot in slots {
        *tally
            .entry(format!("{} ({})", slot.subject, slot.class_id))
            .or_insert(0) += 1;
    }
    tally
}
