use std::collections::HashSet;

use campusync_api::middleware::error_handling::AppError;
use campusync_api::stats::{domain_slot, resolve_exclusions, slot_response};
use campusync_core::errors::CampusError;
use campusync_core::models::timetable::ClassTimetableResponse;
use campusync_core::stats::{class_stats, Weekday};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{
    date, sample_class, sample_holiday_row, sample_slot_row, MockFeed, TestContext,
};

// Test wrapper mirroring the student-timetable flow against mocks: load the
// class, load its slots and the holiday list, resolve exclusions, fold.
async fn test_student_timetable_wrapper(
    ctx: &mut TestContext,
    feed: &MockFeed,
    class_id: &'static str,
) -> Result<ClassTimetableResponse, AppError> {
    let class = match ctx.class_repo.get_class_by_id(class_id).await? {
        Some(class) => class,
        None => {
            return Err(AppError(CampusError::NotFound(format!(
                "Class {} not found",
                class_id
            ))))
        }
    };

    let days: Vec<Weekday> = campusync_api::stats::parse_day_tags(&class.active_days)?;

    let rows = ctx.timetable_repo.get_slots_by_class(class_id).await?;
    let holidays = ctx.calendar_repo.list_holidays().await?;

    let exclusions =
        resolve_exclusions(holidays.iter().map(|h| h.date).collect(), feed).await;

    let slots = rows
        .iter()
        .map(domain_slot)
        .collect::<Result<Vec<_>, _>>()?;
    let active: HashSet<Weekday> = days.iter().copied().collect();
    let stats = class_stats(
        class.start_date.unwrap(),
        class.end_date.unwrap(),
        &active,
        &exclusions,
        &slots,
    );

    let timetable = rows
        .into_iter()
        .map(slot_response)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ClassTimetableResponse {
        timetable,
        days,
        stats,
    })
}

#[tokio::test]
async fn test_student_timetable_stats_without_holidays() {
    let mut ctx = TestContext::new();
    let mut feed = MockFeed::new();
    feed.expect_fetch().returning(|| Ok(Vec::new()));

    // Term Wed 2025-01-01 through Tue 2025-01-07, work-week class
    ctx.class_repo
        .expect_get_class_by_id()
        .returning(|id| Ok(Some(sample_class(id, &["Mon", "Tue", "Wed", "Thu", "Fri"]))));
    ctx.timetable_repo.expect_get_slots_by_class().returning(|id| {
        Ok(vec![
            sample_slot_row(id, "Wed", "CS"),
            sample_slot_row(id, "Fri", "CS"),
        ])
    });
    ctx.calendar_repo.expect_list_holidays().returning(|| Ok(Vec::new()));

    let response = test_student_timetable_wrapper(&mut ctx, &feed, "CS-A")
        .await
        .unwrap();

    assert_eq!(response.stats.total_days, 7);
    assert_eq!(response.stats.lecture_days, 5);
    assert_eq!(response.stats.total_lectures, 2);
    assert_eq!(response.stats.subject_lectures.get("CS"), Some(&2));
    assert_eq!(response.timetable.len(), 2);
}

#[tokio::test]
async fn test_student_timetable_stats_with_local_holiday() {
    let mut ctx = TestContext::new();
    let mut feed = MockFeed::new();
    feed.expect_fetch().returning(|| Ok(Vec::new()));

    ctx.class_repo
        .expect_get_class_by_id()
        .returning(|id| Ok(Some(sample_class(id, &["Mon", "Tue", "Wed", "Thu", "Fri"]))));
    ctx.timetable_repo.expect_get_slots_by_class().returning(|id| {
        Ok(vec![
            sample_slot_row(id, "Wed", "CS"),
            sample_slot_row(id, "Fri", "CS"),
        ])
    });
    // New Year's Day knocks out the Wed slot
    ctx.calendar_repo
        .expect_list_holidays()
        .returning(|| Ok(vec![sample_holiday_row("New Year", date(2025, 1, 1))]));

    let response = test_student_timetable_wrapper(&mut ctx, &feed, "CS-A")
        .await
        .unwrap();

    assert_eq!(response.stats.lecture_days, 4);
    assert_eq!(response.stats.total_lectures, 1);
    assert_eq!(response.stats.subject_lectures.get("CS"), Some(&1));
}

#[tokio::test]
async fn test_student_timetable_stats_survive_feed_outage() {
    let mut ctx = TestContext::new();
    let mut feed = MockFeed::new();
    feed.expect_fetch()
        .returning(|| Err(eyre::eyre!("feed unreachable")));

    ctx.class_repo
        .expect_get_class_by_id()
        .returning(|id| Ok(Some(sample_class(id, &["Mon", "Tue", "Wed", "Thu", "Fri"]))));
    ctx.timetable_repo
        .expect_get_slots_by_class()
        .returning(|id| Ok(vec![sample_slot_row(id, "Wed", "CS")]));
    ctx.calendar_repo.expect_list_holidays().returning(|| Ok(Vec::new()));

    let response = test_student_timetable_wrapper(&mut ctx, &feed, "CS-A")
        .await
        .unwrap();

    // Feed failure only shrinks the exclusion set; the call still succeeds
    assert_eq!(response.stats.total_days, 7);
    assert_eq!(response.stats.total_lectures, 1);
}

#[tokio::test]
async fn test_student_timetable_missing_class_is_not_found() {
    let mut ctx = TestContext::new();
    let feed = MockFeed::new();

    ctx.class_repo
        .expect_get_class_by_id()
        .returning(|_| Ok(None));

    let result = test_student_timetable_wrapper(&mut ctx, &feed, "ghost").await;

    match result {
        Err(AppError(CampusError::NotFound(_))) => {}
        other => panic!("Expected NotFound, got {:?}", other.map(|_| ())),
    }
}

// Wrapper mirroring the faculty-reference validation of timetable creation
async fn test_validate_faculty_wrapper(
    ctx: &mut TestContext,
    referenced: Vec<Uuid>,
) -> Result<(), AppError> {
    let missing = ctx.user_repo.missing_faculty_ids(referenced).await?;
    if !missing.is_empty() {
        let ids: Vec<String> = missing.iter().map(ToString::to_string).collect();
        return Err(AppError(CampusError::Validation(format!(
            "Invalid faculty IDs: {}",
            ids.join(", ")
        ))));
    }
    Ok(())
}

#[tokio::test]
async fn test_create_timetable_rejects_unknown_faculty() {
    let mut ctx = TestContext::new();
    let ghost = Uuid::new_v4();

    ctx.user_repo
        .expect_missing_faculty_ids()
        .returning(move |_| Ok(vec![ghost]));

    let result = test_validate_faculty_wrapper(&mut ctx, vec![ghost]).await;

    match result {
        Err(AppError(CampusError::Validation(message))) => {
            assert!(message.contains(&ghost.to_string()));
        }
        other => panic!("Expected Validation, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_create_timetable_accepts_known_faculty() {
    let mut ctx = TestContext::new();

    ctx.user_repo
        .expect_missing_faculty_ids()
        .returning(|_| Ok(Vec::new()));

    assert!(test_validate_faculty_wrapper(&mut ctx, vec![Uuid::new_v4()])
        .await
        .is_ok());
}

#[tokio::test]
async fn test_faculty_view_reports_raw_slot_tally() {
    let mut ctx = TestContext::new();
    let faculty_id = Uuid::new_v4();

    ctx.timetable_repo
        .expect_get_slots_by_faculty()
        .returning(move |fid| {
            let mut a1 = sample_slot_row("A", "Mon", "CS");
            let mut a2 = sample_slot_row("A", "Thu", "CS");
            let mut b1 = sample_slot_row("B", "Tue", "CS");
            a1.faculty_id = fid;
            a2.faculty_id = fid;
            b1.faculty_id = fid;
            Ok(vec![a1, a2, b1])
        });

    let rows = ctx
        .timetable_repo
        .get_slots_by_faculty(faculty_id)
        .await
        .unwrap();
    let tally = campusync_api::stats::faculty_snapshot(&rows).unwrap();

    // Raw weekly counts keyed by "subject (class)", no date expansion
    assert_eq!(tally.get("CS (A)"), Some(&2));
    assert_eq!(tally.get("CS (B)"), Some(&1));
}
