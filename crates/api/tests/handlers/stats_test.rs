use campusync_api::stats::{
    domain_slot, faculty_ids, parse_day_tags, resolve_exclusions, slot_response,
};
use campusync_core::stats::Weekday;
use pretty_assertions::assert_eq;

use crate::test_utils::{date, sample_slot_row, MockFeed};

#[tokio::test]
async fn test_resolve_exclusions_merges_feed_dates() {
    let mut feed = MockFeed::new();
    feed.expect_fetch()
        .returning(|| Ok(vec![date(2025, 1, 26), date(2025, 8, 15)]));

    let exclusions = resolve_exclusions(vec![date(2025, 1, 1)], &feed).await;

    assert_eq!(exclusions.len(), 3);
    assert!(exclusions.contains(&date(2025, 1, 1)));
    assert!(exclusions.contains(&date(2025, 1, 26)));
    assert!(exclusions.contains(&date(2025, 8, 15)));
}

#[tokio::test]
async fn test_resolve_exclusions_degrades_when_feed_fails() {
    // A failed feed must never error the computation; the local set stands.
    let mut feed = MockFeed::new();
    feed.expect_fetch()
        .returning(|| Err(eyre::eyre!("connection timed out")));

    let exclusions = resolve_exclusions(vec![date(2025, 1, 1)], &feed).await;

    assert_eq!(exclusions.len(), 1);
    assert!(exclusions.contains(&date(2025, 1, 1)));
}

#[tokio::test]
async fn test_resolve_exclusions_collapses_duplicates_across_sources() {
    let mut feed = MockFeed::new();
    feed.expect_fetch().returning(|| Ok(vec![date(2025, 1, 1)]));

    let exclusions = resolve_exclusions(vec![date(2025, 1, 1)], &feed).await;

    assert_eq!(exclusions.len(), 1);
}

#[test]
fn test_domain_slot_parses_stored_day_tag() {
    let row = sample_slot_row("CS-A", "Wed", "CS");
    let slot = domain_slot(&row).unwrap();

    assert_eq!(slot.day, Weekday::Wed);
    assert_eq!(slot.class_id, "CS-A");
    assert_eq!(slot.subject, "CS");
}

#[test]
fn test_domain_slot_rejects_corrupt_day_tag() {
    let mut row = sample_slot_row("CS-A", "Wed", "CS");
    row.day = "Wednesday".to_string();

    assert!(domain_slot(&row).is_err());
}

#[test]
fn test_slot_response_carries_faculty_name() {
    let row = sample_slot_row("CS-A", "Fri", "Maths");
    let response = slot_response(row.clone()).unwrap();

    assert_eq!(response.faculty_name, row.faculty_name);
    assert_eq!(response.day, Weekday::Fri);
}

#[test]
fn test_parse_day_tags() {
    let tags = vec!["Mon".to_string(), "Wed".to_string()];
    let days = parse_day_tags(&tags).unwrap();
    assert_eq!(days, vec![Weekday::Mon, Weekday::Wed]);

    let bad = vec!["Mon".to_string(), "monday".to_string()];
    assert!(parse_day_tags(&bad).is_err());
}

#[test]
fn test_faculty_ids_deduplicates() {
    let row_a = sample_slot_row("CS-A", "Mon", "CS");
    let mut row_b = sample_slot_row("CS-A", "Tue", "CS");
    row_b.faculty_id = row_a.faculty_id;
    let row_c = sample_slot_row("CS-B", "Wed", "Maths");

    let slots = vec![
        slot_response(row_a).unwrap(),
        slot_response(row_b).unwrap(),
        slot_response(row_c).unwrap(),
    ];

    assert_eq!(faculty_ids(&slots).len(), 2);
}
