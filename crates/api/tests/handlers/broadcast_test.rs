use campusync_api::broadcast::{Broadcaster, CampusMessage, TimetableUpdate};
use campusync_core::stats::{LectureStats, Weekday};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::TestContext;

fn timetable_update(class_id: &str, faculty_ids: Vec<Uuid>) -> CampusMessage {
    CampusMessage::TimetableUpdated(TimetableUpdate {
        class_id: class_id.to_string(),
        faculty_ids,
        timetable: Vec::new(),
        days: vec![Weekday::Mon, Weekday::Wed],
        stats: LectureStats::default(),
    })
}

#[tokio::test]
async fn test_subscribers_receive_published_messages() {
    let broadcaster = Broadcaster::new(8);
    let mut rx = broadcaster.subscribe();

    broadcaster.publish(timetable_update("CS-A", vec![]));

    let received = rx.recv().await.unwrap();
    assert_eq!(received.name(), "timetableUpdated");
}

#[test]
fn test_publish_without_subscribers_is_fire_and_forget() {
    let broadcaster = Broadcaster::new(8);

    // Nobody is listening; publish must not fail or panic
    broadcaster.publish(CampusMessage::HolidaysUpdated(Vec::new()));
}

#[test]
fn test_class_scoped_subscription_filters_other_classes() {
    let message = timetable_update("CS-A", vec![]);

    assert!(message.matches(Some("CS-A"), None));
    assert!(!message.matches(Some("CS-B"), None));
    assert!(message.matches(None, None));
}

#[test]
fn test_faculty_scoped_subscription_filters_unrelated_faculty() {
    let teaching = Uuid::new_v4();
    let other = Uuid::new_v4();
    let message = timetable_update("CS-A", vec![teaching]);

    assert!(message.matches(None, Some(teaching)));
    assert!(!message.matches(None, Some(other)));
}

#[test]
fn test_calendar_updates_reach_every_scope() {
    // Holiday and event changes affect lecture counts everywhere, so
    // scoped subscribers still receive them
    let message = CampusMessage::HolidaysUpdated(Vec::new());

    assert!(message.matches(Some("CS-A"), None));
    assert!(message.matches(None, Some(Uuid::new_v4())));
}

#[test]
fn test_message_wire_format_is_tagged_by_event() {
    let json = serde_json::to_string(&CampusMessage::EventsUpdated(Vec::new())).unwrap();

    assert!(json.contains("\"event\":\"eventsUpdated\""));
    assert!(json.contains("\"data\""));
}

#[tokio::test]
async fn test_state_carries_injected_broadcaster() {
    // The gate is constructed once and shared through the state, so a
    // handler publish reaches a subscriber holding the same state
    let ctx = TestContext::new();
    let state = ctx.build_state();

    let mut rx = state.broadcaster.subscribe();
    state
        .broadcaster
        .publish(CampusMessage::EventsUpdated(Vec::new()));

    let received = rx.recv().await.unwrap();
    assert_eq!(received.name(), "eventsUpdated");
}

#[tokio::test]
async fn test_lagged_subscriber_skips_missed_messages() {
    let broadcaster = Broadcaster::new(1);
    let mut rx = broadcaster.subscribe();

    // Overflow the single-message capacity
    broadcaster.publish(timetable_update("CS-A", vec![]));
    broadcaster.publish(timetable_update("CS-B", vec![]));

    // First receive reports the lag, the next one delivers the latest
    // message; older ones are gone for good (no replay)
    assert!(rx.recv().await.is_err());
    let latest = rx.recv().await.unwrap();
    match latest {
        CampusMessage::TimetableUpdated(update) => assert_eq!(update.class_id, "CS-B"),
        other => panic!("Unexpected message: {}", other.name()),
    }
}
