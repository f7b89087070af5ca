//! # Broadcast Gate
//!
//! Push channel for live updates. Whenever a timetable, holiday, or event
//! mutation lands, the handling request recomputes the affected statistics
//! and publishes the result here; connected clients receive it over the SSE
//! stream endpoint.
//!
//! Delivery is fire-and-forget: there is no acknowledgement and no replay.
//! A client that was disconnected at publish time re-fetches current state
//! through the pull endpoints instead of relying on the stream.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use campusync_core::models::calendar::{EventResponse, HolidayResponse};
use campusync_core::models::timetable::SlotResponse;
use campusync_core::stats::{LectureStats, Weekday};

/// Payload published after a class timetable is replaced.
#[derive(Debug, Clone, Serialize)]
pub struct TimetableUpdate {
    pub class_id: String,
    pub faculty_ids: Vec<Uuid>,
    pub timetable: Vec<SlotResponse>,
    pub days: Vec<Weekday>,
    #[serde(flatten)]
    pub stats: LectureStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum CampusMessage {
    TimetableUpdated(TimetableUpdate),
    HolidaysUpdated(Vec<HolidayResponse>),
    EventsUpdated(Vec<EventResponse>),
}

impl CampusMessage {
    /// SSE event name for this message.
    pub fn name(&self) -> &'static str {
        match self {
            CampusMessage::TimetableUpdated(_) => "timetableUpdated",
            CampusMessage::HolidaysUpdated(_) => "holidaysUpdated",
            CampusMessage::EventsUpdated(_) => "eventsUpdated",
        }
    }

    /// Whether a subscriber scoped to a class or a faculty member should
    /// receive this message. Unscoped subscribers receive everything.
    /// Calendar changes affect lecture counting for every class, so they are
    /// never filtered out.
    pub fn matches(&self, class_id: Option<&str>, faculty_id: Option<Uuid>) -> bool {
        match self {
            CampusMessage::TimetableUpdated(update) => {
                let class_ok = class_id.map_or(true, |id| update.class_id == id);
                let faculty_ok = faculty_id.map_or(true, |id| update.faculty_ids.contains(&id));
                class_ok && faculty_ok
            }
            CampusMessage::HolidaysUpdated(_) | CampusMessage::EventsUpdated(_) => true,
        }
    }
}

/// Handle to the broadcast channel, constructed once at startup and shared
/// through the application state.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<CampusMessage>,
}

impl Broadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishes a message to all current subscribers.
    ///
    /// A send error only means nobody is subscribed right now, which is
    /// fine under broadcast semantics, so it is ignored.
    pub fn publish(&self, message: CampusMessage) {
        tracing::debug!(
            "Broadcasting {} to {} subscribers",
            message.name(),
            self.tx.receiver_count()
        );
        let _ = self.tx.send(message);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CampusMessage> {
        self.tx.subscribe()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new(64)
    }
}
