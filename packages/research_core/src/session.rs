use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::connection::ConnectionEvent;
use crate::frame::FrameUpdate;

/// A single progress entry in the session's message log.
///
/// Entries keep the raw `content` payload of a stream frame; how it is shown
/// is decided by [`crate::render::render_entry`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntry(Value);

impl LogEntry {
    pub fn new(content: Value) -> Self {
        Self(content)
    }

    pub fn content(&self) -> &Value {
        &self.0
    }
}

/// Which panel the presentation surface should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been submitted yet.
    Idle,
    /// A topic was submitted and no report has arrived.
    InProgress,
    /// The backend delivered the final report.
    Complete,
}

/// The outcome of applying a connection event to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The event belonged to a connection from an earlier session.
    Ignored,
    StatusChanged,
    Appended,
    Completed,
    Metadata,
}

/// State of the one research session that is live in the window.
///
/// Only the connection manager writes to it: [`Session::begin`] when a topic
/// is submitted and [`Session::apply`] for every event of the connection it
/// opened. Views read it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    id: Option<Uuid>,
    topic: String,
    messages: Vec<LogEntry>,
    report: Option<String>,
    connected: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was live with a fresh session for `topic`.
    pub fn begin(&mut self, id: Uuid, topic: impl Into<String>) {
        *self = Self {
            id: Some(id),
            topic: topic.into(),
            messages: Vec::new(),
            report: None,
            connected: false,
        };
        tracing::info!(session_id = %id, topic = %self.topic, "Session started.");
    }

    /// Applies an event from the connection identified by `source`.
    ///
    /// Events from any connection other than the current session's are
    /// ignored, so a superseded socket closing late cannot flip the
    /// connection flag of its successor.
    pub fn apply(&mut self, source: Uuid, event: ConnectionEvent) -> Applied {
        if self.id != Some(source) {
            tracing::debug!(session_id = %source, "Dropping event from a superseded connection.");
            return Applied::Ignored;
        }

        match event {
            ConnectionEvent::Opened => {
                self.connected = true;
                Applied::StatusChanged
            }
            ConnectionEvent::Closed | ConnectionEvent::Failed(_) => {
                self.connected = false;
                Applied::StatusChanged
            }
            ConnectionEvent::Frame(FrameUpdate::Log(entry)) => {
                self.messages.push(entry);
                Applied::Appended
            }
            ConnectionEvent::Frame(FrameUpdate::Report(report)) => {
                tracing::info!(session_id = %source, len = report.len(), "Report received.");
                self.report = Some(report);
                Applied::Completed
            }
            ConnectionEvent::Frame(FrameUpdate::Metadata(metadata)) => {
                tracing::info!(session_id = %source, %metadata, "Metadata received.");
                Applied::Metadata
            }
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.id, &self.report) {
            (None, _) => Phase::Idle,
            (Some(_), None) => Phase::InProgress,
            (Some(_), Some(_)) => Phase::Complete,
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn messages(&self) -> &[LogEntry] {
        &self.messages
    }

    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn log(value: Value) -> ConnectionEvent {
        ConnectionEvent::Frame(FrameUpdate::Log(LogEntry::new(value)))
    }

    #[test]
    fn new_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.messages().is_empty());
        assert!(!session.is_connected());
    }

    #[test]
    fn begin_clears_previous_log_and_report() {
        let mut session = Session::new();
        let first = Uuid::new_v4();
        session.begin(first, "rust");
        session.apply(first, ConnectionEvent::Opened);
        session.apply(first, log(json!("one")));
        session.apply(
            first,
            ConnectionEvent::Frame(FrameUpdate::Report("done".into())),
        );
        assert_eq!(session.phase(), Phase::Complete);

        let second = Uuid::new_v4();
        session.begin(second, "go");
        assert_eq!(session.topic(), "go");
        assert!(session.messages().is_empty());
        assert_eq!(session.report(), None);
        assert!(!session.is_connected());
        assert_eq!(session.phase(), Phase::InProgress);
    }

    #[test]
    fn log_preserves_arrival_order_and_skips_metadata() {
        let mut session = Session::new();
        let id = Uuid::new_v4();
        session.begin(id, "topic");

        session.apply(id, log(json!({"a": 1})));
        assert_eq!(
            session.apply(
                id,
                ConnectionEvent::Frame(FrameUpdate::Metadata(json!({"m": true})))
            ),
            Applied::Metadata
        );
        session.apply(id, log(json!("b")));

        assert_eq!(
            session.messages(),
            &[LogEntry::new(json!({"a": 1})), LogEntry::new(json!("b"))]
        );
    }

    #[test]
    fn report_is_set_exactly_regardless_of_log() {
        let mut session = Session::new();
        let id = Uuid::new_v4();
        session.begin(id, "topic");
        session.apply(id, log(json!("x")));

        let applied = session.apply(
            id,
            ConnectionEvent::Frame(FrameUpdate::Report("Summary: ...".into())),
        );

        assert_eq!(applied, Applied::Completed);
        assert_eq!(session.report(), Some("Summary: ..."));
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn frames_after_the_report_leave_the_session_complete() {
        let mut session = Session::new();
        let id = Uuid::new_v4();
        session.begin(id, "topic");
        session.apply(id, ConnectionEvent::Opened);

        session.apply(id, ConnectionEvent::Frame(FrameUpdate::Report("R1".into())));
        assert_eq!(session.apply(id, log(json!("late"))), Applied::Appended);
        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(
            session.apply(id, ConnectionEvent::Frame(FrameUpdate::Report("R2".into()))),
            Applied::Completed
        );
        session.apply(id, ConnectionEvent::Closed);

        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(session.report(), Some("R2"));
        assert_eq!(session.messages(), &[LogEntry::new(json!("late"))]);
        assert!(!session.is_connected());
    }

    #[test]
    fn connection_flag_follows_lifecycle() {
        let mut session = Session::new();
        let id = Uuid::new_v4();
        session.begin(id, "topic");

        session.apply(id, ConnectionEvent::Opened);
        assert!(session.is_connected());
        session.apply(id, ConnectionEvent::Failed("reset".into()));
        assert!(!session.is_connected());

        session.apply(id, ConnectionEvent::Opened);
        session.apply(id, ConnectionEvent::Closed);
        assert!(!session.is_connected());
    }

    #[test]
    fn events_from_superseded_connection_are_ignored() {
        let mut session = Session::new();
        let old = Uuid::new_v4();
        session.begin(old, "old");
        let new = Uuid::new_v4();
        session.begin(new, "new");
        session.apply(new, ConnectionEvent::Opened);

        assert_eq!(session.apply(old, ConnectionEvent::Closed), Applied::Ignored);
        assert_eq!(session.apply(old, log(json!("stale"))), Applied::Ignored);
        assert!(session.is_connected());
        assert!(session.messages().is_empty());
    }
}
