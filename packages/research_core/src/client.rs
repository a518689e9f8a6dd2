use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

use crate::connection::{self, ConnectionEvent, ConnectionHandle};
use crate::endpoint::{research_endpoint, EndpointError};
use crate::session::Session;
use crate::topic::{Topic, TopicError};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

/// A freshly opened session's event stream.
pub struct Submission {
    pub session_id: Uuid,
    pub events: UnboundedReceiver<ConnectionEvent>,
}

/// Keeps at most one research connection open.
#[derive(Default)]
pub struct ResearchClient {
    active: Option<ConnectionHandle>,
}

impl ResearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new research session for `raw_topic` against `origin`.
    ///
    /// Validation happens before anything is touched: a blank topic or a bad
    /// origin leaves both the session and the current connection as they
    /// were. Otherwise the current connection is closed, `session` is reset
    /// to the new topic and exactly one new connection is opened.
    pub fn submit(
        &mut self,
        origin: &str,
        raw_topic: &str,
        session: &mut Session,
    ) -> Result<Submission, SubmitError> {
        let topic = Topic::parse(raw_topic)?;
        let endpoint = research_endpoint(origin)?;

        self.close();
        let (handle, events) = connection::open(endpoint, &topic);
        let session_id = handle.id();
        session.begin(session_id, topic.as_str());
        self.active = Some(handle);

        Ok(Submission { session_id, events })
    }

    /// Closes the current connection, if any.
    pub fn close(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.close();
        }
    }

    pub fn active_session(&self) -> Option<Uuid> {
        self.active.as_ref().map(ConnectionHandle::id)
    }
}
