//! Core of the research client: the session model, the wire frames and the
//! WebSocket connection to the research backend. Nothing here depends on the
//! UI toolkit.

pub mod client;
pub mod connection;
pub mod endpoint;
pub mod frame;
pub mod render;
pub mod session;
pub mod topic;

pub use client::{ResearchClient, SubmitError, Submission};
pub use connection::{ConnectionEvent, ConnectionHandle};
pub use endpoint::{research_endpoint, EndpointError};
pub use frame::{Frame, FrameError, FrameKind, FrameUpdate};
pub use render::{render_entry, report_lines, EntryView, ReportLine};
pub use session::{Applied, LogEntry, Phase, Session};
pub use topic::{Topic, TopicError};
