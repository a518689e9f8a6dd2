//! Inbound wire frames sent by the research backend.
//!
//! Every text frame is a JSON object of the shape
//! `{"type": "stream" | "metadata", "content": ...}`. Stream frames carry
//! either a progress update or, when `content.report.response` is a string,
//! the final report.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::LogEntry;

/// An error raised while decoding an inbound frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame is not valid JSON or lacks a known `type`: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("binary frame is not valid UTF-8")]
    NotUtf8,
}

/// The declared kind of an inbound frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    Stream,
    Metadata,
}

/// One decoded inbound message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "type")]
    pub kind: FrameKind,
    #[serde(default)]
    pub content: Value,
}

/// What a decoded frame means for the session.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameUpdate {
    /// A progress entry to append to the message log.
    Log(LogEntry),
    /// The terminal report text.
    Report(String),
    /// Side-channel information, never shown in the log.
    Metadata(Value),
}

impl Frame {
    /// Decodes a text frame.
    pub fn decode(text: &str) -> Result<Self, FrameError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decodes a binary frame by treating it as UTF-8 JSON text.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        let text = std::str::from_utf8(bytes).map_err(|_| FrameError::NotUtf8)?;
        Self::decode(text)
    }

    /// Classifies the frame by kind and payload.
    pub fn into_update(self) -> FrameUpdate {
        match self.kind {
            FrameKind::Metadata => FrameUpdate::Metadata(self.content),
            FrameKind::Stream => match report_response(&self.content) {
                Some(report) => FrameUpdate::Report(report.to_string()),
                None => FrameUpdate::Log(LogEntry::new(self.content)),
            },
        }
    }
}

/// Returns `content.report.response` when it is present and a string.
pub fn report_response(content: &Value) -> Option<&str> {
    content.get("report")?.get("response")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_stream_frame_as_log_entry() {
        let frame =
            Frame::decode(r#"{"type":"stream","content":{"text":"searching sources"}}"#).unwrap();
        assert_eq!(frame.kind, FrameKind::Stream);
        assert_eq!(
            frame.into_update(),
            FrameUpdate::Log(LogEntry::new(json!({"text": "searching sources"})))
        );
    }

    #[test]
    fn nested_report_response_is_terminal() {
        let frame = Frame::decode(
            r#"{"type":"stream","content":{"report":{"response":"Summary: done"}}}"#,
        )
        .unwrap();
        assert_eq!(
            frame.into_update(),
            FrameUpdate::Report("Summary: done".to_string())
        );
    }

    #[test]
    fn report_without_string_response_stays_in_the_log() {
        let content = json!({"report": {"response": 42}});
        assert_eq!(report_response(&content), None);

        let frame = Frame {
            kind: FrameKind::Stream,
            content: content.clone(),
        };
        assert_eq!(frame.into_update(), FrameUpdate::Log(LogEntry::new(content)));
    }

    #[test]
    fn metadata_frame_is_side_channel() {
        let frame =
            Frame::decode(r#"{"type":"metadata","content":{"search_queries":["a"]}}"#).unwrap();
        assert_eq!(
            frame.into_update(),
            FrameUpdate::Metadata(json!({"search_queries": ["a"]}))
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        let frame = Frame::decode(r#"{"type":"stream","content":"hi","seq":3}"#).unwrap();
        assert_eq!(frame.content, json!("hi"));
    }

    #[test]
    fn rejects_malformed_frames() {
        assert!(matches!(
            Frame::decode("not json"),
            Err(FrameError::Malformed(_))
        ));
        assert!(Frame::decode(r#"{"content":{}}"#).is_err());
        assert!(Frame::decode(r#"{"type":"error","content":{}}"#).is_err());
        assert!(matches!(
            Frame::decode_bytes(&[0xff, 0xfe]),
            Err(FrameError::NotUtf8)
        ));
    }

    #[test]
    fn decodes_binary_json() {
        let frame = Frame::decode_bytes(br#"{"type":"metadata","content":null}"#).unwrap();
        assert_eq!(frame.kind, FrameKind::Metadata);
    }
}
