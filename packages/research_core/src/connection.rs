//! The WebSocket connection to the research backend.
//!
//! [`open`] spawns one task per connection. The task sends the topic as the
//! first and only outbound message, then forwards every decodable inbound
//! frame as a [`ConnectionEvent`]. Undecodable frames are logged and dropped.
//! There is no retry: a transport failure ends the connection.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use url::Url;
use uuid::Uuid;

use crate::frame::{Frame, FrameUpdate};
use crate::topic::Topic;

/// Something that happened on a research connection.
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionEvent {
    /// The socket is open and the topic has been sent.
    Opened,
    /// A decoded inbound frame.
    Frame(FrameUpdate),
    /// The connection ended normally, either side having closed it.
    Closed,
    /// The transport failed. Terminal for the connection.
    Failed(String),
}

/// Owner of one open research connection.
///
/// Closing or dropping the handle makes the connection task send a close
/// frame and stop.
pub struct ConnectionHandle {
    id: Uuid,
    shutdown: Option<oneshot::Sender<()>>,
}

impl ConnectionHandle {
    /// Identifier of the session this connection serves.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn close(mut self) {
        self.signal_shutdown();
    }

    fn signal_shutdown(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already have finished; nothing left to close then.
            let _ = shutdown.send(());
        }
    }
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}

/// Opens a connection to `endpoint` and submits `topic` on it.
///
/// Must be called from within a tokio runtime. The returned receiver yields
/// the connection's events in arrival order and ends when the task stops.
pub fn open(
    endpoint: Url,
    topic: &Topic,
) -> (ConnectionHandle, mpsc::UnboundedReceiver<ConnectionEvent>) {
    let id = Uuid::new_v4();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    tokio::spawn(run(id, endpoint, topic.to_string(), events_tx, shutdown_rx));

    let handle = ConnectionHandle {
        id,
        shutdown: Some(shutdown_tx),
    };
    (handle, events_rx)
}

async fn run(
    id: Uuid,
    endpoint: Url,
    topic: String,
    events: mpsc::UnboundedSender<ConnectionEvent>,
    mut shutdown: oneshot::Receiver<()>,
) {
    tracing::info!(session_id = %id, %endpoint, "Opening research connection.");

    let mut socket = tokio::select! {
        result = connect_async(endpoint.as_str()) => match result {
            Ok((socket, _response)) => socket,
            Err(e) => {
                tracing::error!(session_id = %id, error = %e, "Research connection failed.");
                let _ = events.send(ConnectionEvent::Failed(e.to_string()));
                return;
            }
        },
        _ = &mut shutdown => {
            tracing::info!(session_id = %id, "Connection abandoned before it opened.");
            return;
        }
    };

    if let Err(e) = socket.send(Message::Text(topic)).await {
        tracing::error!(session_id = %id, error = %e, "Failed to send topic.");
        let _ = events.send(ConnectionEvent::Failed(e.to_string()));
        return;
    }
    tracing::info!(session_id = %id, "Research connection open, topic sent.");
    if events.send(ConnectionEvent::Opened).is_err() {
        let _ = socket.close(None).await;
        return;
    }

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!(session_id = %id, "Closing research connection.");
                if let Err(e) = socket.close(None).await {
                    tracing::debug!(session_id = %id, error = %e, "Close handshake did not complete.");
                }
                let _ = events.send(ConnectionEvent::Closed);
                return;
            }
            message = socket.next() => {
                let decoded = match message {
                    Some(Ok(Message::Text(text))) => Frame::decode(&text),
                    Some(Ok(Message::Binary(bytes))) => Frame::decode_bytes(&bytes),
                    Some(Ok(Message::Close(close))) => {
                        tracing::info!(session_id = %id, ?close, "Backend closed the connection.");
                        continue;
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(WsError::ConnectionClosed | WsError::AlreadyClosed)) | None => {
                        tracing::info!(session_id = %id, "Research connection closed.");
                        let _ = events.send(ConnectionEvent::Closed);
                        return;
                    }
                    Some(Err(e)) => {
                        tracing::error!(session_id = %id, error = %e, "Research connection error.");
                        let _ = events.send(ConnectionEvent::Failed(e.to_string()));
                        return;
                    }
                };

                match decoded {
                    Ok(frame) => {
                        if events.send(ConnectionEvent::Frame(frame.into_update())).is_err() {
                            tracing::info!(session_id = %id, "No listener left, closing connection.");
                            let _ = socket.close(None).await;
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(session_id = %id, error = %e, "Dropping undecodable frame.");
                    }
                }
            }
        }
    }
}
