use dioxus::prelude::*;
use research_core::{Applied, ResearchClient, Session, SubmitError};

use crate::settings::Settings;

/// Handle to the window's single research connection.
///
/// This is the only writer of the shared [`Session`]: `submit` resets it and
/// the spawned pump applies every event of the connection it opened. Views
/// only read the session signal.
#[derive(Clone, Copy)]
pub struct ConnectionManagerContext {
    client: Signal<ResearchClient>,
    session: Signal<Session>,
    settings: Signal<Settings>,
}

impl ConnectionManagerContext {
    /// Closes the current connection and opens a new one for `raw_topic`.
    ///
    /// Blank topics and invalid backend origins are rejected without
    /// touching the session or the current connection.
    pub fn submit(mut self, raw_topic: &str) -> Result<(), SubmitError> {
        let origin = self.settings.read().backend_origin.clone();
        let submission = {
            let mut session = self.session.write();
            self.client.write().submit(&origin, raw_topic, &mut *session)?
        };

        let session_id = submission.session_id;
        let mut events = submission.events;
        let mut session = self.session;
        let client = self.client;
        spawn(async move {
            while let Some(event) = events.recv().await {
                match session.write().apply(session_id, event) {
                    Applied::Ignored => {
                        tracing::debug!(%session_id, "Event arrived after the session was replaced.");
                    }
                    Applied::Completed => {
                        tracing::info!(%session_id, "Research complete.");
                    }
                    Applied::StatusChanged | Applied::Appended | Applied::Metadata => {}
                }
            }

            let still_active = client.peek().active_session() == Some(session_id);
            if still_active && session.peek().report().is_none() {
                tracing::warn!(%session_id, "Connection ended before a report arrived; resubmit to retry.");
            } else {
                tracing::debug!(%session_id, "Connection event stream ended.");
            }
        });
        Ok(())
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ConnectionManagerProps {
    children: Element,
}

/// Provides the session signal and the [`ConnectionManagerContext`] to its
/// children. Unmounting it drops the client, which closes any open
/// connection.
#[component]
pub fn ConnectionManager(props: ConnectionManagerProps) -> Element {
    let settings = use_context::<Signal<Settings>>();
    let session = use_context_provider(|| Signal::new(Session::new()));
    let context = use_hook(|| ConnectionManagerContext {
        client: Signal::new(ResearchClient::new()),
        session,
        settings,
    });

    use_context_provider(|| context);
    rsx! { {props.children} }
}
