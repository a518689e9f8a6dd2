#![allow(non_snake_case)]
use dioxus::prelude::*;
use research_core::{render_entry, report_lines, EntryView, Phase, ReportLine, Session};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tokio::time::sleep;

const LOG_CONTAINER_ID: &str = "research-log";

/// Picks the panel for the current session phase.
#[component]
pub fn ResearchView() -> Element {
    let session = use_context::<Signal<Session>>();
    let (phase, session_key) = {
        let state = session.read();
        let key = state.id().map(|id| id.to_string()).unwrap_or_default();
        (state.phase(), key)
    };

    match phase {
        Phase::Idle => rsx! {
            h1 { class: "lazy-heading", "just type stuff, i'll research it." }
        },
        // Keyed by session so a new topic starts with fresh scroll tracking.
        Phase::InProgress => rsx! {
            InProgressView { key: "{session_key}" }
        },
        Phase::Complete => rsx! { ReportView {} },
    }
}

#[component]
fn InProgressView() -> Element {
    let session = use_context::<Signal<Session>>();
    let seen_entries = use_hook(|| Rc::new(Cell::new(0usize)));

    // Keep the newest entry in view: glide down when a frame arrived, jump
    // on any other change.
    use_effect(move || {
        let count = session.read().messages().len();
        let smooth = count > seen_entries.get();
        seen_entries.set(count);
        spawn(scroll_log_to_bottom(smooth));
    });

    let state = session.read();
    let topic = state.topic().to_string();
    let connected = state.is_connected();
    let entries: Vec<EntryView> = state.messages().iter().map(render_entry).collect();
    let waiting = !connected && entries.is_empty();

    rsx! {
        div {
            class: "show-processing",
            h1 { "Researching: {topic}" }
            div {
                class: "processing-box",
                div {
                    class: "connection-status",
                    div {
                        class: if connected { "status-indicator connected" } else { "status-indicator connecting" },
                        if connected { "● Connected" } else { "○ Connecting..." }
                    }
                }
                div {
                    id: LOG_CONTAINER_ID,
                    class: "logs",
                    for (index, entry) in entries.into_iter().enumerate() {
                        LogEntryView { key: "{index}", entry }
                    }
                }
                if waiting {
                    div { class: "connection-message", "Connecting to AI agent..." }
                }
            }
        }
    }
}

#[component]
fn LogEntryView(entry: EntryView) -> Element {
    match entry {
        EntryView::Text(text) => rsx! {
            div { class: "log-entry", p { "{text}" } }
        },
        EntryView::Fields(fields) => rsx! {
            div {
                class: "log-entry message-object",
                for (name, value) in fields {
                    div {
                        key: "{name}",
                        strong { "{name}:" }
                        " "
                        span { class: "json-value", "{value}" }
                    }
                }
            }
        },
    }
}

#[component]
fn ReportView() -> Element {
    let session = use_context::<Signal<Session>>();
    let state = session.read();
    let topic = state.topic().to_string();
    let lines = report_lines(state.report().unwrap_or_default());

    rsx! {
        div {
            class: "report-page",
            h1 { "Report: {topic}" }
            div {
                class: "report-text",
                for (index, line) in lines.into_iter().enumerate() {
                    ReportLineView { key: "{index}", line }
                }
            }
        }
    }
}

#[component]
fn ReportLineView(line: ReportLine) -> Element {
    match line {
        ReportLine::Labeled { label, rest } => rsx! {
            p { class: "report-line", strong { "{label}:" } " {rest}" }
        },
        ReportLine::Plain(text) => rsx! {
            p { class: "report-line", "{text}" }
        },
    }
}

async fn scroll_log_to_bottom(smooth: bool) {
    let behavior = if smooth {
        // Give the new entry a moment to render before measuring.
        sleep(Duration::from_millis(100)).await;
        "smooth"
    } else {
        "auto"
    };
    let script = format!(
        r#"
        const el = document.getElementById('{LOG_CONTAINER_ID}');
        if (el) {{ el.scrollTo({{ top: el.scrollHeight, behavior: '{behavior}' }}); }}
        "#
    );
    if let Err(e) = document::eval(&script).await {
        tracing::debug!("Log auto-scroll failed: {:?}", e);
    }
}
