use dioxus::desktop::{use_window, DesktopContext};
use dioxus::prelude::*;
use dioxus_free_icons::{icons::fi_icons, Icon};
use research_core::{Topic, TopicError};

use super::connection_manager::ConnectionManagerContext;

/// What pressing Enter or the submit button should do.
#[derive(Debug, PartialEq)]
enum SubmitPlan {
    /// A warning is still on screen; the input is blocked until it closes.
    Ignore,
    Warn(TopicError),
    Submit(Topic),
}

fn plan_submit(notice_open: bool, raw: &str) -> SubmitPlan {
    if notice_open {
        return SubmitPlan::Ignore;
    }
    match Topic::parse(raw) {
        Ok(topic) => SubmitPlan::Submit(topic),
        Err(e) => SubmitPlan::Warn(e),
    }
}

#[component]
pub fn TopicInput() -> Element {
    let manager = use_context::<ConnectionManagerContext>();
    let window = use_window();
    let mut draft = use_signal(String::new);
    let notice_open = use_signal(|| false);

    let key_window = window.clone();
    rsx! {
        div {
            class: "topic-input",
            input {
                id: "topic-input",
                r#type: "text",
                name: "topic",
                placeholder: "Enter your topic...",
                value: "{draft}",
                disabled: notice_open(),
                oninput: move |event| draft.set(event.value()),
                onkeydown: move |event| {
                    if event.key() == Key::Enter {
                        event.prevent_default();
                        submit_topic(manager, draft, notice_open, key_window.clone());
                    }
                },
            }
            button {
                class: "submit-button",
                title: "Research",
                disabled: notice_open(),
                onclick: move |_| submit_topic(manager, draft, notice_open, window.clone()),
                Icon {
                    width: 20,
                    height: 20,
                    icon: fi_icons::FiArrowRight
                }
            }
        }
    }
}

fn submit_topic(
    manager: ConnectionManagerContext,
    mut draft: Signal<String>,
    notice_open: Signal<bool>,
    window: DesktopContext,
) {
    let raw = draft.read().clone();
    let result = match plan_submit(notice_open(), &raw) {
        SubmitPlan::Ignore => return,
        SubmitPlan::Warn(e) => Err(e.to_string()),
        SubmitPlan::Submit(topic) => manager.submit(topic.as_str()).map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => draft.set(String::new()),
        Err(message) => {
            tracing::warn!("Topic not submitted: {}", message);
            warn_user(window, notice_open, message);
        }
    }
}

/// Shows a warning that is modal to the app window. Submission stays
/// disabled until it is dismissed.
fn warn_user(window: DesktopContext, mut notice_open: Signal<bool>, message: String) {
    notice_open.set(true);
    spawn(async move {
        let _ = rfd::AsyncMessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(env!("APP_NAME"))
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .set_parent(&window.window)
            .show()
            .await;
        notice_open.set(false);
    });
}
