use dioxus::prelude::*;
use research_core::research_endpoint;

use crate::settings::{Settings, SettingsManager};

#[component]
pub fn SettingsPanel() -> Element {
    let mut settings = use_context::<Signal<Settings>>();
    let settings_manager = use_context::<Signal<SettingsManager>>();

    let mut has_unsaved_changes = use_signal(|| false);

    // Preview of where the next submit will connect.
    let endpoint = match research_endpoint(&settings.read().backend_origin) {
        Ok(url) => url.to_string(),
        Err(e) => e.to_string(),
    };

    rsx! {
        div {
            class: "settings-panel",
            h2 { "Settings" }
            label {
                r#for: "backend-origin",
                "Backend Origin"
            }
            input {
                id: "backend-origin",
                r#type: "text",
                placeholder: "http://localhost:8000",
                value: "{settings.read().backend_origin}",
                oninput: move |event| {
                    settings.write().backend_origin = event.value();
                    has_unsaved_changes.set(true);
                }
            }
            p { class: "endpoint-preview", "{endpoint}" }
            button {
                class: if has_unsaved_changes() { "save-button" } else { "save-button disabled" },
                disabled: !has_unsaved_changes(),
                onclick: move |_| {
                    if has_unsaved_changes() {
                        if let Err(e) = settings_manager.read().save(&settings.read()) {
                            tracing::error!("Failed to save settings: {}", e);
                        }
                        has_unsaved_changes.set(false);
                    }
                },
                "Save Settings"
            }
        }
    }
}
