#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use dioxus::desktop::tao::dpi::LogicalSize;
use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;
use dioxus_free_icons::{icons::fi_icons, Icon};
use dotenvy::dotenv;
use std::path::PathBuf;

mod components;
mod settings;

use components::connection_manager::ConnectionManager;
use components::research_view::ResearchView;
use components::settings_panel::SettingsPanel;
use components::topic_input::TopicInput;
use settings::{SettingsManager, BACKEND_ORIGIN_ENV};

fn main() {
    dotenv().ok();
    dioxus_logger::init(tracing::Level::INFO).expect("failed to init logger");

    LaunchBuilder::new()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(env!("APP_NAME"))
                        .with_resizable(true)
                        .with_inner_size(LogicalSize::new(960.0, 760.0)),
                )
                .with_custom_head(format!("<style>{}</style>", include_str!("../assets/main.css"))),
        )
        .launch(app);
}

fn get_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_default()
        .join("com.lazyresearch.app")
        .join("settings.json")
}

fn app() -> Element {
    let settings_manager = use_context_provider(|| Signal::new(SettingsManager::new(get_settings_path())));
    use_context_provider(|| {
        let settings = settings_manager
            .read()
            .load()
            .with_origin_override(std::env::var(BACKEND_ORIGIN_ENV).ok());
        tracing::info!(origin = %settings.backend_origin, "Settings loaded.");
        Signal::new(settings)
    });
    let mut show_settings_panel = use_signal(|| false);

    rsx! {
        ConnectionManager {
            div {
                class: "app",
                div {
                    class: "toolbar",
                    button {
                        class: "icon-button",
                        title: "Settings",
                        onclick: move |_| show_settings_panel.toggle(),
                        Icon {
                            width: 20,
                            height: 20,
                            icon: fi_icons::FiSettings
                        }
                    }
                }
                if show_settings_panel() {
                    SettingsPanel {}
                }
                div {
                    class: "content",
                    ResearchView {}
                }
                TopicInput {}
            }
        }
    }
}
