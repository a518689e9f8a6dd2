pub mod connection_manager;
pub mod research_view;
pub mod settings_panel;
pub mod topic_input;
