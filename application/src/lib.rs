pub mod chat_controller;
pub mod svg_service;

/// Local time-of-day label for history entries.
pub fn display_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
