use crate::services::log_forwarder::{forward_console, ConsoleLevel};

#[tauri::command]
pub fn forward_frontend_log(level: ConsoleLevel, message: String) {
    forward_console(level, &message);
}
