pub mod app;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod shared;

#[cfg(feature = "desktop")]
pub const HOST_LOG_EVENT: &str = "host-log";

/// Wires the frontend state and commands into the host's builder. The host
/// keeps ownership of `generate_context!` and `run`.
#[cfg(feature = "desktop")]
pub fn register<R: tauri::Runtime>(
    builder: tauri::Builder<R>,
    state: app::state::FrontendState,
) -> tauri::Builder<R> {
    use services::log_forwarder::{pump_logs, ChannelLogSink, ForwardingLogger};
    use tauri::Emitter;

    let time = std::sync::Arc::clone(&state.time);

    builder
        .plugin(
            tauri_plugin_log::Builder::default()
                .level(log::LevelFilter::Info)
                .skip_logger()
                .build(),
        )
        .manage(state)
        .setup(move |app| {
            let (sink, rx) = ChannelLogSink::channel();
            ForwardingLogger::new(sink, log::LevelFilter::Info)
                .with_env_logger()
                .install()
                .map_err(|err| format!("No se pudo instalar el logger: {err}"))?;

            let handle = app.handle().clone();
            tauri::async_runtime::spawn(pump_logs(rx, move |record| {
                let _ = handle.emit(HOST_LOG_EVENT, record);
            }));
            tauri::async_runtime::spawn(app::time_store::run_ticker(
                time,
                std::time::Duration::from_secs(1),
            ));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::avatar::render_avatar,
            commands::avatar::render_avatar_png,
            commands::settings::read_config_file,
            commands::settings::update_config,
            commands::settings::save_config,
            commands::settings::get_config_value,
            commands::settings::current_theme,
            commands::instances::set_instances,
            commands::instances::select_instance,
            commands::instances::report_install_progress,
            commands::instances::finish_instance_install,
            commands::instances::instance_launch_config,
            commands::instances::instance_launched,
            commands::instances::instance_exited,
            commands::instances::current_time,
            commands::logging::forward_frontend_log
        ])
}
