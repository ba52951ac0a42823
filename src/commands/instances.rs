use chrono::Local;
use tauri::State;

use crate::{
    app::{instance_store::InstallProgress, state::FrontendState},
    domain::models::{config::LaunchConfig, instance::Instance},
};

#[tauri::command]
pub async fn set_instances(
    state: State<'_, FrontendState>,
    instances: Vec<Instance>,
) -> Result<(), String> {
    state.instances.lock().await.replace_instances(instances);
    Ok(())
}

#[tauri::command]
pub async fn select_instance(
    state: State<'_, FrontendState>,
    name: String,
) -> Result<Instance, String> {
    let mut store = state.instances.lock().await;
    store.select(&name).cloned()
}

#[tauri::command]
pub async fn report_install_progress(
    state: State<'_, FrontendState>,
    name: String,
    step: u32,
    completed: u64,
    total: u64,
) -> Result<Option<InstallProgress>, String> {
    let mut store = state.instances.lock().await;
    store.update_progress(&name, step, completed, total);
    Ok(store.progress(&name))
}

#[tauri::command]
pub async fn finish_instance_install(
    state: State<'_, FrontendState>,
    name: String,
) -> Result<(), String> {
    state.instances.lock().await.finish_install(&name)
}

#[tauri::command]
pub async fn instance_launch_config(
    state: State<'_, FrontendState>,
    name: String,
) -> Result<LaunchConfig, String> {
    let global = state.config.lock().await.config().launch.clone();
    state
        .instances
        .lock()
        .await
        .effective_launch_config(&name, &global)
}

#[tauri::command]
pub async fn instance_launched(
    state: State<'_, FrontendState>,
    name: String,
) -> Result<u32, String> {
    Ok(state.instances.lock().await.mark_launched(&name, Local::now()))
}

#[tauri::command]
pub async fn instance_exited(state: State<'_, FrontendState>, name: String) -> Result<u32, String> {
    Ok(state.instances.lock().await.mark_exited(&name))
}

#[tauri::command]
pub fn current_time(state: State<'_, FrontendState>) -> Result<i64, String> {
    state
        .time
        .read()
        .map(|time| time.now())
        .map_err(|_| "No se pudo leer el reloj compartido.".to_string())
}
