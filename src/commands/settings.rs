use std::time::Instant;

use serde_json::Value;
use tauri::State;

use crate::{
    app::{state::FrontendState, theme_service::ThemeSnapshot},
    domain::models::config::Config,
};

#[tauri::command]
pub async fn read_config_file(state: State<'_, FrontendState>) -> Result<Config, String> {
    let mut store = state.config.lock().await;
    let config = store.load()?.clone();
    state.theme.lock().await.load(&config);
    Ok(config)
}

#[tauri::command]
pub async fn update_config(
    state: State<'_, FrontendState>,
    patch: Value,
) -> Result<Config, String> {
    let mut store = state.config.lock().await;
    let before = store.config().clone();
    if !store.patch(&patch)? {
        return Ok(before);
    }

    let after = store.config().clone();
    let theme_changed = before.appearance != after.appearance
        || before.accessibility.high_contrast_mode != after.accessibility.high_contrast_mode
        || before.accessibility.disable_animations != after.accessibility.disable_animations;
    if theme_changed {
        state.theme.lock().await.reload(&after, Instant::now());
    }
    log::debug!("Configuración sincronizada con el frontend");
    Ok(after)
}

#[tauri::command]
pub async fn save_config(state: State<'_, FrontendState>) -> Result<(), String> {
    state.config.lock().await.save()
}

#[tauri::command]
pub async fn get_config_value(
    state: State<'_, FrontendState>,
    key: String,
) -> Result<Option<Value>, String> {
    Ok(state.config.lock().await.get(&key))
}

#[tauri::command]
pub async fn current_theme(state: State<'_, FrontendState>) -> Result<ThemeSnapshot, String> {
    Ok(state.theme.lock().await.snapshot(Instant::now()))
}
