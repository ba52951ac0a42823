use std::{
    sync::{Arc, RwLock},
    time::Instant,
};

use tokio::sync::Mutex;

use crate::{
    app::{
        avatar_service::AvatarRenderer, config_store::ConfigStore, instance_store::InstanceStore,
        theme_service::ThemeController, time_store::TimeStore,
    },
    domain::avatar::AvatarError,
    shared::result::AppResult,
};

/// Everything the frontend keeps in memory, built once at startup and passed
/// to the host as managed state.
pub struct FrontendState {
    pub config: Mutex<ConfigStore>,
    pub instances: Mutex<InstanceStore>,
    pub theme: Mutex<ThemeController>,
    pub time: Arc<RwLock<TimeStore>>,
    pub avatars: AvatarRenderer,
}

impl FrontendState {
    /// Loads the config at `store`'s path and derives the theme from it.
    pub fn bootstrap(mut store: ConfigStore, started_at: Instant) -> AppResult<Self> {
        store.load()?;
        let theme = ThemeController::new(store.config(), started_at);
        let avatars = AvatarRenderer::new().map_err(|err: AvatarError| err.to_string())?;

        Ok(Self {
            config: Mutex::new(store),
            instances: Mutex::new(InstanceStore::new()),
            theme: Mutex::new(theme),
            time: Arc::new(RwLock::new(TimeStore::new())),
            avatars,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_loads_config_and_theme() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join("config.json"),
            r#"{"appearance":{"theme":"light"},"accessibility":{"high_contrast_mode":true}}"#,
        )
        .unwrap();

        let state = FrontendState::bootstrap(
            ConfigStore::new(temp.path().join("config.json")),
            Instant::now(),
        )
        .unwrap();

        assert_eq!(state.theme.lock().await.theme_class(), "theme-light-hc");
        assert_eq!(state.config.lock().await.config().appearance.theme, "light");
    }
}
