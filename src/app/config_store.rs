use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{
    domain::models::config::Config,
    infrastructure::filesystem::config::{default_config_path, read_config_file, write_config_file},
    shared::{
        json_merge::{deep_merge, lookup_path},
        result::AppResult,
    },
};

/// Process-wide launcher config, owned by whoever built it at startup and
/// handed out by reference. Nothing here is a global.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
    dirty: bool,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Config::default(),
            dirty: false,
        }
    }

    pub fn at_default_location() -> Self {
        Self::new(default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reads the file into memory. A missing file is created with defaults; an
    /// existing one is written back normalized so new fields show up on disk.
    pub fn load(&mut self) -> AppResult<&Config> {
        match read_config_file(&self.path)? {
            Some(config) => {
                log::info!("Configuración cargada desde {}", self.path.display());
                self.config = config;
            }
            None => {
                log::info!(
                    "No existe {}, usando configuración por defecto",
                    self.path.display()
                );
                self.config = Config::default();
            }
        }
        write_config_file(&self.path, &self.config)?;
        self.dirty = false;
        Ok(&self.config)
    }

    pub fn save(&mut self) -> AppResult<()> {
        write_config_file(&self.path, &self.config)?;
        self.dirty = false;
        log::debug!("Configuración guardada en {}", self.path.display());
        Ok(())
    }

    /// Merges a partial JSON document into the current config. The patch is
    /// applied only if the merged document is still a valid config. Returns
    /// whether anything changed.
    pub fn patch(&mut self, partial: &Value) -> AppResult<bool> {
        if !partial.is_object() {
            return Err("El parche de configuración debe ser un objeto JSON.".to_string());
        }

        let mut merged = serde_json::to_value(&self.config)
            .map_err(|err| format!("No se pudo serializar la configuración: {err}"))?;
        deep_merge(&mut merged, partial);

        let next = serde_json::from_value::<Config>(merged)
            .map_err(|err| format!("Parche de configuración inválido: {err}"))?;

        if next == self.config {
            return Ok(false);
        }
        self.config = next;
        self.dirty = true;
        Ok(true)
    }

    pub fn replace(&mut self, config: Config) {
        if config != self.config {
            self.config = config;
            self.dirty = true;
        }
    }

    /// Dotted lookup, e.g. `launch.width`.
    pub fn get(&self, key: &str) -> Option<Value> {
        let root = serde_json::to_value(&self.config).ok()?;
        lookup_path(&root, key).cloned()
    }

    /// Load, then persist what was loaded: keeps memory and disk in step.
    pub fn sync_from_file(&mut self) -> AppResult<&Config> {
        self.load()?;
        self.save()?;
        Ok(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::UpdateChannel;
    use serde_json::json;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("config.json"))
    }

    #[test]
    fn load_writes_defaults_when_file_is_missing() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(&temp);

        let config = store.load().unwrap().clone();

        assert_eq!(config, Config::default());
        assert!(store.path().exists());
    }

    #[test]
    fn load_normalizes_partial_files() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(&temp);
        std::fs::write(store.path(), r#"{"language":"zh_cn"}"#).unwrap();

        store.load().unwrap();
        let on_disk: Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();

        assert_eq!(store.config().language, "zh_cn");
        assert_eq!(on_disk["launch"]["width"], 854);
    }

    #[test]
    fn patch_merges_nested_fields_and_marks_dirty() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(&temp);

        let changed = store
            .patch(&json!({"launch": {"width": 1920}, "update_channel": "Snapshot"}))
            .unwrap();

        assert!(changed);
        assert!(store.is_dirty());
        assert_eq!(store.config().launch.width, 1920);
        assert_eq!(store.config().launch.height, 480);
        assert_eq!(store.config().update_channel, UpdateChannel::Snapshot);
    }

    #[test]
    fn invalid_patch_leaves_config_untouched() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(&temp);

        let err = store.patch(&json!({"launch": {"width": "wide"}})).unwrap_err();

        assert!(err.contains("inválido"));
        assert_eq!(store.config(), &Config::default());
        assert!(!store.is_dirty());
    }

    #[test]
    fn identical_patch_reports_no_change() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(&temp);

        assert!(!store.patch(&json!({"language": "en_us"})).unwrap());
        assert!(store.patch(&json!([1, 2])).is_err());
    }

    #[test]
    fn save_then_load_round_trips_patched_values() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(&temp);
        store.patch(&json!({"appearance": {"theme": "light"}})).unwrap();
        store.save().unwrap();

        let mut reloaded = store_in(&temp);
        reloaded.load().unwrap();

        assert_eq!(reloaded.config().appearance.theme, "light");
        assert!(!store.is_dirty());
    }

    #[test]
    fn get_resolves_dotted_keys() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(&temp);

        assert_eq!(store.get("launch.max_memory"), Some(json!(2048)));
        assert_eq!(store.get("accessibility.high_contrast_mode"), Some(json!(false)));
        assert_eq!(store.get("launch.nope"), None);
    }
}
