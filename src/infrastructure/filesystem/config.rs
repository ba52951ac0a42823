use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{domain::models::config::Config, shared::result::AppResult};

const CONFIG_FILE_NAME: &str = "config.json";

pub fn launcher_data_root() -> PathBuf {
    let base = if cfg!(target_os = "windows") {
        std::env::var("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    } else {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    };
    base.join("ConicLauncher")
}

pub fn default_config_path() -> PathBuf {
    launcher_data_root().join(CONFIG_FILE_NAME)
}

/// `Ok(None)` when the file does not exist yet.
pub fn read_config_file(path: &Path) -> AppResult<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path).map_err(|err| {
        format!(
            "No se pudo leer {CONFIG_FILE_NAME} {}: {err}",
            path.display()
        )
    })?;

    serde_json::from_str::<Config>(&raw)
        .map(Some)
        .map_err(|err| {
            format!(
                "No se pudo parsear {CONFIG_FILE_NAME} {}: {err}",
                path.display()
            )
        })
}

pub fn write_config_file(path: &Path, config: &Config) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "No se pudo crear directorio para {CONFIG_FILE_NAME} {}: {err}",
                parent.display()
            )
        })?;
    }

    let raw = serde_json::to_string_pretty(config)
        .map_err(|err| format!("No se pudo serializar {CONFIG_FILE_NAME}: {err}"))?;

    fs::write(path, raw).map_err(|err| {
        format!(
            "No se pudo guardar {CONFIG_FILE_NAME} {}: {err}",
            path.display()
        )
    })?;

    Ok(())
}
