use serde::{Deserialize, Serialize};

pub const DEFAULT_ACCOUNT_UUID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UpdateChannel {
    Weekly,
    Snapshot,
    #[default]
    Release,
}

/// Game process priority, ignored on Windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProcessPriority {
    High,
    AboveNormal,
    #[default]
    Normal,
    BelowNormal,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GarbageCollector {
    Serial,
    Parallel,
    ParallelOld,
    #[default]
    G1,
    Z,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub ip: String,
    #[serde(default)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub theme: String,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityConfig {
    pub release_reminder: bool,
    pub snapshot_reminder: bool,
    pub hide_latest_release: bool,
    pub hide_latest_snapshot: bool,
    pub change_game_language: bool,
    pub open_log_viewer: bool,
    pub disable_animations: bool,
    pub high_contrast_mode: bool,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            release_reminder: true,
            snapshot_reminder: true,
            hide_latest_release: false,
            hide_latest_snapshot: false,
            change_game_language: true,
            open_log_viewer: false,
            disable_animations: false,
            high_contrast_mode: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub max_connection: usize,
    /// Bytes per second, 0 means unlimited.
    pub max_download_speed: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_connection: 100,
            max_download_speed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Adds `-Xms` to the JVM command line.
    pub min_memory: u32,
    /// Adds `-Xmx` to the JVM command line.
    pub max_memory: u32,
    pub server: Option<Server>,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub extra_jvm_args: String,
    pub extra_mc_args: String,
    pub is_demo: bool,
    pub process_priority: ProcessPriority,
    pub ignore_invalid_minecraft_certificates: bool,
    pub ignore_patch_discrepancies: bool,
    pub extra_class_paths: String,
    pub gc: GarbageCollector,
    pub launcher_name: String,
    pub wrap_command: String,
    pub execute_before_launch: String,
    pub execute_after_launch: String,
    pub skip_refresh_account: bool,
    pub skip_check_files: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            min_memory: 0,
            max_memory: 2048,
            server: None,
            width: 854,
            height: 480,
            fullscreen: false,
            extra_jvm_args: String::new(),
            extra_mc_args: String::new(),
            is_demo: false,
            process_priority: ProcessPriority::Normal,
            ignore_invalid_minecraft_certificates: false,
            ignore_patch_discrepancies: false,
            extra_class_paths: String::new(),
            gc: GarbageCollector::G1,
            launcher_name: "Conic_Launcher".to_string(),
            wrap_command: String::new(),
            execute_before_launch: String::new(),
            execute_after_launch: String::new(),
            skip_refresh_account: false,
            skip_check_files: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,
    pub update_channel: UpdateChannel,
    pub auto_update: bool,
    pub current_account: String,
    pub appearance: AppearanceConfig,
    pub accessibility: AccessibilityConfig,
    pub download: DownloadConfig,
    pub launch: LaunchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en_us".to_string(),
            update_channel: UpdateChannel::Release,
            auto_update: true,
            current_account: DEFAULT_ACCOUNT_UUID.to_string(),
            appearance: AppearanceConfig::default(),
            accessibility: AccessibilityConfig::default(),
            download: DownloadConfig::default(),
            launch: LaunchConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_documents_fill_in_defaults() {
        let config: Config = serde_json::from_value(json!({
            "language": "zh_cn",
            "launch": { "width": 1280 }
        }))
        .unwrap();

        assert_eq!(config.language, "zh_cn");
        assert_eq!(config.launch.width, 1280);
        assert_eq!(config.launch.height, 480);
        assert_eq!(config.appearance.theme, "dark");
        assert_eq!(config.update_channel, UpdateChannel::Release);
    }

    #[test]
    fn enums_use_variant_names_on_the_wire() {
        let value = serde_json::to_value(Config::default()).unwrap();

        assert_eq!(value["update_channel"], "Release");
        assert_eq!(value["launch"]["gc"], "G1");
        assert_eq!(value["launch"]["process_priority"], "Normal");
    }
}
