use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::{GarbageCollector, LaunchConfig, Server};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModLoaderType {
    Fabric,
    Quilt,
    Forge,
    Neoforge,
}

impl fmt::Display for ModLoaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fabric => "Fabric",
            Self::Quilt => "Quilt",
            Self::Forge => "Forge",
            Self::Neoforge => "Neoforge",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InstanceRuntime {
    pub minecraft: String,
    pub mod_loader_type: Option<ModLoaderType>,
    pub mod_loader_version: Option<String>,
}

/// Per-instance launch overrides. A `None` field falls back to the global
/// launch config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InstanceLaunchConfig {
    pub enable_instance_specific_settings: bool,
    pub min_memory: Option<u32>,
    pub max_memory: Option<u32>,
    pub server: Option<Server>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fullscreen: Option<bool>,
    pub extra_jvm_args: Option<String>,
    pub extra_mc_args: Option<String>,
    pub is_demo: Option<bool>,
    pub ignore_invalid_minecraft_certificates: Option<bool>,
    pub ignore_patch_discrepancies: Option<bool>,
    pub extra_class_paths: Option<String>,
    pub gc: Option<GarbageCollector>,
    pub launcher_name: Option<String>,
    pub wrap_command: Option<String>,
    pub execute_before_launch: Option<String>,
    pub execute_after_launch: Option<String>,
}

impl InstanceLaunchConfig {
    pub fn resolve(&self, global: &LaunchConfig) -> LaunchConfig {
        let mut resolved = global.clone();
        if !self.enable_instance_specific_settings {
            return resolved;
        }

        fn apply<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        apply(&mut resolved.min_memory, &self.min_memory);
        apply(&mut resolved.max_memory, &self.max_memory);
        if self.server.is_some() {
            resolved.server = self.server.clone();
        }
        apply(&mut resolved.width, &self.width);
        apply(&mut resolved.height, &self.height);
        apply(&mut resolved.fullscreen, &self.fullscreen);
        apply(&mut resolved.extra_jvm_args, &self.extra_jvm_args);
        apply(&mut resolved.extra_mc_args, &self.extra_mc_args);
        apply(&mut resolved.is_demo, &self.is_demo);
        apply(
            &mut resolved.ignore_invalid_minecraft_certificates,
            &self.ignore_invalid_minecraft_certificates,
        );
        apply(
            &mut resolved.ignore_patch_discrepancies,
            &self.ignore_patch_discrepancies,
        );
        apply(&mut resolved.extra_class_paths, &self.extra_class_paths);
        apply(&mut resolved.gc, &self.gc);
        apply(&mut resolved.launcher_name, &self.launcher_name);
        apply(&mut resolved.wrap_command, &self.wrap_command);
        apply(&mut resolved.execute_before_launch, &self.execute_before_launch);
        apply(&mut resolved.execute_after_launch, &self.execute_after_launch);
        resolved
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InstanceConfig {
    pub name: String,
    pub runtime: InstanceRuntime,
    pub group: Option<String>,
    pub launch_config: InstanceLaunchConfig,
}

impl InstanceConfig {
    pub fn new(name: &str, minecraft_version: &str) -> Self {
        Self {
            name: name.to_string(),
            runtime: InstanceRuntime {
                minecraft: minecraft_version.to_string(),
                mod_loader_type: None,
                mod_loader_version: None,
            },
            group: None,
            launch_config: InstanceLaunchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub config: InstanceConfig,
    #[serde(default = "default_installed")]
    pub installed: bool,
}

fn default_installed() -> bool {
    true
}

impl Instance {
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// `1.20.4`, or `1.20.1 Fabric 0.15.7` when a mod loader is present.
    pub fn display_version(&self) -> String {
        let runtime = &self.config.runtime;
        match (&runtime.mod_loader_type, &runtime.mod_loader_version) {
            (Some(loader), Some(version)) if !version.trim().is_empty() => {
                format!("{} {loader} {}", runtime.minecraft, version.trim())
            }
            (Some(loader), _) => format!("{} {loader}", runtime.minecraft),
            _ => runtime.minecraft.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overrides_ignored_unless_enabled() {
        let global = LaunchConfig::default();
        let overrides = InstanceLaunchConfig {
            max_memory: Some(8192),
            ..Default::default()
        };

        assert_eq!(overrides.resolve(&global), global);
    }

    #[test]
    fn enabled_overrides_replace_only_set_fields() {
        let global = LaunchConfig::default();
        let overrides = InstanceLaunchConfig {
            enable_instance_specific_settings: true,
            max_memory: Some(8192),
            gc: Some(GarbageCollector::Z),
            ..Default::default()
        };

        let resolved = overrides.resolve(&global);

        assert_eq!(resolved.max_memory, 8192);
        assert_eq!(resolved.gc, GarbageCollector::Z);
        assert_eq!(resolved.width, global.width);
        assert_eq!(resolved.launcher_name, global.launcher_name);
    }

    #[test]
    fn host_payload_deserializes_with_missing_fields() {
        let instance: Instance = serde_json::from_value(json!({
            "config": {
                "name": "Fabric 1.20",
                "runtime": {
                    "minecraft": "1.20.1",
                    "mod_loader_type": "Fabric",
                    "mod_loader_version": "0.15.7"
                }
            }
        }))
        .unwrap();

        assert!(instance.installed);
        assert!(!instance.config.launch_config.enable_instance_specific_settings);
        assert_eq!(instance.display_version(), "1.20.1 Fabric 0.15.7");
    }
}
