use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::{
    domain::models::{
        config::LaunchConfig,
        instance::{Instance, InstanceConfig},
    },
    shared::result::AppResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstallProgress {
    pub step: u32,
    pub completed: u64,
    pub total: u64,
}

impl InstallProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed.min(self.total)) as f64 / self.total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchedInstance {
    pub launch_at: DateTime<Local>,
    pub running: u32,
}

#[derive(Debug, Clone)]
pub struct InstanceStore {
    current: Instance,
    instances: Vec<Instance>,
    install_progress: HashMap<String, InstallProgress>,
    launched: HashMap<String, LaunchedInstance>,
}

impl Default for InstanceStore {
    fn default() -> Self {
        Self {
            current: Instance {
                config: InstanceConfig::default(),
                installed: true,
            },
            instances: Vec::new(),
            install_progress: HashMap::new(),
            launched: HashMap::new(),
        }
    }
}

impl InstanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Instance {
        &self.current
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn find(&self, name: &str) -> Option<&Instance> {
        self.instances.iter().find(|instance| instance.name() == name)
    }

    /// Replaces the list with what the host reported. The current selection
    /// is refreshed from the new list when it is still present.
    pub fn replace_instances(&mut self, instances: Vec<Instance>) {
        self.instances = instances;
        let refreshed = self.find(self.current.name()).cloned();
        if let Some(current) = refreshed {
            self.current = current;
        }
        let names: Vec<String> = self
            .instances
            .iter()
            .map(|instance| instance.name().to_string())
            .collect();
        self.install_progress.retain(|name, _| names.contains(name));
    }

    pub fn select(&mut self, name: &str) -> AppResult<&Instance> {
        let instance = self
            .find(name)
            .cloned()
            .ok_or_else(|| format!("No existe la instancia {name}."))?;
        self.current = instance;
        Ok(&self.current)
    }

    pub fn update_progress(&mut self, name: &str, step: u32, completed: u64, total: u64) {
        self.install_progress.insert(
            name.to_string(),
            InstallProgress {
                step,
                completed,
                total,
            },
        );
    }

    pub fn progress(&self, name: &str) -> Option<InstallProgress> {
        self.install_progress.get(name).copied()
    }

    pub fn finish_install(&mut self, name: &str) -> AppResult<()> {
        let instance = self
            .instances
            .iter_mut()
            .find(|instance| instance.config.name == name)
            .ok_or_else(|| format!("No existe la instancia {name}."))?;
        instance.installed = true;
        self.install_progress.remove(name);
        if self.current.name() == name {
            self.current.installed = true;
        }
        Ok(())
    }

    pub fn mark_launched(&mut self, name: &str, at: DateTime<Local>) -> u32 {
        let entry = self
            .launched
            .entry(name.to_string())
            .or_insert(LaunchedInstance {
                launch_at: at,
                running: 0,
            });
        entry.running += 1;
        log::info!("Instancia {name} iniciada ({} en ejecución)", entry.running);
        entry.running
    }

    /// Returns how many processes of the instance are still running.
    pub fn mark_exited(&mut self, name: &str) -> u32 {
        let Some(entry) = self.launched.get_mut(name) else {
            return 0;
        };
        entry.running = entry.running.saturating_sub(1);
        let remaining = entry.running;
        if remaining == 0 {
            self.launched.remove(name);
        }
        remaining
    }

    pub fn launched(&self, name: &str) -> Option<&LaunchedInstance> {
        self.launched.get(name)
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.launched.contains_key(name)
    }

    pub fn effective_launch_config(
        &self,
        name: &str,
        global: &LaunchConfig,
    ) -> AppResult<LaunchConfig> {
        let instance = self
            .find(name)
            .ok_or_else(|| format!("No existe la instancia {name}."))?;
        Ok(instance.config.launch_config.resolve(global))
    }
}
