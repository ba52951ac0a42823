use std::time::{Duration, Instant};

use serde::Serialize;

use crate::domain::models::config::Config;

/// How long the `changing-theme` class stays on after a reload.
pub const THEME_CHANGE_WINDOW: Duration = Duration::from_millis(300);

/// Transitions stay off this long after startup so the first paint does not
/// animate.
pub const STARTUP_TRANSITION_DELAY: Duration = Duration::from_millis(500);

pub const CHANGING_THEME_CLASS: &str = "changing-theme";
pub const NO_TRANSITIONS_CLASS: &str = "no-transitions";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSnapshot {
    pub theme_class: String,
    pub transitions_enabled: bool,
    pub changing: bool,
}

#[derive(Debug, Clone)]
pub struct ThemeController {
    theme: String,
    high_contrast: bool,
    animations_disabled: bool,
    started_at: Instant,
    transitions_enabled: bool,
    changing_until: Option<Instant>,
}

impl ThemeController {
    pub fn new(config: &Config, started_at: Instant) -> Self {
        let mut controller = Self {
            theme: String::new(),
            high_contrast: false,
            animations_disabled: false,
            started_at,
            transitions_enabled: false,
            changing_until: None,
        };
        controller.load(config);
        controller
    }

    /// Applies the theme from `config` without any transition window.
    pub fn load(&mut self, config: &Config) {
        self.theme = normalize_theme_name(&config.appearance.theme);
        self.high_contrast = config.accessibility.high_contrast_mode;
        self.animations_disabled = config.accessibility.disable_animations;
        if self.animations_disabled {
            self.transitions_enabled = false;
        }
    }

    /// Applies the theme and opens the `changing-theme` window.
    pub fn reload(&mut self, config: &Config, now: Instant) {
        self.load(config);
        self.changing_until = Some(now + THEME_CHANGE_WINDOW);
        log::debug!("Tema cambiado a {}", self.theme_class());
    }

    /// Turns transitions on once the startup delay has elapsed. Returns the
    /// current flag.
    pub fn poll_startup(&mut self, now: Instant) -> bool {
        if !self.transitions_enabled
            && !self.animations_disabled
            && now.saturating_duration_since(self.started_at) >= STARTUP_TRANSITION_DELAY
        {
            self.transitions_enabled = true;
        }
        self.transitions_enabled
    }

    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled
    }

    pub fn is_changing(&self, now: Instant) -> bool {
        self.changing_until.is_some_and(|until| now < until)
    }

    pub fn theme_class(&self) -> String {
        if self.high_contrast {
            format!("theme-{}-hc", self.theme)
        } else {
            format!("theme-{}", self.theme)
        }
    }

    pub fn root_classes(&self, now: Instant) -> Vec<String> {
        let mut classes = vec![self.theme_class()];
        if self.is_changing(now) {
            classes.push(CHANGING_THEME_CLASS.to_string());
        }
        if !self.transitions_enabled {
            classes.push(NO_TRANSITIONS_CLASS.to_string());
        }
        classes
    }

    pub fn snapshot(&mut self, now: Instant) -> ThemeSnapshot {
        let transitions_enabled = self.poll_startup(now);
        ThemeSnapshot {
            theme_class: self.theme_class(),
            transitions_enabled,
            changing: self.is_changing(now),
        }
    }
}

fn normalize_theme_name(raw: &str) -> String {
    let name = raw
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>();
    if name.is_empty() {
        "dark".to_string()
    } else {
        name
    }
}
