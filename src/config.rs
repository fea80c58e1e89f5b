//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Configuration files (TOML)
//! - Defaults
//!
//! The configuration is read-only while the monitor runs; trigger actions are
//! resolved from it when the trigger is armed, so a delayed dispatch keeps the
//! action it was armed with.

use crate::clock::DEFAULT_TICK_RATE_HZ;
use crate::error::{Error, Result};
use crate::host::Player;
use crate::input::{Button, TechDirection};
use crate::trigger::{ActionChoice, TriggerKind};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub triggers: TriggersConfig,

    #[serde(default)]
    pub auto_airtech: AutoAirtechConfig,

    /// Custom motions referenced by `custom_id`
    #[serde(default)]
    pub motions: Vec<CustomMotion>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which players triggers act for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    P1,
    #[default]
    P2,
    Both,
}

impl Target {
    pub fn includes(&self, player: Player) -> bool {
        match self {
            Target::P1 => player == Player::P1,
            Target::P2 => player == Player::P2,
            Target::Both => true,
        }
    }
}

/// Polling loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Internal polling rate
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: u32,

    #[serde(default)]
    pub target: Target,

    /// Show advantage messages through the presentation layer
    #[serde(default = "default_true")]
    pub report_advantage: bool,
}

/// One trigger's settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSetting {
    #[serde(default)]
    pub enabled: bool,

    /// Ticks between the trigger condition and dispatch
    #[serde(default)]
    pub delay_ticks: u64,

    #[serde(default)]
    pub action: ActionChoice,

    /// Overrides the trigger's default button strength
    pub button: Option<Button>,

    /// Custom motion id when `action = "custom"`
    pub custom_id: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggersConfig {
    #[serde(default)]
    pub after_airtech: TriggerSetting,

    #[serde(default)]
    pub after_block: TriggerSetting,

    #[serde(default)]
    pub after_hitstun: TriggerSetting,

    #[serde(default)]
    pub on_wakeup: TriggerSetting,
}

impl TriggersConfig {
    /// Settings for a configurable trigger; auto-airtech has its own section
    pub fn get(&self, kind: TriggerKind) -> Option<&TriggerSetting> {
        match kind {
            TriggerKind::AfterAirtech => Some(&self.after_airtech),
            TriggerKind::AfterBlock => Some(&self.after_block),
            TriggerKind::AfterHitstun => Some(&self.after_hitstun),
            TriggerKind::OnWakeup => Some(&self.on_wakeup),
            TriggerKind::AutoAirtech => None,
        }
    }

    pub fn get_mut(&mut self, kind: TriggerKind) -> Option<&mut TriggerSetting> {
        match kind {
            TriggerKind::AfterAirtech => Some(&mut self.after_airtech),
            TriggerKind::AfterBlock => Some(&mut self.after_block),
            TriggerKind::AfterHitstun => Some(&mut self.after_hitstun),
            TriggerKind::OnWakeup => Some(&mut self.on_wakeup),
            TriggerKind::AutoAirtech => None,
        }
    }
}

/// Automatic air recovery
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoAirtechConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub direction: TechDirection,

    #[serde(default)]
    pub delay_ticks: u64,
}

/// A named numpad-notation motion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomMotion {
    pub id: u32,
    pub name: Option<String>,
    pub notation: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path
    pub file: Option<PathBuf>,
}

// Default value functions

fn default_tick_rate() -> u32 {
    DEFAULT_TICK_RATE_HZ
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: default_tick_rate(),
            target: Target::default(),
            report_advantage: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file without validating it
    pub fn read_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        toml::from_str(&contents).map_err(|e| Error::ConfigParse {
            file: path,
            message: e.to_string(),
        })
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./frame-monitor.toml
    /// 2. ~/.frame-monitor/config.toml
    /// 3. /etc/frame-monitor/config.toml
    pub fn load() -> Result<Self> {
        let paths = vec![
            PathBuf::from("frame-monitor.toml"),
            dirs::home_dir()
                .map(|h| h.join(".frame-monitor").join("config.toml"))
                .unwrap_or_else(|| PathBuf::from("/dev/null")),
            PathBuf::from("/etc/frame-monitor/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                tracing::info!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Reject settings that cannot work at runtime
    pub fn validate(&self) -> Result<()> {
        match self.problems().into_iter().next() {
            Some(problem) => Err(Error::Config(problem)),
            None => Ok(()),
        }
    }

    /// Every setting that cannot work at runtime
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.monitor.tick_rate_hz == 0 {
            problems.push("tick_rate_hz must be positive".to_string());
        }

        let mut ids = HashSet::new();
        for motion in &self.motions {
            if !ids.insert(motion.id) {
                problems.push(format!("duplicate custom motion id {}", motion.id));
            }
            if let Err(e) = crate::input::notation::parse(&motion.notation) {
                problems.push(format!("motion #{}: {}", motion.id, e));
            }
        }

        for kind in TriggerKind::CONFIGURABLE {
            let Some(setting) = self.triggers.get(kind) else {
                continue;
            };
            if setting.action != ActionChoice::Custom {
                continue;
            }
            match setting.custom_id {
                None => problems.push(format!("{} uses a custom action without custom_id", kind)),
                Some(id) if !ids.contains(&id) => {
                    problems.push(format!("{} references unknown custom motion #{}", kind, id))
                }
                Some(_) => {}
            }
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.monitor.tick_rate_hz, 192);
        assert_eq!(config.monitor.target, Target::P2);
        assert!(config.monitor.report_advantage);
        assert!(!config.triggers.after_block.enabled);
        assert!(!config.auto_airtech.enabled);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[monitor]
target = "both"

[triggers.after_block]
enabled = true
delay_ticks = 3
action = "dp"

[triggers.on_wakeup]
enabled = true
action = "custom"
custom_id = 1

[auto_airtech]
enabled = true
direction = "back"

[[motions]]
id = 1
name = "reversal"
notation = "623C"

[logging]
level = "debug"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.monitor.target, Target::Both);
        assert_eq!(config.monitor.tick_rate_hz, 192);
        assert!(config.triggers.after_block.enabled);
        assert_eq!(config.triggers.after_block.delay_ticks, 3);
        assert_eq!(config.triggers.after_block.action, ActionChoice::Dp);
        assert_eq!(config.triggers.on_wakeup.custom_id, Some(1));
        assert_eq!(config.auto_airtech.direction, TechDirection::Back);
        assert_eq!(config.motions[0].notation, "623C");
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_dangling_custom_id() {
        let mut config = Config::default();
        config.triggers.after_hitstun = TriggerSetting {
            enabled: true,
            action: ActionChoice::Custom,
            custom_id: Some(4),
            ..TriggerSetting::default()
        };
        assert!(config.validate().is_err());

        config.motions.push(CustomMotion {
            id: 4,
            name: None,
            notation: "2A 2B".to_string(),
        });
        assert!(config.validate().is_ok());

        config.motions.push(CustomMotion {
            id: 4,
            name: None,
            notation: "5C".to_string(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_notation() {
        let mut config = Config::default();
        config.motions.push(CustomMotion {
            id: 1,
            name: None,
            notation: "23X".to_string(),
        });
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(config.problems()[0].starts_with("motion #1: Invalid motion notation"));

        config.monitor.tick_rate_hz = 0;
        assert_eq!(config.problems().len(), 2);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir()
            .join(format!("frame-monitor-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[monitor]\ntarget = \"p1\"\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.monitor.target, Target::P1);

        std::fs::write(&path, "[monitor\n").unwrap();
        assert!(matches!(Config::from_file(&path), Err(Error::ConfigParse { .. })));
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(Config::from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_target_includes() {
        assert!(Target::P2.includes(Player::P2));
        assert!(!Target::P2.includes(Player::P1));
        assert!(Target::Both.includes(Player::P1));
    }
}
