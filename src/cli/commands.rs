//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::{Config, Result, cli::Cli};
use std::path::PathBuf;

/// Replay command implementation
pub mod replay {
    use super::*;
    use crate::cli::{Commands, OutputFormat};
    use crate::host::{ConsolePresenter, RecordingSink, ReplaySource};
    use crate::monitor::Runner;

    /// Execute the replay command
    pub async fn execute(args: Cli, mut config: Config) -> Result<()> {
        let (file, format, realtime, target) = match args.command {
            Commands::Replay {
                file,
                format,
                realtime,
                target,
            } => (file, format, realtime, target),
            _ => unreachable!("replay::execute called with wrong command"),
        };

        if let Some(target) = target {
            config.monitor.target = target;
        }
        config.validate()?;

        tracing::info!("Replaying {:?}", file);
        let source = ReplaySource::open(&file).await?;
        let mut runner = Runner::new(source, RecordingSink::new(), ConsolePresenter, config);

        if realtime {
            runner.run_paced().await?;
        } else {
            runner.run_to_end().await?;
        }
        let written = runner.sink().written().len();
        let log = runner.into_log();

        match format {
            OutputFormat::Json => {
                crate::cli::output::output_json(&mut std::io::stdout(), &file, &log, written)?;
            }
            OutputFormat::Table => {
                crate::cli::output::output_table(&mut std::io::stdout(), &file, &log, written)?;
            }
        }

        Ok(())
    }
}

/// Motion command implementation
pub mod motion {
    use crate::input::{Action, Button, Facing, SpecialMotion, motion};
    use crate::Result;
    use clap::ValueEnum;

    /// Resolve a family name or notation into an action
    pub fn parse_action(text: &str, strength: Button) -> Action {
        match SpecialMotion::from_str(text, true) {
            Ok(motion) => Action::Special {
                motion,
                button: strength,
            },
            Err(_) => Action::Custom {
                id: 0,
                notation: text.to_string(),
            },
        }
    }

    /// Execute the motion command
    pub fn execute(text: &str, strength: Button, facing: Facing) -> Result<()> {
        let action = parse_action(text, strength);
        let frames = motion::build(&action)?;
        crate::cli::output::output_motion(&mut std::io::stdout(), &action, &frames, facing)
    }

}

/// Config validate command implementation
pub mod config_validate {
    use super::*;
    use crate::trigger::TriggerKind;

    /// Execute the config-validate command
    pub fn execute(config_path: PathBuf) -> Result<()> {
        tracing::info!("Validating configuration: {:?}", config_path);

        let config = match Config::read_file(&config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {}", e);
                return Err(e);
            }
        };

        let errors = config.problems();
        let mut warnings = Vec::new();
        let enabled: Vec<TriggerKind> = TriggerKind::CONFIGURABLE
            .into_iter()
            .filter(|k| config.triggers.get(*k).is_some_and(|s| s.enabled))
            .collect();
        if enabled.is_empty() && !config.auto_airtech.enabled {
            warnings.push("No trigger is enabled".to_string());
        }
        if config.monitor.tick_rate_hz != crate::clock::DEFAULT_TICK_RATE_HZ {
            warnings.push(format!(
                "tick_rate_hz {} differs from the game's {} Hz subframe rate",
                config.monitor.tick_rate_hz,
                crate::clock::DEFAULT_TICK_RATE_HZ
            ));
        }

        // Print validation report
        println!("📋 Configuration Validation Report");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("File: {:?}", config_path);
        println!();
        println!("Monitor:");
        println!("  Tick rate: {} Hz", config.monitor.tick_rate_hz);
        println!("  Target: {:?}", config.monitor.target);
        println!();
        println!("Triggers:");
        for kind in TriggerKind::CONFIGURABLE {
            if let Some(setting) = config.triggers.get(kind) {
                println!(
                    "    - {} ({}, {:?}, delay {} ticks)",
                    kind,
                    if setting.enabled { "on" } else { "off" },
                    setting.action,
                    setting.delay_ticks
                );
            }
        }
        println!(
            "    - {} ({}, {:?}, delay {} ticks)",
            TriggerKind::AutoAirtech,
            if config.auto_airtech.enabled { "on" } else { "off" },
            config.auto_airtech.direction,
            config.auto_airtech.delay_ticks
        );
        println!();
        println!("Motions: {}", config.motions.len());
        for motion in &config.motions {
            println!(
                "    - #{} {} ({})",
                motion.id,
                motion.name.as_deref().unwrap_or("unnamed"),
                motion.notation
            );
        }
        println!();

        // Print errors
        if !errors.is_empty() {
            println!("❌ Errors:");
            for error in &errors {
                println!("   {}", error);
            }
            println!();
        }

        // Print warnings
        if !warnings.is_empty() {
            println!("⚠️  Warnings:");
            for warning in &warnings {
                println!("   {}", warning);
            }
            println!();
        }

        // Final verdict
        if errors.is_empty() {
            println!("✅ Configuration is valid!");
            Ok(())
        } else {
            println!("❌ Configuration validation failed with {} error(s)", errors.len());
            crate::bail!("Configuration validation failed")
        }
    }
}
