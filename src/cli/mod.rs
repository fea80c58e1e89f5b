//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::config::Target;
use crate::input::{Button, Facing};
use crate::{Config, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Frame advantage monitor CLI
#[derive(Parser, Debug)]
#[command(name = "frame-monitor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "FRAME_MONITOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a recorded session through the monitor
    Replay {
        /// JSON-lines recording, one line per tick
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Pace the replay at the configured tick rate
        #[arg(long)]
        realtime: bool,

        /// Players triggers act for (overrides config)
        #[arg(short, long, value_enum)]
        target: Option<Target>,
    },

    /// Show the input frames generated for a motion
    Motion {
        /// Motion family (qcf, dp, charge-back, ...) or numpad notation (236C, [4]6A)
        motion: String,

        /// Button for a motion family
        #[arg(short, long, value_enum, default_value = "c")]
        strength: Button,

        /// Facing used to resolve directions
        #[arg(short, long, value_enum, default_value = "right")]
        facing: Facing,
    },

    /// Validate a configuration file
    ConfigValidate {
        /// Path to configuration file
        file: PathBuf,
    },
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text table
    Table,
}

/// Execute the CLI command
pub async fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Replay { .. } => commands::replay::execute(args, config).await,
        Commands::Motion {
            motion,
            strength,
            facing,
        } => commands::motion::execute(&motion, strength, facing),
        Commands::ConfigValidate { file } => commands::config_validate::execute(file),
    }
}
