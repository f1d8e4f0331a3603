//! # snackgen CLI Module
//!
//! This module implements the CLI interface for snackgen.
//!
//! ## Available Commands
//!
//! - `generate` - Generate combos or single items
//! - `plan` - Build a per-window snack plan
//! - `catalog` - Show catalog summary
//! - `validate` - Load and validate a catalog directory

mod commands;

use clap::{Args, Parser, Subcommand};
use snackgen::AppConfig;
use snackgen_core::SnackError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// snackgen - seeded snack ideas
///
/// Combines catalog components into named snacks. The same seed always
/// produces the same snacks.
#[derive(Parser, Debug)]
#[command(name = "snackgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog directory (overrides the bundled catalog)
    #[arg(short = 'C', long, global = true)]
    pub catalog_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate snacks
    Generate(GenerateArgs),

    /// Build a snack plan for a set of time windows
    Plan {
        /// Session seed (defaults to the current time)
        #[arg(short, long)]
        seed: Option<String>,

        /// Window labels (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        windows: Vec<String>,

        /// Preference tag
        #[arg(short, long)]
        preference: Option<String>,

        /// Restriction terms (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        restrict: Vec<String>,
    },

    /// Show catalog summary
    Catalog,

    /// Load and validate a catalog directory
    Validate {
        /// Directory holding components.json and combo_rules.json
        #[arg(short, long)]
        dir: PathBuf,
    },
}

/// Arguments for `generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// RNG seed (defaults to the current time)
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Preference tag (balanced disables filtering)
    #[arg(short, long)]
    pub preference: Option<String>,

    /// Restriction terms (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub restrict: Vec<String>,

    /// Single items instead of combos
    #[arg(short, long)]
    pub atomic: bool,

    /// Minimum add-ons per combo
    #[arg(long)]
    pub min_adds: Option<usize>,

    /// Maximum add-ons per combo
    #[arg(long)]
    pub max_adds: Option<usize>,

    /// Names to exclude (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Add-on names that may not be drawn (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude_adds: Vec<String>,

    /// Force this base into every combo
    #[arg(long)]
    pub lock_base: Option<String>,

    /// Force this add-on into a combo
    #[arg(long)]
    pub lock_add: Option<String>,

    /// Atomic mode: side items only
    #[arg(long)]
    pub sides_only: bool,

    /// Atomic mode: leave bases out
    #[arg(long)]
    pub no_bases: bool,
}

/// Output switches shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub verbose: bool,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), SnackError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let out = Output {
        json: cli.json_mode,
        verbose: cli.verbose,
    };
    let catalog_dir = cli.catalog_dir.as_deref();

    match cli.command {
        Some(Commands::Generate(args)) => cmd_generate(&config, catalog_dir, out, &args),
        Some(Commands::Plan {
            seed,
            windows,
            preference,
            restrict,
        }) => cmd_plan(
            &config,
            catalog_dir,
            out,
            seed,
            &windows,
            preference,
            &restrict,
        ),
        Some(Commands::Validate { dir }) => cmd_validate(&dir, out),
        Some(Commands::Catalog) | None => {
            // No subcommand - show catalog summary by default
            cmd_catalog(&config, catalog_dir, out)
        }
    }
}
