//! # snackgen
//!
//! The command-line front end for the snackgen generator.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │               apps/snackgen (THE BINARY)         │
//! │                                                  │
//! │  ┌─────────────┐  ┌─────────────┐  ┌──────────┐  │
//! │  │    CLI      │  │   Config    │  │  Render  │  │
//! │  │   (clap)    │  │   (toml)    │  │ (json)   │  │
//! │  └──────┬──────┘  └──────┬──────┘  └────┬─────┘  │
//! │         └────────────────┼──────────────┘        │
//! │                          ▼                       │
//! │                 ┌─────────────────┐              │
//! │                 │  snackgen-core  │              │
//! │                 │  (THE ENGINE)   │              │
//! │                 └─────────────────┘              │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! snackgen generate --seed s2 --restrict nuts --limit 6
//! snackgen generate --atomic --sides-only --seed s1
//! snackgen plan --seed session-1 --windows 10:30,15:30
//! snackgen --json-mode catalog
//! snackgen validate --dir ./catalog
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing: SNACKGEN_LOG_FORMAT=json switches to JSON lines.
    let log_format = std::env::var("SNACKGEN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "snackgen=info,snackgen_core=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner (text mode only)
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the snackgen startup banner.
fn print_banner() {
    println!(
        r#"
  snackgen v{}
  Seeded • Combinatorial • Reproducible
"#,
        env!("CARGO_PKG_VERSION")
    );
}
