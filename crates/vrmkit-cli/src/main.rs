//! vrmkit CLI - Command-line interface for VRM legacy data migration
//!
//! This binary loads a scene snapshot, migrates the legacy VRM 0.x data of its
//! rigs into normalized documents and reports what changed.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Use modules from the library crate
use vrmkit_cli::commands;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "VRMKIT_LOG";

/// vrmkit - VRM legacy data migration
#[derive(Parser)]
#[command(name = "vrmkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate every rig of a scene file and write the result
    Migrate {
        /// Path to the scene JSON file
        #[arg(short, long)]
        scene: String,

        /// Output path (default: overwrite the scene file)
        #[arg(short, long)]
        output: Option<String>,

        /// Do not stamp migrated documents with the current add-on version
        #[arg(long)]
        no_stamp: bool,

        /// Use deterministic collider group ids instead of random UUIDs
        #[arg(long)]
        sequential_ids: bool,

        /// Pretty-print the written scene
        #[arg(short, long)]
        pretty: bool,

        /// Output machine-readable JSON summary (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show each rig's migration state without modifying the scene
    Status {
        /// Path to the scene JSON file
        #[arg(short, long)]
        scene: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var(LOG_ENV).unwrap_or_else(|_| "warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate {
            scene,
            output,
            no_stamp,
            sequential_ids,
            pretty,
            json,
        } => commands::migrate::run(
            &scene,
            output.as_deref(),
            no_stamp,
            sequential_ids,
            pretty,
            json,
        ),
        Commands::Status { scene, json } => commands::status::run(&scene, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
