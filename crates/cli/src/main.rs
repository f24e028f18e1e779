//! mdj - offline tools for the metadata disk journal
//!
//! Inspect, validate, and replay a journal device without mounting the
//! filesystem that produced it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mdj_core::layout::DEFAULT_DEVICE_PATH;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "mdj")]
#[command(about = "Metadata disk journal - offline inspection tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: output::OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a zeroed backing device file
    Init {
        #[arg(long, default_value = DEFAULT_DEVICE_PATH)]
        device: PathBuf,

        /// Recreate the device even if it already exists
        #[arg(long)]
        force: bool,
    },
    /// Replay the journal and print the ordered event stream
    Replay {
        #[arg(long, default_value = DEFAULT_DEVICE_PATH)]
        device: PathBuf,

        /// Only print events touching this inode
        #[arg(long)]
        ino: Option<u32>,
    },
    /// Validate the on-device journal without printing events
    Validate {
        #[arg(long, default_value = DEFAULT_DEVICE_PATH)]
        device: PathBuf,
    },
    /// Show header state and device capacity
    Stats {
        #[arg(long, default_value = DEFAULT_DEVICE_PATH)]
        device: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries command output only.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { device, force } => commands::init::handle(&device, force),
        Commands::Replay { device, ino } => commands::replay::handle(&device, ino, cli.format),
        Commands::Validate { device } => commands::validate::handle(&device, cli.format),
        Commands::Stats { device } => commands::stats::handle(&device, cli.format),
    }
}
