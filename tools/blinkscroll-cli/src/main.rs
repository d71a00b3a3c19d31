//! BlinkScroll CLI: turn facial landmark streams into scroll commands.
//!
//! Usage:
//!   blinkscroll run [OPTIONS]       Detect gestures and emit scroll events
//!   blinkscroll ratios [OPTIONS]    Print per-frame eye/mouth ratios
//!   blinkscroll config [--init]     Show or write the configuration file
//!
//! Landmark streams are JSONL, one frame per line. Pass `-` to read stdin.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::DetectionOverrides;

#[derive(Parser)]
#[command(
    name = "blinkscroll",
    about = "Scroll by blinking (down) or opening your mouth (up)",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run gesture detection over a landmark stream
    Run {
        /// Landmark stream (JSONL), or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Write scroll events as JSONL instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        detection: DetectionOverrides,
    },

    /// Print eye and mouth aspect ratios for every frame
    Ratios {
        /// Landmark stream (JSONL), or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        #[command(flatten)]
        detection: DetectionOverrides,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing configuration file with --init
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = blinkscroll_common::config::AppConfig::load();

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    blinkscroll_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Run {
            input,
            output,
            detection,
        } => commands::run::run(config, input, output, detection),
        Commands::Ratios { input, detection } => commands::ratios::run(config, input, detection),
        Commands::Config { init, force } => commands::config::run(config, init, force),
    }
}
