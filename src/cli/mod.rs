use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod decode;
pub mod replay;
pub mod serve;

use crate::core::WorkerConfig;

#[derive(Subcommand)]
enum Command {
    /// Run the worker against an emulated browser behind an HTTP API
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2223")]
        port: String,
    },
    /// Decode a push payload and print the notification it renders
    Decode {
        /// Read the payload from a file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        /// Decode as if the device could not vibrate
        #[arg(long, action, default_value = "false")]
        no_vibrate: bool,
    },
    /// Replay a JSON lines file of worker events through the emulator
    Replay {
        #[arg(long)]
        file: PathBuf,
        /// Install alongside an active previous version
        #[arg(long, action, default_value = "false")]
        replacing: bool,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = WorkerConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        Some(Command::Decode { file, no_vibrate }) => {
            init_tracing();
            decode::run(file, no_vibrate, config).await?;
        }
        Some(Command::Replay { file, replacing }) => {
            init_tracing();
            replay::run(file, replacing, config).await?;
        }
        None => {}
    }

    Ok(())
}

// Logs go to stderr so stdout stays machine readable
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
