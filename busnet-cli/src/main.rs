use std::process::ExitCode;

use busnet_dispatch::{DisplaySink, Dispatcher, HttpTransport, Outcome};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::commands::ActionCommand;

mod commands;
mod shell;

#[derive(Parser, Debug)]
#[command(name = "busnet", author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the busnet backend
    #[arg(env = "BUSNET_BASE_URL", long, default_value = "http://127.0.0.1:5000")]
    base_url: String,

    /// Action to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Action(ActionCommand),
    /// Read actions from stdin, one per line, and fire them without waiting
    Shell,
}

/// Prints displayed text to stdout and alerts to stderr.
struct TerminalSink;

impl DisplaySink for TerminalSink {
    fn show(&self, text: &str) {
        println!("{text}");
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        // Standard logger, configured via the RUST_LOG env variable.
        // Logs go to stderr so they never mix with rendered output.
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    let cli = Cli::parse();
    let transport = HttpTransport::new(&cli.base_url)?;
    info!(base_url = %transport.base_url(), "Using backend");

    match cli.command {
        Commands::Action(command) => {
            let dispatcher = Dispatcher::new(transport, TerminalSink);
            match dispatcher.dispatch(command.into()).await {
                Outcome::Rendered(_) => Ok(ExitCode::SUCCESS),
                Outcome::Failed(_) => Ok(ExitCode::FAILURE),
                Outcome::Rejected(_) => Ok(ExitCode::from(2)),
            }
        }
        Commands::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run(transport, stdin, std::io::stdout()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
