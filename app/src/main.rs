#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use command::{
    CommandStrategy, HealthStrategy, InfoStrategy, InitStrategy, PenaltiesInput,
    PenaltiesStrategy, PenaltyNotFound, ProcessInput, ProcessStrategy, VersionStrategy,
};
use fnol_core::ExtractionError;
use fnol_document::DocumentError;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "fnol")]
#[command(about = "FNOL claims processing agent", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, validate and route FNOL documents (.pdf or .txt)
    Process {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Look up state fraud penalties
    Penalties {
        /// Two-letter state code
        state: Option<String>,

        /// Only report whether a criminal penalty applies
        #[arg(long, requires = "state", conflicts_with = "civil")]
        criminal: bool,

        /// Only report whether a civil penalty applies
        #[arg(long, requires = "state")]
        civil: bool,
    },
    /// Initialize configuration
    Init,
    /// Show configuration information
    Info,
    /// Check that the agent can start
    Health,
    /// Show version
    Version,
}

/// Exit status for errors caused by the input rather than the agent.
const CLIENT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {e}");
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            if is_client_error(&e) {
                ExitCode::from(CLIENT_ERROR)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Process { files, compact } => {
            ProcessStrategy
                .execute(ProcessInput { files, compact })
                .await
        }
        Commands::Penalties {
            state,
            criminal,
            civil,
        } => {
            PenaltiesStrategy
                .execute(PenaltiesInput {
                    state,
                    criminal,
                    civil,
                })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Health => HealthStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}

fn is_client_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<DocumentError>()
            .is_some_and(DocumentError::is_client_error)
            || cause
                .downcast_ref::<ExtractionError>()
                .is_some_and(ExtractionError::is_client_error)
            || cause.is::<PenaltyNotFound>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_unsupported_document_is_client_error() {
        let err = anyhow::Error::new(DocumentError::Unsupported("claim.docx".into()))
            .context("Failed to decode claim.docx");
        assert!(is_client_error(&err));
    }

    #[test]
    fn test_missing_pdf_tool_is_not_client_error() {
        let err = anyhow::Error::new(DocumentError::PdfToolMissing {
            program: "pdftotext".into(),
        });
        assert!(!is_client_error(&err));
    }

    #[test]
    fn test_penalty_not_found_is_client_error() {
        let result: anyhow::Result<()> =
            Err(PenaltyNotFound("ZZ".into())).context("Lookup failed");
        assert!(result.is_err_and(|e| is_client_error(&e)));
    }

    #[test]
    fn test_cli_requires_state_for_flags() {
        assert!(Cli::try_parse_from(["fnol", "penalties", "--criminal"]).is_err());
        assert!(Cli::try_parse_from(["fnol", "penalties", "NY", "--civil"]).is_ok());
        assert!(Cli::try_parse_from(["fnol", "process"]).is_err());
    }
}
