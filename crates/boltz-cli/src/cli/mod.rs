mod commands;
mod interrupt;
mod logging;

use boltz_core::domain::{HarnessError, HarnessErrorCategory};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, warn};

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let harness_error = error.as_harness_error();
            logging::init(None);
            if harness_error.category() == HarnessErrorCategory::Interrupted {
                warn!(
                    placeholder = harness_error.placeholder(),
                    class = harness_error.category().class_name(),
                    "run interrupted; no report written"
                );
            } else {
                error!(
                    placeholder = harness_error.placeholder(),
                    class = harness_error.category().class_name(),
                    exit_code = harness_error.exit_code(),
                    "{}",
                    harness_error.message()
                );
            }
            eprintln!("{}", harness_error.diagnostic_line());
            if let Some(summary_line) = harness_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            harness_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("boltz-run".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => commands::run_harness(cli.config, cli.output),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "boltz-run",
    version,
    about = "Run the electron-transport solver for one gas configuration"
)]
struct Cli {
    /// YAML run configuration
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// JSON report output path
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Run(HarnessError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_harness_error(&self) -> HarnessError {
        match self {
            Self::Usage(message) => {
                HarnessError::configuration("CONFIG.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Run(error) => error.clone(),
            Self::Internal(error) => HarnessError::internal("SYS.CLI", format!("{error:#}")),
        }
    }
}
