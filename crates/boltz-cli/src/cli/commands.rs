use super::CliError;
use super::{interrupt, logging};
use anyhow::Context;
use boltz_core::domain::{RunRequest, RunSummary};
use boltz_core::load_request;
use boltz_core::pipeline::Pipeline;
use boltz_core::solver::ExternalProcessSolver;
use std::io::Write;
use std::path::PathBuf;

pub(super) fn run_harness(
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<i32, CliError> {
    let request = RunRequest {
        config_path: config,
        output_path: output,
    };

    // The logging section lives in the document, so loading runs unlogged.
    let (document, output_path) = load_request(&request).map_err(CliError::Run)?;
    logging::init(document.logging.as_ref());
    let interrupt_flag = interrupt::install_handler()?;

    let summary = Pipeline::new()
        .with_interrupt_flag(interrupt_flag)
        .run_document(&document, &output_path, ExternalProcessSolver::from_config)
        .map_err(CliError::Run)?;

    print_summary(&summary).context("failed to write run summary")?;
    Ok(0)
}

fn print_summary(summary: &RunSummary) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Run status: {}", summary.stage)?;
    writeln!(stdout, "Random seed: {}", summary.seed)?;
    writeln!(stdout, "Report: {}", summary.output_path.display())?;
    Ok(())
}
