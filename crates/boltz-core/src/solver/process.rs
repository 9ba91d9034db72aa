use super::{SolverOutputs, TransportSolver};
use crate::config::RunConfig;
use crate::domain::{HarnessError, HarnessResult};
use crate::translate::SolverParameters;
use std::io::{ErrorKind, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::time::Instant;
use tracing::{info, warn};

const SIGINT: i32 = 2;
// Exit status Windows reports for a console process stopped by Ctrl+C.
const STATUS_CONTROL_C_EXIT: i32 = 0xC000_013A_u32 as i32;

/// Runs the solver as a child process.
///
/// The parameter set is written to the child's stdin as one JSON object and
/// the output fields are read back as one JSON object from its stdout. The
/// child's stderr is left attached to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProcessSolver {
    program: String,
    args: Vec<String>,
}

impl ExternalProcessSolver {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_command(command: &[String]) -> HarnessResult<Self> {
        let (program, args) = command.split_first().ok_or_else(|| {
            HarnessError::configuration(
                "CONFIG.SOLVER_COMMAND",
                "solver.command must name the solver program",
            )
        })?;
        Ok(Self::new(program.clone(), args.to_vec()))
    }

    pub fn from_config(config: &RunConfig) -> HarnessResult<Self> {
        Self::from_command(&config.solver_command)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl TransportSolver for ExternalProcessSolver {
    fn run(&mut self, parameters: &SolverParameters) -> HarnessResult<SolverOutputs> {
        let payload = serde_json::to_vec(parameters).map_err(|source| {
            HarnessError::internal(
                "SYS.SOLVER_PAYLOAD",
                format!("failed to serialize solver parameters: {}", source),
            )
        })?;

        info!(program = %self.program, "starting solver");
        let started = Instant::now();
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| {
                HarnessError::solver(
                    "RUN.SOLVER_SPAWN",
                    format!("failed to start solver '{}': {}", self.program, source),
                )
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&payload) {
                Ok(()) => {}
                Err(error) if error.kind() == ErrorKind::BrokenPipe => {
                    warn!(program = %self.program, "solver closed stdin before reading parameters");
                }
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(HarnessError::solver(
                        "RUN.SOLVER_STDIN",
                        format!(
                            "failed to send parameters to solver '{}': {}",
                            self.program, source
                        ),
                    ));
                }
            }
        }

        let output = child.wait_with_output().map_err(|source| {
            HarnessError::solver(
                "RUN.SOLVER_WAIT",
                format!("failed to wait for solver '{}': {}", self.program, source),
            )
        })?;
        check_exit_status(&self.program, output.status)?;
        info!(
            program = %self.program,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "solver finished"
        );

        serde_json::from_slice::<SolverOutputs>(&output.stdout).map_err(|source| {
            HarnessError::solver(
                "RUN.SOLVER_OUTPUT",
                format!(
                    "solver '{}' produced unreadable output fields: {}",
                    self.program, source
                ),
            )
        })
    }
}

fn check_exit_status(program: &str, status: ExitStatus) -> HarnessResult<()> {
    if status.success() {
        return Ok(());
    }

    match (status.code(), terminating_signal(status)) {
        (Some(STATUS_CONTROL_C_EXIT), _) | (None, Some(SIGINT)) => Err(HarnessError::interrupted(
            "RUN.INTERRUPTED",
            format!("solver '{}' was interrupted", program),
        )),
        (Some(code), _) => Err(HarnessError::solver(
            "RUN.SOLVER_EXIT",
            format!("solver '{}' failed with exit code {}", program, code),
        )),
        (None, Some(signal)) => Err(HarnessError::solver(
            "RUN.SOLVER_SIGNAL",
            format!("solver '{}' was terminated by signal {}", program, signal),
        )),
        (None, None) => Err(HarnessError::solver(
            "RUN.SOLVER_EXIT",
            format!("solver '{}' terminated abnormally", program),
        )),
    }
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}
