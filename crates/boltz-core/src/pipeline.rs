//! Linear run pipeline: load, validate, translate, run, report.
//!
//! Any failure before `RUNNING` aborts without touching the solver; any
//! failure before `DONE` leaves no report behind.

use crate::config::{ConfigDocument, RunConfig, validate};
use crate::domain::{
    HarnessError, HarnessErrorCategory, HarnessResult, PipelineStage, RunRequest, RunSummary,
};
use crate::report::{ResultReport, write_report};
use crate::solver::TransportSolver;
use crate::translate::{SeedClock, SystemClock, translate};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

/// Loads the configuration named by `request` and resolves the output path.
pub fn load_request(request: &RunRequest) -> HarnessResult<(ConfigDocument, PathBuf)> {
    in_stage(PipelineStage::Loading, || {
        let config_path = request.config_path.as_deref().ok_or_else(|| {
            HarnessError::configuration(
                "CONFIG.CONFIG_PATH",
                "no configuration file path was given",
            )
        })?;
        let output_path = request.output_path.clone().ok_or_else(|| {
            HarnessError::configuration("CONFIG.OUTPUT_PATH", "no output file path was given")
        })?;

        info!(path = %config_path.display(), "loading configuration");
        let document = ConfigDocument::from_path(config_path)?;
        Ok((document, output_path))
    })
}

/// Convenience wrapper around `Pipeline::new().run(..)`.
pub fn run_pipeline<F, S>(request: &RunRequest, make_solver: F) -> HarnessResult<RunSummary>
where
    F: FnOnce(&RunConfig) -> HarnessResult<S>,
    S: TransportSolver,
{
    Pipeline::new().run(request, make_solver)
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline<C = SystemClock> {
    clock: C,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Pipeline<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C> Pipeline<C>
where
    C: SeedClock,
{
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            interrupt: None,
        }
    }

    /// Watches `flag` (set by a Ctrl+C handler) between and inside stages.
    ///
    /// Once it is raised no further stage starts, and a failing stage reports
    /// `Interrupted` whatever the underlying error was.
    pub fn with_interrupt_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn run<F, S>(&self, request: &RunRequest, make_solver: F) -> HarnessResult<RunSummary>
    where
        F: FnOnce(&RunConfig) -> HarnessResult<S>,
        S: TransportSolver,
    {
        let (document, output_path) = load_request(request)?;
        self.run_document(&document, &output_path, make_solver)
    }

    /// Runs every stage after loading.
    ///
    /// `make_solver` is only called once the parameter set exists, so a
    /// rejected configuration never constructs a solver.
    pub fn run_document<F, S>(
        &self,
        document: &ConfigDocument,
        output_path: &Path,
        make_solver: F,
    ) -> HarnessResult<RunSummary>
    where
        F: FnOnce(&RunConfig) -> HarnessResult<S>,
        S: TransportSolver,
    {
        let config = self.stage(PipelineStage::Validating, || validate(document))?;
        let parameters = self.stage(PipelineStage::Translating, || {
            translate(&config, &self.clock)
        })?;

        let outputs = self.stage(PipelineStage::Running, || {
            let mut solver = make_solver(&config)?;
            let outputs = solver.run(&parameters)?;
            outputs.ensure_finite()?;
            Ok(outputs)
        })?;

        self.stage(PipelineStage::Reporting, || {
            let report = ResultReport::from_run(&config, &outputs);
            write_report(output_path, &report)
        })?;

        info!(
            stage = %PipelineStage::Done,
            seed = parameters.random_seed,
            output = %output_path.display(),
            "run complete"
        );
        Ok(RunSummary {
            seed: parameters.random_seed,
            output_path: output_path.to_path_buf(),
            stage: PipelineStage::Done,
        })
    }
}

impl<C> Pipeline<C> {
    fn interrupt_requested(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn stage<T>(
        &self,
        stage: PipelineStage,
        work: impl FnOnce() -> HarnessResult<T>,
    ) -> HarnessResult<T> {
        in_stage(stage, || {
            if self.interrupt_requested() {
                return Err(interrupted_before(stage));
            }
            work().map_err(|failure| {
                if self.interrupt_requested() {
                    HarnessError::interrupted(
                        "RUN.INTERRUPTED",
                        format!("run interrupted by user during {stage}"),
                    )
                } else {
                    failure
                }
            })
        })
    }
}

fn interrupted_before(stage: PipelineStage) -> HarnessError {
    HarnessError::interrupted(
        "RUN.INTERRUPTED",
        format!("run interrupted by user before {stage}"),
    )
}

fn in_stage<T>(
    stage: PipelineStage,
    work: impl FnOnce() -> HarnessResult<T>,
) -> HarnessResult<T> {
    info!(stage = %stage, "entering stage");
    work().inspect_err(|failure| {
        if failure.category() == HarnessErrorCategory::Interrupted {
            warn!(stage = %stage, "{}", failure.message());
        } else {
            error!(
                stage = %stage,
                next = %PipelineStage::Failed,
                solver_started = !stage.precedes_solver(),
                "{}",
                failure
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{Pipeline, load_request, run_pipeline};
    use crate::config::RunConfig;
    use crate::domain::{HarnessError, HarnessErrorCategory, HarnessResult, PipelineStage, RunRequest};
    use crate::solver::{SolverOutputs, TransportSolver};
    use crate::translate::{FixedClock, SolverParameters};
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::TempDir;

    #[derive(Default)]
    struct SpySolver {
        calls: usize,
        seen: Option<SolverParameters>,
    }

    impl TransportSolver for SpySolver {
        fn run(&mut self, parameters: &SolverParameters) -> HarnessResult<SolverOutputs> {
            self.calls += 1;
            self.seen = Some(parameters.clone());
            Ok(SolverOutputs {
                ionisation_rate: 0.001,
                ..SolverOutputs::default()
            })
        }
    }

    struct BrokenSolver;

    impl TransportSolver for BrokenSolver {
        fn run(&mut self, _parameters: &SolverParameters) -> HarnessResult<SolverOutputs> {
            Err(HarnessError::solver("RUN.SOLVER", "cross sections unavailable"))
        }
    }

    /// Stands in for a solver killed by the same Ctrl+C that raised the flag.
    struct CtrlCSolver {
        flag: Arc<AtomicBool>,
        exit_cleanly: bool,
    }

    impl TransportSolver for CtrlCSolver {
        fn run(&mut self, _parameters: &SolverParameters) -> HarnessResult<SolverOutputs> {
            self.flag.store(true, Ordering::SeqCst);
            if self.exit_cleanly {
                Ok(SolverOutputs::default())
            } else {
                Err(HarnessError::solver("RUN.SOLVER_EXIT", "solver failed with exit code 1"))
            }
        }
    }

    fn write_config(dir: &Path, mix: &str, extra: &str) -> std::path::PathBuf {
        let path = dir.join("run.yaml");
        fs::write(
            &path,
            format!(
                "gas:\n  mix: {mix}\n  temperature: 23\n  pressure: 750.062\nevents: 40000000\nelectric_field: 1000\n{extra}\n"
            ),
        )
        .expect("config should be written");
        path
    }

    #[test]
    fn valid_run_reaches_done_and_writes_report() {
        let temp = TempDir::new().expect("tempdir should be created");
        let config_path = write_config(temp.path(), "{Argon: 90, CH4: 10}", "seed: 7");
        let output_path = temp.path().join("report.json");
        let mut spy = SpySolver::default();
        let solver = &mut spy;

        let summary = run_pipeline(&RunRequest::new(&config_path, &output_path), |_| {
            Ok(solver)
        })
        .expect("pipeline should succeed");

        assert_eq!(summary.stage, PipelineStage::Done);
        assert_eq!(summary.seed, 7);
        assert_eq!(spy.calls, 1);
        let seen = spy.seen.expect("solver should have seen parameters");
        assert_eq!(seen.gas_ids, [2, 8, 0, 0, 0, 0]);
        assert!(output_path.is_file());
    }

    #[test]
    fn invalid_fraction_sum_never_reaches_the_solver() {
        let temp = TempDir::new().expect("tempdir should be created");
        let config_path = write_config(temp.path(), "{Argon: 90, CH4: 20}", "seed: 7");
        let output_path = temp.path().join("report.json");
        let mut spy = SpySolver::default();
        let solver = &mut spy;
        let mut factory_calls = 0;

        let error = run_pipeline(&RunRequest::new(&config_path, &output_path), |_| {
            factory_calls += 1;
            Ok(solver)
        })
        .expect_err("pipeline should fail validation");

        assert_eq!(error.category(), HarnessErrorCategory::ValidationError);
        assert_eq!(factory_calls, 0);
        assert_eq!(spy.calls, 0);
        assert!(!output_path.exists());
    }

    #[test]
    fn unknown_gas_never_reaches_the_solver() {
        let temp = TempDir::new().expect("tempdir should be created");
        let config_path = write_config(temp.path(), "{Argon: 90, Mithril: 10}", "");
        let output_path = temp.path().join("report.json");
        let mut spy = SpySolver::default();
        let solver = &mut spy;

        let error = run_pipeline(&RunRequest::new(&config_path, &output_path), |_| {
            Ok(solver)
        })
        .expect_err("pipeline should fail");

        assert_eq!(error.category(), HarnessErrorCategory::ConfigurationError);
        assert!(error.message().contains("Mithril"));
        assert_eq!(spy.calls, 0);
    }

    #[test]
    fn solver_failure_leaves_no_report() {
        let temp = TempDir::new().expect("tempdir should be created");
        let config_path = write_config(temp.path(), "{Argon: 100}", "seed: 3");
        let output_path = temp.path().join("report.json");

        let error = run_pipeline(&RunRequest::new(&config_path, &output_path), |_| {
            Ok(BrokenSolver)
        })
        .expect_err("solver failure should propagate");

        assert_eq!(error.category(), HarnessErrorCategory::SolverError);
        assert!(!output_path.exists());
    }

    #[test]
    fn solver_factory_errors_propagate() {
        let temp = TempDir::new().expect("tempdir should be created");
        let config_path = write_config(temp.path(), "{Argon: 100}", "");
        let output_path = temp.path().join("report.json");

        let error = run_pipeline(
            &RunRequest::new(&config_path, &output_path),
            |_: &RunConfig| -> HarnessResult<SpySolver> {
                Err(HarnessError::solver("RUN.SOLVER_SPAWN", "no solver installed"))
            },
        )
        .expect_err("factory failure should propagate");

        assert_eq!(error.placeholder(), "RUN.SOLVER_SPAWN");
        assert!(!output_path.exists());
    }

    #[test]
    fn auto_seed_comes_from_the_pipeline_clock() {
        let temp = TempDir::new().expect("tempdir should be created");
        let config_path = write_config(temp.path(), "{Argon: 100}", "seed: 0");
        let output_path = temp.path().join("report.json");
        let mut spy = SpySolver::default();
        let solver = &mut spy;

        let summary = Pipeline::with_clock(FixedClock(8675309))
            .run(&RunRequest::new(&config_path, &output_path), |_| Ok(solver))
            .expect("pipeline should succeed");

        assert_eq!(summary.seed, 8675309);
        assert_eq!(spy.seen.map(|parameters| parameters.random_seed), Some(8675309));
    }

    #[test]
    fn missing_paths_fail_at_loading() {
        let error = load_request(&RunRequest::default()).expect_err("no config path");
        assert_eq!(error.placeholder(), "CONFIG.CONFIG_PATH");

        let temp = TempDir::new().expect("tempdir should be created");
        let config_path = write_config(temp.path(), "{Argon: 100}", "");
        let request = RunRequest {
            config_path: Some(config_path),
            output_path: None,
        };
        let error = load_request(&request).expect_err("no output path");
        assert_eq!(error.category(), HarnessErrorCategory::ConfigurationError);
        assert_eq!(error.placeholder(), "CONFIG.OUTPUT_PATH");
    }

    #[test]
    fn interrupt_during_the_run_reports_interrupted_and_no_output() {
        for exit_cleanly in [false, true] {
            let temp = TempDir::new().expect("tempdir should be created");
            let config_path = write_config(temp.path(), "{Argon: 100}", "seed: 3");
            let output_path = temp.path().join("report.json");
            let flag = Arc::new(AtomicBool::new(false));
            let solver = CtrlCSolver {
                flag: Arc::clone(&flag),
                exit_cleanly,
            };

            let error = Pipeline::new()
                .with_interrupt_flag(flag)
                .run(&RunRequest::new(&config_path, &output_path), |_| Ok(solver))
                .expect_err("interrupted run should fail");

            assert_eq!(error.category(), HarnessErrorCategory::Interrupted, "{exit_cleanly}");
            assert_eq!(error.placeholder(), "RUN.INTERRUPTED");
            assert_eq!(error.exit_code(), 130);
            assert!(!output_path.exists(), "no report after an interrupt");
        }
    }

    #[test]
    fn raised_interrupt_flag_stops_before_the_solver() {
        let temp = TempDir::new().expect("tempdir should be created");
        let config_path = write_config(temp.path(), "{Argon: 100}", "seed: 3");
        let output_path = temp.path().join("report.json");
        let mut spy = SpySolver::default();
        let solver = &mut spy;

        let error = Pipeline::new()
            .with_interrupt_flag(Arc::new(AtomicBool::new(true)))
            .run(&RunRequest::new(&config_path, &output_path), |_| Ok(solver))
            .expect_err("interrupted run should fail");

        assert_eq!(error.category(), HarnessErrorCategory::Interrupted);
        assert_eq!(spy.calls, 0);
    }

    #[test]
    fn non_finite_solver_output_is_rejected_before_reporting() {
        struct NanSolver;

        impl TransportSolver for NanSolver {
            fn run(&mut self, _parameters: &SolverParameters) -> HarnessResult<SolverOutputs> {
                Ok(SolverOutputs {
                    mean_electron_energy: f64::NAN,
                    ..SolverOutputs::default()
                })
            }
        }

        let temp = TempDir::new().expect("tempdir should be created");
        let config_path = write_config(temp.path(), "{Argon: 100}", "seed: 3");
        let output_path = temp.path().join("report.json");

        let error = run_pipeline(&RunRequest::new(&config_path, &output_path), |_| {
            Ok(NanSolver)
        })
        .expect_err("NaN output should fail the run");

        assert_eq!(error.category(), HarnessErrorCategory::SolverError);
        assert_eq!(error.placeholder(), "RUN.SOLVER_NON_FINITE");
        assert!(!output_path.exists());
    }
}
