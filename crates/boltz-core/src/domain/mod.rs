pub mod errors;

pub use errors::{HarnessError, HarnessErrorCategory, HarnessResult};

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Loading,
    Validating,
    Translating,
    Running,
    Reporting,
    Done,
    Failed,
}

impl PipelineStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "LOADING",
            Self::Validating => "VALIDATING",
            Self::Translating => "TRANSLATING",
            Self::Running => "RUNNING",
            Self::Reporting => "REPORTING",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
        }
    }

    /// Stage that follows a successful completion of `self`.
    pub const fn next(self) -> Self {
        match self {
            Self::Loading => Self::Validating,
            Self::Validating => Self::Translating,
            Self::Translating => Self::Running,
            Self::Running => Self::Reporting,
            Self::Reporting => Self::Done,
            Self::Done => Self::Done,
            Self::Failed => Self::Failed,
        }
    }

    /// Whether a failure in this stage happens before the solver is started.
    pub const fn precedes_solver(self) -> bool {
        matches!(self, Self::Loading | Self::Validating | Self::Translating)
    }
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunRequest {
    pub config_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

impl RunRequest {
    pub fn new(config_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(config_path.into()),
            output_path: Some(output_path.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub seed: i64,
    pub output_path: PathBuf,
    pub stage: PipelineStage,
}
