use std::error::Error;
use std::fmt::{Display, Formatter};

pub type HarnessResult<T> = Result<T, HarnessError>;

/// Failure classes a run can end in; each owns one process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarnessErrorCategory {
    ConfigurationError,
    ValidationError,
    IoSystemError,
    SolverError,
    InternalError,
    Interrupted,
}

impl HarnessErrorCategory {
    pub const ALL: [Self; 6] = [
        Self::ConfigurationError,
        Self::ValidationError,
        Self::IoSystemError,
        Self::SolverError,
        Self::InternalError,
        Self::Interrupted,
    ];

    /// 130 follows the shell convention for a SIGINT exit.
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::ConfigurationError => 2,
            Self::ValidationError => 3,
            Self::IoSystemError => 4,
            Self::SolverError => 5,
            Self::InternalError => 6,
            Self::Interrupted => 130,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigurationError => "ConfigurationError",
            Self::ValidationError => "ValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::SolverError => "SolverError",
            Self::InternalError => "InternalError",
            Self::Interrupted => "Interrupted",
        }
    }

    /// Exit class shown in run logs, e.g. `CONFIG_FATAL`.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::ConfigurationError => "CONFIG_FATAL",
            Self::ValidationError => "VALIDATION_FATAL",
            Self::IoSystemError => "IO_FATAL",
            Self::SolverError => "RUN_FATAL",
            Self::InternalError => "SYS_FATAL",
            Self::Interrupted => "INTERRUPTED",
        }
    }

    /// An interrupt ends the run without output but is not reported as a crash.
    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Interrupted)
    }
}

impl Display for HarnessErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// A categorised failure with a stable `AREA.DETAIL` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessError {
    category: HarnessErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl HarnessError {
    pub fn new(
        category: HarnessErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn configuration(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(HarnessErrorCategory::ConfigurationError, placeholder, message)
    }

    pub fn validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(HarnessErrorCategory::ValidationError, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(HarnessErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn solver(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(HarnessErrorCategory::SolverError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(HarnessErrorCategory::InternalError, placeholder, message)
    }

    pub fn interrupted(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(HarnessErrorCategory::Interrupted, placeholder, message)
    }

    /// Appends the file or key the failure refers to, keeping category and placeholder.
    pub fn at(mut self, location: impl Display) -> Self {
        self.message = format!("{} ({})", self.message, location);
        self
    }

    pub const fn category(&self) -> HarnessErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    /// `ERROR: [PLACEHOLDER] message` on stderr; interrupts use `INFO`.
    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() { "ERROR" } else { "INFO" };
        format!("{severity}: [{}] {}", self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        if self.category.is_fatal() {
            Some(format!("FATAL EXIT CODE: {}", self.exit_code()))
        } else {
            None
        }
    }
}

impl Display for HarnessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.category, self.placeholder, self.message)
    }
}

impl Error for HarnessError {}
