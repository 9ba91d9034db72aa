use crate::domain::{HarnessError, HarnessResult};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_SOLVER_PROGRAM: &str = "boltz-solver";
pub const DEFAULT_STEADY_STATE_THRESHOLD: f64 = 40.0;

/// Configuration document as written by the user, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfigDocument {
    pub gas: GasSection,
    #[serde(default)]
    pub enable_penning: FlagValue,
    #[serde(default)]
    pub electron: ElectronSection,
    pub events: f64,
    pub electric_field: f64,
    #[serde(default)]
    pub magnetic_field: MagneticFieldSection,
    #[serde(default)]
    pub console_output: FlagValue,
    #[serde(default = "default_steady_state_threshold")]
    pub steady_state_threshold: f64,
    #[serde(default = "default_angular_model")]
    pub angular_model: String,
    #[serde(default)]
    pub seed: f64,
    /// Handed to the logging configurator untouched.
    #[serde(default)]
    pub logging: Option<serde_yaml::Value>,
    #[serde(default)]
    pub solver: SolverSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GasSection {
    pub mix: IndexMap<String, f64>,
    pub temperature: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElectronSection {
    #[serde(default = "FlagValue::enabled")]
    pub thermal_motion: FlagValue,
    #[serde(default)]
    pub max_energy: f64,
}

impl Default for ElectronSection {
    fn default() -> Self {
        Self {
            thermal_motion: FlagValue::enabled(),
            max_energy: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct MagneticFieldSection {
    #[serde(default)]
    pub magnitude: f64,
    #[serde(default)]
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SolverSection {
    #[serde(default = "default_solver_command")]
    pub command: Vec<String>,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            command: default_solver_command(),
        }
    }
}

/// Boolean-like switch; documents may use `true`/`false` or `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
}

impl FlagValue {
    pub const fn enabled() -> Self {
        Self::Bool(true)
    }

    pub const fn is_enabled(self) -> bool {
        match self {
            Self::Bool(value) => value,
            Self::Int(value) => value != 0,
        }
    }
}

impl Default for FlagValue {
    fn default() -> Self {
        Self::Bool(false)
    }
}

fn default_steady_state_threshold() -> f64 {
    DEFAULT_STEADY_STATE_THRESHOLD
}

fn default_angular_model() -> String {
    crate::common::AngularModel::default().as_str().to_string()
}

fn default_solver_command() -> Vec<String> {
    vec![DEFAULT_SOLVER_PROGRAM.to_string()]
}

impl ConfigDocument {
    pub fn from_path(path: &Path) -> HarnessResult<Self> {
        let source = fs::read_to_string(path).map_err(|source| {
            HarnessError::configuration(
                "CONFIG.READ",
                format!(
                    "failed to read configuration file '{}': {}",
                    path.display(),
                    source
                ),
            )
        })?;
        Self::from_yaml(&source).map_err(|error| error.at(path.display()))
    }

    pub fn from_yaml(source: &str) -> HarnessResult<Self> {
        serde_yaml::from_str::<Self>(source).map_err(|source| {
            let message = source.to_string();
            let placeholder = if message.contains("missing field") {
                "CONFIG.MISSING_KEY"
            } else {
                "CONFIG.PARSE"
            };
            HarnessError::configuration(
                placeholder,
                format!("failed to parse configuration document: {}", message),
            )
        })
    }
}
