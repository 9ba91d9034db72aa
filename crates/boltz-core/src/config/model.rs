use crate::common::{AngularModel, GasSpecies};

#[derive(Debug, Clone, PartialEq)]
pub struct MixtureEntry {
    /// Name as spelled in the document; echoed back in the report.
    pub name: String,
    pub species: GasSpecies,
    pub fraction: f64,
}

/// Validated gas mixture: at most six distinct species in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GasMixture {
    entries: Vec<MixtureEntry>,
}

impl GasMixture {
    pub(crate) fn new(entries: Vec<MixtureEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MixtureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_fraction(&self) -> f64 {
        self.entries.iter().map(|entry| entry.fraction).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Derive the seed from the wall clock when parameters are translated.
    Auto,
    Fixed(i64),
}

/// Configuration that passed validation; the only input the translator accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub mixture: GasMixture,
    pub temperature_c: f64,
    pub pressure_torr: f64,
    pub enable_penning: bool,
    pub thermal_motion: bool,
    pub max_electron_energy_ev: f64,
    pub events: u64,
    pub electric_field_v_per_cm: f64,
    pub magnetic_field_kgauss: f64,
    pub magnetic_field_angle_deg: f64,
    pub console_output: bool,
    pub steady_state_threshold: u32,
    pub angular_model: AngularModel,
    pub seed: SeedPolicy,
    pub logging: Option<serde_yaml::Value>,
    pub solver_command: Vec<String>,
}
