use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultReport {
    pub gas: GasReport,
    pub field: FieldReport,
    pub electron: ElectronReport,
    pub drift_velocity: AxisReport,
    pub diffusion: DiffusionReport,
    pub mean_collision_time_ps: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GasReport {
    pub mix: IndexMap<String, f64>,
    pub temperature_c: f64,
    pub pressure_torr: f64,
    pub ionization_rate_1_per_cm: f64,
    pub attachment_rate_1_per_cm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldReport {
    pub electric_v_per_cm: f64,
    pub magnetic_kgauss: f64,
    pub magnetic_angle_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElectronReport {
    pub mean_energy_ev: Measured,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisReport {
    pub x: Measured,
    pub y: Measured,
    pub z: Measured,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiffusionReport {
    pub transverse: Measured,
    pub longitudinal: Measured,
    pub x: Measured,
    pub y: Measured,
    pub z: Measured,
    pub xy: Measured,
    pub xz: Measured,
    pub yz: Measured,
}

/// A solver value paired with its relative error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measured {
    pub value: f64,
    pub relative_error: f64,
}

impl Measured {
    pub const fn new(value: f64, relative_error: f64) -> Self {
        Self {
            value,
            relative_error,
        }
    }
}
