use crate::common::MAX_GAS_SLOTS;
use serde::Serialize;

/// Flat parameter set handed to the solver.
///
/// Built once by the translator and never mutated afterwards. Field names on
/// the wire are the solver's own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverParameters {
    #[serde(rename = "NumberOfGases")]
    pub number_of_gases: u32,
    #[serde(rename = "MaxNumberOfCollisions")]
    pub max_number_of_collisions: u64,
    #[serde(rename = "Enable_Penning")]
    pub enable_penning: u8,
    #[serde(rename = "Enable_Thermal_Motion")]
    pub enable_thermal_motion: u8,
    #[serde(rename = "Max_Electron_Energy")]
    pub max_electron_energy: f64,
    #[serde(rename = "GasIDs")]
    pub gas_ids: [u32; MAX_GAS_SLOTS],
    #[serde(rename = "GasFractions")]
    pub gas_fractions: [f64; MAX_GAS_SLOTS],
    #[serde(rename = "TemperatureCentigrade")]
    pub temperature_centigrade: f64,
    #[serde(rename = "Pressure_Torr")]
    pub pressure_torr: f64,
    #[serde(rename = "EField")]
    pub electric_field: f64,
    #[serde(rename = "BField_Mag")]
    pub magnetic_field_magnitude: f64,
    #[serde(rename = "BField_Angle")]
    pub magnetic_field_angle: f64,
    #[serde(rename = "Console_Output_Flag")]
    pub console_output_flag: u8,
    #[serde(rename = "Steady_State_Threshold")]
    pub steady_state_threshold: u32,
    #[serde(rename = "Which_Angular_Model")]
    pub which_angular_model: u32,
    #[serde(rename = "Random_Seed")]
    pub random_seed: i64,
}

pub(super) const fn flag_code(enabled: bool) -> u8 {
    if enabled { 1 } else { 0 }
}
