use crate::domain::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};

/// Output fields the solver exposes after a completed run.
///
/// Errors are the solver's relative errors and are carried verbatim. Fields a
/// solver does not report stay at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOutputs {
    #[serde(rename = "IonisationRate")]
    pub ionisation_rate: f64,
    #[serde(rename = "AttachmentRate")]
    pub attachment_rate: f64,
    #[serde(rename = "MeanElectronEnergy")]
    pub mean_electron_energy: f64,
    #[serde(rename = "MeanElectronEnergyError")]
    pub mean_electron_energy_error: f64,
    #[serde(rename = "VelocityX")]
    pub velocity_x: f64,
    #[serde(rename = "VelocityY")]
    pub velocity_y: f64,
    #[serde(rename = "VelocityZ")]
    pub velocity_z: f64,
    #[serde(rename = "VelocityErrorX")]
    pub velocity_error_x: f64,
    #[serde(rename = "VelocityErrorY")]
    pub velocity_error_y: f64,
    #[serde(rename = "VelocityErrorZ")]
    pub velocity_error_z: f64,
    #[serde(rename = "MeanCollisionTime")]
    pub mean_collision_time: f64,
    #[serde(rename = "TransverseDiffusion")]
    pub transverse_diffusion: f64,
    #[serde(rename = "TransverseDiffusionError")]
    pub transverse_diffusion_error: f64,
    #[serde(rename = "LongitudinalDiffusion")]
    pub longitudinal_diffusion: f64,
    #[serde(rename = "LongitudinalDiffusionError")]
    pub longitudinal_diffusion_error: f64,
    #[serde(rename = "DiffusionX")]
    pub diffusion_x: f64,
    #[serde(rename = "DiffusionY")]
    pub diffusion_y: f64,
    #[serde(rename = "DiffusionZ")]
    pub diffusion_z: f64,
    #[serde(rename = "ErrorDiffusionX")]
    pub error_diffusion_x: f64,
    #[serde(rename = "ErrorDiffusionY")]
    pub error_diffusion_y: f64,
    #[serde(rename = "ErrorDiffusionZ")]
    pub error_diffusion_z: f64,
    #[serde(rename = "DiffusionXY")]
    pub diffusion_xy: f64,
    #[serde(rename = "DiffusionXZ")]
    pub diffusion_xz: f64,
    #[serde(rename = "DiffusionYZ")]
    pub diffusion_yz: f64,
    #[serde(rename = "ErrorDiffusionXY")]
    pub error_diffusion_xy: f64,
    #[serde(rename = "ErrorDiffusionXZ")]
    pub error_diffusion_xz: f64,
    #[serde(rename = "ErrorDiffusionYZ")]
    pub error_diffusion_yz: f64,
}

impl SolverOutputs {
    /// Every field paired with its solver wire name.
    pub fn named_fields(&self) -> [(&'static str, f64); 27] {
        [
            ("IonisationRate", self.ionisation_rate),
            ("AttachmentRate", self.attachment_rate),
            ("MeanElectronEnergy", self.mean_electron_energy),
            ("MeanElectronEnergyError", self.mean_electron_energy_error),
            ("VelocityX", self.velocity_x),
            ("VelocityY", self.velocity_y),
            ("VelocityZ", self.velocity_z),
            ("VelocityErrorX", self.velocity_error_x),
            ("VelocityErrorY", self.velocity_error_y),
            ("VelocityErrorZ", self.velocity_error_z),
            ("MeanCollisionTime", self.mean_collision_time),
            ("TransverseDiffusion", self.transverse_diffusion),
            ("TransverseDiffusionError", self.transverse_diffusion_error),
            ("LongitudinalDiffusion", self.longitudinal_diffusion),
            ("LongitudinalDiffusionError", self.longitudinal_diffusion_error),
            ("DiffusionX", self.diffusion_x),
            ("DiffusionY", self.diffusion_y),
            ("DiffusionZ", self.diffusion_z),
            ("ErrorDiffusionX", self.error_diffusion_x),
            ("ErrorDiffusionY", self.error_diffusion_y),
            ("ErrorDiffusionZ", self.error_diffusion_z),
            ("DiffusionXY", self.diffusion_xy),
            ("DiffusionXZ", self.diffusion_xz),
            ("DiffusionYZ", self.diffusion_yz),
            ("ErrorDiffusionXY", self.error_diffusion_xy),
            ("ErrorDiffusionXZ", self.error_diffusion_xz),
            ("ErrorDiffusionYZ", self.error_diffusion_yz),
        ]
    }

    /// JSON has no NaN or infinity, so such values cannot be reported verbatim.
    pub fn ensure_finite(&self) -> HarnessResult<()> {
        let rejected: Vec<String> = self
            .named_fields()
            .into_iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        if rejected.is_empty() {
            return Ok(());
        }
        Err(HarnessError::solver(
            "RUN.SOLVER_NON_FINITE",
            format!("solver returned non-finite outputs: {}", rejected.join(", ")),
        ))
    }
}
