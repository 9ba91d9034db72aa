mod model;

pub use model::{
    AxisReport, DiffusionReport, ElectronReport, FieldReport, GasReport, Measured, ResultReport,
};

use crate::config::RunConfig;
use crate::domain::{HarnessError, HarnessResult};
use crate::solver::SolverOutputs;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

const REPORT_INDENT: &[u8] = b"    ";

impl ResultReport {
    /// Restructures solver outputs; every number is copied as-is.
    pub fn from_run(config: &RunConfig, outputs: &SolverOutputs) -> Self {
        Self {
            gas: GasReport {
                mix: config
                    .mixture
                    .entries()
                    .iter()
                    .map(|entry| (entry.name.clone(), entry.fraction))
                    .collect(),
                temperature_c: config.temperature_c,
                pressure_torr: config.pressure_torr,
                ionization_rate_1_per_cm: outputs.ionisation_rate,
                attachment_rate_1_per_cm: outputs.attachment_rate,
            },
            field: FieldReport {
                electric_v_per_cm: config.electric_field_v_per_cm,
                magnetic_kgauss: config.magnetic_field_kgauss,
                magnetic_angle_deg: config.magnetic_field_angle_deg,
            },
            electron: ElectronReport {
                mean_energy_ev: Measured::new(
                    outputs.mean_electron_energy,
                    outputs.mean_electron_energy_error,
                ),
            },
            drift_velocity: AxisReport {
                x: Measured::new(outputs.velocity_x, outputs.velocity_error_x),
                y: Measured::new(outputs.velocity_y, outputs.velocity_error_y),
                z: Measured::new(outputs.velocity_z, outputs.velocity_error_z),
            },
            diffusion: DiffusionReport {
                transverse: Measured::new(
                    outputs.transverse_diffusion,
                    outputs.transverse_diffusion_error,
                ),
                longitudinal: Measured::new(
                    outputs.longitudinal_diffusion,
                    outputs.longitudinal_diffusion_error,
                ),
                x: Measured::new(outputs.diffusion_x, outputs.error_diffusion_x),
                y: Measured::new(outputs.diffusion_y, outputs.error_diffusion_y),
                z: Measured::new(outputs.diffusion_z, outputs.error_diffusion_z),
                xy: Measured::new(outputs.diffusion_xy, outputs.error_diffusion_xy),
                xz: Measured::new(outputs.diffusion_xz, outputs.error_diffusion_xz),
                yz: Measured::new(outputs.diffusion_yz, outputs.error_diffusion_yz),
            },
            mean_collision_time_ps: outputs.mean_collision_time,
        }
    }
}

pub fn render_report_json(report: &ResultReport) -> HarnessResult<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(REPORT_INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    report.serialize(&mut serializer).map_err(|source| {
        HarnessError::internal(
            "SYS.REPORT_SERIALIZE",
            format!("failed to serialize result report: {}", source),
        )
    })?;
    buffer.push(b'\n');

    String::from_utf8(buffer).map_err(|source| {
        HarnessError::internal(
            "SYS.REPORT_SERIALIZE",
            format!("result report is not valid UTF-8: {}", source),
        )
    })
}

/// Writes the report in one shot.
///
/// The document is staged in a temporary file next to `path` and renamed into
/// place, so readers never observe a partially written report.
pub fn write_report(path: &Path, report: &ResultReport) -> HarnessResult<()> {
    let rendered = render_report_json(report)?;

    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|source| {
        HarnessError::io_system(
            "IO.REPORT_DIRECTORY",
            format!(
                "failed to create report directory '{}': {}",
                parent_dir.display(),
                source
            ),
        )
    })?;

    let mut staged = NamedTempFile::new_in(parent_dir).map_err(|source| {
        HarnessError::io_system(
            "IO.REPORT_WRITE",
            format!(
                "failed to stage report in '{}': {}",
                parent_dir.display(),
                source
            ),
        )
    })?;
    staged
        .write_all(rendered.as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|source| {
            HarnessError::io_system(
                "IO.REPORT_WRITE",
                format!("failed to write report '{}': {}", path.display(), source),
            )
        })?;
    staged.persist(path).map_err(|source| {
        HarnessError::io_system(
            "IO.REPORT_WRITE",
            format!("failed to place report at '{}': {}", path.display(), source.error),
        )
    })?;

    info!(path = %path.display(), bytes = rendered.len(), "wrote result report");
    Ok(())
}
