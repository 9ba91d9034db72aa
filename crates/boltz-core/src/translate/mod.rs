mod params;
mod seed;

pub use params::SolverParameters;
pub use seed::{FixedClock, SeedClock, SystemClock};

use crate::common::{EMPTY_GAS_CODE, MAX_GAS_SLOTS};
use crate::config::{ConfigDocument, RunConfig, SeedPolicy, validate};
use crate::domain::{HarnessError, HarnessResult};
use params::flag_code;
use tracing::{debug, warn};

/// Validates `document` and translates it in one step.
pub fn translate_document(
    document: &ConfigDocument,
    clock: &impl SeedClock,
) -> HarnessResult<SolverParameters> {
    let config = validate(document)?;
    translate(&config, clock)
}

pub fn translate(config: &RunConfig, clock: &impl SeedClock) -> HarnessResult<SolverParameters> {
    let (gas_ids, gas_fractions) = pack_mixture(config)?;
    let random_seed = resolve_seed(config.seed, clock)?;

    let parameters = SolverParameters {
        number_of_gases: config.mixture.len() as u32,
        max_number_of_collisions: config.events,
        enable_penning: flag_code(config.enable_penning),
        enable_thermal_motion: flag_code(config.thermal_motion),
        max_electron_energy: config.max_electron_energy_ev,
        gas_ids,
        gas_fractions,
        temperature_centigrade: config.temperature_c,
        pressure_torr: config.pressure_torr,
        electric_field: config.electric_field_v_per_cm,
        magnetic_field_magnitude: config.magnetic_field_kgauss,
        magnetic_field_angle: config.magnetic_field_angle_deg,
        console_output_flag: flag_code(config.console_output),
        steady_state_threshold: config.steady_state_threshold,
        which_angular_model: config.angular_model.code(),
        random_seed,
    };
    debug!(
        gas_ids = ?parameters.gas_ids,
        gas_fractions = ?parameters.gas_fractions,
        angular_model = parameters.which_angular_model,
        seed = parameters.random_seed,
        "translated solver parameters"
    );
    Ok(parameters)
}

pub fn resolve_seed(policy: SeedPolicy, clock: &impl SeedClock) -> HarnessResult<i64> {
    match policy {
        SeedPolicy::Fixed(seed) => Ok(seed),
        SeedPolicy::Auto => {
            let seed = clock.seed_from_clock()?;
            warn!(seed, "seed is 0; derived a non-reproducible seed from the clock");
            Ok(seed)
        }
    }
}

fn pack_mixture(
    config: &RunConfig,
) -> HarnessResult<([u32; MAX_GAS_SLOTS], [f64; MAX_GAS_SLOTS])> {
    let entries = config.mixture.entries();
    if entries.len() > MAX_GAS_SLOTS {
        return Err(HarnessError::internal(
            "SYS.GAS_SLOTS",
            format!(
                "validated mixture holds {} gases, more than {} slots",
                entries.len(),
                MAX_GAS_SLOTS
            ),
        ));
    }

    let mut gas_ids = [EMPTY_GAS_CODE; MAX_GAS_SLOTS];
    let mut gas_fractions = [0.0; MAX_GAS_SLOTS];
    for (slot, entry) in entries.iter().enumerate() {
        gas_ids[slot] = entry.species.code();
        gas_fractions[slot] = entry.fraction;
    }
    Ok((gas_ids, gas_fractions))
}
