use super::document::ConfigDocument;
use super::model::{GasMixture, MixtureEntry, RunConfig, SeedPolicy};
use crate::common::{AngularModel, GasSpecies, MAX_GAS_SLOTS};
use crate::domain::{HarnessError, HarnessResult};

pub const MAX_FRACTION_TOTAL: f64 = 100.0;
/// Slack for accumulated rounding when fractions such as 33.3/33.3/33.4 are summed.
pub const FRACTION_SUM_TOLERANCE: f64 = 1.0e-9;
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

/// Checks the document against the symbol tables and physical invariants.
///
/// Unknown names are reported as configuration errors; values that are well
/// formed but physically impossible are reported as validation errors.
pub fn validate(document: &ConfigDocument) -> HarnessResult<RunConfig> {
    let mixture = validate_mixture(document)?;

    let angular_model = AngularModel::from_name(&document.angular_model).ok_or_else(|| {
        HarnessError::configuration(
            "CONFIG.UNKNOWN_ANGULAR_MODEL",
            format!(
                "unknown angular model '{}'; expected one of {}",
                document.angular_model,
                AngularModel::ALL
                    .iter()
                    .map(|model| model.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )
    })?;

    let temperature_c = finite("gas.temperature", document.gas.temperature)?;
    if temperature_c <= ABSOLUTE_ZERO_CELSIUS {
        return Err(HarnessError::validation(
            "VALIDATION.TEMPERATURE",
            format!(
                "gas.temperature {} degC is not above absolute zero",
                temperature_c
            ),
        ));
    }

    let pressure_torr = finite("gas.pressure", document.gas.pressure)?;
    if pressure_torr <= 0.0 {
        return Err(HarnessError::validation(
            "VALIDATION.PRESSURE",
            format!("gas.pressure must be positive, got {} Torr", pressure_torr),
        ));
    }

    let max_electron_energy_ev = finite("electron.max_energy", document.electron.max_energy)?;
    if max_electron_energy_ev < 0.0 {
        return Err(HarnessError::validation(
            "VALIDATION.MAX_ENERGY",
            format!(
                "electron.max_energy must be 0 (auto) or positive, got {} eV",
                max_electron_energy_ev
            ),
        ));
    }

    let events = integral_count("events", document.events)?;
    if events == 0 {
        return Err(HarnessError::validation(
            "VALIDATION.EVENTS",
            "events must be at least 1",
        ));
    }

    let steady_state_threshold =
        integral_count("steady_state_threshold", document.steady_state_threshold)?;
    let steady_state_threshold = u32::try_from(steady_state_threshold).map_err(|_| {
        HarnessError::validation(
            "VALIDATION.STEADY_STATE_THRESHOLD",
            format!(
                "steady_state_threshold {} exceeds the solver limit of {}",
                steady_state_threshold,
                u32::MAX
            ),
        )
    })?;

    let solver_command = document.solver.command.clone();
    if solver_command
        .first()
        .is_none_or(|program| program.trim().is_empty())
    {
        return Err(HarnessError::configuration(
            "CONFIG.SOLVER_COMMAND",
            "solver.command must name the solver program",
        ));
    }

    Ok(RunConfig {
        mixture,
        temperature_c,
        pressure_torr,
        enable_penning: document.enable_penning.is_enabled(),
        thermal_motion: document.electron.thermal_motion.is_enabled(),
        max_electron_energy_ev,
        events,
        electric_field_v_per_cm: finite("electric_field", document.electric_field)?,
        magnetic_field_kgauss: finite(
            "magnetic_field.magnitude",
            document.magnetic_field.magnitude,
        )?,
        magnetic_field_angle_deg: finite("magnetic_field.angle", document.magnetic_field.angle)?,
        console_output: document.console_output.is_enabled(),
        steady_state_threshold,
        angular_model,
        seed: seed_policy(document.seed)?,
        logging: document.logging.clone(),
        solver_command,
    })
}

fn validate_mixture(document: &ConfigDocument) -> HarnessResult<GasMixture> {
    let mix = &document.gas.mix;
    if mix.len() > MAX_GAS_SLOTS {
        return Err(HarnessError::validation(
            "VALIDATION.GAS_SLOTS",
            format!(
                "gas.mix lists {} gases; the solver accepts at most {}",
                mix.len(),
                MAX_GAS_SLOTS
            ),
        ));
    }

    let mut entries: Vec<MixtureEntry> = Vec::with_capacity(mix.len());
    for (name, fraction) in mix {
        let species = GasSpecies::from_name(name).ok_or_else(|| {
            HarnessError::configuration(
                "CONFIG.UNKNOWN_GAS",
                format!("unknown gas '{}' in gas.mix", name),
            )
        })?;

        if !fraction.is_finite() || *fraction < 0.0 {
            return Err(HarnessError::validation(
                "VALIDATION.GAS_FRACTION",
                format!(
                    "fraction for gas '{}' must be a non-negative number, got {}",
                    name, fraction
                ),
            ));
        }

        if let Some(existing) = entries.iter().find(|entry| entry.species == species) {
            return Err(HarnessError::validation(
                "VALIDATION.GAS_DUPLICATE",
                format!(
                    "gases '{}' and '{}' both name {}",
                    existing.name, name, species
                ),
            ));
        }

        entries.push(MixtureEntry {
            name: name.clone(),
            species,
            fraction: *fraction,
        });
    }

    let mixture = GasMixture::new(entries);
    let total = mixture.total_fraction();
    if total > MAX_FRACTION_TOTAL + FRACTION_SUM_TOLERANCE {
        return Err(HarnessError::validation(
            "VALIDATION.GAS_FRACTION_SUM",
            format!(
                "gas fractions sum to {}, expected a total within [0, {}]",
                total, MAX_FRACTION_TOTAL
            ),
        ));
    }

    Ok(mixture)
}

fn finite(key: &str, value: f64) -> HarnessResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(HarnessError::validation(
            "VALIDATION.NOT_FINITE",
            format!("{} must be a finite number, got {}", key, value),
        ))
    }
}

fn integral_count(key: &str, value: f64) -> HarnessResult<u64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(HarnessError::configuration(
            "CONFIG.INTEGER",
            format!("{} must be an integer, got {}", key, value),
        ));
    }
    if value < 0.0 {
        return Err(HarnessError::validation(
            "VALIDATION.NEGATIVE_COUNT",
            format!("{} must not be negative, got {}", key, value),
        ));
    }
    if value >= u64::MAX as f64 {
        return Err(HarnessError::validation(
            "VALIDATION.COUNT_RANGE",
            format!("{} is too large, got {}", key, value),
        ));
    }
    Ok(value as u64)
}

/// Only a literal `0` in the document asks for a clock seed; any other value
/// is rounded, so `0.4` pins the seed to `0`.
fn seed_policy(seed: f64) -> HarnessResult<SeedPolicy> {
    let seed = finite("seed", seed)?;
    if seed == 0.0 {
        return Ok(SeedPolicy::Auto);
    }

    let rounded = seed.round();
    if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(HarnessError::validation(
            "VALIDATION.SEED_RANGE",
            format!("seed {} does not fit a 64-bit integer", seed),
        ));
    }
    Ok(SeedPolicy::Fixed(rounded as i64))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::common::{AngularModel, GasSpecies};
    use crate::config::{ConfigDocument, SeedPolicy};
    use crate::domain::HarnessErrorCategory;

    fn document_with_mix(mix: &str) -> ConfigDocument {
        let source = format!(
            "gas:\n  mix: {mix}\n  temperature: 23\n  pressure: 750.062\nevents: 40000000\nelectric_field: 1000\n"
        );
        ConfigDocument::from_yaml(&source).expect("document should parse")
    }

    fn with_key(extra: &str) -> ConfigDocument {
        let source = format!(
            "gas:\n  mix: {{Argon: 90, CH4: 10}}\n  temperature: 23\n  pressure: 750.062\nevents: 40000000\nelectric_field: 1000\n{extra}\n"
        );
        ConfigDocument::from_yaml(&source).expect("document should parse")
    }

    #[test]
    fn accepts_sums_within_inclusive_bounds() {
        for mix in [
            "{Argon: 90, CH4: 10}",
            "{Argon: 0, CH4: 0}",
            "{}",
            "{Argon: 50}",
            "{Argon: 33.3, CH4: 33.3, CO2: 33.4}",
            "{He: 10, Ne: 10, Ar: 10, Kr: 10, Xe: 10, N2: 50}",
        ] {
            let config = validate(&document_with_mix(mix))
                .unwrap_or_else(|error| panic!("mix {mix} should validate: {error}"));
            assert!(config.mixture.total_fraction() <= 100.0 + 1.0e-9);
        }
    }

    #[test]
    fn rejects_sums_above_one_hundred() {
        for mix in ["{Argon: 90, CH4: 10.5}", "{Argon: 101}", "{Argon: 60, CH4: 60}"] {
            let error = validate(&document_with_mix(mix)).expect_err("sum above 100 should fail");
            assert_eq!(error.category(), HarnessErrorCategory::ValidationError);
            assert_eq!(error.placeholder(), "VALIDATION.GAS_FRACTION_SUM");
        }
    }

    #[test]
    fn rejects_negative_fractions() {
        let error = validate(&document_with_mix("{Argon: 110, CH4: -10}"))
            .expect_err("negative fraction should fail");
        assert_eq!(error.category(), HarnessErrorCategory::ValidationError);
        assert_eq!(error.placeholder(), "VALIDATION.GAS_FRACTION");
        assert!(error.message().contains("CH4"));
    }

    #[test]
    fn rejects_more_than_six_gases() {
        let error = validate(&document_with_mix(
            "{He: 1, Ne: 1, Ar: 1, Kr: 1, Xe: 1, N2: 1, O2: 1}",
        ))
        .expect_err("seven gases should fail");
        assert_eq!(error.category(), HarnessErrorCategory::ValidationError);
        assert_eq!(error.placeholder(), "VALIDATION.GAS_SLOTS");
    }

    #[test]
    fn unknown_gas_is_a_configuration_error_naming_the_gas() {
        let error = validate(&document_with_mix("{Argon: 90, Unobtainium: 10}"))
            .expect_err("unknown gas should fail");
        assert_eq!(error.category(), HarnessErrorCategory::ConfigurationError);
        assert_eq!(error.placeholder(), "CONFIG.UNKNOWN_GAS");
        assert!(error.message().contains("'Unobtainium'"));
    }

    #[test]
    fn aliases_of_one_species_are_rejected_as_duplicates() {
        let error = validate(&document_with_mix("{Argon: 50, Ar: 50}"))
            .expect_err("duplicate species should fail");
        assert_eq!(error.placeholder(), "VALIDATION.GAS_DUPLICATE");
    }

    #[test]
    fn unknown_angular_model_is_a_configuration_error() {
        let error = validate(&with_key("angular_model: Rutherford"))
            .expect_err("unknown model should fail");
        assert_eq!(error.category(), HarnessErrorCategory::ConfigurationError);
        assert_eq!(error.placeholder(), "CONFIG.UNKNOWN_ANGULAR_MODEL");
        assert!(error.message().contains("Rutherford"));
    }

    #[test]
    fn resolves_names_and_flags() {
        let config = validate(&with_key(
            "angular_model: Surendra\nenable_penning: true\nconsole_output: 1\nelectron:\n  thermal_motion: false\n  max_energy: 12.5",
        ))
        .expect("config should validate");

        let species = config
            .mixture
            .entries()
            .iter()
            .map(|entry| entry.species)
            .collect::<Vec<_>>();
        assert_eq!(species, [GasSpecies::Argon, GasSpecies::Methane]);
        assert_eq!(config.mixture.entries()[1].name, "CH4");
        assert_eq!(config.angular_model, AngularModel::Surendra);
        assert!(config.enable_penning);
        assert!(config.console_output);
        assert!(!config.thermal_motion);
        assert_eq!(config.max_electron_energy_ev, 12.5);
        assert_eq!(config.events, 40_000_000);
        assert_eq!(config.steady_state_threshold, 40);
    }

    #[test]
    fn only_a_literal_zero_seed_means_auto() {
        assert_eq!(validate(&with_key("seed: 0")).expect("valid").seed, SeedPolicy::Auto);
        assert_eq!(validate(&with_key("seed: 0.0")).expect("valid").seed, SeedPolicy::Auto);
        assert_eq!(validate(&with_key("seed: 0.4")).expect("valid").seed, SeedPolicy::Fixed(0));
        assert_eq!(validate(&with_key("seed: -0.3")).expect("valid").seed, SeedPolicy::Fixed(0));
        assert_eq!(
            validate(&with_key("seed: 42")).expect("valid").seed,
            SeedPolicy::Fixed(42)
        );
        assert_eq!(
            validate(&with_key("seed: 6.6")).expect("valid").seed,
            SeedPolicy::Fixed(7)
        );
    }

    #[test]
    fn rejects_physically_impossible_conditions() {
        let cases = [
            ("gas.pressure", "gas:\n  mix: {Argon: 100}\n  temperature: 23\n  pressure: 0\nevents: 10\nelectric_field: 1\n", "VALIDATION.PRESSURE"),
            ("gas.temperature", "gas:\n  mix: {Argon: 100}\n  temperature: -300\n  pressure: 760\nevents: 10\nelectric_field: 1\n", "VALIDATION.TEMPERATURE"),
            ("events", "gas:\n  mix: {Argon: 100}\n  temperature: 23\n  pressure: 760\nevents: 0\nelectric_field: 1\n", "VALIDATION.EVENTS"),
            ("electron.max_energy", "gas:\n  mix: {Argon: 100}\n  temperature: 23\n  pressure: 760\nevents: 10\nelectric_field: 1\nelectron:\n  max_energy: -1\n", "VALIDATION.MAX_ENERGY"),
        ];

        for (key, source, placeholder) in cases {
            let document = ConfigDocument::from_yaml(source).expect("document should parse");
            let error = validate(&document).expect_err(key);
            assert_eq!(error.category(), HarnessErrorCategory::ValidationError, "{key}");
            assert_eq!(error.placeholder(), placeholder, "{key}");
        }
    }

    #[test]
    fn fractional_event_count_is_a_configuration_error() {
        let document = ConfigDocument::from_yaml(
            "gas:\n  mix: {Argon: 100}\n  temperature: 23\n  pressure: 760\nevents: 10.5\nelectric_field: 1\n",
        )
        .expect("document should parse");
        let error = validate(&document).expect_err("fractional events should fail");
        assert_eq!(error.category(), HarnessErrorCategory::ConfigurationError);
        assert_eq!(error.placeholder(), "CONFIG.INTEGER");
    }

    #[test]
    fn empty_solver_command_is_a_configuration_error() {
        let error = validate(&with_key("solver:\n  command: []"))
            .expect_err("empty command should fail");
        assert_eq!(error.placeholder(), "CONFIG.SOLVER_COMMAND");
    }
}
