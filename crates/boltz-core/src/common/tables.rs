//! Solver symbol tables: gas species and angular-scattering models.
//!
//! Both tables are closed sets. Names from the configuration document are
//! resolved here into variants; the numeric codes are the ones the solver
//! understands and never change at runtime.

use std::fmt::{Display, Formatter};

/// Number of gas slots the solver exposes.
pub const MAX_GAS_SLOTS: usize = 6;

/// Species code written into unused gas slots.
pub const EMPTY_GAS_CODE: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GasSpecies {
    Cf4,
    Argon,
    Helium4,
    Helium3,
    Neon,
    Krypton,
    Xenon,
    Methane,
    Ethane,
    Propane,
    Isobutane,
    Co2,
    Neopentane,
    Water,
    Oxygen,
    Nitrogen,
    NitricOxide,
    NitrousOxide,
    Ethene,
    Acetylene,
    Hydrogen,
    Deuterium,
    CarbonMonoxide,
    Methylal,
    Dme,
    ReidStep,
    MaxwellModel,
    ReidRamp,
    C2f6,
    Sf6,
    Ammonia,
    Propene,
    Cyclopropane,
    Methanol,
    Ethanol,
    Isopropanol,
}

struct GasRow {
    species: GasSpecies,
    code: u32,
    name: &'static str,
    aliases: &'static [&'static str],
}

impl GasRow {
    const fn new(
        species: GasSpecies,
        code: u32,
        name: &'static str,
        aliases: &'static [&'static str],
    ) -> Self {
        Self {
            species,
            code,
            name,
            aliases,
        }
    }
}

static GAS_TABLE: [GasRow; 36] = [
    GasRow::new(GasSpecies::Cf4, 1, "CF4", &[]),
    GasRow::new(GasSpecies::Argon, 2, "Argon", &["Ar"]),
    GasRow::new(GasSpecies::Helium4, 3, "Helium4", &["He4", "He", "Helium"]),
    GasRow::new(GasSpecies::Helium3, 4, "Helium3", &["He3"]),
    GasRow::new(GasSpecies::Neon, 5, "Neon", &["Ne"]),
    GasRow::new(GasSpecies::Krypton, 6, "Krypton", &["Kr"]),
    GasRow::new(GasSpecies::Xenon, 7, "Xenon", &["Xe"]),
    GasRow::new(GasSpecies::Methane, 8, "Methane", &["CH4"]),
    GasRow::new(GasSpecies::Ethane, 9, "Ethane", &["C2H6"]),
    GasRow::new(GasSpecies::Propane, 10, "Propane", &["C3H8"]),
    GasRow::new(GasSpecies::Isobutane, 11, "Isobutane", &["iC4H10", "C4H10"]),
    GasRow::new(GasSpecies::Co2, 12, "CO2", &["CarbonDioxide"]),
    GasRow::new(GasSpecies::Neopentane, 13, "Neopentane", &["neoC5H12", "C5H12"]),
    GasRow::new(GasSpecies::Water, 14, "Water", &["H2O"]),
    GasRow::new(GasSpecies::Oxygen, 15, "Oxygen", &["O2"]),
    GasRow::new(GasSpecies::Nitrogen, 16, "Nitrogen", &["N2"]),
    GasRow::new(GasSpecies::NitricOxide, 17, "NitricOxide", &["NO"]),
    GasRow::new(GasSpecies::NitrousOxide, 18, "NitrousOxide", &["N2O"]),
    GasRow::new(GasSpecies::Ethene, 19, "Ethene", &["C2H4"]),
    GasRow::new(GasSpecies::Acetylene, 20, "Acetylene", &["C2H2"]),
    GasRow::new(GasSpecies::Hydrogen, 21, "Hydrogen", &["H2"]),
    GasRow::new(GasSpecies::Deuterium, 22, "Deuterium", &["D2"]),
    GasRow::new(GasSpecies::CarbonMonoxide, 23, "CarbonMonoxide", &["CO"]),
    GasRow::new(GasSpecies::Methylal, 24, "Methylal", &["C3H8O2"]),
    GasRow::new(GasSpecies::Dme, 25, "DME", &["DimethylEther"]),
    GasRow::new(GasSpecies::ReidStep, 26, "ReidStep", &[]),
    GasRow::new(GasSpecies::MaxwellModel, 27, "MaxwellModel", &[]),
    GasRow::new(GasSpecies::ReidRamp, 28, "ReidRamp", &[]),
    GasRow::new(GasSpecies::C2f6, 29, "C2F6", &[]),
    GasRow::new(GasSpecies::Sf6, 30, "SF6", &[]),
    GasRow::new(GasSpecies::Ammonia, 31, "Ammonia", &["NH3"]),
    GasRow::new(GasSpecies::Propene, 32, "Propene", &["C3H6"]),
    GasRow::new(GasSpecies::Cyclopropane, 33, "Cyclopropane", &["cC3H6"]),
    GasRow::new(GasSpecies::Methanol, 34, "Methanol", &["CH3OH"]),
    GasRow::new(GasSpecies::Ethanol, 35, "Ethanol", &["C2H5OH"]),
    GasRow::new(GasSpecies::Isopropanol, 36, "Isopropanol", &["C3H7OH"]),
];

impl GasSpecies {
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim();
        if normalized.is_empty() {
            return None;
        }

        GAS_TABLE
            .iter()
            .find(|row| {
                row.name.eq_ignore_ascii_case(normalized)
                    || row
                        .aliases
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(normalized))
            })
            .map(|row| row.species)
    }

    pub fn code(self) -> u32 {
        self.row().code
    }

    pub fn canonical_name(self) -> &'static str {
        self.row().name
    }

    pub fn all() -> impl Iterator<Item = Self> {
        GAS_TABLE.iter().map(|row| row.species)
    }

    fn row(self) -> &'static GasRow {
        // Rows are ordered by code, codes start at 1.
        &GAS_TABLE[self as usize]
    }
}

impl Display for GasSpecies {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngularModel {
    CapitelliLongo,
    Surendra,
    #[default]
    Okhrimvoskky,
}

impl AngularModel {
    pub const ALL: [Self; 3] = [Self::CapitelliLongo, Self::Surendra, Self::Okhrimvoskky];

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim();
        Self::ALL
            .into_iter()
            .find(|model| model.as_str().eq_ignore_ascii_case(normalized))
            .or_else(|| {
                normalized
                    .eq_ignore_ascii_case("Okhrimovskyy")
                    .then_some(Self::Okhrimvoskky)
            })
    }

    pub const fn code(self) -> u32 {
        match self {
            Self::CapitelliLongo => 0,
            Self::Surendra => 1,
            Self::Okhrimvoskky => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CapitelliLongo => "CapitelliLongo",
            Self::Surendra => "Surendra",
            Self::Okhrimvoskky => "Okhrimvoskky",
        }
    }
}

impl Display for AngularModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}
