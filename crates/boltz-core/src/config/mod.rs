//! Configuration loading and validation.
//!
//! `ConfigDocument` mirrors the YAML file one-to-one; `validate` turns it
//! into a `RunConfig` whose names are resolved against the symbol tables and
//! whose values satisfy the physical invariants the solver relies on.

mod document;
mod model;
mod validate;

pub use document::{
    ConfigDocument, DEFAULT_SOLVER_PROGRAM, ElectronSection, FlagValue, GasSection,
    MagneticFieldSection, SolverSection,
};
pub use model::{GasMixture, MixtureEntry, RunConfig, SeedPolicy};
pub use validate::{FRACTION_SUM_TOLERANCE, MAX_FRACTION_TOTAL, validate};
