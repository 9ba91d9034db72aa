pub mod tables;

pub use tables::{AngularModel, EMPTY_GAS_CODE, GasSpecies, MAX_GAS_SLOTS};
