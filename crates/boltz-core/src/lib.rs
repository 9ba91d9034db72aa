//! Run harness for an external Monte Carlo electron-transport solver.
//!
//! A YAML run description is validated against the gas and angular-model
//! symbol tables, packed into the solver's fixed parameter layout, handed to
//! a `TransportSolver`, and the solver's outputs are written back out as a
//! JSON report.

pub mod common;
pub mod config;
pub mod domain;
pub mod pipeline;
pub mod report;
pub mod solver;
pub mod translate;

pub use pipeline::{Pipeline, load_request, run_pipeline};
