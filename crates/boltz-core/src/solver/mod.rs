//! Seam towards the external transport solver.
//!
//! The harness hands the solver an immutable `SolverParameters` value and
//! gets back `SolverOutputs`; the solver's own execution model stays opaque.

mod outputs;
mod process;

pub use outputs::SolverOutputs;
pub use process::ExternalProcessSolver;

use crate::domain::HarnessResult;
use crate::translate::SolverParameters;

pub trait TransportSolver {
    /// Runs to completion. Failures inside the solver come back as errors.
    fn run(&mut self, parameters: &SolverParameters) -> HarnessResult<SolverOutputs>;
}

impl<T> TransportSolver for &mut T
where
    T: TransportSolver + ?Sized,
{
    fn run(&mut self, parameters: &SolverParameters) -> HarnessResult<SolverOutputs> {
        (**self).run(parameters)
    }
}

impl<T> TransportSolver for Box<T>
where
    T: TransportSolver + ?Sized,
{
    fn run(&mut self, parameters: &SolverParameters) -> HarnessResult<SolverOutputs> {
        (**self).run(parameters)
    }
}
