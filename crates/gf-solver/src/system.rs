//! The seam between problem formulations and the solver.

use crate::error::SolverResult;
use nalgebra::DVector;

/// A set of governing equations expressed as a residual vector.
///
/// Takes `&mut self` because network formulations write the candidate
/// solution back into their element objects (resistor currents, pipe flow
/// rates) as a side effect of evaluation. Evaluation is strictly
/// sequential, so this is safe.
pub trait ResidualSystem {
    /// Evaluate the constraint violations at the candidate point `x`.
    ///
    /// The returned vector must have the same length as `x` and be zero at
    /// a solution.
    fn residual(&mut self, x: &DVector<f64>) -> SolverResult<DVector<f64>>;
}

/// Plain closures are residual systems too.
impl<F> ResidualSystem for F
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    fn residual(&mut self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        self(x)
    }
}
