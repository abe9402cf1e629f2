//! Finite difference Jacobian computation.

use crate::error::SolverResult;
use crate::system::ResidualSystem;
use nalgebra::{DMatrix, DVector};

/// Finite-difference scheme for Jacobian columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FdScheme {
    /// One extra residual evaluation per column.
    #[default]
    Forward,
    /// Two evaluations per column, second-order accurate.
    Central,
}

/// Approximate the Jacobian of `system` at `x` by finite differences.
///
/// The step for column j is `epsilon * max(|x[j]|, 1)`.
pub fn fd_jacobian<S: ResidualSystem + ?Sized>(
    system: &mut S,
    x: &DVector<f64>,
    scheme: FdScheme,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>> {
    let n = x.len();
    let f_x = system.residual(x)?;
    let m = f_x.len();

    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        let dx = epsilon * x[j].abs().max(1.0);

        let df = match scheme {
            FdScheme::Forward => {
                let mut x_plus = x.clone();
                x_plus[j] += dx;
                (system.residual(&x_plus)? - &f_x) / dx
            }
            FdScheme::Central => {
                let mut x_plus = x.clone();
                x_plus[j] += dx;
                let f_plus = system.residual(&x_plus)?;

                let mut x_minus = x.clone();
                x_minus[j] -= dx;
                let f_minus = system.residual(&x_minus)?;

                (f_plus - f_minus) / (2.0 * dx)
            }
        };

        for i in 0..m {
            jac[(i, j)] = df[i];
        }
    }

    Ok(jac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jacobian_linear() {
        // f(x) = 2*x, J = 2
        let mut f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 2.0 * x[0]))
        };

        let x = DVector::from_element(1, 3.0);
        let jac = fd_jacobian(&mut f, &x, FdScheme::Forward, 1e-7).unwrap();

        assert!((jac[(0, 0)] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn jacobian_quadratic() {
        // f(x) = x^2, J = 2*x
        let mut f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0]))
        };

        let x = DVector::from_element(1, 3.0);
        let jac = fd_jacobian(&mut f, &x, FdScheme::Forward, 1e-7).unwrap();
        assert!((jac[(0, 0)] - 6.0).abs() < 1e-5);

        let jac = fd_jacobian(&mut f, &x, FdScheme::Central, 1e-6).unwrap();
        assert!((jac[(0, 0)] - 6.0).abs() < 1e-6);
    }

    #[test]
    fn jacobian_coupled_system() {
        // f0 = x0 + 2*x1, f1 = 3*x0 - x1
        let mut f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![
                x[0] + 2.0 * x[1],
                3.0 * x[0] - x[1],
            ]))
        };

        let x = DVector::from_vec(vec![1.0, 2.0]);
        let jac = fd_jacobian(&mut f, &x, FdScheme::Central, 1e-6).unwrap();

        assert!((jac[(0, 0)] - 1.0).abs() < 1e-5);
        assert!((jac[(0, 1)] - 2.0).abs() < 1e-5);
        assert!((jac[(1, 0)] - 3.0).abs() < 1e-5);
        assert!((jac[(1, 1)] + 1.0).abs() < 1e-5);
    }
}
