//! Damped Newton iteration with finite-difference Jacobian.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::{FdScheme, fd_jacobian};
use crate::system::ResidualSystem;
use nalgebra::DVector;
use tracing::debug;

/// Newton solver configuration.
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm
    pub rel_tol: f64,
    /// Finite-difference step scale for the Jacobian
    pub fd_epsilon: f64,
    /// Finite-difference scheme
    pub fd_scheme: FdScheme,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1e-9,
            rel_tol: 1e-9,
            fd_epsilon: 1e-7,
            fd_scheme: FdScheme::Forward,
            line_search_beta: 0.5,
            max_line_search_iters: 20,
        }
    }
}

/// Newton iteration result.
#[derive(Debug)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Drive `system`'s residual vector to zero starting from `x0`.
///
/// Non-convergence is an error, never a silently returned iterate: the
/// caller either gets a solution inside tolerance or a
/// [`SolverError::ConvergenceFailed`].
pub fn newton_solve<S: ResidualSystem + ?Sized>(
    x0: DVector<f64>,
    system: &mut S,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult> {
    let mut x = x0.clone();
    let mut r = system.residual(&x)?;

    if r.len() != x.len() {
        return Err(SolverError::Numeric {
            what: format!(
                "residual length {} does not match unknown count {}",
                r.len(),
                x.len()
            ),
        });
    }

    let mut r_norm = r.norm();
    let r0_norm = r_norm;

    for iter in 0..config.max_iterations {
        // Check convergence
        if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
            debug!(iterations = iter, residual = r_norm, "newton converged");
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
            });
        }

        let jac = fd_jacobian(system, &x, config.fd_scheme, config.fd_epsilon)?;

        // Solve J * dx = -r
        let dx = jac
            .lu()
            .solve(&(-r.clone()))
            .ok_or_else(|| SolverError::Numeric {
                what: "Jacobian solve failed (singular system)".to_string(),
            })?;

        // Backtracking line search on the residual norm
        let mut alpha = 1.0;
        let mut x_new = &x + alpha * &dx;
        let mut r_new = system.residual(&x_new)?;
        let mut r_new_norm = r_new.norm();

        for _ in 0..config.max_line_search_iters {
            if r_new_norm < r_norm {
                break;
            }
            alpha *= config.line_search_beta;
            x_new = &x + alpha * &dx;
            r_new = system.residual(&x_new)?;
            r_new_norm = r_new.norm();
        }

        // Exhausted backtracking without any decrease: the iteration has
        // stalled and will not recover.
        if r_new_norm >= r_norm {
            return Err(SolverError::ConvergenceFailed {
                what: format!(
                    "Line search stagnated at iteration {}, residual = {}",
                    iter, r_norm
                ),
            });
        }

        debug!(
            iteration = iter,
            residual = r_new_norm,
            step = alpha,
            "newton step"
        );

        x = x_new;
        r = r_new;
        r_norm = r_new_norm;
    }

    if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
        });
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "Maximum iterations {} reached, residual = {}",
            config.max_iterations, r_norm
        ),
    })
}
