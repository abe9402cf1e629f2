//! gf-solver: multivariate Newton root-finder for small dense systems.
//!
//! The physical-network crates in this workspace (circuits, pipe networks)
//! formulate their conservation laws as a residual vector and hand it here.
//! Problem sizes are tiny (2-5 unknowns), so everything is dense nalgebra
//! with a finite-difference Jacobian.
//!
//! # Example
//!
//! ```
//! use gf_solver::{NewtonConfig, SolverResult, newton_solve};
//! use nalgebra::DVector;
//!
//! // x^2 - 4 = 0, seeded at 3
//! let mut f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
//!     Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
//! };
//! let result = newton_solve(
//!     DVector::from_element(1, 3.0),
//!     &mut f,
//!     &NewtonConfig::default(),
//! ).unwrap();
//! assert!((result.x[0] - 2.0).abs() < 1e-6);
//! ```

pub mod error;
pub mod jacobian;
pub mod newton;
pub mod system;

// Re-exports for ergonomics
pub use error::{SolverError, SolverResult};
pub use jacobian::FdScheme;
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
pub use system::ResidualSystem;
