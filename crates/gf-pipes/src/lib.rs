//! gf-pipes: pipe-network flow analysis.
//!
//! Provides:
//! - Fluid properties (viscosity, density, derived kinematic viscosity)
//! - Pipe hydraulics: Darcy-Weisbach head loss with a
//!   laminar/transition/turbulent friction factor
//! - Node continuity and loop head-loss residual formulation
//!
//! A network is solved by finding the pipe flow rates for which the net
//! flow into every node (bar one, to avoid over-determining the system)
//! and the net head loss around every loop are zero.

pub mod error;
pub mod fluid;
pub mod loops;
pub mod network;
pub mod node;
pub mod pipe;

// Re-exports for ergonomics
pub use error::{PipeError, PipeResult};
pub use fluid::Fluid;
pub use loops::PipeLoop;
pub use network::PipeNetwork;
pub use node::Node;
pub use pipe::Pipe;
