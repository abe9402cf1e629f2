//! gf-circuit: resistive-circuit analysis via Kirchhoff's laws.
//!
//! Provides:
//! - Circuit element types (Resistor, VoltageSource, CircuitLoop)
//! - A line-oriented network-description parser
//! - Loop voltage-drop and node current-balance residual formulation
//!
//! Element names are ordered node-pair strings ("ad" is the edge between
//! nodes a and d). Names are undirected for lookup purposes but traversal
//! direction matters for the sign of a source's contribution, so every
//! lookup also matches the reversed name.
//!
//! # Example
//!
//! ```
//! use gf_circuit::{ResistorNetwork, two_loop_formulation};
//!
//! let text = "
//! resistor
//!   name = ad
//!   resistance = 4
//! resistor
//!   name = bc
//!   resistance = 2
//! resistor
//!   name = cd
//!   resistance = 5
//! resistor
//!   name = ce
//!   resistance = 10
//! source
//!   name = ab
//!   value = 32
//!   type = ideal
//! source
//!   name = de
//!   value = 0
//!   type = wire
//! loop
//!   name = L1
//!   nodes = a, b, c, d
//! loop
//!   name = L2
//!   nodes = d, c, e
//! ";
//! let mut net = gf_circuit::parse_network(text).unwrap();
//! let currents = net.solve_currents(two_loop_formulation, &[1.0, 1.0, 1.0]).unwrap();
//! assert_eq!(currents.len(), 3);
//! ```

pub mod element;
pub mod error;
pub mod network;
pub mod parse;

// Re-exports for ergonomics
pub use element::{CircuitLoop, Resistor, VoltageSource};
pub use error::{CircuitError, CircuitResult};
pub use network::{Formulation, ResistorNetwork, two_loop_formulation};
pub use parse::{load_network, parse_network};
