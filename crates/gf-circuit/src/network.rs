//! Resistor network and Kirchhoff residual formulation.

use crate::element::{CircuitLoop, Resistor, VoltageSource};
use crate::error::{CircuitError, CircuitResult};
use gf_core::units::{Current, Voltage, amp, volt};
use gf_solver::{NewtonConfig, SolverError, SolverResult, newton_solve};
use nalgebra::DVector;
use tracing::debug;

/// A residual formulation for a specific hand-wired topology.
///
/// Given the network and a candidate current vector, writes the currents
/// into the resistors and returns the Kirchhoff constraint violations
/// (loop voltage drops and node current balances). Passing the formulation
/// as a value is what lets one network type serve multiple circuits; there
/// is no behavioral reason for a type per topology.
pub type Formulation = fn(&mut ResistorNetwork, &[f64]) -> CircuitResult<Vec<f64>>;

fn reversed(name: &str) -> String {
    name.chars().rev().collect()
}

/// A resistive circuit: loops, resistors, and voltage sources.
#[derive(Debug, Clone, Default)]
pub struct ResistorNetwork {
    pub resistors: Vec<Resistor>,
    pub sources: Vec<VoltageSource>,
    pub loops: Vec<CircuitLoop>,
}

impl ResistorNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a resistor by its node-pair name, forward or reversed.
    pub fn resistor_by_name(&self, name: &str) -> CircuitResult<&Resistor> {
        let rev = reversed(name);
        self.resistors
            .iter()
            .find(|r| r.name == name || r.name == rev)
            .ok_or_else(|| CircuitError::UnknownElement {
                name: name.to_string(),
            })
    }

    /// Set the candidate current through a named resistor.
    pub fn set_current(&mut self, name: &str, current: Current) -> CircuitResult<()> {
        let rev = reversed(name);
        let r = self
            .resistors
            .iter_mut()
            .find(|r| r.name == name || r.name == rev)
            .ok_or_else(|| CircuitError::UnknownElement {
                name: name.to_string(),
            })?;
        r.current = current;
        Ok(())
    }

    /// Signed voltage change for a traversed edge.
    ///
    /// A resistor drops voltage in the direction of its current regardless
    /// of traversal direction, so forward and reversed names both
    /// contribute -I*R. A source contributes its stated voltage when
    /// traversed forward and the negation when traversed against its name.
    pub fn element_delta_v(&self, name: &str) -> CircuitResult<Voltage> {
        let rev = reversed(name);
        for r in &self.resistors {
            if r.name == name || r.name == rev {
                return Ok(-r.delta_v());
            }
        }
        for v in &self.sources {
            if v.name == name {
                return Ok(v.voltage);
            }
            if v.name == rev {
                return Ok(-v.voltage);
            }
        }
        Err(CircuitError::UnknownElement {
            name: name.to_string(),
        })
    }

    /// Net voltage drop around each loop, in traversal order.
    pub fn loop_voltage_drops(&self) -> CircuitResult<Vec<Voltage>> {
        let mut drops = Vec::with_capacity(self.loops.len());
        for lp in &self.loops {
            let mut dv = volt(0.0);
            for edge in lp.edge_names() {
                dv += self.element_delta_v(&edge)?;
            }
            drops.push(dv);
        }
        Ok(drops)
    }

    /// Solve for the currents that satisfy `formulation`'s residuals.
    ///
    /// On success the converged currents are written back into the
    /// resistors and returned in the formulation's ordering (amps).
    pub fn solve_currents(
        &mut self,
        formulation: Formulation,
        guess: &[f64],
    ) -> CircuitResult<Vec<f64>> {
        let x0 = DVector::from_column_slice(guess);
        let config = NewtonConfig::default();

        let mut system = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            let vals =
                formulation(&mut *self, x.as_slice()).map_err(SolverError::residual)?;
            Ok(DVector::from_vec(vals))
        };
        let result = newton_solve(x0, &mut system, &config)?;

        debug!(
            iterations = result.iterations,
            residual = result.residual_norm,
            "circuit solve converged"
        );

        // Leave the network holding the converged currents.
        formulation(self, result.x.as_slice())?;
        Ok(result.x.as_slice().to_vec())
    }
}

/// Kirchhoff residuals for the fixed two-loop textbook circuit.
///
/// Topology: source ab drives the top loop; resistors ad and bc carry the
/// first loop current, cd carries the third unknown, ce carries the second;
/// node c balances all three.
///
/// Residual vector: [loop 1 net voltage, loop 2 net voltage, net current
/// into node c].
pub fn two_loop_formulation(net: &mut ResistorNetwork, i: &[f64]) -> CircuitResult<Vec<f64>> {
    if i.len() != 3 {
        return Err(CircuitError::InvalidNetwork {
            what: format!("two-loop formulation expects 3 currents, got {}", i.len()),
        });
    }

    // Top loop current flows through ad and bc in series.
    net.set_current("ad", amp(i[0]))?;
    net.set_current("bc", amp(i[0]))?;
    net.set_current("cd", amp(i[2]))?;
    // Bottom loop current.
    net.set_current("ce", amp(i[1]))?;

    // Net current into node c
    let node_c_current = i[0] + i[1] - i[2];

    let mut residuals: Vec<f64> = net
        .loop_voltage_drops()?
        .into_iter()
        .map(|dv| dv.value)
        .collect();
    residuals.push(node_c_current);
    Ok(residuals)
}
