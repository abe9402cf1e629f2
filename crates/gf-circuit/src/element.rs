//! Circuit element types.

use gf_core::units::{Current, Resistance, Voltage, amp, ohm};

/// A resistor named by its ordered node pair ("ad" joins nodes a and d).
///
/// The current field is written in place by the residual formulation as the
/// solver iterates candidate currents.
#[derive(Debug, Clone)]
pub struct Resistor {
    pub name: String,
    pub resistance: Resistance,
    pub current: Current,
}

impl Resistor {
    pub fn new(name: impl Into<String>, resistance: Resistance) -> Self {
        Self {
            name: name.into(),
            resistance,
            current: amp(0.0),
        }
    }

    /// Ohmic voltage drop across the resistor, V = I * R.
    pub fn delta_v(&self) -> Voltage {
        self.current * self.resistance
    }
}

impl Default for Resistor {
    fn default() -> Self {
        Self::new("ab", ohm(1.0))
    }
}

/// An ideal voltage source. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct VoltageSource {
    pub name: String,
    pub voltage: Voltage,
    /// Source type as declared in the description file (e.g. "ideal").
    pub kind: String,
}

impl VoltageSource {
    pub fn new(name: impl Into<String>, voltage: Voltage, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            voltage,
            kind: kind.into(),
        }
    }
}

/// A closed loop defined by an ordered node traversal.
#[derive(Debug, Clone)]
pub struct CircuitLoop {
    pub name: String,
    pub nodes: Vec<String>,
}

impl CircuitLoop {
    pub fn new(name: impl Into<String>, nodes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }

    /// Edge names visited when traversing the loop in node order.
    ///
    /// Consecutive nodes pair up directly; the closing edge back to the
    /// start is named first-node + last-node.
    pub fn edge_names(&self) -> Vec<String> {
        let n = self.nodes.len();
        let mut names = Vec::with_capacity(n);
        for i in 0..n {
            if i == n - 1 {
                names.push(format!("{}{}", self.nodes[0], self.nodes[i]));
            } else {
                names.push(format!("{}{}", self.nodes[i], self.nodes[i + 1]));
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_core::units::volt;

    #[test]
    fn resistor_ohms_law() {
        let mut r = Resistor::new("ad", ohm(4.0));
        r.current = amp(2.0);
        assert!((r.delta_v().value - 8.0).abs() < 1e-12);
    }

    #[test]
    fn loop_edge_names_close_the_traversal() {
        let lp = CircuitLoop::new(
            "L1",
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
        );
        assert_eq!(lp.edge_names(), vec!["ab", "bc", "cd", "ad"]);
    }

    #[test]
    fn three_node_loop() {
        let lp = CircuitLoop::new("L2", vec!["d".into(), "c".into(), "e".into()]);
        assert_eq!(lp.edge_names(), vec!["dc", "ce", "de"]);
    }

    #[test]
    fn source_holds_declared_voltage() {
        let vs = VoltageSource::new("ab", volt(32.0), "ideal");
        assert_eq!(vs.name, "ab");
        assert!((vs.voltage.value - 32.0).abs() < 1e-12);
    }
}
