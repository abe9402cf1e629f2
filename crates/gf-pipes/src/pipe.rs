//! Pipe hydraulics: Darcy-Weisbach head loss with friction factor.

use crate::fluid::Fluid;
use gf_core::numeric::lerp;
use gf_core::units::{Length, constants::G0_MPS2};

/// Flows below this magnitude [L/s] are treated as stagnant.
const EPSILON_LPS: f64 = 1e-9;

/// Reynolds number bounds of the laminar-turbulent transition band.
const RE_LAMINAR: f64 = 2300.0;
const RE_TURBULENT: f64 = 4000.0;

/// A pipe between two named nodes.
///
/// Node names are stored in sorted order so the pipe's name is independent
/// of declaration order; positive flow runs from `start` to `end`. The
/// flow rate is written in place by the residual formulation as the solver
/// iterates candidate flows.
#[derive(Debug, Clone)]
pub struct Pipe {
    start: String,
    end: String,
    /// Pipe length
    pub length: Length,
    /// Pipe inner diameter
    pub diameter: Length,
    /// Surface roughness (absolute)
    pub roughness: Length,
    /// Signed volumetric flow rate [L/s], positive from start to end
    pub flow_lps: f64,
}

impl Pipe {
    /// Create a pipe between nodes `a` and `b`.
    pub fn new(a: &str, b: &str, length: Length, diameter: Length, roughness: Length) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self {
            start: start.to_string(),
            end: end.to_string(),
            length,
            diameter,
            roughness,
            flow_lps: 0.0,
        }
    }

    /// Canonical pipe name, "start-end".
    pub fn name(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.start == node || self.end == node
    }

    /// Cross-sectional area [m^2].
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.diameter.value.powi(2) / 4.0
    }

    /// Mean flow speed [m/s], unsigned.
    pub fn velocity(&self) -> f64 {
        self.flow_lps.abs() * 1.0e-3 / self.area()
    }

    /// Reynolds number for the current flow rate.
    pub fn reynolds(&self, fluid: &Fluid) -> f64 {
        self.velocity() * self.diameter.value / fluid.nu()
    }

    /// Darcy friction factor: 64/Re laminar, Swamee-Jain turbulent, and a
    /// linear blend across the transition band.
    fn friction_factor(&self, reynolds: f64) -> f64 {
        let laminar = |re: f64| 64.0 / re;
        let turbulent = |re: f64| {
            let e_d = self.roughness.value / self.diameter.value;
            let a = e_d / 3.7;
            let b = 5.74 / re.powf(0.9);
            0.25 / (a + b).log10().powi(2)
        };

        if reynolds <= RE_LAMINAR {
            laminar(reynolds)
        } else if reynolds >= RE_TURBULENT {
            turbulent(reynolds)
        } else {
            let t = (reynolds - RE_LAMINAR) / (RE_TURBULENT - RE_LAMINAR);
            lerp(laminar(RE_LAMINAR), turbulent(RE_TURBULENT), t)
        }
    }

    /// Head lost to friction at the current flow rate, in m of fluid.
    ///
    /// Darcy-Weisbach: h = f * (L/D) * v^2 / (2g).
    pub fn friction_head_loss(&self, fluid: &Fluid) -> f64 {
        if self.flow_lps.abs() < EPSILON_LPS {
            return 0.0;
        }
        let v = self.velocity();
        let re = self.reynolds(fluid);
        let f = self.friction_factor(re);
        f * (self.length.value / self.diameter.value) * v.powi(2) / (2.0 * G0_MPS2)
    }

    /// Signed head loss as seen by a loop traversal entering at
    /// `traversal_start`: positive when traversal and flow agree.
    pub fn flow_head_loss(&self, traversal_start: &str, fluid: &Fluid) -> f64 {
        let n_traverse = if traversal_start == self.start { 1.0 } else { -1.0 };
        let n_flow = if self.flow_lps >= 0.0 { 1.0 } else { -1.0 };
        n_traverse * n_flow * self.friction_head_loss(fluid)
    }

    /// Flow into the named node [L/s]: positive into, negative out.
    pub fn flow_into_node(&self, node: &str) -> f64 {
        if node == self.start {
            -self.flow_lps
        } else {
            self.flow_lps
        }
    }
}
