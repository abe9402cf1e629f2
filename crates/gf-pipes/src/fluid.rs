//! Working-fluid properties.

use gf_core::units::{Density, DynVisc, kg_m3, pa_s};

/// Fluid carried by the network. Defaults are for water at ~25 C.
#[derive(Debug, Clone)]
pub struct Fluid {
    /// Dynamic viscosity
    pub mu: DynVisc,
    /// Density
    pub rho: Density,
}

impl Fluid {
    pub fn new(mu: DynVisc, rho: Density) -> Self {
        Self { mu, rho }
    }

    pub fn water() -> Self {
        Self::new(pa_s(0.00089), kg_m3(1000.0))
    }

    /// Kinematic viscosity [m^2/s] (not in uom's standard set).
    pub fn nu(&self) -> f64 {
        self.mu.value / self.rho.value
    }
}

impl Default for Fluid {
    fn default() -> Self {
        Self::water()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_kinematic_viscosity() {
        let w = Fluid::water();
        assert!((w.nu() - 8.9e-7).abs() < 1e-9);
    }
}
