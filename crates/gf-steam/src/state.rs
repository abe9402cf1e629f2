//! Thermodynamic state resolution along an isobar.
//!
//! The Gibbs phase rule needs two independent properties to pin down a
//! state; the resolver takes pressure plus exactly one other property and
//! derives the rest from the tables, dispatching on region (saturated,
//! superheated, compressed liquid).

use crate::error::{SteamError, SteamResult};
use crate::tables::SteamTables;
use gf_core::numeric::lerp;
use std::fmt;
use tracing::debug;

/// Specific gas constant for water vapor [J/(kg K)], used for the
/// ideal-gas specific-volume approximation in the superheated region.
const R_WATER: f64 = 8.314_462_618 / 0.018_015;

const CELSIUS_TO_K: f64 = 273.15;

/// Thermodynamic region a resolved state landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Saturated,
    Superheated,
    CompressedLiquid,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Saturated => write!(f, "saturated"),
            Region::Superheated => write!(f, "superheated"),
            Region::CompressedLiquid => write!(f, "compressed liquid"),
        }
    }
}

/// The one property given alongside pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertySpec {
    /// Temperature [C]
    Temperature(f64),
    /// Vapor mass fraction, 0 = saturated liquid, 1 = saturated vapor
    Quality(f64),
    /// Specific volume [m^3/kg]
    SpecificVolume(f64),
    /// Specific enthalpy [kJ/kg]
    Enthalpy(f64),
    /// Specific entropy [kJ/(kg K)]
    Entropy(f64),
}

/// A fully resolved steam state.
///
/// Quality follows the table convention: in [0, 1] for saturated states,
/// 1.0 as a sentinel in the superheated region, and negative when an
/// enthalpy/entropy input fell below the saturated-liquid bracket
/// (compressed liquid). The `region` tag is what display logic keys on.
#[derive(Debug, Clone)]
pub struct SteamState {
    pub name: String,
    /// Pressure [kPa]
    pub p_kpa: f64,
    /// Temperature [C]
    pub t_c: f64,
    /// Quality
    pub x: f64,
    /// Specific volume [m^3/kg]
    pub v: f64,
    /// Specific enthalpy [kJ/kg]
    pub h: f64,
    /// Specific entropy [kJ/(kg K)]
    pub s: f64,
    pub region: Region,
}

impl SteamState {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl fmt::Display for SteamState {
    /// Prints only the properties the region determines: compressed liquid
    /// suppresses T/s/v/x, superheated suppresses v/x.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Region: {}", self.region)?;
        writeln!(f, "p = {:.2} kPa", self.p_kpa)?;
        if self.region != Region::CompressedLiquid {
            writeln!(f, "T = {:.1} degrees C", self.t_c)?;
        }
        writeln!(f, "h = {:.2} kJ/kg", self.h)?;
        if self.region != Region::CompressedLiquid {
            writeln!(f, "s = {:.4} kJ/(kg K)", self.s)?;
        }
        if self.region == Region::Saturated {
            writeln!(f, "v = {:.6} m^3/kg", self.v)?;
            writeln!(f, "x = {:.4}", self.x)?;
        }
        Ok(())
    }
}

impl SteamTables {
    /// Resolve a full state from pressure [kPa] plus one other property.
    pub fn resolve(&self, p_kpa: f64, spec: PropertySpec) -> SteamResult<SteamState> {
        if !p_kpa.is_finite() || p_kpa <= 0.0 {
            return Err(SteamError::InvalidArg {
                what: format!("pressure must be positive, got {p_kpa} kPa"),
            });
        }
        let p_bar = p_kpa / 100.0;
        let sat = self.sat.at_pressure(p_bar)?;

        let state = match spec {
            PropertySpec::Temperature(t_c) => {
                if t_c > sat.t_sat {
                    let (h, s) = self.superheat.h_s_at_t(p_bar, t_c)?;
                    SteamState {
                        name: String::new(),
                        p_kpa,
                        t_c,
                        x: 1.0,
                        // ideal-gas approximation; p in Pa
                        v: R_WATER * (t_c + CELSIUS_TO_K) / (p_kpa * 1000.0),
                        h,
                        s,
                        region: Region::Superheated,
                    }
                } else {
                    // At or below saturation: approximate the compressed
                    // liquid with saturated-liquid properties at this
                    // pressure.
                    SteamState {
                        name: String::new(),
                        p_kpa,
                        t_c,
                        x: 0.0,
                        v: sat.vf,
                        h: sat.hf,
                        s: sat.sf,
                        region: Region::CompressedLiquid,
                    }
                }
            }
            PropertySpec::Quality(x) => {
                if !(0.0..=1.0).contains(&x) {
                    return Err(SteamError::InvalidArg {
                        what: format!("quality must be within [0, 1], got {x}"),
                    });
                }
                SteamState {
                    name: String::new(),
                    p_kpa,
                    t_c: sat.t_sat,
                    x,
                    v: lerp(sat.vf, sat.vg, x),
                    h: lerp(sat.hf, sat.hg, x),
                    s: lerp(sat.sf, sat.sg, x),
                    region: Region::Saturated,
                }
            }
            PropertySpec::Enthalpy(h) => {
                let x = (h - sat.hf) / (sat.hg - sat.hf);
                if x <= 1.0 {
                    SteamState {
                        name: String::new(),
                        p_kpa,
                        t_c: sat.t_sat,
                        x,
                        v: lerp(sat.vf, sat.vg, x),
                        h,
                        s: lerp(sat.sf, sat.sg, x),
                        region: region_from_quality(x),
                    }
                } else {
                    let (t_c, s) = self.superheat.t_s_at_h(p_bar, h)?;
                    SteamState {
                        name: String::new(),
                        p_kpa,
                        t_c,
                        x: 1.0,
                        v: R_WATER * (t_c + CELSIUS_TO_K) / (p_kpa * 1000.0),
                        h,
                        s,
                        region: Region::Superheated,
                    }
                }
            }
            PropertySpec::Entropy(s) => {
                let x = (s - sat.sf) / (sat.sg - sat.sf);
                if x <= 1.0 {
                    SteamState {
                        name: String::new(),
                        p_kpa,
                        t_c: sat.t_sat,
                        x,
                        v: lerp(sat.vf, sat.vg, x),
                        h: lerp(sat.hf, sat.hg, x),
                        s,
                        region: region_from_quality(x),
                    }
                } else {
                    let (t_c, h) = self.superheat.t_h_at_s(p_bar, s)?;
                    SteamState {
                        name: String::new(),
                        p_kpa,
                        t_c,
                        x: 1.0,
                        v: R_WATER * (t_c + CELSIUS_TO_K) / (p_kpa * 1000.0),
                        h,
                        s,
                        region: Region::Superheated,
                    }
                }
            }
            PropertySpec::SpecificVolume(v) => {
                let x = (v - sat.vf) / (sat.vg - sat.vf);
                if x <= 1.0 {
                    SteamState {
                        name: String::new(),
                        p_kpa,
                        t_c: sat.t_sat,
                        x,
                        v,
                        h: lerp(sat.hf, sat.hg, x),
                        s: lerp(sat.sf, sat.sg, x),
                        region: region_from_quality(x),
                    }
                } else {
                    // Back the temperature out of the ideal-gas relation,
                    // then read h and s from the table.
                    let t_c = p_kpa * 1000.0 * v / R_WATER - CELSIUS_TO_K;
                    let (h, s) = self.superheat.h_s_at_t(p_bar, t_c)?;
                    SteamState {
                        name: String::new(),
                        p_kpa,
                        t_c,
                        x: 1.0,
                        v,
                        h,
                        s,
                        region: Region::Superheated,
                    }
                }
            }
        };

        debug!(p_kpa, region = %state.region, "resolved steam state");
        Ok(state)
    }
}

fn region_from_quality(x: f64) -> Region {
    if x < 0.0 {
        Region::CompressedLiquid
    } else {
        Region::Saturated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> SteamTables {
        SteamTables::embedded()
    }

    #[test]
    fn quality_zero_matches_saturated_liquid_exactly() {
        // 0.08 bar is a tabulated row: no interpolation error at x = 0
        let st = tables().resolve(8.0, PropertySpec::Quality(0.0)).unwrap();
        assert_eq!(st.region, Region::Saturated);
        assert!((st.h - 173.88).abs() < 1e-9);
        assert!((st.s - 0.5926).abs() < 1e-9);
        assert!((st.v - 0.001008).abs() < 1e-12);
        assert!((st.t_c - 41.51).abs() < 1e-9);
    }

    #[test]
    fn quality_one_matches_saturated_vapor_exactly() {
        let st = tables().resolve(8.0, PropertySpec::Quality(1.0)).unwrap();
        assert!((st.h - 2577.0).abs() < 1e-9);
        assert!((st.s - 8.2287).abs() < 1e-9);
        assert!((st.v - 18.103).abs() < 1e-9);
    }

    #[test]
    fn quality_outside_unit_interval_rejected() {
        let err = tables().resolve(8.0, PropertySpec::Quality(1.2)).unwrap_err();
        assert!(matches!(err, SteamError::InvalidArg { .. }));
    }

    #[test]
    fn quality_enthalpy_round_trip() {
        let t = tables();
        let by_x = t.resolve(500.0, PropertySpec::Quality(0.37)).unwrap();
        let by_h = t.resolve(500.0, PropertySpec::Enthalpy(by_x.h)).unwrap();
        assert_eq!(by_h.region, Region::Saturated);
        assert!((by_h.x - 0.37).abs() < 1e-9);
        assert!((by_h.s - by_x.s).abs() < 1e-9);
    }

    #[test]
    fn temperature_above_saturation_is_superheated() {
        let st = tables()
            .resolve(8000.0, PropertySpec::Temperature(500.0))
            .unwrap();
        assert_eq!(st.region, Region::Superheated);
        assert!((st.h - 3398.3).abs() < 1e-6);
        assert!((st.s - 6.7240).abs() < 1e-6);
        // Ideal-gas specific volume at 80 bar, 500 C: ~0.0446 m^3/kg
        assert!(st.v > 0.03 && st.v < 0.06);
    }

    #[test]
    fn temperature_below_saturation_treated_as_compressed_liquid() {
        let st = tables()
            .resolve(8000.0, PropertySpec::Temperature(100.0))
            .unwrap();
        assert_eq!(st.region, Region::CompressedLiquid);
        // saturated-liquid approximation at 80 bar
        assert!((st.h - 1316.64).abs() < 1e-6);
    }

    #[test]
    fn entropy_below_liquid_bracket_tags_compressed_liquid() {
        // sf at 80 bar is 3.2068; feed the 8 kPa liquid entropy
        let st = tables()
            .resolve(8000.0, PropertySpec::Entropy(0.5926))
            .unwrap();
        assert_eq!(st.region, Region::CompressedLiquid);
        assert!(st.x < 0.0);
    }

    #[test]
    fn enthalpy_above_vapor_bracket_is_superheated() {
        let t = tables();
        let st = t.resolve(8000.0, PropertySpec::Enthalpy(3398.3)).unwrap();
        assert_eq!(st.region, Region::Superheated);
        assert!((st.t_c - 500.0).abs() < 1e-6);
    }

    #[test]
    fn specific_volume_resolves_saturated_mixture() {
        let t = tables();
        let by_x = t.resolve(100.0, PropertySpec::Quality(0.5)).unwrap();
        let by_v = t
            .resolve(100.0, PropertySpec::SpecificVolume(by_x.v))
            .unwrap();
        assert_eq!(by_v.region, Region::Saturated);
        assert!((by_v.x - 0.5).abs() < 1e-9);
        assert!((by_v.h - by_x.h).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_pressure_is_surfaced() {
        let err = tables()
            .resolve(50000.0, PropertySpec::Quality(0.5))
            .unwrap_err();
        assert!(matches!(err, SteamError::OutOfRange { .. }));
    }

    #[test]
    fn display_suppresses_lines_by_region() {
        let t = tables();
        let sat = t.resolve(8.0, PropertySpec::Quality(0.5)).unwrap();
        let text = sat.to_string();
        assert!(text.contains("x ="));
        assert!(text.contains("v ="));

        let sh = t.resolve(8000.0, PropertySpec::Temperature(500.0)).unwrap();
        let text = sh.to_string();
        assert!(!text.contains("x ="));
        assert!(text.contains("s ="));

        let cl = t.resolve(8000.0, PropertySpec::Temperature(100.0)).unwrap();
        let text = cl.to_string();
        assert!(!text.contains("T ="));
        assert!(!text.contains("s ="));
    }
}
