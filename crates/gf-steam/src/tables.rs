//! Steam table parsing and interpolation.
//!
//! Two tables back the resolver: a saturation table keyed by pressure and
//! a superheated-region table organized as isobars of (T, h, s) points.
//! Tables are loaded once into a read-only [`SteamTables`] value and shared
//! by every state resolution; defaults ship embedded in the binary.

use crate::error::{SteamError, SteamResult};
use gf_core::numeric::{inv_lerp, lerp};
use std::path::Path;
use tracing::info;

const SAT_TABLE: &str = include_str!("../data/sat_water_table.txt");
const SUPERHEAT_TABLE: &str = include_str!("../data/superheated_water_table.txt");

/// One saturation-table row.
#[derive(Debug, Clone, Copy)]
pub struct SatRow {
    /// Saturation temperature [C]
    pub t_c: f64,
    /// Pressure [bar]
    pub p_bar: f64,
    /// Saturated liquid/vapor enthalpy [kJ/kg]
    pub hf: f64,
    pub hg: f64,
    /// Saturated liquid/vapor entropy [kJ/(kg K)]
    pub sf: f64,
    pub sg: f64,
    /// Saturated liquid/vapor specific volume [m^3/kg]
    pub vf: f64,
    pub vg: f64,
}

/// Saturation properties interpolated at one pressure.
#[derive(Debug, Clone, Copy)]
pub struct SatPoint {
    pub t_sat: f64,
    pub hf: f64,
    pub hg: f64,
    pub sf: f64,
    pub sg: f64,
    pub vf: f64,
    pub vg: f64,
}

/// Saturation table, rows sorted by pressure.
#[derive(Debug, Clone)]
pub struct SaturationTable {
    rows: Vec<SatRow>,
}

impl SaturationTable {
    /// Parse from row-major text: one header line, then
    /// `T P hf hg sf sg vf vg` per row.
    pub fn parse(text: &str) -> SteamResult<Self> {
        let mut rows = Vec::new();
        for (i, line) in text.lines().enumerate().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let f = parse_floats(line, i + 1, 8)?;
            rows.push(SatRow {
                t_c: f[0],
                p_bar: f[1],
                hf: f[2],
                hg: f[3],
                sf: f[4],
                sg: f[5],
                vf: f[6],
                vg: f[7],
            });
        }
        if rows.len() < 2 {
            return Err(SteamError::Parse {
                line: 1,
                what: "saturation table needs at least two rows".to_string(),
            });
        }
        rows.sort_by(|a, b| a.p_bar.total_cmp(&b.p_bar));
        Ok(Self { rows })
    }

    /// Saturation properties at `p_bar`, linearly interpolated between the
    /// bracketing rows. Out-of-range pressures are an error.
    pub fn at_pressure(&self, p_bar: f64) -> SteamResult<SatPoint> {
        let min = self.rows[0].p_bar;
        let max = self.rows[self.rows.len() - 1].p_bar;
        if !p_bar.is_finite() || p_bar < min || p_bar > max {
            return Err(SteamError::OutOfRange {
                what: "saturation pressure [bar]",
                value: p_bar,
                min,
                max,
            });
        }
        let j = self
            .rows
            .iter()
            .position(|r| r.p_bar >= p_bar)
            .unwrap_or(self.rows.len() - 1);
        let i = j.saturating_sub(1);
        let (lo, hi) = (&self.rows[i], &self.rows[j]);
        let t = inv_lerp(lo.p_bar, hi.p_bar, p_bar);
        Ok(SatPoint {
            t_sat: lerp(lo.t_c, hi.t_c, t),
            hf: lerp(lo.hf, hi.hf, t),
            hg: lerp(lo.hg, hi.hg, t),
            sf: lerp(lo.sf, hi.sf, t),
            sg: lerp(lo.sg, hi.sg, t),
            vf: lerp(lo.vf, hi.vf, t),
            vg: lerp(lo.vg, hi.vg, t),
        })
    }
}

/// One superheated-table point along an isobar.
#[derive(Debug, Clone, Copy)]
pub struct SuperheatPoint {
    pub t_c: f64,
    pub h: f64,
    pub s: f64,
}

#[derive(Debug, Clone)]
struct Isobar {
    p_bar: f64,
    /// Points sorted by temperature; h and s increase with T along an isobar.
    points: Vec<SuperheatPoint>,
}

impl Isobar {
    /// Interpolate the full point at the position where `key` equals `x`.
    fn interp_by(
        &self,
        key: fn(&SuperheatPoint) -> f64,
        what: &'static str,
        x: f64,
    ) -> SteamResult<SuperheatPoint> {
        let min = key(&self.points[0]);
        let max = key(&self.points[self.points.len() - 1]);
        if !x.is_finite() || x < min || x > max {
            return Err(SteamError::OutOfRange {
                what,
                value: x,
                min,
                max,
            });
        }
        let j = self
            .points
            .iter()
            .position(|p| key(p) >= x)
            .unwrap_or(self.points.len() - 1);
        let i = j.saturating_sub(1);
        let (lo, hi) = (&self.points[i], &self.points[j]);
        let t = inv_lerp(key(lo), key(hi), x);
        Ok(SuperheatPoint {
            t_c: lerp(lo.t_c, hi.t_c, t),
            h: lerp(lo.h, hi.h, t),
            s: lerp(lo.s, hi.s, t),
        })
    }
}

/// Superheated-region table: isobars of (T, h, s) points.
#[derive(Debug, Clone)]
pub struct SuperheatTable {
    isobars: Vec<Isobar>,
}

impl SuperheatTable {
    /// Parse from row-major text: one header line, then `T h s P` per row.
    /// Rows are grouped into isobars by pressure.
    pub fn parse(text: &str) -> SteamResult<Self> {
        let mut rows: Vec<(f64, SuperheatPoint)> = Vec::new();
        for (i, line) in text.lines().enumerate().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let f = parse_floats(line, i + 1, 4)?;
            rows.push((
                f[3],
                SuperheatPoint {
                    t_c: f[0],
                    h: f[1],
                    s: f[2],
                },
            ));
        }
        rows.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.t_c.total_cmp(&b.1.t_c)));

        let mut isobars: Vec<Isobar> = Vec::new();
        for (p, point) in rows {
            match isobars.last_mut() {
                Some(iso) if (iso.p_bar - p).abs() < 1e-9 => iso.points.push(point),
                _ => isobars.push(Isobar {
                    p_bar: p,
                    points: vec![point],
                }),
            }
        }
        if isobars.len() < 2 {
            return Err(SteamError::Parse {
                line: 1,
                what: "superheated table needs at least two isobars".to_string(),
            });
        }
        Ok(Self { isobars })
    }

    /// Bracketing isobars for `p_bar` and the pressure blend factor.
    fn bracket(&self, p_bar: f64) -> SteamResult<(&Isobar, &Isobar, f64)> {
        let min = self.isobars[0].p_bar;
        let max = self.isobars[self.isobars.len() - 1].p_bar;
        if !p_bar.is_finite() || p_bar < min || p_bar > max {
            return Err(SteamError::OutOfRange {
                what: "superheated pressure [bar]",
                value: p_bar,
                min,
                max,
            });
        }
        let j = self
            .isobars
            .iter()
            .position(|iso| iso.p_bar >= p_bar)
            .unwrap_or(self.isobars.len() - 1);
        let i = j.saturating_sub(1);
        let t = inv_lerp(self.isobars[i].p_bar, self.isobars[j].p_bar, p_bar);
        Ok((&self.isobars[i], &self.isobars[j], t))
    }

    fn blend(
        &self,
        p_bar: f64,
        key: fn(&SuperheatPoint) -> f64,
        what: &'static str,
        x: f64,
    ) -> SteamResult<SuperheatPoint> {
        let (lo, hi, t) = self.bracket(p_bar)?;
        let a = lo.interp_by(key, what, x)?;
        let b = hi.interp_by(key, what, x)?;
        Ok(SuperheatPoint {
            t_c: lerp(a.t_c, b.t_c, t),
            h: lerp(a.h, b.h, t),
            s: lerp(a.s, b.s, t),
        })
    }

    /// Enthalpy and entropy at (pressure, temperature).
    pub fn h_s_at_t(&self, p_bar: f64, t_c: f64) -> SteamResult<(f64, f64)> {
        let pt = self.blend(p_bar, |p| p.t_c, "superheated temperature [C]", t_c)?;
        Ok((pt.h, pt.s))
    }

    /// Temperature and entropy at (pressure, enthalpy) — inverts the
    /// enthalpy column along the bracketing isobars.
    pub fn t_s_at_h(&self, p_bar: f64, h: f64) -> SteamResult<(f64, f64)> {
        let pt = self.blend(p_bar, |p| p.h, "superheated enthalpy [kJ/kg]", h)?;
        Ok((pt.t_c, pt.s))
    }

    /// Temperature and enthalpy at (pressure, entropy).
    pub fn t_h_at_s(&self, p_bar: f64, s: f64) -> SteamResult<(f64, f64)> {
        let pt = self.blend(p_bar, |p| p.s, "superheated entropy [kJ/kgK]", s)?;
        Ok((pt.t_c, pt.h))
    }
}

/// The full property database: loaded once, shared read-only.
#[derive(Debug, Clone)]
pub struct SteamTables {
    pub sat: SaturationTable,
    pub superheat: SuperheatTable,
}

impl SteamTables {
    /// The tables compiled into the binary.
    pub fn embedded() -> Self {
        // The embedded data is known-good; parse failures here are a build
        // defect, not a runtime condition.
        let sat = SaturationTable::parse(SAT_TABLE)
            .unwrap_or_else(|e| panic!("embedded saturation table invalid: {e}"));
        let superheat = SuperheatTable::parse(SUPERHEAT_TABLE)
            .unwrap_or_else(|e| panic!("embedded superheated table invalid: {e}"));
        Self { sat, superheat }
    }

    /// Load both tables from external files.
    pub fn from_paths(sat_path: &Path, superheat_path: &Path) -> SteamResult<Self> {
        let sat_text = read(sat_path)?;
        let superheat_text = read(superheat_path)?;
        info!(
            sat = %sat_path.display(),
            superheat = %superheat_path.display(),
            "loaded steam tables"
        );
        Ok(Self {
            sat: SaturationTable::parse(&sat_text)?,
            superheat: SuperheatTable::parse(&superheat_text)?,
        })
    }
}

fn read(path: &Path) -> SteamResult<String> {
    std::fs::read_to_string(path).map_err(|source| SteamError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_floats(line: &str, line_no: usize, expected: usize) -> SteamResult<Vec<f64>> {
    let vals: Result<Vec<f64>, _> = line.split_whitespace().map(str::parse::<f64>).collect();
    let vals = vals.map_err(|_| SteamError::Parse {
        line: line_no,
        what: format!("expected {expected} numbers, got '{line}'"),
    })?;
    if vals.len() != expected {
        return Err(SteamError::Parse {
            line: line_no,
            what: format!("expected {expected} columns, got {}", vals.len()),
        });
    }
    Ok(vals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_tables_load() {
        let tables = SteamTables::embedded();
        assert!(tables.sat.rows.len() > 10);
        assert!(tables.superheat.isobars.len() > 5);
    }

    #[test]
    fn saturation_exact_row_has_no_interpolation_error() {
        let tables = SteamTables::embedded();
        // 0.08 bar row: Tsat = 41.51 C, hf = 173.88, hg = 2577.0
        let sat = tables.sat.at_pressure(0.08).unwrap();
        assert!((sat.t_sat - 41.51).abs() < 1e-9);
        assert!((sat.hf - 173.88).abs() < 1e-9);
        assert!((sat.hg - 2577.0).abs() < 1e-9);
    }

    #[test]
    fn saturation_interpolates_between_rows() {
        let tables = SteamTables::embedded();
        let lo = tables.sat.at_pressure(0.075).unwrap();
        let mid = tables.sat.at_pressure(0.0775).unwrap();
        let hi = tables.sat.at_pressure(0.080).unwrap();
        assert!(lo.t_sat < mid.t_sat && mid.t_sat < hi.t_sat);
        assert!((mid.hf - 0.5 * (lo.hf + hi.hf)).abs() < 1e-9);
    }

    #[test]
    fn saturation_out_of_range_is_an_error() {
        let tables = SteamTables::embedded();
        assert!(matches!(
            tables.sat.at_pressure(0.001),
            Err(SteamError::OutOfRange { .. })
        ));
        assert!(matches!(
            tables.sat.at_pressure(500.0),
            Err(SteamError::OutOfRange { .. })
        ));
    }

    #[test]
    fn superheat_exact_grid_point() {
        let tables = SteamTables::embedded();
        // 80 bar, 500 C: h = 3398.3, s = 6.7240
        let (h, s) = tables.superheat.h_s_at_t(80.0, 500.0).unwrap();
        assert!((h - 3398.3).abs() < 1e-9);
        assert!((s - 6.7240).abs() < 1e-9);
    }

    #[test]
    fn superheat_blends_between_isobars() {
        let tables = SteamTables::embedded();
        let (h60, _) = tables.superheat.h_s_at_t(60.0, 500.0).unwrap();
        let (h70, _) = tables.superheat.h_s_at_t(70.0, 500.0).unwrap();
        let (h80, _) = tables.superheat.h_s_at_t(80.0, 500.0).unwrap();
        assert!(h80 < h70 && h70 < h60);
        assert!((h70 - 0.5 * (h60 + h80)).abs() < 1e-9);
    }

    #[test]
    fn superheat_inversion_round_trips() {
        let tables = SteamTables::embedded();
        let (h, s) = tables.superheat.h_s_at_t(80.0, 475.0).unwrap();
        let (t_from_h, s_from_h) = tables.superheat.t_s_at_h(80.0, h).unwrap();
        assert!((t_from_h - 475.0).abs() < 1e-6);
        assert!((s_from_h - s).abs() < 1e-9);

        let (t_from_s, h_from_s) = tables.superheat.t_h_at_s(80.0, s).unwrap();
        assert!((t_from_s - 475.0).abs() < 1e-6);
        assert!((h_from_s - h).abs() < 1e-6);
    }

    #[test]
    fn malformed_row_is_a_parse_error() {
        let err = SaturationTable::parse("header\n1 2 3\n").unwrap_err();
        assert!(matches!(err, SteamError::Parse { .. }));
    }
}
