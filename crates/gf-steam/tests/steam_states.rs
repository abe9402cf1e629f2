use gf_steam::{PropertySpec, Region, SteamTables};
use proptest::prelude::*;

#[test]
fn tabulated_saturation_row_is_reproduced_exactly() {
    let tables = SteamTables::embedded();
    let liquid = tables.resolve(8.0, PropertySpec::Quality(0.0)).unwrap();
    let vapor = tables.resolve(8.0, PropertySpec::Quality(1.0)).unwrap();

    assert!((liquid.t_c - 41.51).abs() < 1e-9);
    assert!((liquid.h - 173.88).abs() < 1e-9);
    assert!((vapor.h - 2577.0).abs() < 1e-9);
    assert!((vapor.s - 8.2287).abs() < 1e-9);
}

#[test]
fn interpolated_pressure_lies_between_neighbors() {
    let tables = SteamTables::embedded();
    // 7.5 kPa sits between the 0.07 and 0.08 bar rows
    let lo = tables.resolve(7.0, PropertySpec::Quality(1.0)).unwrap();
    let mid = tables.resolve(7.5, PropertySpec::Quality(1.0)).unwrap();
    let hi = tables.resolve(8.0, PropertySpec::Quality(1.0)).unwrap();
    assert!(lo.t_c < mid.t_c && mid.t_c < hi.t_c);
    assert!(hi.h > lo.h);
    assert!((mid.h - (lo.h + hi.h) / 2.0).abs() < 1e-9);
}

#[test]
fn pressure_outside_table_is_an_error() {
    let tables = SteamTables::embedded();
    assert!(tables.resolve(0.5, PropertySpec::Quality(0.5)).is_err());
    assert!(tables.resolve(30000.0, PropertySpec::Quality(0.5)).is_err());
}

proptest! {
    #[test]
    fn quality_enthalpy_round_trip(
        p_kpa in 2.0f64..19_000.0,
        x in 0.0f64..=1.0,
    ) {
        let tables = SteamTables::embedded();
        let by_x = tables.resolve(p_kpa, PropertySpec::Quality(x)).unwrap();
        let by_h = tables.resolve(p_kpa, PropertySpec::Enthalpy(by_x.h)).unwrap();
        prop_assert_eq!(by_h.region, Region::Saturated);
        prop_assert!((by_h.x - x).abs() < 1e-9);
        prop_assert!((by_h.s - by_x.s).abs() < 1e-9);
    }

    #[test]
    fn quality_entropy_round_trip(
        p_kpa in 2.0f64..19_000.0,
        x in 0.0f64..=1.0,
    ) {
        let tables = SteamTables::embedded();
        let by_x = tables.resolve(p_kpa, PropertySpec::Quality(x)).unwrap();
        let by_s = tables.resolve(p_kpa, PropertySpec::Entropy(by_x.s)).unwrap();
        prop_assert_eq!(by_s.region, Region::Saturated);
        prop_assert!((by_s.x - x).abs() < 1e-9);
        prop_assert!((by_s.h - by_x.h).abs() < 1e-9);
    }

    #[test]
    fn saturated_properties_increase_with_quality(
        p_kpa in 2.0f64..19_000.0,
        x in 0.0f64..0.99,
    ) {
        let tables = SteamTables::embedded();
        let lo = tables.resolve(p_kpa, PropertySpec::Quality(x)).unwrap();
        let hi = tables.resolve(p_kpa, PropertySpec::Quality(x + 0.01)).unwrap();
        prop_assert!(hi.h > lo.h);
        prop_assert!(hi.s > lo.s);
        prop_assert!(hi.v > lo.v);
    }
}
