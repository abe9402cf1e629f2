use crate::GfError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, GfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GfError::NonFinite { what, value: v })
    }
}

/// Linear blend between `a` and `b` with parameter `t` in [0, 1].
#[inline]
pub fn lerp(a: Real, b: Real, t: Real) -> Real {
    a + t * (b - a)
}

/// Fractional position of `x` inside [`lo`, `hi`].
///
/// Degenerate brackets (lo == hi) map to 0 rather than NaN.
#[inline]
pub fn inv_lerp(lo: Real, hi: Real, x: Real) -> Real {
    if hi == lo {
        0.0
    } else {
        (x - lo) / (hi - lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn inv_lerp_round_trip() {
        let t = inv_lerp(10.0, 20.0, 17.5);
        assert!((lerp(10.0, 20.0, t) - 17.5).abs() < 1e-12);
    }

    #[test]
    fn inv_lerp_degenerate_bracket() {
        assert_eq!(inv_lerp(5.0, 5.0, 5.0), 0.0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn lerp_inv_lerp_round_trip(
                lo in -1e6f64..1e6,
                span in 1e-3f64..1e6,
                t in 0.0f64..=1.0,
            ) {
                let hi = lo + span;
                let x = lerp(lo, hi, t);
                // tolerance scales with how much cancellation x - lo suffers
                let tol = 1e-12 * (1.0 + lo.abs() / span);
                prop_assert!((inv_lerp(lo, hi, x) - t).abs() < tol);
            }

            #[test]
            fn lerp_stays_near_bracket(
                lo in -1e6f64..1e6,
                span in 0.0f64..1e6,
                t in 0.0f64..=1.0,
            ) {
                let hi = lo + span;
                let x = lerp(lo, hi, t);
                // allow for rounding at the endpoints
                let slack = 1e-9 * (1.0 + lo.abs().max(hi.abs()));
                prop_assert!(x >= lo - slack && x <= hi + slack);
            }
        }
    }
}
