use crate::{GtError, GtResult};

/// Floating point type used throughout the network.
pub type Real = f64;

/// Absolute/relative tolerance pair used when comparing propagated state.
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
    // Exact equality also covers matching infinities.
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> GtResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GtError::NonFinite { what, value: v })
    }
}

/// Reject zero, negative and NaN values.
pub fn ensure_positive(v: Real, what: &'static str) -> GtResult<Real> {
    if v > 0.0 {
        Ok(v)
    } else {
        Err(GtError::NonPositive { what, value: v })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1.0e6_f64..1.0e6, b in -1.0e6_f64..1.0e6) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn nearly_equal_absorbs_relative_noise(a in -1.0e6_f64..1.0e6, k in -0.5_f64..0.5) {
            let tol = Tolerances::default();
            prop_assert!(nearly_equal(a, a * (1.0 + k * 1e-10), tol));
        }

        #[test]
        fn ensure_positive_keeps_positive_values(v in 1.0e-9_f64..1.0e9) {
            prop_assert_eq!(ensure_positive(v, "v"), Ok(v));
        }
    }
}
