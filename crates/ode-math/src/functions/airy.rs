//! The Airy functions `Ai`, `Bi`: `y'' = t*y`, recast as the coupled
//! first-order system `(y, y')`, with initial values at `t = 0` given via
//! `Γ(1/3)`, `Γ(2/3)` (Abramowitz & Stegun 10.4.4).

use nalgebra::SVector;
use ode_core::{Real, Stream};

use crate::facade::dsolve_simple;

const GAMMA_ONE_THIRD: Real = 2.678_938_534_707_748;
const GAMMA_TWO_THIRDS: Real = 1.354_117_939_426_400;

fn airy(is_ai: bool) -> Stream<Real, SVector<Real, 2>> {
    let (y0, z0) = if is_ai {
        (
            1.0 / (3.0_f64.powf(2.0 / 3.0) * GAMMA_TWO_THIRDS),
            -1.0 / (3.0_f64.powf(1.0 / 3.0) * GAMMA_ONE_THIRD),
        )
    } else {
        (
            1.0 / (3.0_f64.powf(1.0 / 6.0) * GAMMA_TWO_THIRDS),
            3.0_f64.powf(1.0 / 6.0) / GAMMA_ONE_THIRD,
        )
    };
    let f = |t: Real, _x: &(), v: &SVector<Real, 2>| SVector::new(v.y, t * v.x);
    dsolve_simple(f, 0.0, SVector::new(y0, z0))
}

/// `Ai(t)`.
pub fn airy_ai() -> Stream<Real, Real> {
    airy(true).map(|v| v.x)
}

/// `Bi(t)`.
pub fn airy_bi() -> Stream<Real, Real> {
    airy(false).map(|v| v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn airy_ai_at_zero_matches_known_value() {
        assert_relative_eq!(airy_ai().head(), 0.355_028_053_887_817, max_relative = 1e-9);
    }

    #[test]
    fn airy_bi_at_zero_matches_known_value() {
        assert_relative_eq!(airy_bi().head(), 0.614_926_627_446_001, max_relative = 1e-9);
    }
}
