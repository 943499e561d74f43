//! The complete elliptic integrals `K(m)`, `E(m)`, coupled:
//!
//! `dK/dm = (E - (1-m)K) / (2m(1-m))`, `dE/dm = (E-K)/(2m)`,
//! `K(0) = E(0) = π/2`.
//!
//! Both right-hand sides are `0/0`-indeterminate at `m = 0`; per the
//! data model this is handled by an explicit branch returning `(0, 0)`
//! there rather than by a tolerance check.

use nalgebra::SVector;
use ode_core::{Real, Stream};

use crate::facade::dsolve_simple;

/// `(K, E)`.
pub fn elliptic_c() -> Stream<Real, SVector<Real, 2>> {
    let f = |t: Real, _x: &(), v: &SVector<Real, 2>| {
        if t == 0.0 {
            SVector::new(0.0, 0.0)
        } else {
            let k = v.x;
            let e = v.y;
            let dk = (e - (1.0 - t) * k) / (2.0 * t * (1.0 - t));
            let de = (e - k) / (2.0 * t);
            SVector::new(dk, de)
        }
    };
    let half_pi = std::f64::consts::FRAC_PI_2;
    dsolve_simple(f, 0.0, SVector::new(half_pi, half_pi))
}

/// `K(m)`, read off the first component of [`elliptic_c`].
pub fn elliptic_k() -> Stream<Real, Real> {
    elliptic_c().map(|v| v.x)
}

/// `E(m)`, read off the second component of [`elliptic_c`].
pub fn elliptic_e() -> Stream<Real, Real> {
    elliptic_c().map(|v| v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_at_anchor() {
        assert_relative_eq!(elliptic_k().head(), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(elliptic_e().head(), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn k_grows_as_m_approaches_one() {
        assert!(elliptic_k().get(0.9) > elliptic_k().get(0.5));
    }
}
