//! The error function and its complement, `erf`/`erfc`.
//!
//! A three-component system, per the data model: rather than reaching for
//! `f64::exp` to evaluate the Gaussian kernel `e^{-t^2}`, the kernel is
//! itself carried as an ODE state (`kernel' = -2t*kernel`, `kernel(0) =
//! 1`), keeping the whole recipe inside the ODE formalism.

use nalgebra::SVector;
use ode_core::{Real, Stream};

use crate::facade::dsolve_simple;

/// `(erf, erfc, kernel)` where `kernel(t) = e^{-t^2}`.
pub fn erfs() -> Stream<Real, SVector<Real, 3>> {
    let c = 2.0 / std::f64::consts::PI.sqrt();
    let f = move |t: Real, _x: &(), v: &SVector<Real, 3>| {
        let kernel = v.z;
        SVector::new(c * kernel, -c * kernel, -2.0 * t * kernel)
    };
    dsolve_simple(f, 0.0, SVector::new(0.0, 1.0, 1.0))
}

/// `erf`, read off the first component of [`erfs`].
pub fn erf() -> Stream<Real, Real> {
    erfs().map(|v| v.x)
}

/// `erfc`, read off the second component of [`erfs`].
pub fn erfc() -> Stream<Real, Real> {
    erfs().map(|v| v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn erf_at_one_matches_known_value() {
        assert_relative_eq!(erf().get(1.0), 0.842_700_792_949_714_9, max_relative = 1e-8);
    }

    #[test]
    fn erf_and_erfc_sum_to_one() {
        assert_relative_eq!(erf().get(0.7) + erfc().get(0.7), 1.0, max_relative = 1e-8);
    }
}
