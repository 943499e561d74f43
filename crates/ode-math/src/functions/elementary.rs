//! `exp`, `log`, `sqrt` as initial-value problems.

use ode_core::{Real, Stream};

use crate::facade::dsolve_simple;

/// `y' = y`, `y(0) = 1`.
pub fn exp() -> Stream<Real, Real> {
    dsolve_simple(|_t: Real, _x: &(), y: &Real| *y, 0.0, 1.0)
}

/// `y' = 1/t`, `y(1) = 0`.
pub fn log() -> Stream<Real, Real> {
    dsolve_simple(|t: Real, _x: &(), _y: &Real| 1.0 / t, 1.0, 0.0)
}

/// `y' = 1/(2y)`, `y(1) = 1`.
pub fn sqrt() -> Stream<Real, Real> {
    dsolve_simple(|_t: Real, _x: &(), y: &Real| 1.0 / (2.0 * y), 1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn exp_at_one_is_e() {
        assert_relative_eq!(exp().get(1.0), std::f64::consts::E, max_relative = 1e-9);
    }

    #[test]
    fn log_of_e_is_one() {
        let e = exp().get(1.0);
        assert_relative_eq!(log().get(e), 1.0, max_relative = 1e-8);
    }

    #[test]
    fn sqrt_of_four_is_two() {
        assert_relative_eq!(sqrt().get(4.0), 2.0, max_relative = 1e-8);
    }
}
