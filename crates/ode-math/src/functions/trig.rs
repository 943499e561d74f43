//! Circular and hyperbolic trigonometric functions, plus `atan`, each as
//! an ODE recipe.

use nalgebra::SVector;
use ode_core::{Real, Stream};

use crate::facade::dsolve_simple;

/// Coupled `y' = z, z' = -y`, `(y, z)(0) = (0, 1)` — `(sin, cos)`.
pub fn sin_cos() -> Stream<Real, SVector<Real, 2>> {
    let f = |_t: Real, _x: &(), v: &SVector<Real, 2>| SVector::new(v.y, -v.x);
    dsolve_simple(f, 0.0, SVector::new(0.0, 1.0))
}

/// `sin`, read off the first component of [`sin_cos`].
pub fn sin() -> Stream<Real, Real> {
    sin_cos().map(|v| v.x)
}

/// `cos`, read off the second component of [`sin_cos`].
pub fn cos() -> Stream<Real, Real> {
    sin_cos().map(|v| v.y)
}

/// Coupled `y' = z, z' = y`, `(y, z)(0) = (0, 1)` — `(sinh, cosh)`.
pub fn sinh_cosh() -> Stream<Real, SVector<Real, 2>> {
    let f = |_t: Real, _x: &(), v: &SVector<Real, 2>| SVector::new(v.y, v.x);
    dsolve_simple(f, 0.0, SVector::new(0.0, 1.0))
}

/// `sinh`, read off the first component of [`sinh_cosh`].
pub fn sinh() -> Stream<Real, Real> {
    sinh_cosh().map(|v| v.x)
}

/// `cosh`, read off the second component of [`sinh_cosh`].
pub fn cosh() -> Stream<Real, Real> {
    sinh_cosh().map(|v| v.y)
}

/// `y' = 1/(1+t^2)`, `y(0) = 0`.
pub fn atan() -> Stream<Real, Real> {
    dsolve_simple(|t: Real, _x: &(), _y: &Real| 1.0 / (1.0 + t * t), 0.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sin_at_half_pi_is_one() {
        assert_relative_eq!(sin().get(std::f64::consts::FRAC_PI_2), 1.0, max_relative = 1e-8);
    }

    #[test]
    fn cos_at_pi_is_minus_one() {
        assert_relative_eq!(cos().get(std::f64::consts::PI), -1.0, max_relative = 1e-8);
    }

    #[test]
    fn sinh_cosh_satisfy_hyperbolic_identity() {
        let (sinh_1, cosh_1) = (sinh().get(1.0), cosh().get(1.0));
        assert_relative_eq!(cosh_1 * cosh_1 - sinh_1 * sinh_1, 1.0, max_relative = 1e-6);
    }

    #[test]
    fn atan_at_one_is_quarter_pi() {
        assert_relative_eq!(atan().get(1.0), std::f64::consts::FRAC_PI_4, max_relative = 1e-8);
    }
}
