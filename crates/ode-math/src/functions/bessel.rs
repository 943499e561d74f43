//! `bessel(a, ..)`: Bessel's equation integrated via the substitution
//! `s = -ln(t)`, plus the integral-representation recipes `bessel_j2`,
//! `bessel_y2`.
//!
//! Bessel's equation `t^2 y'' + t y' + (t^2 - a^2) y = 0` is singular at
//! `t = 0`, the usual anchor. Substituting `s = -ln(t)` (so `t = e^{-s}`,
//! and `t = 1` becomes `s = 0`) turns it into the regular system
//! `e' = -2e, y' = w, w' = (a^2 - e) y` with `e = t^2`, integrated
//! outward in `s` from `s = 0`. `[Stream::premap]` with `t ↦ -ln(t)`
//! then re-exposes the result as a function of `t`.

use nalgebra::SVector;
use ode_core::{Real, Stream};

use crate::facade::{dsolve_simple, integrate_simple};
use crate::limits::{lim_integrate, lim_pinfty};

/// Bessel's equation integrated from the anchor `t = 1`, where the
/// solution and its derivative are known: `(j_a1, j_a1_prime) = (J_a(1),
/// J_a'(1))`.
pub fn bessel(a: Real, j_a1: Real, j_a1_prime: Real) -> Stream<Real, Real> {
    let f = move |_s: Real, _x: &(), v: &SVector<Real, 3>| {
        let e = v.x;
        let y = v.y;
        let w = v.z;
        SVector::new(-2.0 * e, w, (a * a - e) * y)
    };
    let state0 = SVector::new(1.0, j_a1, -j_a1_prime);
    dsolve_simple(f, 0.0, state0)
        .map(|v| v.y)
        .premap(|t: Real| -t.ln())
}

/// `J_a(x)` via its integral representation on `[0, π]` plus a
/// semi-infinite correction (Schläfli's integral, non-integer order).
pub fn bessel_j2(a: Real, x: Real) -> Real {
    let pi = std::f64::consts::PI;
    let main = integrate_simple(move |theta: Real| (x * theta.sin() - a * theta).cos(), 0.0, pi) / pi;

    let correction = (a * pi).sin() / pi
        * lim_integrate(
            move |t: Real| (-x * t.sinh() - a * t).exp(),
            0.0,
            lim_pinfty(0.0),
        );

    main - correction
}

/// `Y_a(x)` via its integral representation on `[0, π]` plus a
/// semi-infinite correction.
pub fn bessel_y2(a: Real, x: Real) -> Real {
    let pi = std::f64::consts::PI;
    let main = integrate_simple(move |theta: Real| (x * theta.sin() - a * theta).sin(), 0.0, pi) / pi;

    let correction = lim_integrate(
        move |t: Real| ((a * t).exp() + (-a * t).exp() * (a * pi).cos()) * (-x * t.sinh()).exp(),
        0.0,
        lim_pinfty(0.0),
    ) / pi;

    main - correction
}
