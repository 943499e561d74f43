//! `sinc`, and the exponential/sine/cosine integral family `ein`, `si`,
//! `cin`, `chin` — each a single-component ODE whose right-hand side is a
//! `0/0`-indeterminate kernel at `t = 0`, handled by an explicit branch on
//! `t == 0.0` returning the analytic limit.
//!
//! Each kernel is driven by the `sin`/`cos`/`exp` streams (via `premap`
//! where the kernel needs `f` at `-t` rather than `t`) rather than calling
//! `f64`'s transcendental functions directly.

use ode_core::{Real, Stream};

use crate::facade::dsolve;
use super::elementary::exp;
use super::trig::{cos, sin};

/// `y' = (cos(t) - sinc(t))/t` for `t != 0`, `y'(0) = 0`; `y(0) = 1`.
pub fn sinc() -> Stream<Real, Real> {
    let f = |t: Real, cos_t: &Real, y: &Real| {
        if t == 0.0 {
            0.0
        } else {
            (*cos_t - *y) / t
        }
    };
    dsolve(f, 0.0, cos(), 1.0)
}

/// The exponential integral `Ein`: kernel `(1 - e^{-t})/t`, limit `1` at
/// `t = 0`; `y(0) = 0`.
pub fn ein() -> Stream<Real, Real> {
    let exp_neg = exp().premap(|t: Real| -t);
    let f = |t: Real, exp_neg_t: &Real, _y: &Real| {
        if t == 0.0 {
            1.0
        } else {
            (1.0 - *exp_neg_t) / t
        }
    };
    dsolve(f, 0.0, exp_neg, 0.0)
}

/// The sine integral `Si`: kernel `sin(t)/t`, limit `1` at `t = 0`;
/// `y(0) = 0`.
pub fn si() -> Stream<Real, Real> {
    let f = |t: Real, sin_t: &Real, _y: &Real| if t == 0.0 { 1.0 } else { *sin_t / t };
    dsolve(f, 0.0, sin(), 0.0)
}

/// The cosine integral `Cin`: kernel `(1 - cos(t))/t`, limit `0` at
/// `t = 0`; `y(0) = 0`.
pub fn cin() -> Stream<Real, Real> {
    let f = |t: Real, cos_t: &Real, _y: &Real| if t == 0.0 { 0.0 } else { (1.0 - *cos_t) / t };
    dsolve(f, 0.0, cos(), 0.0)
}

/// The hyperbolic cosine integral `Chin`: kernel `(cosh(t) - 1)/t`, limit
/// `0` at `t = 0`; `y(0) = 0`.
pub fn chin() -> Stream<Real, Real> {
    use super::trig::cosh;
    let f = |t: Real, cosh_t: &Real, _y: &Real| if t == 0.0 { 0.0 } else { (*cosh_t - 1.0) / t };
    dsolve(f, 0.0, cosh(), 0.0)
}
