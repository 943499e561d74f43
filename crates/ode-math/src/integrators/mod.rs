//! The `Integrand` contract and the three integrators built on top of it.
//!
//! Grounded on `ql_math::ode::OdeFunction`, which is the same shape (a
//! right-hand side `f(t, y) -> dy/dt` plus a blanket impl for closures);
//! here it is widened with an auxiliary driving signal `x` and made
//! generic over the vector carrier.

use ode_core::{Real, Stream, Vector};

pub mod dopri5;
pub mod euler;
pub mod rk4;

pub use dopri5::{dopri5, dopri5h};
pub use euler::euler;
pub use rk4::rk4;

/// A right-hand side `f(t, x, y) -> dy/dt` for an ODE system, where `x` is
/// an optional auxiliary driving signal threaded in from an `x`-stream.
pub trait Integrand<X, V> {
    /// Evaluates the right-hand side at `(t, x, y)`.
    fn eval(&self, t: Real, x: &X, y: &V) -> V;
}

impl<F, X, V> Integrand<X, V> for F
where
    F: Fn(Real, &X, &V) -> V,
{
    fn eval(&self, t: Real, x: &X, y: &V) -> V {
        (self)(t, x, y)
    }
}

/// A stream that emits a NaN-filled vector for every key, forever — the
/// integrator's response to any NaN in `(t, h, y, dt)` (§7: NaN-propagation
/// is the sole numerical failure mode).
pub(crate) fn nan_stream<V>() -> Stream<Real, V>
where
    V: Vector + 'static,
{
    ode_core::stream::const_stream(V::nan())
}
