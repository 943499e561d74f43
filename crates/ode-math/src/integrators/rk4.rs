//! Fixed-step classical Runge–Kutta 4 integrator.
//!
//! The outer stepping logic (full steps of `|h|` until overshoot, then an
//! exact final step) is the same shape as [`super::euler`]; only the
//! per-step update rule differs. [`rk4_single_step`] is reused by
//! [`super::dopri5`] as its small-step fallback, the reason the spec gives
//! RK4 pride of place alongside the adaptive integrator.

use ode_core::{Real, ScalarField, Stream, Vector};

use super::{nan_stream, Integrand};

/// Integrates `dy/dt = f(t, x, y)` with fixed step magnitude `|h|` using
/// classical RK4, anchored at `(t0, y0)`.
pub fn rk4<F, X, V>(h: Real, f: F, t0: Real, x_stream: Stream<Real, X>, y0: V) -> Stream<Real, V>
where
    F: Integrand<X, V> + Clone + 'static,
    X: 'static,
    V: Vector + 'static,
{
    Stream::from_value(y0.clone(), move |t1: Real| {
        rk4_step(h, f.clone(), t0, x_stream.clone(), y0.clone(), t1)
    })
}

fn rk4_step<F, X, V>(
    h: Real,
    f: F,
    t0: Real,
    x_stream: Stream<Real, X>,
    y0: V,
    t1: Real,
) -> Stream<Real, V>
where
    F: Integrand<X, V> + Clone + 'static,
    X: 'static,
    V: Vector + 'static,
{
    let dt = t1 - t0;
    if h.is_nan() || dt.is_nan() || y0.norm1().is_nan() {
        return nan_stream();
    }

    if h.abs() >= dt.abs() {
        let (y1, x1) = rk4_single_step(&f, t0, &x_stream, &y0, dt);
        rk4(h, f, t1, x1, y1)
    } else {
        let h_prime = dt.signum() * h.abs();
        let t_next = t0 + h_prime;
        let (y_next, x_next) = rk4_single_step(&f, t0, &x_stream, &y0, h_prime);
        rk4_step(h, f, t_next, x_next, y_next, t1)
    }
}

/// A single classical RK4 update over `[t0, t0 + step]`. `step` may be
/// negative (backward integration); the midpoint and endpoint scale
/// accordingly.
///
/// `x_stream` is queried at the three sub-times in order (`t0` is its
/// current anchor by contract) and the advanced auxiliary stream is
/// returned alongside the new state, so callers can thread it forward.
pub(crate) fn rk4_single_step<F, X, V>(
    f: &F,
    t0: Real,
    x_stream: &Stream<Real, X>,
    y0: &V,
    step: Real,
) -> (V, Stream<Real, X>)
where
    F: Integrand<X, V>,
    V: Vector,
{
    let t_mid = t0 + step / 2.0;
    let t_end = t0 + step;

    let x0 = x_stream.head();
    let (x_mid, x_after_mid) = x_stream.query(t_mid);
    let x_end_stream = x_after_mid.seek(t_end);
    let x_end = x_end_stream.head();

    let k1 = f.eval(t0, &x0, y0).scale(V::Scalar::from_real(step));
    let y_k2 = y0.perturb(&k1, V::Scalar::from_real(0.5));
    let k2 = f
        .eval(t_mid, &x_mid, &y_k2)
        .scale(V::Scalar::from_real(step));
    let y_k3 = y0.perturb(&k2, V::Scalar::from_real(0.5));
    let k3 = f
        .eval(t_mid, &x_mid, &y_k3)
        .scale(V::Scalar::from_real(step));
    let y_k4 = y0.add(&k3);
    let k4 = f
        .eval(t_end, &x_end, &y_k4)
        .scale(V::Scalar::from_real(step));

    let sum = V::linear_combination(
        &[
            V::Scalar::from_real(1.0),
            V::Scalar::from_real(2.0),
            V::Scalar::from_real(2.0),
            V::Scalar::from_real(1.0),
        ],
        &[k1, k2, k3, k4],
    );
    let y_end = y0.add(&sum.scale(V::Scalar::from_real(1.0 / 6.0)));

    (y_end, x_end_stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ode_core::stream::const_stream;

    #[test]
    fn identity_at_anchor() {
        let s = rk4(0.1, |_t: Real, _x: &(), y: &Real| *y, 0.0, const_stream::<Real, ()>(()), 1.0);
        assert_relative_eq!(s.head(), 1.0);
    }

    #[test]
    fn exponential_growth_is_fourth_order_accurate() {
        let s = rk4(0.1, |_t: Real, _x: &(), y: &Real| *y, 0.0, const_stream::<Real, ()>(()), 1.0);
        let y1 = s.get(1.0);
        assert_relative_eq!(y1, std::f64::consts::E, max_relative = 1e-6);
    }

    #[test]
    fn sine_cosine_system_matches_closed_form() {
        use nalgebra::SVector;
        type V2 = SVector<Real, 2>;
        let f = |_t: Real, _x: &(), y: &V2| V2::new(y.y, -y.x);
        let s = rk4(1e-3, f, 0.0, const_stream::<Real, ()>(()), V2::new(0.0, 1.0));
        let y = s.get(std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(y.x, 1.0, max_relative = 1e-6);
        assert_relative_eq!(y.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn nan_step_propagates_forever() {
        let s = rk4(Real::NAN, |_t: Real, _x: &(), y: &Real| *y, 0.0, const_stream::<Real, ()>(()), 1.0);
        assert!(s.get(1.0).is_nan());
    }
}
