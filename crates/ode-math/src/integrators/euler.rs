//! Fixed-step Euler integrator.
//!
//! Grounded on the outer stepping loop of the teacher's
//! `AdaptiveRungeKutta::integrate` (full steps of constant magnitude until
//! one would overshoot, then a final step of exactly the remaining
//! distance), reduced to a single forward-difference update and recast as
//! a [`Stream`].

use ode_core::{Real, ScalarField, Stream, Vector};

use super::{nan_stream, Integrand};

/// Integrates `dy/dt = f(t, x, y)` with fixed step magnitude `|h|`,
/// anchored at `(t0, y0)` with auxiliary stream `x_stream`.
pub fn euler<F, X, V>(h: Real, f: F, t0: Real, x_stream: Stream<Real, X>, y0: V) -> Stream<Real, V>
where
    F: Integrand<X, V> + Clone + 'static,
    X: 'static,
    V: Vector + 'static,
{
    Stream::from_value(y0.clone(), move |t1: Real| {
        euler_step(h, f.clone(), t0, x_stream.clone(), y0.clone(), t1)
    })
}

fn euler_step<F, X, V>(
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
    if h.is_nan() || dt.is_nan() {
        return nan_stream();
    }

    let x0 = x_stream.head();
    let k = f.eval(t0, &x0, &y0);

    if h.abs() >= dt.abs() {
        let y1 = y0.perturb(&k, V::Scalar::from_real(dt));
        if y1.norm1().is_nan() {
            return nan_stream();
        }
        let x1 = x_stream.seek(t1);
        euler(h, f, t1, x1, y1)
    } else {
        let h_prime = dt.signum() * h.abs();
        let t_next = t0 + h_prime;
        let y_next = y0.perturb(&k, V::Scalar::from_real(h_prime));
        if y_next.norm1().is_nan() {
            return nan_stream();
        }
        let x_next = x_stream.seek(t_next);
        euler_step(h, f, t_next, x_next, y_next, t1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ode_core::stream::const_stream;

    #[test]
    fn identity_at_anchor() {
        let s = euler(0.1, |_t: Real, _x: &(), y: &Real| *y, 0.0, const_stream::<Real, ()>(()), 1.0);
        assert_relative_eq!(s.head(), 1.0);
    }

    #[test]
    fn exponential_growth_converges_with_small_step() {
        let s = euler(1e-4, |_t: Real, _x: &(), y: &Real| *y, 0.0, const_stream::<Real, ()>(()), 1.0);
        let y1 = s.get(1.0);
        assert_relative_eq!(y1, std::f64::consts::E, max_relative = 1e-3);
    }

    #[test]
    fn backward_step_shrinks_to_remaining_distance() {
        let s = euler(0.3, |_t: Real, _x: &(), y: &Real| -y, 0.0, const_stream::<Real, ()>(()), 1.0);
        // A query closer than one full step must not overshoot.
        let y1 = s.get(0.1);
        assert_relative_eq!(y1, 0.9);
    }

    #[test]
    fn nan_step_propagates_forever() {
        let s = euler(Real::NAN, |_t: Real, _x: &(), y: &Real| *y, 0.0, const_stream::<Real, ()>(()), 1.0);
        assert!(s.get(1.0).is_nan());
        assert!(s.get(2.0).is_nan());
    }

    #[test]
    fn nan_integrand_output_propagates_forever() {
        let s = euler(0.1, |_t: Real, _x: &(), _y: &Real| Real::NAN, 0.0, const_stream::<Real, ()>(()), 1.0);
        assert!(s.get(1.0).is_nan());
    }
}
