//! The integration façade: user-facing constructors layered over the three
//! integrators and the paired-state [`Vector`] impl, matching the data
//! model's `dsolve`/`integrate`/`path_integral`/`residue` family.

use nalgebra::SVector;
use num_complex::Complex;
use ode_core::{stream::const_stream, Real, Stream, StepControl, Vector};

use crate::integrators::{dopri5, Integrand};

/// Runs a partially-applied integrator constructor — `euler`/`rk4` curried
/// down to `(control-or-step, f, t0, x_stream, y0)`, or `dopri5`/`dopri5h`
/// likewise — against a constant `()` auxiliary stream, for integrands that
/// ignore their driving signal entirely.
///
/// Every integrator unconditionally pops `x_stream.head()` to hand the
/// integrand its auxiliary argument, whether or not the integrand actually
/// uses it; [`bottom`](ode_core::stream::bottom) would make that pop panic,
/// so the no-auxiliary path is anchored on a stream that is always safe to
/// read instead.
pub fn simple_integrator<F, V>(
    integrator: impl FnOnce(F, Real, Stream<Real, ()>, V) -> Stream<Real, V>,
    f: F,
    t0: Real,
    y0: V,
) -> Stream<Real, V>
where
    F: Integrand<(), V> + Clone + 'static,
    V: Vector + 'static,
{
    integrator(f, t0, const_stream(()), y0)
}

/// DOPRI5, default tolerances, with an explicit auxiliary driving stream.
pub fn dsolve<F, X, V>(f: F, t0: Real, x_stream: Stream<Real, X>, y0: V) -> Stream<Real, V>
where
    F: Integrand<X, V> + Clone + 'static,
    X: 'static,
    V: Vector + 'static,
{
    dopri5(StepControl::default(), f, t0, x_stream, y0)
}

/// DOPRI5, default tolerances, no auxiliary driving signal.
pub fn dsolve_simple<F, V>(f: F, t0: Real, y0: V) -> Stream<Real, V>
where
    F: Integrand<(), V> + Clone + 'static,
    V: Vector + 'static,
{
    dsolve(f, t0, const_stream(()), y0)
}

/// The definite integral `∫_a^b g(t, x) dt`, driven by `x_stream`, via the
/// accumulator-in-`y` trick: solve `y' = g(t, x)`, `y(a) = 0`, and query at
/// `b`.
pub fn integrate<G, X>(g: G, x_stream: Stream<Real, X>, a: Real, b: Real) -> Real
where
    G: Fn(Real, &X) -> Real + Clone + 'static,
    X: 'static,
{
    let f = move |t: Real, x: &X, _y: &Real| g(t, x);
    dsolve(f, a, x_stream, 0.0).get(b)
}

/// The definite integral `∫_a^b g(t) dt`, no auxiliary driving signal.
pub fn integrate_simple<G>(g: G, a: Real, b: Real) -> Real
where
    G: Fn(Real) -> Real + Clone + 'static,
{
    integrate(move |t: Real, _x: &()| g(t), const_stream(()), a, b)
}

/// Integrates `f` along a path `u(t)` whose velocity is `v(t, u)`, over
/// `t ∈ [t0, t1]` starting from `u(t0) = u0`.
///
/// The running integral `y' = f(u)·v(t, u)` and the path position
/// `u' = v(t, u)` are carried together as a paired `(y, u)` state (the
/// motivating case for the tuple [`Vector`] impl): advancing `u` and
/// accumulating `y` through the same integrator step keeps both in sync,
/// which matters once the path itself needs adaptive stepping.
pub fn path_integral<F, Vel, W>(f: F, v: Vel, t0: Real, t1: Real, u0: W) -> W
where
    F: Fn(&W) -> W + Clone + 'static,
    Vel: Fn(Real, &W) -> W + Clone + 'static,
    W: Vector + 'static,
{
    let rhs = move |t: Real, _x: &(), state: &(W, W)| {
        let u = &state.1;
        let vel = v(t, u);
        (f(u).hadamard(&vel), vel)
    };
    let s = dsolve_simple(rhs, t0, (W::zero(), u0));
    s.get(t1).0
}

/// The line integral of `f` along the straight segment from `a` to `b`:
/// [`path_integral`] with constant velocity `b - a` over `t ∈ [0, 1]`.
pub fn line_integral<F, W>(f: F, a: W, b: W) -> W
where
    F: Fn(&W) -> W + Clone + 'static,
    W: Vector + 'static,
{
    let direction = b.sub(&a);
    let v = move |_t: Real, _u: &W| direction.clone();
    path_integral(f, v, 0.0, 1.0, a)
}

/// The integral of `f` along the polyline through `points`, summing
/// [`line_integral`] over each consecutive pair. Panics on fewer than two
/// points.
pub fn lines_integral<F, W>(f: F, points: &[W]) -> W
where
    F: Fn(&W) -> W + Clone + 'static,
    W: Vector + 'static,
{
    ode_core::ensure!(
        points.len() >= 2,
        "lines_integral: need at least 2 points, got {}",
        points.len()
    );
    points.windows(2).fold(W::zero(), |acc, pair| {
        acc.add(&line_integral(f.clone(), pair[0].clone(), pair[1].clone()))
    })
}

/// The data model's other name for [`lines_integral`].
pub fn poly_integral<F, W>(f: F, points: &[W]) -> W
where
    F: Fn(&W) -> W + Clone + 'static,
    W: Vector + 'static,
{
    lines_integral(f, points)
}

/// The contour integral `∮ f(z) dz` around the square of half-width `r`
/// centered at `center`, via four [`line_integral`] legs.
pub fn residue_square<F>(f: F, center: Complex<Real>, r: Real) -> Complex<Real>
where
    F: Fn(&Complex<Real>) -> Complex<Real> + Clone + 'static,
{
    let corners = [
        center + Complex::new(r, -r),
        center + Complex::new(r, r),
        center + Complex::new(-r, r),
        center + Complex::new(-r, -r),
        center + Complex::new(r, -r),
    ];
    lines_integral(f, &corners) / Complex::new(0.0, 2.0 * std::f64::consts::PI)
}

/// The contour integral `∮ f(z) dz` around the circle of radius `r`
/// centered at `center`, via [`path_integral`] with velocity `i(z - center)`
/// (the derivative of `z(θ) = center + r e^{iθ}` expressed in terms of `z`
/// itself, rather than as a function of `θ` alone).
pub fn residue_circ<F>(f: F, center: Complex<Real>, r: Real) -> Complex<Real>
where
    F: Fn(&Complex<Real>) -> Complex<Real> + Clone + 'static,
{
    let v = move |_theta: Real, z: &Complex<Real>| Complex::new(0.0, 1.0) * (*z - center);
    let start = center + Complex::new(r, 0.0);
    let integral = path_integral(f, v, 0.0, 2.0 * std::f64::consts::PI, start);
    integral / Complex::new(0.0, 2.0 * std::f64::consts::PI)
}

/// The residue of `f` at `center`: [`residue_square`] on a small enough loop
/// to isolate an isolated singularity — the square loop empirically
/// tolerates larger adaptive-step excursions than the circular one, so it is
/// the default.
pub fn residue<F>(f: F, center: Complex<Real>) -> Complex<Real>
where
    F: Fn(&Complex<Real>) -> Complex<Real> + Clone + 'static,
{
    residue_square(f, center, 1e-3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dsolve_simple_matches_exponential_growth() {
        let s = dsolve_simple(|_t: Real, _x: &(), y: &Real| *y, 0.0, 1.0);
        assert_relative_eq!(s.get(1.0), std::f64::consts::E, max_relative = 1e-8);
    }

    #[test]
    fn integrate_simple_computes_a_definite_integral() {
        // ∫_0^1 2t dt = 1.
        let result = integrate_simple(|t: Real| 2.0 * t, 0.0, 1.0);
        assert_relative_eq!(result, 1.0, max_relative = 1e-6);
    }

    #[test]
    fn line_integral_of_constant_field_is_displacement_scaled() {
        let a = SVector::<Real, 2>::new(0.0, 0.0);
        let b = SVector::<Real, 2>::new(1.0, 1.0);
        let constant = move |_y: &SVector<Real, 2>| SVector::<Real, 2>::new(1.0, 0.0);
        let result = line_integral(constant, a, b);
        // ∫_0^1 (1,0)·(1,1) dt = (1,0).
        assert_relative_eq!(result.x, 1.0, max_relative = 1e-6);
        assert_relative_eq!(result.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn lines_integral_panics_on_one_point() {
        let result = std::panic::catch_unwind(|| {
            lines_integral(
                |y: &SVector<Real, 2>| *y,
                &[SVector::<Real, 2>::new(0.0, 0.0)],
            )
        });
        assert!(result.is_err());
    }

    #[test]
    fn residue_of_simple_pole_matches_the_pole_strength() {
        // f(z) = k / (z - center), residue at `center` is `k`.
        let k = Complex::new(3.0, -1.0);
        let center = Complex::new(0.5, 0.2);
        let f = move |z: &Complex<Real>| k / (*z - center);
        let result = residue(f, center);
        assert_relative_eq!(result.re, k.re, max_relative = 1e-2);
        assert_relative_eq!(result.im, k.im, max_relative = 1e-2);
    }
}
