//! Adaptive Dormand–Prince 5(4) integrator with PI step-size control.
//!
//! Grounded directly on the teacher's `AdaptiveRungeKutta::dormand_prince_step`
//! (`ql_math::ode::mod`), which already carries the Butcher tableau this
//! module uses; the stage structure and tableau constants below are taken
//! from it verbatim. What changes: state is threaded through a [`Stream`]
//! rather than a loop-local `(t, y, h)` triple, the vector type is the
//! abstract [`Vector`] rather than `Vec<Real>`, and step-size control goes
//! through [`StepControl`]'s PI factor clamps rather than the teacher's
//! fixed `0.9 * err.powf(-0.2)` / `0.9 * err.powf(-0.25)` constants.

use ode_core::{Real, ScalarField, Stream, StepControl, Vector};

use super::rk4::rk4_single_step;
use super::{nan_stream, Integrand};

/// Rejections allowed for a single step before the integrator declares
/// divergence and switches to the NaN-stream (§5: "a safe budget: at most
/// 100 rejections per step").
const MAX_REJECTIONS: u32 = 100;

/// Fifth-order solution weights `b_i` (stage 2's weight is `0`, omitted
/// below by simply never using `k2` in the `y7`/`dy7` combinations).
const B1: Real = 35.0 / 384.0;
const B3: Real = 500.0 / 1113.0;
const B4: Real = 125.0 / 192.0;
const B5: Real = -2187.0 / 6784.0;
const B6: Real = 11.0 / 84.0;

/// Error weights (5th order minus the embedded 4th order), matching the
/// teacher's `err = h*(71/57600*k1 - 71/16695*k3 + 71/1920*k4 -
/// 17253/339200*k5 + 22/525*k6 - 1/40*k7)`.
const E1: Real = 71.0 / 57600.0;
const E3: Real = -71.0 / 16695.0;
const E4: Real = 71.0 / 1920.0;
const E5: Real = -17253.0 / 339200.0;
const E6: Real = 22.0 / 525.0;
const E7: Real = -1.0 / 40.0;

struct Stage<V> {
    y7: V,
    dy7: V,
}

/// The seven-stage Dormand–Prince evaluation over `[t1, t1 + h]`. Returns
/// the fifth-order solution, the embedded error vector, and the `x_stream`
/// advanced to `t1 + h`.
fn dormand_prince_step<F, X, V>(
    h: Real,
    f: &F,
    t1: Real,
    x_stream: &Stream<Real, X>,
    y1: &V,
) -> (Stage<V>, Stream<Real, X>)
where
    F: Integrand<X, V>,
    V: Vector,
{
    let one = V::Scalar::from_real(1.0);
    let hs = |c: Real| V::Scalar::from_real(h * c);

    let x0 = x_stream.head();
    let k1 = f.eval(t1, &x0, y1);

    let (x2, tail2) = x_stream.query(t1 + h / 5.0);
    let y2 = y1.perturb(&k1, hs(1.0 / 5.0));
    let k2 = f.eval(t1 + h / 5.0, &x2, &y2);

    let (x3, tail3) = tail2.query(t1 + 3.0 * h / 10.0);
    let y3 = V::linear_combination(
        &[one, hs(3.0 / 40.0), hs(9.0 / 40.0)],
        &[y1.clone(), k1.clone(), k2.clone()],
    );
    let k3 = f.eval(t1 + 3.0 * h / 10.0, &x3, &y3);

    let (x4, tail4) = tail3.query(t1 + 4.0 * h / 5.0);
    let y4 = V::linear_combination(
        &[one, hs(44.0 / 45.0), hs(-56.0 / 15.0), hs(32.0 / 9.0)],
        &[y1.clone(), k1.clone(), k2.clone(), k3.clone()],
    );
    let k4 = f.eval(t1 + 4.0 * h / 5.0, &x4, &y4);

    let (x5, tail5) = tail4.query(t1 + 8.0 * h / 9.0);
    let y5 = V::linear_combination(
        &[
            one,
            hs(19372.0 / 6561.0),
            hs(-25360.0 / 2187.0),
            hs(64448.0 / 6561.0),
            hs(-212.0 / 729.0),
        ],
        &[y1.clone(), k1.clone(), k2.clone(), k3.clone(), k4.clone()],
    );
    let k5 = f.eval(t1 + 8.0 * h / 9.0, &x5, &y5);

    let (x6, tail6) = tail5.query(t1 + h);
    let y6 = V::linear_combination(
        &[
            one,
            hs(9017.0 / 3168.0),
            hs(-355.0 / 33.0),
            hs(46732.0 / 5247.0),
            hs(49.0 / 176.0),
            hs(-5103.0 / 18656.0),
        ],
        &[
            y1.clone(),
            k1.clone(),
            k2.clone(),
            k3.clone(),
            k4.clone(),
            k5.clone(),
        ],
    );
    let k6 = f.eval(t1 + h, &x6, &y6);

    let x7_stream = tail6.seek(t1 + h);
    let x7 = x7_stream.head();

    let y7 = V::linear_combination(
        &[one, hs(B1), hs(B3), hs(B4), hs(B5), hs(B6)],
        &[
            y1.clone(),
            k1.clone(),
            k3.clone(),
            k4.clone(),
            k5.clone(),
            k6.clone(),
        ],
    );
    let k7 = f.eval(t1 + h, &x7, &y7);

    let dy7 = V::linear_combination(
        &[hs(E1), hs(E3), hs(E4), hs(E5), hs(E6), hs(E7)],
        &[k1, k3, k4, k5, k6, k7],
    );

    (Stage { y7, dy7 }, x7_stream)
}

/// The weighted error norm ("rknorm" in the teacher's naming): the RMS of
/// `dy7 / sc`, where `sc = atol + rtol * max(|y1|, |y7|)` componentwise.
fn rknorm<V: Vector>(control: &StepControl<V>, y1: &V, y7: &V, dy7: &V) -> Real {
    let max_magnitude = y1.zip_with(y7, |a, b| {
        V::Scalar::from_real(a.abs_scalar().max(b.abs_scalar()))
    });
    let sc = control.atol.add(&control.rtol.hadamard(&max_magnitude));
    let ratio = dy7.zip_with(&sc, |d, s| V::Scalar::from_real(d.abs_scalar() / s.abs_scalar()));
    ratio.mean2()
}

struct StepOutcome<X, V> {
    h_next: Real,
    t_next: Real,
    x_next: Stream<Real, X>,
    y_next: V,
}

fn diverged<X: 'static, V: Vector + 'static>() -> StepOutcome<X, V> {
    StepOutcome {
        h_next: Real::NAN,
        t_next: Real::NAN,
        // Never read: the next `dopri5h_query` call sees `dt.is_nan()` and
        // short-circuits to the NaN-vector stream before touching `x_next`.
        x_next: ode_core::stream::bottom(),
        y_next: V::nan(),
    }
}

/// A single accept/reject DOPRI5 step, with up to [`MAX_REJECTIONS`]
/// retries. The first rejection's step shrink uses `clip_fac`; later
/// retries in the same step use the tighter, monotone-shrinking
/// `clip_fac_retry`, matching §4.4's "subsequent retries ... use
/// `clip_fac_retry`".
fn dopri5_step<F, X, V>(
    control: &StepControl<V>,
    h0: Real,
    t1: Real,
    x_stream: &Stream<Real, X>,
    y1: &V,
    f: &F,
) -> StepOutcome<X, V>
where
    F: Integrand<X, V>,
    X: 'static,
    V: Vector + 'static,
{
    let mut h = control.clip_step(t1, h0);

    for retry in 0..MAX_REJECTIONS {
        let (stage, x_next) = dormand_prince_step(h, f, t1, x_stream, y1);
        let err = rknorm(control, y1, &stage.y7, &stage.dy7);

        if err.is_nan() {
            return diverged();
        }

        let fac = (0.38 / err).powf(0.2);

        if err <= 1.0 {
            return StepOutcome {
                h_next: h * control.clip_fac(fac),
                t_next: t1 + h,
                x_next,
                y_next: stage.y7,
            };
        }

        let clipped = if retry == 0 {
            control.clip_fac(fac)
        } else {
            control.clip_fac_retry(fac)
        };
        h = control.clip_step(t1, h * clipped);
    }

    diverged()
}

/// The Hairer/Nørsett/Wanner II.4 initial-step heuristic: returns a step
/// magnitude (the caller applies the sign of the integration direction).
fn initial_step<F, X, V>(f: &F, t0: Real, x_stream: &Stream<Real, X>, y0: &V) -> Real
where
    F: Integrand<X, V>,
    V: Vector,
{
    let x0 = x_stream.head();
    let d0 = y0.norm1();
    let f0 = f.eval(t0, &x0, y0);
    let d1 = f0.norm1();

    let h0 = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    };

    let y1 = y0.perturb(&f0, V::Scalar::from_real(h0));
    let x1 = x_stream.get(t0 + h0);
    let f1 = f.eval(t0 + h0, &x1, &y1);
    let d2 = f1.sub(&f0).norm1() / h0;

    let h1 = if d1.max(d2) <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(0.2).max(1e-6)
    };

    (100.0 * h0).min(h1)
}

/// Constructs a DOPRI5 integrator anchored at `(t0, y0)`, sizing its own
/// initial step via [`initial_step`].
pub fn dopri5<F, X, V>(
    control: StepControl<V>,
    f: F,
    t0: Real,
    x_stream: Stream<Real, X>,
    y0: V,
) -> Stream<Real, V>
where
    F: Integrand<X, V> + Clone + 'static,
    X: 'static,
    V: Vector + 'static,
{
    let h0 = initial_step(&f, t0, &x_stream, &y0);
    dopri5h(control, h0, f, t0, x_stream, y0)
}

/// DOPRI5 with an explicit starting step magnitude `h`.
///
/// Implements the `dopri5h` driver of §4.4: a query either lands inside
/// the current step's minimum-progress floor (answered by a one-shot RK4
/// extrapolation without advancing), lands exactly on an accepted step, or
/// overshoots it (answered by an RK4 extrapolation at the target, with the
/// successor left anchored at the *pre-step* state — the load-bearing
/// overshoot policy that keeps a later, larger query from losing a step it
/// will still need).
pub fn dopri5h<F, X, V>(
    control: StepControl<V>,
    h: Real,
    f: F,
    t: Real,
    x_stream: Stream<Real, X>,
    y: V,
) -> Stream<Real, V>
where
    F: Integrand<X, V> + Clone + 'static,
    X: 'static,
    V: Vector + 'static,
{
    Stream::from_value(y.clone(), move |t_target: Real| {
        dopri5h_query(control.clone(), h, f.clone(), t, x_stream.clone(), y.clone(), t_target)
    })
}

fn dopri5h_query<F, X, V>(
    control: StepControl<V>,
    h: Real,
    f: F,
    t: Real,
    x_stream: Stream<Real, X>,
    y: V,
    t_target: Real,
) -> Stream<Real, V>
where
    F: Integrand<X, V> + Clone + 'static,
    X: 'static,
    V: Vector + 'static,
{
    let dt = t_target - t;
    let hmin = control.clip_step(t, dt);

    if dt.is_nan() || hmin.is_nan() || y.norm1().is_nan() {
        return nan_stream();
    }

    if dt.abs() < hmin.abs() {
        let (y_prime, _) = rk4_single_step(&f, t, &x_stream, &y, dt);
        return Stream::from_value(y_prime, move |t2: Real| {
            dopri5h_query(control.clone(), h, f.clone(), t, x_stream.clone(), y.clone(), t2)
        });
    }

    let h_dir = dt.signum() * h.abs().min(dt.abs());
    let outcome = dopri5_step(&control, h_dir, t, &x_stream, &y, &f);
    let direction = dt.signum();
    let progress = direction * (outcome.t_next - t_target);

    if progress == 0.0 {
        Stream::from_value(outcome.y_next.clone(), move |t2: Real| {
            dopri5h_query(
                control.clone(),
                outcome.h_next,
                f.clone(),
                outcome.t_next,
                outcome.x_next.clone(),
                outcome.y_next.clone(),
                t2,
            )
        })
    } else if progress > 0.0 {
        let (y_prime, _) = rk4_single_step(&f, t, &x_stream, &y, t_target - t);
        Stream::from_value(y_prime, move |t2: Real| {
            dopri5h_query(control.clone(), h, f.clone(), t, x_stream.clone(), y.clone(), t2)
        })
    } else {
        dopri5h_query(
            control,
            outcome.h_next,
            f,
            outcome.t_next,
            outcome.x_next,
            outcome.y_next,
            t_target,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ode_core::stream::const_stream;

    fn default_control() -> StepControl<Real> {
        StepControl::default()
    }

    #[test]
    fn identity_at_anchor() {
        let s = dopri5(
            default_control(),
            |_t: Real, _x: &(), y: &Real| *y,
            0.0,
            const_stream::<Real, ()>(()),
            1.0,
        );
        assert_relative_eq!(s.head(), 1.0);
    }

    #[test]
    fn exponential_growth_matches_e() {
        let s = dopri5(
            default_control(),
            |_t: Real, _x: &(), y: &Real| *y,
            0.0,
            const_stream::<Real, ()>(()),
            1.0,
        );
        assert_relative_eq!(s.get(1.0), std::f64::consts::E, max_relative = 1e-9);
    }

    #[test]
    fn sine_cosine_system_matches_closed_form() {
        use nalgebra::SVector;
        type V2 = SVector<Real, 2>;
        let f = |_t: Real, _x: &(), y: &V2| V2::new(y.y, -y.x);
        let s = dopri5(StepControl::default(), f, 0.0, const_stream::<Real, ()>(()), V2::new(0.0, 1.0));
        let y = s.get(std::f64::consts::PI);
        assert_relative_eq!(y.x, 0.0, epsilon = 1e-8);
        assert_relative_eq!(y.y, -1.0, max_relative = 1e-8);
    }

    #[test]
    fn two_smaller_queries_agree_with_one_larger_query() {
        let f = |_t: Real, _x: &(), y: &Real| *y;
        let a = dopri5(default_control(), f, 0.0, const_stream::<Real, ()>(()), 1.0);
        let via_midpoint = a.get(2.0);
        let direct = {
            let (_, mid) = a.query(1.0);
            mid.get(2.0)
        };
        assert_relative_eq!(via_midpoint, direct, max_relative = 1e-4);
    }

    #[test]
    fn overshoot_query_does_not_disturb_the_original_stream() {
        let f = |_t: Real, _x: &(), y: &Real| *y;
        let s = dopri5(default_control(), f, 0.0, const_stream::<Real, ()>(()), 1.0);
        let near = s.get(1e-8);
        let far = s.get(1.0);
        assert_relative_eq!(near, (1e-8_f64).exp(), max_relative = 1e-3);
        assert_relative_eq!(far, std::f64::consts::E, max_relative = 1e-9);
    }

    #[test]
    fn nan_initial_value_propagates_forever() {
        let s = dopri5(
            default_control(),
            |_t: Real, _x: &(), y: &Real| *y,
            0.0,
            const_stream::<Real, ()>(()),
            Real::NAN,
        );
        assert!(s.get(1.0).is_nan());
    }

    #[test]
    fn backward_integration_matches_forward() {
        let f = |_t: Real, _x: &(), y: &Real| *y;
        let s = dopri5(default_control(), f, 1.0, const_stream::<Real, ()>(()), std::f64::consts::E);
        assert_relative_eq!(s.get(0.0), 1.0, max_relative = 1e-9);
    }
}
