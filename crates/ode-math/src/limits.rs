//! Limit and convergence helpers: Cauchy-style sequence convergence and
//! improper integration over semi-infinite and doubly-infinite intervals.
//!
//! None of these go through a [`Stream`](ode_core::Stream) — they operate
//! on plain sequences and closures, sitting one layer above the integration
//! façade rather than inside it.

use ode_core::Real;

use crate::facade::{dsolve_simple, integrate_simple};

/// The sequence `{x + x0·e^{-k}}`, `k = 0, 1, 2, ...`, approaching `x` from
/// above (assuming `x0 > 0`).
pub fn lim_inf(x: Real, x0: Real) -> impl Fn(u32) -> Real {
    move |k: u32| x + x0 * (-(k as Real)).exp()
}

/// The sequence `{x - x0·e^{-k}}`, the counterpart of [`lim_inf`]
/// approaching `x` from below.
pub fn lim_sup(x: Real, x0: Real) -> impl Fn(u32) -> Real {
    move |k: u32| x - x0 * (-(k as Real)).exp()
}

/// A sequence tending to `+∞`, anchored at `x0`: `{x0 + 2^{k+1}}`.
pub fn lim_pinfty(x0: Real) -> impl Fn(u32) -> Real {
    move |k: u32| x0 + 2.0_f64.powi(k as i32 + 1)
}

/// A sequence tending to `-∞`, anchored at `x0`: `{x0 - 2^{k+1}}`.
pub fn lim_ninfty(x0: Real) -> impl Fn(u32) -> Real {
    move |k: u32| x0 - 2.0_f64.powi(k as i32 + 1)
}

/// The maximum number of terms [`converge`] samples before giving up and
/// returning its last finite value.
const MAX_TERMS: u32 = 100;

/// The relative tolerance [`converge`] stops at.
const CONVERGE_TOL: Real = 1e-10;

/// The limit of a sequence of successive approximations `s(0), s(1), ...`:
/// scans a finite prefix of at most [`MAX_TERMS`] terms, dropping any NaN
/// terms, and returns the value at which consecutive (non-NaN) terms agree
/// to within [`CONVERGE_TOL`] (relative), or the last finite term if the
/// prefix is exhausted without agreement.
pub fn converge<S>(s: S) -> Real
where
    S: Fn(u32) -> Real,
{
    let mut prev: Option<Real> = None;
    let mut last_finite = Real::NAN;
    for n in 0..MAX_TERMS {
        let next = s(n);
        if next.is_nan() {
            continue;
        }
        if let Some(p) = prev {
            if (next - p).abs() <= CONVERGE_TOL * next.abs().max(1.0) {
                return next;
            }
        }
        last_finite = next;
        prev = Some(next);
    }
    last_finite
}

/// Integrates `g` from `a` outward, sampling the antiderivative stream
/// (anchored at `a`, value `0`) at each term of `lim_seq` and converging
/// the resulting sequence of partial integrals.
pub fn lim_integrate<G, S>(g: G, a: Real, lim_seq: S) -> Real
where
    G: Fn(Real) -> Real + Clone + 'static,
    S: Fn(u32) -> Real,
{
    let f = move |t: Real, _x: &(), _y: &Real| g(t);
    let stream = dsolve_simple(f, a, 0.0);
    converge(move |k: u32| stream.get(lim_seq(k)))
}

/// The doubly-infinite improper integral `∫_{-∞}^{∞} g`, splitting at
/// `neg_anchor` and `pos_anchor` and summing the two tails (via
/// [`lim_integrate`]/[`lim_ninfty`]/[`lim_pinfty`]) plus the core integral
/// between them.
pub fn lim2_integrate<G>(g: G, neg_anchor: Real, pos_anchor: Real) -> Real
where
    G: Fn(Real) -> Real + Clone + 'static,
{
    lim_integrate(g.clone(), neg_anchor, lim_ninfty(neg_anchor))
        + integrate_simple(g.clone(), neg_anchor, pos_anchor)
        + lim_integrate(g, pos_anchor, lim_pinfty(pos_anchor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn converge_stops_once_terms_stabilize() {
        let result = converge(|n: u32| 1.0 - 1.0 / (n as Real + 1.0));
        assert_relative_eq!(result, 1.0, max_relative = 1e-6);
    }

    #[test]
    fn converge_drops_nan_terms() {
        let result = converge(|n: u32| if n == 0 { Real::NAN } else { 1.0 });
        assert_relative_eq!(result, 1.0);
    }

    #[test]
    fn lim_inf_approaches_from_above_and_lim_sup_from_below() {
        let inf = lim_inf(1.0, 1.0);
        let sup = lim_sup(1.0, 1.0);
        assert!(inf(0) > 1.0 && inf(10) > 1.0);
        assert!(sup(0) < 1.0 && sup(10) < 1.0);
        assert_relative_eq!(inf(20), 1.0, epsilon = 1e-8);
        assert_relative_eq!(sup(20), 1.0, epsilon = 1e-8);
    }

    #[test]
    fn lim_integrate_matches_known_gaussian_tail() {
        // ∫_0^∞ e^{-t} dt = 1.
        let result = lim_integrate(|t: Real| (-t).exp(), 0.0, lim_pinfty(0.0));
        assert_relative_eq!(result, 1.0, max_relative = 1e-4);
    }

    #[test]
    fn lim2_integrate_matches_known_gaussian_integral() {
        // ∫_{-∞}^{∞} e^{-t^2} dt = sqrt(pi).
        let result = lim2_integrate(|t: Real| (-t * t).exp(), 0.0, 0.0);
        assert_relative_eq!(result, std::f64::consts::PI.sqrt(), max_relative = 1e-3);
    }
}
