//! The second polygamma function `ψ''(x)`, via its standard integral
//! representation.
//!
//! `ψ^{(n)}(x) = (-1)^{n+1} ∫_0^∞ t^n e^{-xt} / (1 - e^{-t}) dt`. Substituting
//! `t = e^u` (so `dt = t du`) turns the one-sided `(0, ∞)` integral into a
//! genuinely two-sided `(-∞, ∞)` integral in `u`, whose kernel vanishes at
//! both tails — the case [`crate::limits::lim2_integrate`] is for.

use ode_core::Real;

use crate::limits::lim2_integrate;

/// `ψ''(x)`, `x > 0`.
pub fn polygamma2(x: Real) -> Real {
    let kernel = move |u: Real| {
        let t = u.exp();
        let denom = 1.0 - (-t).exp();
        if denom <= 0.0 {
            0.0
        } else {
            t.powi(3) * (-x * t).exp() / denom
        }
    };
    -lim2_integrate(kernel, 0.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn polygamma2_at_one_matches_minus_twice_apery() {
        // psi''(1) = -2 * zeta(3).
        let apery = 1.202_056_903_159_594_3;
        assert_relative_eq!(polygamma2(1.0), -2.0 * apery, max_relative = 1e-3);
    }

    #[test]
    fn polygamma2_is_negative_and_increasing_toward_zero() {
        assert!(polygamma2(1.0) < 0.0);
        assert!(polygamma2(5.0) > polygamma2(1.0));
    }
}
