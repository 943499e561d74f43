//! Tolerance and step-clipping policy for adaptive integrators.

use crate::vector::Vector;
use crate::Real;

/// The tolerance and step-clipping policy used by [`crate::vector`]-typed
/// adaptive integrators (DOPRI5).
///
/// Grounded on the teacher's `AdaptiveRungeKutta { abs_tol, rel_tol,
/// max_step }`, generalized from a single `Real` tolerance to a per-vector
/// `atol`/`rtol` pair (since `y` may be a coupled system where components
/// have different natural scales) and extended with the factor- and
/// step-clamping hooks the spec's PI step control needs.
#[derive(Debug, Clone)]
pub struct StepControl<V: Vector> {
    /// Absolute tolerance, broadcast or per-component.
    pub atol: V,
    /// Relative tolerance, broadcast or per-component.
    pub rtol: V,
}

impl<V: Vector> StepControl<V> {
    /// Builds a step control policy from explicit tolerances.
    pub fn new(atol: V, rtol: V) -> Self {
        crate::ensure!(atol.norm1() >= 0.0, "atol must be non-negative");
        crate::ensure!(rtol.norm1() >= 0.0, "rtol must be non-negative");
        Self { atol, rtol }
    }

    /// Clamps a proposed step-size growth factor after an accepted step.
    ///
    /// Defaults to `clamp(0.1, 5.0)`.
    pub fn clip_fac(&self, fac: Real) -> Real {
        fac.clamp(0.1, 5.0)
    }

    /// Clamps a proposed step-size growth factor after a rejected step.
    ///
    /// Tighter than [`Self::clip_fac`] (`clamp(0.1, 1.0)`): a retry may
    /// shrink the step but never grow it.
    pub fn clip_fac_retry(&self, fac: Real) -> Real {
        fac.clamp(0.1, 1.0)
    }

    /// Caps `|h|` at a minimum-progress floor of `10 * ulp(t)`, preserving
    /// the sign of `h`.
    pub fn clip_step(&self, t: Real, h: Real) -> Real {
        let floor = 10.0 * ulp(t);
        if h.abs() < floor {
            floor.copysign(h)
        } else {
            h
        }
    }
}

impl<V: Vector> Default for StepControl<V> {
    /// `atol = rtol = 1e-16`, broadcast to every component.
    fn default() -> Self {
        Self {
            atol: V::coerce_from_real(1e-16),
            rtol: V::coerce_from_real(1e-16),
        }
    }
}

/// The unit in the last place of `t`: the gap between `t` and the next
/// representable `f64`, approximated as `|t| * f64::EPSILON` (with a
/// subnormal floor at `t == 0`).
fn ulp(t: Real) -> Real {
    if t == 0.0 {
        Real::MIN_POSITIVE
    } else {
        t.abs() * Real::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_tolerances_are_machine_precision() {
        let control: StepControl<Real> = StepControl::default();
        assert_relative_eq!(control.atol, 1e-16);
        assert_relative_eq!(control.rtol, 1e-16);
    }

    #[test]
    fn clip_fac_clamps_growth() {
        let control: StepControl<Real> = StepControl::default();
        assert_relative_eq!(control.clip_fac(100.0), 5.0);
        assert_relative_eq!(control.clip_fac(0.0001), 0.1);
        assert_relative_eq!(control.clip_fac(1.0), 1.0);
    }

    #[test]
    fn clip_fac_retry_never_grows() {
        let control: StepControl<Real> = StepControl::default();
        assert_relative_eq!(control.clip_fac_retry(2.0), 1.0);
    }

    #[test]
    fn clip_step_enforces_minimum_progress() {
        let control: StepControl<Real> = StepControl::default();
        let h = control.clip_step(1.0, 1e-20);
        assert!(h.abs() >= 10.0 * ulp(1.0));
        assert!(h > 0.0);

        let h_neg = control.clip_step(1.0, -1e-20);
        assert!(h_neg < 0.0);
    }

    #[test]
    fn clip_step_leaves_large_steps_alone() {
        let control: StepControl<Real> = StepControl::default();
        assert_relative_eq!(control.clip_step(1.0, 0.5), 0.5);
    }
}
