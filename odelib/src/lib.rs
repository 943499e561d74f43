//! # odelib
//!
//! A library of lazily-evaluated ODE integrators and the mathematical
//! functions built from them.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than `ode-core`/`ode-math` directly.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! odelib = "0.1"
//! ```
//!
//! ```rust
//! use odelib::math::dsolve_simple;
//!
//! let growth = dsolve_simple(|_t: f64, _x: &(), y: &f64| *y, 0.0, 1.0);
//! assert!((growth.get(1.0) - std::f64::consts::E).abs() < 1e-8);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// The lazy query stream, the abstract vector algebra, and step-size
/// control policy the integrators are built on.
pub use ode_core as core;

/// The integrators, the integration façade, limit/convergence helpers, and
/// the ODE-recipe function library.
pub use ode_math as math;

pub use ode_core::{Real, ScalarField, StepControl, Stream, Vector};
pub use ode_math::functions;
pub use ode_math::{
    converge, dopri5, dopri5h, dsolve, dsolve_simple, euler, integrate, integrate_simple,
    lim2_integrate, lim_inf, lim_integrate, lim_ninfty, lim_pinfty, lim_sup, line_integral,
    lines_integral, path_integral, poly_integral, residue, residue_circ, residue_square, rk4,
    simple_integrator, Integrand,
};
