//! # ode-math
//!
//! Three ODE integrators (fixed-step Euler, classical RK4, adaptive
//! Dormand–Prince 5(4) with PI step control), an integration façade built
//! on top of them (`dsolve`, `integrate`, `path_integral`, contour
//! residues), a small family of limit/convergence helpers for improper
//! integrals, and a catalogue of elementary and special functions, each
//! expressed as an ODE recipe over [`ode_core`]'s lazy query stream.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod facade;
pub mod functions;
pub mod integrators;
pub mod limits;

pub use facade::{
    dsolve, dsolve_simple, integrate, integrate_simple, line_integral, lines_integral,
    path_integral, poly_integral, residue, residue_circ, residue_square, simple_integrator,
};
pub use integrators::{dopri5, dopri5h, euler, rk4, Integrand};
pub use limits::{converge, lim2_integrate, lim_inf, lim_integrate, lim_ninfty, lim_pinfty, lim_sup};
