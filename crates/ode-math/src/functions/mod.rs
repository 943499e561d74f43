//! The mathematical function library: a catalogue of elementary and
//! special functions, each expressed as an ODE recipe and exposed as a
//! [`ode_core::Stream`] (or, where the source integral representation
//! demands an explicit evaluation point, a plain function).
//!
//! Every recipe here is built from [`crate::facade::dsolve`]/
//! [`crate::facade::dsolve_simple`] plus the stream combinators
//! (`map`, `premap`) rather than calling into `f64`'s transcendental
//! functions directly — the catalogue is meant to demonstrate that the
//! integrator itself is sufficient to produce these values.

pub mod airy;
pub mod bessel;
pub mod elementary;
pub mod elliptic;
pub mod erf;
pub mod exponential_integrals;
pub mod polygamma;
pub mod trig;

pub use airy::{airy_ai, airy_bi};
pub use bessel::{bessel, bessel_j2, bessel_y2};
pub use elementary::{exp, log, sqrt};
pub use elliptic::{elliptic_c, elliptic_e, elliptic_k};
pub use erf::{erf, erfc, erfs};
pub use exponential_integrals::{chin, cin, ein, si, sinc};
pub use polygamma::polygamma2;
pub use trig::{atan, cos, cosh, sin, sin_cos, sinh, sinh_cosh};
