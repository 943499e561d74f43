//! # ode-core
//!
//! Core types and traits shared by the ODE integrators and function library
//! in `ode-math`: the `Real` type alias, the [`vector::Vector`] algebra
//! trait, the lazy [`stream::Stream`] evaluator, and [`step_control::StepControl`].
//!
//! This crate provides the foundational building blocks the rest of the
//! workspace is built on, the way `ql_core` does for `quantlib-rs`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod errors;
pub mod step_control;
pub mod stream;
pub mod vector;

/// Floating-point type used throughout the library.
pub type Real = f64;

pub use step_control::StepControl;
pub use stream::Stream;
pub use vector::{ScalarField, Vector};
