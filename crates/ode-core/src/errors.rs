//! Precondition checking (adapted from `ql_core::errors`).
//!
//! Numerical failure in this crate is communicated by switching a stream to
//! an infinite NaN-vector stream, never by `Result` (see the crate-level
//! docs). Programmer errors — reading [`crate::stream::bottom`], a negative
//! tolerance, an empty polyline — are not recoverable, so `ensure!` and
//! `fail!` keep the teacher's macro-based precondition-checking shape but
//! panic immediately instead of building an `Err` value.

/// Panics with a formatted message unless `$cond` holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !($cond) {
            panic!($($msg)*)
        }
    };
}

/// Unconditionally panics with a formatted message.
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        panic!($($msg)*)
    };
}
