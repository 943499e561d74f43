//! The abstract vector algebra ODE integrators are built on top of.
//!
//! Grounded on `ql_math::array::Array`, which wraps `nalgebra::DVector<Real>`
//! to give QuantLib's `Array` type idiomatic arithmetic. Here the carriers
//! are fixed-size (the dimension of an ODE system is known at compile time)
//! so we implement the trait directly for `Real`, `Complex<Real>`, and
//! `nalgebra::SVector<_, N>` rather than introducing a newtype.

use nalgebra::SVector;
use num_complex::Complex;

use crate::Real;

/// The scalar field `S` a [`Vector`] is built from.
///
/// Implemented for `Real` (the real case) and `Complex<Real>` (the complex
/// case). `abs_scalar` plays the role of both `abs_scalar` and the
/// complex-only `abs_component` from the data model: for a real scalar it is
/// the absolute value, for a complex scalar it is the modulus.
pub trait ScalarField: Copy + std::fmt::Debug + PartialEq + 'static {
    /// The magnitude of this scalar (absolute value, or complex modulus).
    fn abs_scalar(self) -> Real;

    /// Lifts a real number into this scalar field.
    ///
    /// For `Real` this is the identity; for `Complex<Real>` it produces a
    /// purely real complex number. Used to lift a (always-real) integrator
    /// step size into the scalar field before scaling a vector by it.
    fn from_real(x: Real) -> Self;

    /// Returns `true` if this scalar is NaN in any component.
    fn is_nan_scalar(self) -> bool;
}

impl ScalarField for Real {
    fn abs_scalar(self) -> Real {
        self.abs()
    }

    fn from_real(x: Real) -> Self {
        x
    }

    fn is_nan_scalar(self) -> bool {
        self.is_nan()
    }
}

impl ScalarField for Complex<Real> {
    fn abs_scalar(self) -> Real {
        self.norm()
    }

    fn from_real(x: Real) -> Self {
        Complex::new(x, 0.0)
    }

    fn is_nan_scalar(self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }
}

/// The vector algebra required by the ODE integrators.
///
/// Operations are named after §3 of the spec this crate implements:
/// `zero`, `constant` (the data model's `const`), `add`, `sub`, `scale`,
/// `perturb` (the fused `a + h·da`), `hadamard`, `zip_with`, `map`,
/// `linear_combination`, `norm1`, `mean2`, and `coerce_from_real`.
pub trait Vector: Clone + std::fmt::Debug {
    /// The scalar field this vector is built over.
    type Scalar: ScalarField;

    /// The additive identity.
    fn zero() -> Self;

    /// Broadcasts a scalar to every component.
    fn constant(s: Self::Scalar) -> Self;

    /// Component-wise addition.
    fn add(&self, other: &Self) -> Self;

    /// Component-wise subtraction.
    fn sub(&self, other: &Self) -> Self;

    /// Scales every component by `s`.
    fn scale(&self, s: Self::Scalar) -> Self;

    /// Fused `self + h * derivative`, used to advance a state by a single
    /// Euler-style increment without an intermediate allocation.
    fn perturb(&self, derivative: &Self, h: Self::Scalar) -> Self {
        self.add(&derivative.scale(h))
    }

    /// Component-wise (Hadamard) product.
    fn hadamard(&self, other: &Self) -> Self;

    /// Combines two vectors component-wise with an arbitrary scalar operator.
    fn zip_with(&self, other: &Self, op: impl Fn(Self::Scalar, Self::Scalar) -> Self::Scalar)
        -> Self;

    /// Applies a scalar operator to every component.
    fn map(&self, op: impl Fn(Self::Scalar) -> Self::Scalar) -> Self;

    /// Weighted sum `Σ weights[i] * vectors[i]`.
    ///
    /// Panics if `weights` and `vectors` differ in length.
    fn linear_combination(weights: &[Self::Scalar], vectors: &[Self]) -> Self {
        crate::ensure!(
            weights.len() == vectors.len(),
            "linear_combination: {} weights but {} vectors",
            weights.len(),
            vectors.len()
        );
        weights
            .iter()
            .zip(vectors)
            .fold(Self::zero(), |acc, (&w, v)| acc.add(&v.scale(w)))
    }

    /// The sum of the magnitudes of every component (the data model's
    /// `norm1`).
    fn norm1(&self) -> Real;

    /// The root-mean-square of the magnitudes of every component.
    fn mean2(&self) -> Real;

    /// Broadcasts a real scalar into this vector type.
    fn coerce_from_real(x: Real) -> Self;

    /// `true` if any component is NaN.
    fn has_nan(&self) -> bool;

    /// A vector whose every component is NaN.
    ///
    /// Used by the integrators to build the infinite NaN-vector stream that
    /// NaN propagation (§7) switches to.
    fn nan() -> Self;
}

impl Vector for Real {
    type Scalar = Real;

    fn zero() -> Self {
        0.0
    }

    fn constant(s: Self::Scalar) -> Self {
        s
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn scale(&self, s: Self::Scalar) -> Self {
        self * s
    }

    fn hadamard(&self, other: &Self) -> Self {
        self * other
    }

    fn zip_with(&self, other: &Self, op: impl Fn(Real, Real) -> Real) -> Self {
        op(*self, *other)
    }

    fn map(&self, op: impl Fn(Real) -> Real) -> Self {
        op(*self)
    }

    fn norm1(&self) -> Real {
        self.abs()
    }

    fn mean2(&self) -> Real {
        self.abs()
    }

    fn coerce_from_real(x: Real) -> Self {
        x
    }

    fn has_nan(&self) -> bool {
        self.is_nan()
    }

    fn nan() -> Self {
        Real::NAN
    }
}

impl Vector for Complex<Real> {
    type Scalar = Complex<Real>;

    fn zero() -> Self {
        Complex::new(0.0, 0.0)
    }

    fn constant(s: Self::Scalar) -> Self {
        s
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn scale(&self, s: Self::Scalar) -> Self {
        self * s
    }

    fn hadamard(&self, other: &Self) -> Self {
        self * other
    }

    fn zip_with(&self, other: &Self, op: impl Fn(Self::Scalar, Self::Scalar) -> Self::Scalar) -> Self {
        op(*self, *other)
    }

    fn map(&self, op: impl Fn(Self::Scalar) -> Self::Scalar) -> Self {
        op(*self)
    }

    fn norm1(&self) -> Real {
        self.norm()
    }

    fn mean2(&self) -> Real {
        self.norm()
    }

    fn coerce_from_real(x: Real) -> Self {
        Complex::new(x, 0.0)
    }

    fn has_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    fn nan() -> Self {
        Complex::new(Real::NAN, Real::NAN)
    }
}

impl<const N: usize> Vector for SVector<Real, N> {
    type Scalar = Real;

    fn zero() -> Self {
        SVector::zeros()
    }

    fn constant(s: Self::Scalar) -> Self {
        SVector::from_element(s)
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn scale(&self, s: Self::Scalar) -> Self {
        self * s
    }

    fn hadamard(&self, other: &Self) -> Self {
        self.component_mul(other)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(Real, Real) -> Real) -> Self {
        self.zip_map(other, op)
    }

    fn map(&self, op: impl Fn(Real) -> Real) -> Self {
        SVector::map(self, op)
    }

    fn norm1(&self) -> Real {
        self.iter().map(|c| c.abs_scalar()).sum()
    }

    fn mean2(&self) -> Real {
        let sum_sq: Real = self.iter().map(|c| c * c).sum();
        (sum_sq / N as Real).sqrt()
    }

    fn coerce_from_real(x: Real) -> Self {
        SVector::from_element(x)
    }

    fn has_nan(&self) -> bool {
        self.iter().any(|c| c.is_nan())
    }

    fn nan() -> Self {
        SVector::from_element(Real::NAN)
    }
}

impl<const N: usize> Vector for SVector<Complex<Real>, N> {
    type Scalar = Complex<Real>;

    fn zero() -> Self {
        SVector::from_element(Complex::new(0.0, 0.0))
    }

    fn constant(s: Self::Scalar) -> Self {
        SVector::from_element(s)
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn scale(&self, s: Self::Scalar) -> Self {
        self * s
    }

    fn hadamard(&self, other: &Self) -> Self {
        self.component_mul(other)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(Self::Scalar, Self::Scalar) -> Self::Scalar) -> Self {
        self.zip_map(other, op)
    }

    fn map(&self, op: impl Fn(Self::Scalar) -> Self::Scalar) -> Self {
        SVector::map(self, op)
    }

    fn norm1(&self) -> Real {
        self.iter().map(|c| c.abs_scalar()).sum()
    }

    fn mean2(&self) -> Real {
        let sum_sq: Real = self.iter().map(|c| c.abs_scalar() * c.abs_scalar()).sum();
        (sum_sq / N as Real).sqrt()
    }

    fn coerce_from_real(x: Real) -> Self {
        SVector::from_element(Complex::new(x, 0.0))
    }

    fn has_nan(&self) -> bool {
        self.iter().any(|c| c.is_nan_scalar())
    }

    fn nan() -> Self {
        SVector::from_element(Complex::new(Real::NAN, Real::NAN))
    }
}

/// A paired state `(A, B)` over a shared scalar field.
///
/// Lets a caller couple two carriers into one without introducing an
/// ad-hoc product type (per the "coupled ODE systems" design note): the
/// integration façade's `path_integral` uses this to drive a running
/// integral `y` and a path position `u` through the same integrator as a
/// single vector `(y, u)`.
impl<S, A, B> Vector for (A, B)
where
    S: ScalarField,
    A: Vector<Scalar = S>,
    B: Vector<Scalar = S>,
{
    type Scalar = S;

    fn zero() -> Self {
        (A::zero(), B::zero())
    }

    fn constant(s: Self::Scalar) -> Self {
        (A::constant(s), B::constant(s))
    }

    fn add(&self, other: &Self) -> Self {
        (self.0.add(&other.0), self.1.add(&other.1))
    }

    fn sub(&self, other: &Self) -> Self {
        (self.0.sub(&other.0), self.1.sub(&other.1))
    }

    fn scale(&self, s: Self::Scalar) -> Self {
        (self.0.scale(s), self.1.scale(s))
    }

    fn hadamard(&self, other: &Self) -> Self {
        (self.0.hadamard(&other.0), self.1.hadamard(&other.1))
    }

    fn zip_with(&self, other: &Self, op: impl Fn(S, S) -> S) -> Self {
        (self.0.zip_with(&other.0, &op), self.1.zip_with(&other.1, &op))
    }

    fn map(&self, op: impl Fn(S) -> S) -> Self {
        (self.0.map(&op), self.1.map(&op))
    }

    fn norm1(&self) -> Real {
        self.0.norm1() + self.1.norm1()
    }

    fn mean2(&self) -> Real {
        let a = self.0.mean2();
        let b = self.1.mean2();
        ((a * a + b * b) / 2.0).sqrt()
    }

    fn coerce_from_real(x: Real) -> Self {
        (A::coerce_from_real(x), B::coerce_from_real(x))
    }

    fn has_nan(&self) -> bool {
        self.0.has_nan() || self.1.has_nan()
    }

    fn nan() -> Self {
        (A::nan(), B::nan())
    }
}
