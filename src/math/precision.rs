//! Fuzzy floating-point comparison.
//!
//! All equality and ordering decisions of the geometry core go through these
//! predicates. Two values are considered equal when they differ by at most
//! [`tolerance`], which is relative to the larger magnitude of the operands
//! and never drops below an absolute floor of [`PRECISION_FRACTION`].
//!
//! The `*_with_shift` variants loosen (positive shift) or tighten (negative
//! shift) the tolerance by whole decimal digits.

/// Number of significant decimal digits respected by the comparisons.
pub const DEFAULT_PRECISION: i32 = 6;

/// The comparison fraction for a shift of zero, `10^-DEFAULT_PRECISION`.
pub const PRECISION_FRACTION: f64 = 1e-6;

/// Returns `10^-(DEFAULT_PRECISION - shift)`.
#[must_use]
pub fn fraction(shift: i32) -> f64 {
    10f64.powi(shift - DEFAULT_PRECISION)
}

/// Returns the tolerance used to compare `a` and `b`.
#[must_use]
pub fn tolerance(a: f64, b: f64) -> f64 {
    tolerance_with_shift(a, b, 0)
}

/// Returns the tolerance used to compare `a` and `b`, shifted by `shift` digits.
#[must_use]
pub fn tolerance_with_shift(a: f64, b: f64, shift: i32) -> f64 {
    fraction(shift) * a.abs().max(b.abs()).max(1.0)
}

/// Returns the tolerance appropriate for coordinates of magnitude `extent`.
#[must_use]
pub fn tolerance_for(extent: f64) -> f64 {
    tolerance(extent, 0.0)
}

/// Returns `true` if `a` and `b` differ by at most [`tolerance`].
#[must_use]
pub fn equal(a: f64, b: f64) -> bool {
    equal_with_shift(a, b, 0)
}

/// [`equal`] with the tolerance shifted by `shift` digits.
#[must_use]
pub fn equal_with_shift(a: f64, b: f64, shift: i32) -> bool {
    (a - b).abs() <= tolerance_with_shift(a, b, shift)
}

/// Returns `true` if `a` is less than `b` or equal within precision.
#[must_use]
pub fn smaller_or_equal(a: f64, b: f64) -> bool {
    smaller_or_equal_with_shift(a, b, 0)
}

/// [`smaller_or_equal`] with the tolerance shifted by `shift` digits.
#[must_use]
pub fn smaller_or_equal_with_shift(a: f64, b: f64, shift: i32) -> bool {
    a <= b + tolerance_with_shift(a, b, shift)
}

/// Returns `true` if `a` is greater than `b` or equal within precision.
#[must_use]
pub fn greater_or_equal(a: f64, b: f64) -> bool {
    greater_or_equal_with_shift(a, b, 0)
}

/// [`greater_or_equal`] with the tolerance shifted by `shift` digits.
#[must_use]
pub fn greater_or_equal_with_shift(a: f64, b: f64, shift: i32) -> bool {
    a + tolerance_with_shift(a, b, shift) >= b
}

/// Returns `true` if `a` is less than `b` by more than the tolerance.
#[must_use]
pub fn smaller_than(a: f64, b: f64) -> bool {
    smaller_than_with_shift(a, b, 0)
}

/// [`smaller_than`] with the tolerance shifted by `shift` digits.
#[must_use]
pub fn smaller_than_with_shift(a: f64, b: f64, shift: i32) -> bool {
    a + tolerance_with_shift(a, b, shift) < b
}

/// Returns `true` if `a` exceeds `b` by more than the tolerance.
#[must_use]
pub fn greater_than(a: f64, b: f64) -> bool {
    greater_than_with_shift(a, b, 0)
}

/// [`greater_than`] with the tolerance shifted by `shift` digits.
#[must_use]
pub fn greater_than_with_shift(a: f64, b: f64, shift: i32) -> bool {
    a > b + tolerance_with_shift(a, b, shift)
}

/// Tolerance-based equality for geometric values.
///
/// Fuzzy equality is not transitive, so types implementing this trait never
/// implement `Hash` or `Eq` and must not be used as keys of hashed or ordered
/// collections.
pub trait FuzzyEq<Rhs: ?Sized = Self> {
    /// Returns `true` if `self` and `other` are equal within the precision
    /// tolerance.
    fn fuzzy_eq(&self, other: &Rhs) -> bool;

    /// Negation of [`FuzzyEq::fuzzy_eq`].
    fn fuzzy_ne(&self, other: &Rhs) -> bool {
        !self.fuzzy_eq(other)
    }
}

impl FuzzyEq for f64 {
    fn fuzzy_eq(&self, other: &f64) -> bool {
        equal(*self, *other)
    }
}

impl<T: FuzzyEq> FuzzyEq for [T] {
    fn fuzzy_eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.fuzzy_eq(b))
    }
}
