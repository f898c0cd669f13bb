use std::fmt;

use crate::math::precision::{self, FuzzyEq};

/// A width/height pair.
///
/// Negative extents are representable; such a dimension is empty.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Dimension {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum of two dimensions.
    #[must_use]
    pub fn max(a: &Dimension, b: &Dimension) -> Self {
        Self::new(a.width.max(b.width), a.height.max(b.height))
    }

    /// Component-wise minimum of two dimensions.
    #[must_use]
    pub fn min(a: &Dimension, b: &Dimension) -> Self {
        Self::new(a.width.min(b.width), a.height.min(b.height))
    }

    /// Returns `true` if either extent is zero or negative.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns `true` if `other` fits into this dimension.
    #[must_use]
    pub fn contains(&self, other: &Dimension) -> bool {
        precision::greater_or_equal(self.width, other.width)
            && precision::greater_or_equal(self.height, other.height)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn expand(&mut self, dw: f64, dh: f64) {
        self.width += dw;
        self.height += dh;
    }

    #[must_use]
    pub fn expanded(&self, dw: f64, dh: f64) -> Self {
        Self::new(self.width + dw, self.height + dh)
    }

    pub fn shrink(&mut self, dw: f64, dh: f64) {
        self.expand(-dw, -dh);
    }

    #[must_use]
    pub fn shrunk(&self, dw: f64, dh: f64) -> Self {
        self.expanded(-dw, -dh)
    }

    pub fn scale(&mut self, factor: f64) {
        self.scale_xy(factor, factor);
    }

    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        self.scaled_xy(factor, factor)
    }

    pub fn scale_xy(&mut self, width_factor: f64, height_factor: f64) {
        self.width *= width_factor;
        self.height *= height_factor;
    }

    #[must_use]
    pub fn scaled_xy(&self, width_factor: f64, height_factor: f64) -> Self {
        Self::new(self.width * width_factor, self.height * height_factor)
    }

    pub fn negate(&mut self) {
        self.scale(-1.0);
    }

    #[must_use]
    pub fn negated(&self) -> Self {
        self.scaled(-1.0)
    }

    /// Swaps width and height.
    pub fn transpose(&mut self) {
        std::mem::swap(&mut self.width, &mut self.height);
    }

    #[must_use]
    pub fn transposed(&self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Grows this dimension to also cover `other`.
    pub fn union(&mut self, other: &Dimension) {
        *self = self.unioned(other);
    }

    #[must_use]
    pub fn unioned(&self, other: &Dimension) -> Self {
        Self::max(self, other)
    }

    /// Shrinks this dimension to the overlap with `other`.
    pub fn intersect(&mut self, other: &Dimension) {
        *self = self.intersected(other);
    }

    #[must_use]
    pub fn intersected(&self, other: &Dimension) -> Self {
        Self::min(self, other)
    }
}

impl FuzzyEq for Dimension {
    fn fuzzy_eq(&self, other: &Dimension) -> bool {
        precision::equal(self.width, other.width) && precision::equal(self.height, other.height)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dimension({}, {})", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn emptiness() {
        assert!(Dimension::new(0.0, 5.0).is_empty());
        assert!(Dimension::new(5.0, -1.0).is_empty());
        assert!(!Dimension::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn expand_and_shrink() {
        let d = Dimension::new(10.0, 20.0);
        assert_eq!(d.expanded(1.0, 2.0), Dimension::new(11.0, 22.0));
        assert_eq!(d.shrunk(1.0, 2.0), Dimension::new(9.0, 18.0));

        let mut m = d;
        m.expand(5.0, 5.0);
        m.shrink(5.0, 5.0);
        assert!(m.fuzzy_eq(&d));
    }

    #[test]
    fn scale_negate_transpose() {
        let d = Dimension::new(2.0, 3.0);
        assert_eq!(d.scaled(2.0), Dimension::new(4.0, 6.0));
        assert_eq!(d.scaled_xy(0.5, 2.0), Dimension::new(1.0, 6.0));
        assert_eq!(d.negated(), Dimension::new(-2.0, -3.0));
        assert_eq!(d.transposed(), Dimension::new(3.0, 2.0));

        let mut t = d;
        t.transpose();
        assert_eq!(t, d.transposed());
    }

    #[test]
    fn union_and_intersection() {
        let a = Dimension::new(2.0, 8.0);
        let b = Dimension::new(5.0, 3.0);
        assert_eq!(a.unioned(&b), Dimension::new(5.0, 8.0));
        assert_eq!(a.intersected(&b), Dimension::new(2.0, 3.0));

        let mut c = a;
        c.union(&b);
        c.intersect(&Dimension::new(4.0, 4.0));
        assert_eq!(c, Dimension::new(4.0, 4.0));
    }

    #[test]
    fn containment_and_area() {
        let big = Dimension::new(10.0, 10.0);
        assert!(big.contains(&Dimension::new(10.0, 5.0)));
        assert!(!big.contains(&Dimension::new(10.5, 5.0)));
        assert_abs_diff_eq!(Dimension::new(3.0, 4.0).area(), 12.0);
    }
}
