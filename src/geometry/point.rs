use std::fmt;
use std::ops::{Add, Sub};

use crate::math::precision::{self, FuzzyEq};
use crate::math::Point2;
use crate::transform::AffineTransform;

use super::{Rectangle, Vector};

/// A location in the plane.
///
/// Every in-place operation (`translate`, `scale`, ...) has a pure
/// counterpart (`translated`, `scaled`, ...) that returns a new point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Moves this point by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Returns this point moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Moves this point by `v`.
    pub fn translate_by(&mut self, v: Vector) {
        self.translate(v.x, v.y);
    }

    /// Returns this point moved by `v`.
    #[must_use]
    pub fn translated_by(&self, v: Vector) -> Self {
        self.translated(v.x, v.y)
    }

    /// Scales both coordinates by `factor` (relative to the origin).
    pub fn scale(&mut self, factor: f64) {
        self.scale_xy(factor, factor);
    }

    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        self.scaled_xy(factor, factor)
    }

    pub fn scale_xy(&mut self, fx: f64, fy: f64) {
        self.x *= fx;
        self.y *= fy;
    }

    #[must_use]
    pub fn scaled_xy(&self, fx: f64, fy: f64) -> Self {
        Self::new(self.x * fx, self.y * fy)
    }

    pub fn negate(&mut self) {
        self.scale(-1.0);
    }

    #[must_use]
    pub fn negated(&self) -> Self {
        self.scaled(-1.0)
    }

    /// Applies `t` to this point.
    pub fn transform(&mut self, t: &AffineTransform) {
        *self = t.transform_point(self);
    }

    #[must_use]
    pub fn transformed(&self, t: &AffineTransform) -> Self {
        t.transform_point(self)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        (*other - *self).length()
    }

    /// Returns the position vector of this point.
    #[must_use]
    pub fn to_vector(&self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(&self, other: &Point) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(&self, other: &Point) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Linear interpolation between `self` (at `t = 0`) and `other` (at `t = 1`).
    #[must_use]
    pub fn lerp(&self, other: &Point, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Arithmetic mean of `points`, or `None` if the slice is empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(points: &[Point]) -> Option<Point> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    /// Smallest axis-aligned rectangle containing all `points`.
    #[must_use]
    pub fn bounds(points: &[Point]) -> Option<Rectangle> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Rectangle::from_points(&min, &max))
    }
}

impl FuzzyEq for Point {
    fn fuzzy_eq(&self, other: &Point) -> bool {
        precision::equal(self.x, other.x) && precision::equal(self.y, other.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        self.translated(rhs.x, rhs.y)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        self.translated(-rhs.x, -rhs.y)
    }
}

impl Sub<Point> for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<Point2> for Point {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point> for Point2 {
    fn from(p: Point) -> Self {
        Point2::new(p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::precision::PRECISION_FRACTION;
    use approx::assert_abs_diff_eq;

    #[test]
    fn translate_in_place_and_pure() {
        let mut p = Point::new(1.0, 2.0);
        let q = p.translated(3.0, -1.0);
        assert_eq!(p, Point::new(1.0, 2.0));
        assert_eq!(q, Point::new(4.0, 1.0));

        p.translate(3.0, -1.0);
        assert_eq!(p, q);
    }

    #[test]
    fn translate_by_vector() {
        let mut p = Point::new(1.0, 1.0);
        p.translate_by(Vector::new(-1.0, 2.0));
        assert!(p.fuzzy_eq(&Point::new(0.0, 3.0)));
        assert!((Point::new(1.0, 1.0) + Vector::new(-1.0, 2.0)).fuzzy_eq(&p));
    }

    #[test]
    fn scale_and_negate() {
        let p = Point::new(2.0, -3.0);
        assert_eq!(p.scaled(2.0), Point::new(4.0, -6.0));
        assert_eq!(p.scaled_xy(0.5, 2.0), Point::new(1.0, -6.0));
        assert_eq!(p.negated(), Point::new(-2.0, 3.0));

        let mut m = p;
        m.negate();
        assert_eq!(m, p.negated());
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_abs_diff_eq!(a.distance(&b), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.distance(&a), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn sub_points_gives_vector() {
        let v = Point::new(5.0, 1.0) - Point::new(2.0, 3.0);
        assert!(v.fuzzy_eq(&Vector::new(3.0, -2.0)));
    }

    #[test]
    fn translation_below_precision_is_still_equal() {
        let p = Point::new(34.3435, 56.458945);
        let q = p.translated(PRECISION_FRACTION / 10.0, -PRECISION_FRACTION / 10.0);
        assert!(p.fuzzy_eq(&q));
        assert!(q.fuzzy_eq(&p));

        let far = p.translated(PRECISION_FRACTION * 1000.0, 0.0);
        assert!(p.fuzzy_ne(&far));
    }

    #[test]
    fn centroid_and_bounds() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(0.0, 2.0),
        ];
        let c = Point::centroid(&pts).unwrap();
        assert!(c.fuzzy_eq(&Point::new(2.0, 1.0)));

        let b = Point::bounds(&pts).unwrap();
        assert!(b.fuzzy_eq(&Rectangle::new(0.0, 0.0, 4.0, 2.0)));

        assert!(Point::centroid(&[]).is_none());
        assert!(Point::bounds(&[]).is_none());
    }

    #[test]
    fn nalgebra_round_trip() {
        let p = Point::new(1.5, -2.5);
        let n: Point2 = p.into();
        assert_eq!(Point::from(n), p);
    }
}
