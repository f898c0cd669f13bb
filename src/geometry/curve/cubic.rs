use crate::error::Result;
use crate::math::precision::FuzzyEq;
use crate::transform::AffineTransform;

use super::{BezierCurve, Curve, CurveDomain, Point, Rectangle, Vector};

/// A cubic Bézier curve with exactly four control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCurve {
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
}

impl CubicCurve {
    /// Creates a cubic from its start point, two handles, and end point.
    #[must_use]
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    #[must_use]
    pub fn p0(&self) -> Point {
        self.p0
    }

    #[must_use]
    pub fn p1(&self) -> Point {
        self.p1
    }

    #[must_use]
    pub fn p2(&self) -> Point {
        self.p2
    }

    #[must_use]
    pub fn p3(&self) -> Point {
        self.p3
    }

    #[must_use]
    pub fn points(&self) -> [Point; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Splits at `t` into two cubics.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is outside `[0, 1]`.
    pub fn split(&self, t: f64) -> Result<(Self, Self)> {
        let t = self.domain().clamp(t)?;
        let p01 = self.p0.lerp(&self.p1, t);
        let p12 = self.p1.lerp(&self.p2, t);
        let p23 = self.p2.lerp(&self.p3, t);
        let p012 = p01.lerp(&p12, t);
        let p123 = p12.lerp(&p23, t);
        let p = p012.lerp(&p123, t);
        Ok((
            Self::new(self.p0, p01, p012, p),
            Self::new(p, p123, p23, self.p3),
        ))
    }

    #[must_use]
    pub fn to_bezier_curve(&self) -> BezierCurve {
        BezierCurve::cubic(self.p0, self.p1, self.p2, self.p3)
    }

    #[must_use]
    pub fn transformed(&self, t: &AffineTransform) -> Self {
        let [p0, p1, p2, p3] = self.points().map(|p| t.transform_point(&p));
        Self::new(p0, p1, p2, p3)
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.p3, self.p2, self.p1, self.p0)
    }

    /// Intersection points with any other curve.
    #[must_use]
    pub fn intersections<C: Curve + ?Sized>(&self, other: &C) -> Vec<Point> {
        super::curve_intersections(self, other)
    }
}

impl Curve for CubicCurve {
    fn point_at(&self, t: f64) -> Result<Point> {
        let t = self.domain().clamp(t)?;
        Ok(self.to_bezier_curve().sample(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector> {
        let t = self.domain().clamp(t)?;
        Ok(self.to_bezier_curve().derivative_at(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn start_point(&self) -> Point {
        self.p0
    }

    fn end_point(&self) -> Point {
        self.p3
    }

    fn bounds(&self) -> Rectangle {
        self.to_bezier_curve().bounds()
    }

    fn to_bezier(&self) -> Vec<BezierCurve> {
        vec![self.to_bezier_curve()]
    }
}

impl From<CubicCurve> for BezierCurve {
    fn from(c: CubicCurve) -> Self {
        c.to_bezier_curve()
    }
}

impl FuzzyEq for CubicCurve {
    fn fuzzy_eq(&self, other: &CubicCurve) -> bool {
        self.points()[..].fuzzy_eq(&other.points()[..])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn s_curve() -> CubicCurve {
        CubicCurve::new(
            Point::new(0.0, 0.0),
            Point::new(3.0, 3.0),
            Point::new(-1.0, 3.0),
            Point::new(2.0, 6.0),
        )
    }

    #[test]
    fn accessors_and_end_points() {
        let c = s_curve();
        assert_eq!(c.p0(), Point::new(0.0, 0.0));
        assert_eq!(c.p3(), Point::new(2.0, 6.0));
        assert!(c.point_at(0.0).unwrap().fuzzy_eq(&c.start_point()));
        assert!(c.point_at(1.0).unwrap().fuzzy_eq(&c.end_point()));
        assert!(c.point_at(-0.5).is_err());
    }

    #[test]
    fn split_matches_bezier_split() {
        let c = s_curve();
        let (l, r) = c.split(0.4).unwrap();
        let (bl, br) = c.to_bezier_curve().split(0.4).unwrap();
        assert!(l.to_bezier_curve().fuzzy_eq(&bl));
        assert!(r.to_bezier_curve().fuzzy_eq(&br));
        assert!(l.p3().fuzzy_eq(&r.p0()));
    }

    #[test]
    fn bounds_contain_samples() {
        let c = s_curve();
        let b = c.bounds();
        for i in 0..=20 {
            let p = c.point_at(f64::from(i) / 20.0).unwrap();
            assert!(b.contains_point(&p), "{p} outside {b:?}");
        }
        assert!(b.width() < 3.5);
    }

    #[test]
    fn intersections_with_line() {
        let c = s_curve();
        let line = crate::geometry::Line::from_coords(-5.0, 3.0, 5.0, 3.0);
        let points = c.intersections(&line);
        assert_eq!(points.len(), 1, "points={points:?}");
        assert!(points[0].fuzzy_eq(&c.point_at(0.5).unwrap()));
    }

    #[test]
    fn conversion_and_reverse() {
        let c = s_curve();
        let b: BezierCurve = c.into();
        assert_eq!(b.points(), &c.points());
        assert!(c.reversed().reversed().fuzzy_eq(&c));
        let moved = c.transformed(&AffineTransform::translation(1.0, 0.0));
        assert!(moved.p0().fuzzy_eq(&Point::new(1.0, 0.0)));
    }
}
