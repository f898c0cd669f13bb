use crate::error::Result;
use crate::math::precision::{self, FuzzyEq};
use crate::math::{distance_2d, intersect_2d};
use crate::transform::AffineTransform;

use super::{BezierCurve, Curve, CurveDomain, Point, Rectangle, Vector};

/// A line segment between two points.
///
/// The parametric form is: `P(t) = p1 + t * (p2 - p1)`, `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    p1: Point,
    p2: Point,
}

impl Line {
    #[must_use]
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    #[must_use]
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// Returns the start point of the segment.
    #[must_use]
    pub fn p1(&self) -> Point {
        self.p1
    }

    /// Returns the end point of the segment.
    #[must_use]
    pub fn p2(&self) -> Point {
        self.p2
    }

    /// Returns `true` if both end points coincide (within precision).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.p1.fuzzy_eq(&self.p2)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }

    /// The vector from `p1` to `p2`.
    #[must_use]
    pub fn direction(&self) -> Vector {
        self.p2 - self.p1
    }

    /// Returns `true` if `p` lies on the segment within precision.
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        let magnitude = p
            .x
            .abs()
            .max(p.y.abs())
            .max(self.p1.x.abs().max(self.p1.y.abs()))
            .max(self.p2.x.abs().max(self.p2.y.abs()));
        distance_2d::point_to_segment_dist(p, &self.p1, &self.p2)
            <= precision::tolerance_for(magnitude)
    }

    /// Closed-form intersection with another segment.
    ///
    /// Returns `None` for parallel segments (including collinear ones) and
    /// when the crossing lies outside either segment.
    #[must_use]
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        intersect_2d::segment_segment_intersect_2d(&self.p1, &self.p2, &other.p1, &other.p2)
            .map(|(p, _, _)| p)
    }

    /// Returns `true` if the two segments share at least one point.
    #[must_use]
    pub fn intersects(&self, other: &Line) -> bool {
        !self.intersections(other).is_empty()
    }

    /// Intersection points with any other curve.
    #[must_use]
    pub fn intersections<C: Curve + ?Sized>(&self, other: &C) -> Vec<Point> {
        super::curve_intersections(self, other)
    }

    #[must_use]
    pub fn transformed(&self, t: &AffineTransform) -> Self {
        Self::new(t.transform_point(&self.p1), t.transform_point(&self.p2))
    }

    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.p1.translated(dx, dy), self.p2.translated(dx, dy))
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.p2, self.p1)
    }

    /// Returns this segment as a degree-1 Bézier curve.
    #[must_use]
    pub fn to_bezier_curve(&self) -> BezierCurve {
        BezierCurve::line(self.p1, self.p2)
    }
}

impl Curve for Line {
    fn point_at(&self, t: f64) -> Result<Point> {
        let t = self.domain().clamp(t)?;
        Ok(self.p1.lerp(&self.p2, t))
    }

    fn tangent(&self, t: f64) -> Result<Vector> {
        self.domain().clamp(t)?;
        Ok(self.direction())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn start_point(&self) -> Point {
        self.p1
    }

    fn end_point(&self) -> Point {
        self.p2
    }

    fn bounds(&self) -> Rectangle {
        Rectangle::from_points(&self.p1, &self.p2)
    }

    fn to_bezier(&self) -> Vec<BezierCurve> {
        vec![self.to_bezier_curve()]
    }

    fn is_closed(&self) -> bool {
        false
    }
}

impl FuzzyEq for Line {
    fn fuzzy_eq(&self, other: &Line) -> bool {
        self.p1.fuzzy_eq(&other.p1) && self.p2.fuzzy_eq(&other.p2)
    }
}
