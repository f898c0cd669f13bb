use crate::error::{GeometryError, Result};
use crate::math::precision::{self, FuzzyEq};
use crate::math::{distance_2d, roots};
use crate::transform::AffineTransform;

use super::intersect::{self, IntersectionParams};
use super::{Curve, CurveDomain, Line, Point, Rectangle, Vector};

/// A Bézier curve of degree 1 to 3, defined by its control points.
///
/// Parameter range is `[0, 1]`; the first and last control points are the
/// curve's end points.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve {
    points: Vec<Point>,
}

impl BezierCurve {
    /// Creates a curve from 2 to 4 control points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for any other point count.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if !(2..=4).contains(&points.len()) {
            return Err(GeometryError::Degenerate(format!(
                "a Bézier curve needs 2 to 4 control points, got {}",
                points.len()
            ))
            .into());
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn line(p0: Point, p1: Point) -> Self {
        Self {
            points: vec![p0, p1],
        }
    }

    #[must_use]
    pub fn quadratic(p0: Point, p1: Point, p2: Point) -> Self {
        Self {
            points: vec![p0, p1, p2],
        }
    }

    #[must_use]
    pub fn cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self {
            points: vec![p0, p1, p2, p3],
        }
    }

    /// Returns the control points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    #[must_use]
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Evaluates the curve at `t` with de Casteljau's algorithm.
    ///
    /// `t` is not checked; values outside `[0, 1]` extrapolate.
    #[must_use]
    pub fn sample(&self, t: f64) -> Point {
        let mut pts = [Point::origin(); 4];
        let n = self.points.len();
        pts[..n].copy_from_slice(&self.points);
        for level in (1..n).rev() {
            for i in 0..level {
                pts[i] = pts[i].lerp(&pts[i + 1], t);
            }
        }
        pts[0]
    }

    /// First derivative at `t`, evaluated on the hodograph.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn derivative_at(&self, t: f64) -> Vector {
        let degree = self.degree();
        let mut vs = [Vector::new(0.0, 0.0); 3];
        for i in 0..degree {
            vs[i] = (self.points[i + 1] - self.points[i]) * degree as f64;
        }
        for level in (1..degree).rev() {
            for i in 0..level {
                vs[i] = vs[i] + (vs[i + 1] - vs[i]) * t;
            }
        }
        vs[0]
    }

    /// Splits the curve at `t` into two curves of the same degree.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `t` is outside `[0, 1]`.
    pub fn split(&self, t: f64) -> Result<(Self, Self)> {
        let t = CurveDomain::unit().clamp(t)?;
        Ok(self.split_unchecked(t))
    }

    pub(crate) fn split_unchecked(&self, t: f64) -> (Self, Self) {
        let n = self.points.len();
        let mut work = self.points.clone();
        let mut left = Vec::with_capacity(n);
        let mut right = Vec::with_capacity(n);
        left.push(work[0]);
        right.push(work[n - 1]);
        for level in (1..n).rev() {
            for i in 0..level {
                work[i] = work[i].lerp(&work[i + 1], t);
            }
            left.push(work[0]);
            right.push(work[level - 1]);
        }
        right.reverse();
        (Self { points: left }, Self { points: right })
    }

    /// Returns the part of the curve between `t0` and `t1`.
    ///
    /// The result runs backwards if `t1 < t0`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if either parameter is
    /// outside `[0, 1]`.
    pub fn clipped(&self, t0: f64, t1: f64) -> Result<Self> {
        let domain = CurveDomain::unit();
        let t0 = domain.clamp(t0)?;
        let t1 = domain.clamp(t1)?;
        if t1 < t0 {
            return Ok(self.clip_unchecked(t1, t0).reversed());
        }
        Ok(self.clip_unchecked(t0, t1))
    }

    pub(crate) fn clip_unchecked(&self, t0: f64, t1: f64) -> Self {
        let (_, tail) = self.split_unchecked(t0);
        if t0 >= 1.0 {
            return tail;
        }
        let (head, _) = tail.split_unchecked((t1 - t0) / (1.0 - t0));
        head
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Bounding box of the control polygon, which contains the curve.
    #[must_use]
    pub fn control_bounds(&self) -> Rectangle {
        let (min, max) = self.points[1..]
            .iter()
            .fold((self.points[0], self.points[0]), |(min, max), p| {
                (min.min(p), max.max(p))
            });
        Rectangle::from_points(&min, &max)
    }

    /// Parameters in `(0, 1)` where one of the coordinates has an extremum.
    fn extrema(&self) -> Vec<f64> {
        let coords: [fn(&Point) -> f64; 2] = [|p| p.x, |p| p.y];
        let mut ts = Vec::new();
        for coord in coords {
            let c: Vec<f64> = self.points.iter().map(coord).collect();
            let found = match c.len() {
                3 => roots::solve_linear(c[0] - 2.0 * c[1] + c[2], c[1] - c[0]),
                4 => roots::solve_quadratic(
                    -c[0] + 3.0 * c[1] - 3.0 * c[2] + c[3],
                    2.0 * (c[0] - 2.0 * c[1] + c[2]),
                    c[1] - c[0],
                ),
                _ => Vec::new(),
            };
            ts.extend(found.into_iter().filter(|t| *t > 0.0 && *t < 1.0));
        }
        ts
    }

    /// Returns `true` if the inner control points deviate from the chord by
    /// at most `tolerance`.
    #[must_use]
    pub fn is_flat(&self, tolerance: f64) -> bool {
        self.flatness() <= tolerance
    }

    /// Maximum distance of the inner control points from the chord.
    ///
    /// Since the curve lies in the hull of its control points, this bounds
    /// the deviation of the curve from its chord.
    #[must_use]
    pub fn flatness(&self) -> f64 {
        let (start, end) = (self.start(), self.end());
        self.points[1..self.points.len() - 1]
            .iter()
            .map(|p| distance_2d::point_to_segment_dist(p, &start, &end))
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn transformed(&self, t: &AffineTransform) -> Self {
        Self {
            points: t.transform_points(&self.points),
        }
    }

    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.translated(dx, dy)).collect(),
        }
    }

    /// Largest absolute control-point coordinate, the magnitude that scales
    /// precision comparisons on this curve.
    pub(crate) fn magnitude(&self) -> f64 {
        self.points
            .iter()
            .fold(0.0, |m: f64, p| m.max(p.x.abs()).max(p.y.abs()))
    }

    /// Returns `true` if `p` lies on the curve within precision.
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        self.parameter_at(p).is_some()
    }

    /// Parameter of the curve point closest to `p`, if that point is within
    /// precision of `p`.
    #[must_use]
    pub fn parameter_at(&self, p: &Point) -> Option<f64> {
        let tolerance = precision::tolerance_for(self.magnitude().max(p.x.abs()).max(p.y.abs()));
        let projection = intersect::project(self, p, 0.0, 1.0, intersect::FULL_RANGE_SAMPLES);
        (projection.distance <= tolerance).then_some(projection.t)
    }

    /// Returns the segment between the end points if this is a degree-1 curve.
    #[must_use]
    pub fn to_line(&self) -> Option<Line> {
        (self.degree() == 1).then(|| Line::new(self.start(), self.end()))
    }

    /// Intersection points with `other`, using the default search parameters.
    #[must_use]
    pub fn intersections(&self, other: &BezierCurve) -> Vec<Point> {
        self.intersections_with_params(other, &IntersectionParams::default())
    }

    #[must_use]
    pub fn intersections_with_params(
        &self,
        other: &BezierCurve,
        params: &IntersectionParams,
    ) -> Vec<Point> {
        intersect::bezier_intersections(self, other, params)
    }

    #[must_use]
    pub fn intersects(&self, other: &BezierCurve) -> bool {
        !self.intersections(other).is_empty()
    }
}

impl Curve for BezierCurve {
    fn point_at(&self, t: f64) -> Result<Point> {
        let t = self.domain().clamp(t)?;
        Ok(self.sample(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector> {
        let t = self.domain().clamp(t)?;
        Ok(self.derivative_at(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn start_point(&self) -> Point {
        self.start()
    }

    fn end_point(&self) -> Point {
        self.end()
    }

    fn bounds(&self) -> Rectangle {
        let mut min = self.start().min(&self.end());
        let mut max = self.start().max(&self.end());
        for t in self.extrema() {
            let p = self.sample(t);
            min = min.min(&p);
            max = max.max(&p);
        }
        Rectangle::from_points(&min, &max)
    }

    fn to_bezier(&self) -> Vec<BezierCurve> {
        vec![self.clone()]
    }
}

impl FuzzyEq for BezierCurve {
    fn fuzzy_eq(&self, other: &BezierCurve) -> bool {
        self.points.as_slice().fuzzy_eq(other.points.as_slice())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn arch() -> BezierCurve {
        BezierCurve::cubic(
            Point::new(0.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(4.0, 4.0),
            Point::new(4.0, 0.0),
        )
    }

    #[test]
    fn control_point_count_is_validated() {
        assert!(BezierCurve::new(vec![Point::origin()]).is_err());
        assert!(BezierCurve::new(vec![Point::origin(); 5]).is_err());
        assert_eq!(BezierCurve::new(vec![Point::origin(); 3]).unwrap().degree(), 2);
    }

    #[test]
    fn sample_end_points_and_middle() {
        let c = arch();
        assert!(c.sample(0.0).fuzzy_eq(&Point::new(0.0, 0.0)));
        assert!(c.sample(1.0).fuzzy_eq(&Point::new(4.0, 0.0)));
        assert!(c.sample(0.5).fuzzy_eq(&Point::new(2.0, 3.0)));
        assert!(c.point_at(1.2).is_err());
    }

    #[test]
    fn derivative_matches_difference_quotient() {
        let c = arch();
        let h = 1e-6;
        for &t in &[0.1, 0.5, 0.8] {
            let d = c.derivative_at(t);
            let q = (c.sample(t + h) - c.sample(t - h)) / (2.0 * h);
            assert_abs_diff_eq!(d.x, q.x, epsilon = 1e-5);
            assert_abs_diff_eq!(d.y, q.y, epsilon = 1e-5);
        }
        let line = BezierCurve::line(Point::new(1.0, 1.0), Point::new(3.0, 2.0));
        assert!(line.derivative_at(0.3).fuzzy_eq(&Vector::new(2.0, 1.0)));
    }

    #[test]
    fn split_preserves_shape() {
        let c = arch();
        let (left, right) = c.split(0.3).unwrap();
        assert!(left.end().fuzzy_eq(&c.sample(0.3)));
        assert!(right.start().fuzzy_eq(&c.sample(0.3)));
        assert!(left.sample(0.5).fuzzy_eq(&c.sample(0.15)));
        assert!(right.sample(0.5).fuzzy_eq(&c.sample(0.65)));
        assert!(c.split(-0.1).is_err());
    }

    #[test]
    fn clipped_and_reversed() {
        let c = arch();
        let part = c.clipped(0.25, 0.75).unwrap();
        assert!(part.start().fuzzy_eq(&c.sample(0.25)));
        assert!(part.end().fuzzy_eq(&c.sample(0.75)));
        assert!(part.sample(0.5).fuzzy_eq(&c.sample(0.5)));

        let back = c.clipped(0.75, 0.25).unwrap();
        assert!(back.fuzzy_eq(&part.reversed()));
        assert!(c.reversed().sample(0.2).fuzzy_eq(&c.sample(0.8)));
    }

    #[test]
    fn tight_bounds_are_inside_control_bounds() {
        let c = arch();
        let tight = c.bounds();
        assert!(tight.fuzzy_eq(&Rectangle::new(0.0, 0.0, 4.0, 3.0)));
        assert!(c.control_bounds().fuzzy_eq(&Rectangle::new(0.0, 0.0, 4.0, 4.0)));

        let quad = BezierCurve::quadratic(
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 0.0),
        );
        assert!(quad.bounds().fuzzy_eq(&Rectangle::new(0.0, 0.0, 2.0, 1.0)));
    }

    #[test]
    fn flatness() {
        assert_abs_diff_eq!(arch().flatness(), 4.0, epsilon = 1e-12);
        let straight = BezierCurve::cubic(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        );
        assert!(straight.is_flat(1e-12));
        assert!(BezierCurve::line(Point::origin(), Point::new(1.0, 1.0)).is_flat(0.0));
    }

    #[test]
    fn containment_and_parameter() {
        let c = arch();
        let p = c.sample(0.4);
        assert!(c.contains(&p));
        assert_abs_diff_eq!(c.parameter_at(&p).unwrap(), 0.4, epsilon = 1e-6);
        assert!(!c.contains(&Point::new(2.0, 2.0)));
        assert!(c.parameter_at(&Point::new(2.0, 3.5)).is_none());
    }

    #[test]
    fn transformed_and_translated_agree() {
        let c = arch();
        let moved = c.transformed(&AffineTransform::translation(3.0, -1.0));
        assert!(moved.fuzzy_eq(&c.translated(3.0, -1.0)));
        assert!(moved.sample(0.5).fuzzy_eq(&Point::new(5.0, 2.0)));
    }

    #[test]
    fn crossing_curves() {
        let c = arch();
        let flipped = c.transformed(&AffineTransform::new(1.0, 0.0, 0.0, -1.0, 0.0, 3.0));
        let points = c.intersections(&flipped);
        assert_eq!(points.len(), 2, "points={points:?}");
        for p in &points {
            assert!(c.contains(p), "{p} not on first curve");
            assert!(flipped.contains(p), "{p} not on second curve");
            assert_abs_diff_eq!(p.y, 1.5, epsilon = 1e-6);
        }
        assert!(c.intersects(&flipped));
    }

    #[test]
    fn to_line_only_for_degree_one() {
        assert!(arch().to_line().is_none());
        let l = BezierCurve::line(Point::origin(), Point::new(1.0, 0.0))
            .to_line()
            .unwrap();
        assert!(l.p2().fuzzy_eq(&Point::new(1.0, 0.0)));
    }
}
