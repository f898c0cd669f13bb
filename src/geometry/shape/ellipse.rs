use crate::error::{GeometryError, Result};
use crate::geometry::curve::intersect::{self, dedup_points};
use crate::geometry::{BezierCurve, CubicCurve, IntersectionParams, Line, Point};
use crate::math::intersect_2d;
use crate::math::precision::{self, FuzzyEq};

use super::{Path, Rectangle, Shape};

/// Handle length of the cubic quarter-circle approximation, `4(√2 - 1)/3`.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// An axis-aligned ellipse inscribed in its bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    bounds: Rectangle,
}

impl Ellipse {
    /// Creates the ellipse inscribed in `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if `bounds` is empty.
    pub fn new(bounds: Rectangle) -> Result<Self> {
        if bounds.is_empty() {
            return Err(GeometryError::Degenerate(format!(
                "ellipse bounds {bounds} have no area"
            ))
            .into());
        }
        Ok(Self { bounds })
    }

    /// Creates the ellipse inscribed in the rectangle `(x, y, width, height)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if width or height is not positive.
    pub fn from_coords(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        Self::new(Rectangle::new(x, y, width, height))
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    #[must_use]
    pub fn radius_x(&self) -> f64 {
        self.bounds.width() / 2.0
    }

    #[must_use]
    pub fn radius_y(&self) -> f64 {
        self.bounds.height() / 2.0
    }

    /// The outline as four cubic segments, one per quadrant.
    ///
    /// Segments run right to top, top to left, left to bottom and bottom to
    /// right, joining at the mid-points of the bounds' edges.
    #[must_use]
    pub fn outline_curves(&self) -> [CubicCurve; 4] {
        let c = self.center();
        let (rx, ry) = (self.radius_x(), self.radius_y());
        let (kx, ky) = (KAPPA * rx, KAPPA * ry);
        let (right, top, left, bottom) = (
            self.bounds.right(),
            self.bounds.top(),
            self.bounds.left(),
            self.bounds.bottom(),
        );
        [
            CubicCurve::new(
                right,
                Point::new(c.x + rx, c.y - ky),
                Point::new(c.x + kx, c.y - ry),
                top,
            ),
            CubicCurve::new(
                top,
                Point::new(c.x - kx, c.y - ry),
                Point::new(c.x - rx, c.y - ky),
                left,
            ),
            CubicCurve::new(
                left,
                Point::new(c.x - rx, c.y + ky),
                Point::new(c.x - kx, c.y + ry),
                bottom,
            ),
            CubicCurve::new(
                bottom,
                Point::new(c.x + kx, c.y + ry),
                Point::new(c.x + rx, c.y + ky),
                right,
            ),
        ]
    }

    /// Intersection points with a line segment.
    ///
    /// Solved in closed form on the exact ellipse; a tangent segment yields
    /// exactly one point.
    #[must_use]
    pub fn intersections_with_line(&self, line: &Line) -> Vec<Point> {
        let hits = intersect_2d::line_ellipse_intersect_2d(
            &line.p1(),
            &line.p2(),
            &self.center(),
            self.radius_x(),
            self.radius_y(),
        );
        dedup_points(hits.into_iter().map(|(p, _)| p).collect())
    }

    #[must_use]
    pub fn intersects(&self, line: &Line) -> bool {
        !self.intersections_with_line(line).is_empty()
    }

    /// Intersection points of the outlines of two ellipses.
    ///
    /// Equal ellipses yield no points.
    #[must_use]
    pub fn intersections_with_ellipse(&self, other: &Ellipse) -> Vec<Point> {
        if self.fuzzy_eq(other) {
            return Vec::new();
        }
        intersect::intersect_segments(
            &self.outline(),
            &other.outline(),
            &IntersectionParams::default(),
        )
    }

    /// Intersection points of the outline with the edges of `rect`.
    #[must_use]
    pub fn intersections_with_rectangle(&self, rect: &Rectangle) -> Vec<Point> {
        let points = rect
            .segments()
            .iter()
            .flat_map(|edge| self.intersections_with_line(edge))
            .collect();
        dedup_points(points)
    }
}

impl Shape for Ellipse {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn contains(&self, p: &Point) -> bool {
        let c = self.center();
        let u = (p.x - c.x) / self.radius_x();
        let v = (p.y - c.y) / self.radius_y();
        precision::smaller_or_equal(u * u + v * v, 1.0)
    }

    fn outline(&self) -> Vec<BezierCurve> {
        self.outline_curves()
            .iter()
            .map(CubicCurve::to_bezier_curve)
            .collect()
    }

    fn to_path(&self) -> Path {
        Path::from_outline(&self.outline())
    }
}

impl FuzzyEq for Ellipse {
    fn fuzzy_eq(&self, other: &Ellipse) -> bool {
        self.bounds.fuzzy_eq(&other.bounds)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::precision::PRECISION_FRACTION;

    const OFFSET: f64 = PRECISION_FRACTION * 100.0;

    fn bounds() -> Rectangle {
        Rectangle::new(34.3435, 56.458945, 123.3098, 146.578)
    }

    fn ellipse() -> Ellipse {
        Ellipse::new(bounds()).unwrap()
    }

    #[test]
    fn kappa_constant() {
        approx::assert_abs_diff_eq!(KAPPA, 4.0 * (2f64.sqrt() - 1.0) / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn empty_bounds_are_rejected() {
        assert!(Ellipse::from_coords(0.0, 0.0, 0.0, 10.0).is_err());
        assert!(Ellipse::from_coords(0.0, 0.0, 10.0, -1.0).is_err());
    }

    #[test]
    fn contains_center_and_edge_mid_points() {
        let e = ellipse();
        let r = bounds();
        assert!(e.contains(&r.center()));
        for p in [r.left(), r.top(), r.right(), r.bottom()] {
            assert!(e.contains(&p), "{p} should be on the outline");
        }
    }

    #[test]
    fn containment_boundary() {
        let e = ellipse();
        let r = bounds();
        let (left, top, right, bottom) = (r.left(), r.top(), r.right(), r.bottom());

        assert!(e.contains(&left.translated(OFFSET, 0.0)));
        assert!(!e.contains(&left.translated(-OFFSET, 0.0)));
        assert!(e.contains(&top.translated(0.0, OFFSET)));
        assert!(!e.contains(&top.translated(0.0, -OFFSET)));
        assert!(e.contains(&right.translated(-OFFSET, 0.0)));
        assert!(!e.contains(&right.translated(OFFSET, 0.0)));
        assert!(e.contains(&bottom.translated(0.0, -OFFSET)));
        assert!(!e.contains(&bottom.translated(0.0, OFFSET)));
    }

    #[test]
    fn diagonal_intersections_are_contained() {
        let e = ellipse();
        let r = bounds();
        for diagonal in [
            Line::new(r.top_left(), r.bottom_right()),
            Line::new(r.top_right(), r.bottom_left()),
        ] {
            let points = e.intersections_with_line(&diagonal);
            assert_eq!(points.len(), 2, "points={points:?}");
            for p in &points {
                assert!(e.contains(p), "{p} should be contained");
            }
            assert!(e.intersects(&diagonal));
        }
    }

    #[test]
    fn edges_of_bounds_are_tangent() {
        let e = ellipse();
        let r = bounds();
        let expected = [r.top(), r.right(), r.bottom(), r.left()];
        for (edge, mid) in r.segments().iter().zip(expected) {
            let points = e.intersections_with_line(edge);
            assert_eq!(points.len(), 1, "edge {edge:?}: points={points:?}");
            assert!(points[0].fuzzy_eq(&mid));
        }
        assert_eq!(e.intersections_with_rectangle(&r).len(), 4);
    }

    #[test]
    fn equal_ellipses_have_no_intersections() {
        let e = ellipse();
        assert!(e.intersections_with_ellipse(&e).is_empty());
        assert!(super::super::shape_intersections(&e, &ellipse()).is_empty());
    }

    #[test]
    fn concentric_ellipses_within_precision_have_no_intersections() {
        let e = Ellipse::from_coords(10.0, 10.0, 100.0, 100.0).unwrap();
        let near =
            Ellipse::from_coords(10.0 - 2.5e-5, 10.0 - 2.5e-5, 100.000_05, 100.000_05).unwrap();
        assert!(!e.fuzzy_eq(&near));
        let points = e.intersections_with_ellipse(&near);
        assert!(points.is_empty(), "points={points:?}");
    }

    #[test]
    fn shrunken_ellipse_touches_left() {
        let e = ellipse();
        let inner = Ellipse::new(bounds().expanded(0.0, -10.0, -10.0, -10.0)).unwrap();
        let points = e.intersections_with_ellipse(&inner);
        assert_eq!(points.len(), 1, "points={points:?}");
        assert!(points[0].fuzzy_eq(&bounds().left()));
    }

    #[test]
    fn widened_ellipse_touches_and_crosses() {
        let e = ellipse();
        let wider = Ellipse::new(bounds().expanded(0.0, 0.0, 100.0, 0.0)).unwrap();
        assert_eq!(e.intersections_with_ellipse(&wider).len(), 3);

        let taller = Ellipse::new(bounds().expanded(0.0, 0.0, 0.0, 100.0)).unwrap();
        assert_eq!(e.intersections_with_ellipse(&taller).len(), 3);
    }

    #[test]
    fn horizontally_scaled_ellipse_touches_top_and_bottom() {
        let r = bounds();
        let e = ellipse();
        let wider = Ellipse::new(r.expanded(50.0, 0.0, 50.0, 0.0)).unwrap();
        let points = e.intersections_with_ellipse(&wider);
        assert_eq!(points.len(), 2, "points={points:?}");
        assert!(points.iter().any(|p| p.fuzzy_eq(&r.top())));
        assert!(points.iter().any(|p| p.fuzzy_eq(&r.bottom())));
    }

    #[test]
    fn vertically_scaled_ellipse_touches_left_and_right() {
        let r = bounds();
        let e = ellipse();
        let taller = Ellipse::new(r.expanded(0.0, 50.0, 0.0, 50.0)).unwrap();
        let points = e.intersections_with_ellipse(&taller);
        assert_eq!(points.len(), 2, "points={points:?}");
        assert!(points.iter().any(|p| p.fuzzy_eq(&r.left())));
        assert!(points.iter().any(|p| p.fuzzy_eq(&r.right())));
    }

    #[test]
    fn nearly_tangent_ellipses() {
        let e = Ellipse::from_coords(126.0, 90.0, 378.0, 270.0).unwrap();
        let circle = Ellipse::from_coords(222.0, 77.0, 200.0, 200.0).unwrap();
        let points = e.intersections_with_ellipse(&circle);
        assert_eq!(points.len(), 2, "points={points:?}");

        for x in [133.0, 143.0, 145.0] {
            let other = Ellipse::from_coords(x, 90.0, 2.0 * (315.0 - x), 200.0).unwrap();
            let points = e.intersections_with_ellipse(&other);
            assert_eq!(points.len(), 3, "x={x}: points={points:?}");
        }
    }

    #[test]
    fn outline_joins_at_edge_mid_points() {
        let r = bounds();
        let curves = ellipse().outline_curves();
        assert!(curves[0].p0().fuzzy_eq(&r.right()));
        assert!(curves[1].p0().fuzzy_eq(&r.top()));
        assert!(curves[2].p0().fuzzy_eq(&r.left()));
        assert!(curves[3].p0().fuzzy_eq(&r.bottom()));
        for i in 0..4 {
            assert_eq!(curves[i].p3(), curves[(i + 1) % 4].p0());
        }
        let path = ellipse().to_path();
        assert!(path.contains(&r.center()));
        assert!(!path.contains(&r.top_left()));
    }
}
