mod ellipse;
mod path;
mod rectangle;

pub use ellipse::Ellipse;
pub use path::{Path, PathBuilder, Segment, WindingRule};
pub use rectangle::Rectangle;

use super::curve::intersect;
use super::{BezierCurve, IntersectionParams, Point};

/// A closed region of the plane bounded by Bézier segments.
pub trait Shape {
    /// Returns the axis-aligned bounds of the shape.
    fn bounds(&self) -> Rectangle;

    /// Returns `true` if `p` lies inside the shape or on its outline.
    fn contains(&self, p: &Point) -> bool;

    /// Returns the outline as a closed chain of Bézier segments.
    fn outline(&self) -> Vec<BezierCurve>;

    /// Returns a closed path tracing the outline.
    fn to_path(&self) -> Path;
}

/// Intersection points of the outlines of two shapes.
///
/// Shapes with identical outlines yield no points.
#[must_use]
pub fn shape_intersections(a: &dyn Shape, b: &dyn Shape) -> Vec<Point> {
    intersect::intersect_segments(&a.outline(), &b.outline(), &IntersectionParams::default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::precision::FuzzyEq;

    #[test]
    fn mixed_shapes() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let ellipse = Ellipse::from_coords(5.0, 0.0, 10.0, 10.0).unwrap();
        let points = shape_intersections(&rect, &ellipse);
        // The ellipse touches the top and bottom edges where the right edge
        // meets them.
        assert_eq!(points.len(), 2, "points={points:?}");
        assert!(points.iter().any(|p| p.fuzzy_eq(&Point::new(10.0, 0.0))));
        assert!(points.iter().any(|p| p.fuzzy_eq(&Point::new(10.0, 10.0))));
    }

    #[test]
    fn identical_shapes_have_no_points() {
        let rect = Rectangle::new(1.0, 2.0, 3.0, 4.0);
        assert!(shape_intersections(&rect, &rect).is_empty());
    }
}
