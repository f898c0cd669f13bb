use std::fmt;

use crate::geometry::curve::intersect;
use crate::geometry::{BezierCurve, Dimension, IntersectionParams, Line, Point};
use crate::math::precision::{self, FuzzyEq};

use super::{Path, Shape};

/// An axis-aligned rectangle given by its top-left corner and its size.
///
/// The y axis points down: `top` is at `y`, `bottom` at `y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rectangle {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The smallest rectangle spanned by two opposite corners.
    #[must_use]
    pub fn from_points(a: &Point, b: &Point) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    #[must_use]
    pub fn from_location_and_size(location: &Point, size: &Dimension) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn size(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    #[must_use]
    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns `true` if width or height is zero or negative.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Mid-point of the left edge.
    #[must_use]
    pub fn left(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }

    /// Mid-point of the top edge.
    #[must_use]
    pub fn top(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y)
    }

    /// Mid-point of the right edge.
    #[must_use]
    pub fn right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height / 2.0)
    }

    /// Mid-point of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height)
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        self.location()
    }

    #[must_use]
    pub fn top_right(&self) -> Point {
        Point::new(self.x + self.width, self.y)
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    #[must_use]
    pub fn bottom_left(&self) -> Point {
        Point::new(self.x, self.y + self.height)
    }

    /// Moves each edge outwards by the given amount (negative moves inwards).
    pub fn expand(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        *self = self.expanded(left, top, right, bottom);
    }

    #[must_use]
    pub fn expanded(&self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(
            self.x - left,
            self.y - top,
            self.width + left + right,
            self.height + top + bottom,
        )
    }

    /// Moves all four edges outwards by `d`.
    #[must_use]
    pub fn expanded_uniform(&self, d: f64) -> Self {
        self.expanded(d, d, d, d)
    }

    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Scales location and size by `factor` (relative to the origin).
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    /// The smallest rectangle containing both rectangles.
    #[must_use]
    pub fn union(&self, other: &Rectangle) -> Self {
        Self::from_points(
            &self.top_left().min(&other.top_left()),
            &self.bottom_right().max(&other.bottom_right()),
        )
    }

    /// The overlap of both rectangles, or `None` if they are disjoint.
    ///
    /// Rectangles that share only an edge yield a degenerate rectangle.
    #[must_use]
    pub fn intersection(&self, other: &Rectangle) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let min = self.top_left().max(&other.top_left());
        let max = self.bottom_right().min(&other.bottom_right());
        Some(Self::new(
            min.x,
            min.y,
            (max.x - min.x).max(0.0),
            (max.y - min.y).max(0.0),
        ))
    }

    /// Returns `true` if the rectangles overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Rectangle) -> bool {
        precision::smaller_or_equal(self.x, other.x + other.width)
            && precision::smaller_or_equal(other.x, self.x + self.width)
            && precision::smaller_or_equal(self.y, other.y + other.height)
            && precision::smaller_or_equal(other.y, self.y + self.height)
    }

    /// Returns `true` if `p` lies inside or on the border.
    #[must_use]
    pub fn contains_point(&self, p: &Point) -> bool {
        precision::greater_or_equal(p.x, self.x)
            && precision::smaller_or_equal(p.x, self.x + self.width)
            && precision::greater_or_equal(p.y, self.y)
            && precision::smaller_or_equal(p.y, self.y + self.height)
    }

    /// Returns `true` if `other` lies completely inside this rectangle.
    #[must_use]
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        self.contains_point(&other.top_left()) && self.contains_point(&other.bottom_right())
    }

    /// The four edges in the order top, right, bottom, left.
    #[must_use]
    pub fn segments(&self) -> [Line; 4] {
        let (tl, tr, br, bl) = (
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        );
        [
            Line::new(tl, tr),
            Line::new(tr, br),
            Line::new(br, bl),
            Line::new(bl, tl),
        ]
    }

    /// Intersection points of the outline with a line segment.
    ///
    /// An edge that overlaps the segment contributes the end points of the
    /// overlap.
    #[must_use]
    pub fn intersections_with_line(&self, line: &Line) -> Vec<Point> {
        intersect::intersect_segments(
            &self.outline(),
            &[line.to_bezier_curve()],
            &IntersectionParams::default(),
        )
    }

    /// Intersection points of the outlines of two rectangles.
    #[must_use]
    pub fn intersections(&self, other: &Rectangle) -> Vec<Point> {
        super::shape_intersections(self, other)
    }
}

impl Shape for Rectangle {
    fn bounds(&self) -> Rectangle {
        *self
    }

    fn contains(&self, p: &Point) -> bool {
        self.contains_point(p)
    }

    fn outline(&self) -> Vec<BezierCurve> {
        self.segments().iter().map(Line::to_bezier_curve).collect()
    }

    fn to_path(&self) -> Path {
        Path::from_outline(&self.outline())
    }
}

impl FuzzyEq for Rectangle {
    fn fuzzy_eq(&self, other: &Rectangle) -> bool {
        precision::equal(self.x, other.x)
            && precision::equal(self.y, other.y)
            && precision::equal(self.width, other.width)
            && precision::equal(self.height, other.height)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rectangle({}, {}, {}, {})",
            self.x, self.y, self.width, self.height
        )
    }
}
