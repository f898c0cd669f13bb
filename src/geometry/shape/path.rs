use crate::error::{OperationError, Result};
use crate::geometry::curve::intersect;
use crate::geometry::{BezierCurve, IntersectionParams, Point};
use crate::math::polygon_2d;
use crate::math::precision::FuzzyEq;
use crate::transform::AffineTransform;

use super::{Rectangle, Shape};

/// Number of chords per curved segment when flattening for containment.
const FLATTEN_STEPS: u32 = 64;

/// A single drawing command of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Close,
}

impl Segment {
    fn map_points(&self, f: impl Fn(&Point) -> Point) -> Self {
        match self {
            Segment::MoveTo(p) => Segment::MoveTo(f(p)),
            Segment::LineTo(p) => Segment::LineTo(f(p)),
            Segment::QuadTo(c, p) => Segment::QuadTo(f(c), f(p)),
            Segment::CubicTo(c1, c2, p) => Segment::CubicTo(f(c1), f(c2), f(p)),
            Segment::Close => Segment::Close,
        }
    }
}

/// Rule deciding which regions enclosed by a path are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindingRule {
    /// Inside where a ray crosses the outline an odd number of times.
    #[default]
    EvenOdd,
    /// Inside where the winding number is not zero.
    NonZero,
}

/// A sequence of sub-paths built from lines and Bézier curves.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<Segment>,
    winding_rule: WindingRule,
}

impl Path {
    /// Returns a builder for a new path.
    #[must_use]
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// Creates an open path tracing `curves`.
    ///
    /// A new sub-path starts wherever a curve does not begin at the end of
    /// its predecessor.
    #[must_use]
    pub fn from_curves(curves: &[BezierCurve]) -> Self {
        let mut segments = Vec::with_capacity(curves.len() + 1);
        let mut current: Option<Point> = None;
        for curve in curves {
            if !current.is_some_and(|p| p.fuzzy_eq(&curve.start())) {
                segments.push(Segment::MoveTo(curve.start()));
            }
            let pts = curve.points();
            segments.push(match pts.len() {
                2 => Segment::LineTo(pts[1]),
                3 => Segment::QuadTo(pts[1], pts[2]),
                _ => Segment::CubicTo(pts[1], pts[2], pts[3]),
            });
            current = Some(curve.end());
        }
        Self {
            segments,
            winding_rule: WindingRule::default(),
        }
    }

    /// Creates a closed path tracing `curves`.
    #[must_use]
    pub fn from_outline(curves: &[BezierCurve]) -> Self {
        let mut path = Self::from_curves(curves);
        if !path.segments.is_empty() {
            path.segments.push(Segment::Close);
        }
        path
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn winding_rule(&self) -> WindingRule {
        self.winding_rule
    }

    #[must_use]
    pub fn with_winding_rule(mut self, rule: WindingRule) -> Self {
        self.winding_rule = rule;
        self
    }

    /// Returns `true` if the path draws nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self
            .segments
            .iter()
            .any(|s| !matches!(s, Segment::MoveTo(_) | Segment::Close))
    }

    /// Returns every sub-path as a closed chain of Bézier curves.
    ///
    /// Sub-paths that do not end at their start point are closed with a
    /// straight line.
    #[must_use]
    pub fn sub_paths(&self) -> Vec<Vec<BezierCurve>> {
        let mut sub_paths = Vec::new();
        let mut current: Vec<BezierCurve> = Vec::new();
        let mut start = Point::origin();
        let mut pen = Point::origin();

        let mut finish = |current: &mut Vec<BezierCurve>, pen: Point, start: Point| {
            if current.is_empty() {
                return;
            }
            if pen.fuzzy_ne(&start) {
                current.push(BezierCurve::line(pen, start));
            }
            sub_paths.push(std::mem::take(current));
        };

        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) => {
                    finish(&mut current, pen, start);
                    start = p;
                    pen = p;
                }
                Segment::LineTo(p) => {
                    current.push(BezierCurve::line(pen, p));
                    pen = p;
                }
                Segment::QuadTo(c, p) => {
                    current.push(BezierCurve::quadratic(pen, c, p));
                    pen = p;
                }
                Segment::CubicTo(c1, c2, p) => {
                    current.push(BezierCurve::cubic(pen, c1, c2, p));
                    pen = p;
                }
                Segment::Close => {
                    finish(&mut current, pen, start);
                    pen = start;
                }
            }
        }
        finish(&mut current, pen, start);
        sub_paths
    }

    /// Tight bounds of all drawn segments, or `None` for an empty path.
    #[must_use]
    pub fn bounds(&self) -> Option<Rectangle> {
        use crate::geometry::Curve;
        self.outline()
            .iter()
            .map(BezierCurve::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Returns `true` if `p` lies on the outline or inside under the
    /// path's winding rule.
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        let sub_paths = self.sub_paths();
        if sub_paths.iter().flatten().any(|c| c.contains(p)) {
            return true;
        }
        let winding: i32 = sub_paths
            .iter()
            .map(|curves| polygon_2d::winding_number(p, &flatten(curves)))
            .sum();
        match self.winding_rule {
            WindingRule::EvenOdd => winding % 2 != 0,
            WindingRule::NonZero => winding != 0,
        }
    }

    #[must_use]
    pub fn transformed(&self, t: &AffineTransform) -> Self {
        Self {
            segments: self
                .segments
                .iter()
                .map(|s| s.map_points(|p| t.transform_point(p)))
                .collect(),
            winding_rule: self.winding_rule,
        }
    }

    /// Intersection points of the outlines of two paths.
    #[must_use]
    pub fn intersections(&self, other: &Path) -> Vec<Point> {
        intersect::intersect_segments(
            &self.outline(),
            &other.outline(),
            &IntersectionParams::default(),
        )
    }
}

/// Approximates a closed chain of curves by a polygon.
fn flatten(curves: &[BezierCurve]) -> Vec<Point> {
    let steps = f64::from(FLATTEN_STEPS);
    let mut polygon = Vec::new();
    for curve in curves {
        polygon.push(curve.start());
        if curve.degree() > 1 {
            polygon.extend((1..FLATTEN_STEPS).map(|i| curve.sample(f64::from(i) / steps)));
        }
    }
    polygon
}

impl Shape for Path {
    fn bounds(&self) -> Rectangle {
        Path::bounds(self).unwrap_or_default()
    }

    fn contains(&self, p: &Point) -> bool {
        Path::contains(self, p)
    }

    fn outline(&self) -> Vec<BezierCurve> {
        self.sub_paths().into_iter().flatten().collect()
    }

    fn to_path(&self) -> Path {
        self.clone()
    }
}

/// Incremental construction of a [`Path`].
///
/// Drawing commands issued before the first `move_to` are recorded as an
/// error that [`PathBuilder::build`] reports.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    segments: Vec<Segment>,
    winding_rule: WindingRule,
    has_current_point: bool,
    error: Option<String>,
}

impl PathBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn winding_rule(mut self, rule: WindingRule) -> Self {
        self.winding_rule = rule;
        self
    }

    #[must_use]
    pub fn move_to(mut self, p: Point) -> Self {
        self.segments.push(Segment::MoveTo(p));
        self.has_current_point = true;
        self
    }

    #[must_use]
    pub fn line_to(self, p: Point) -> Self {
        self.draw("line_to", Segment::LineTo(p))
    }

    #[must_use]
    pub fn quad_to(self, control: Point, p: Point) -> Self {
        self.draw("quad_to", Segment::QuadTo(control, p))
    }

    #[must_use]
    pub fn cubic_to(self, control1: Point, control2: Point, p: Point) -> Self {
        self.draw("cubic_to", Segment::CubicTo(control1, control2, p))
    }

    #[must_use]
    pub fn close(self) -> Self {
        self.draw("close", Segment::Close)
    }

    fn draw(mut self, command: &str, segment: Segment) -> Self {
        if !self.has_current_point && self.error.is_none() {
            self.error = Some(format!("{command} issued before move_to"));
        }
        self.segments.push(segment);
        self
    }

    /// Finishes the path.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if a drawing command was
    /// issued before the first `move_to`.
    pub fn build(self) -> Result<Path> {
        if let Some(message) = self.error {
            return Err(OperationError::InvalidInput(message).into());
        }
        Ok(Path {
            segments: self.segments,
            winding_rule: self.winding_rule,
        })
    }
}
