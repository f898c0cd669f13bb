mod bezier;
mod cubic;
pub mod intersect;
mod line;
mod poly_bezier;

pub use bezier::BezierCurve;
pub use cubic::CubicCurve;
pub use intersect::IntersectionParams;
pub use line::Line;
pub use poly_bezier::PolyBezier;

use crate::error::{GeometryError, Result};
use crate::math::precision;

use super::{Point, Rectangle, Vector};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// The unit domain `[0, 1]` shared by single-segment curves.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Checks `t` against the domain (within precision) and clamps it.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `t` lies outside.
    pub fn clamp(&self, t: f64) -> Result<f64> {
        if precision::greater_or_equal(t, self.t_min) && precision::smaller_or_equal(t, self.t_max)
        {
            Ok(t.clamp(self.t_min, self.t_max))
        } else {
            Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: self.t_min,
                max: self.t_max,
            }
            .into())
        }
    }
}

/// Trait for parametric curves in the plane.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn point_at(&self, t: f64) -> Result<Point>;

    /// Computes the (non-normalized) tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn tangent(&self, t: f64) -> Result<Vector>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns the point at the start of the domain.
    fn start_point(&self) -> Point;

    /// Returns the point at the end of the domain.
    fn end_point(&self) -> Point;

    /// Returns the tight axis-aligned bounds of the curve.
    fn bounds(&self) -> Rectangle;

    /// Returns the curve as a sequence of Bézier segments.
    fn to_bezier(&self) -> Vec<BezierCurve>;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool {
        use crate::math::precision::FuzzyEq;
        self.start_point().fuzzy_eq(&self.end_point())
    }
}

/// Intersection points of two arbitrary curves.
///
/// Both curves are reduced to their Bézier segments; see
/// [`intersect::intersect_segments`] for the treatment of identical and
/// overlapping input.
#[must_use]
pub fn curve_intersections<A, B>(a: &A, b: &B) -> Vec<Point>
where
    A: Curve + ?Sized,
    B: Curve + ?Sized,
{
    intersect::intersect_segments(
        &a.to_bezier(),
        &b.to_bezier(),
        &IntersectionParams::default(),
    )
}
