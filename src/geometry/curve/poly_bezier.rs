use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::shape::Path;
use crate::math::precision::FuzzyEq;
use crate::transform::AffineTransform;

use super::{BezierCurve, Curve, CurveDomain, Point, Rectangle, Vector};

/// A continuous chain of Bézier curves.
///
/// Segment `i` covers the parameter range `[i, i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyBezier {
    segments: Vec<BezierCurve>,
}

impl PolyBezier {
    /// Creates a chain from segments whose end points meet.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if `segments` is empty or a
    /// segment does not start where its predecessor ends.
    pub fn new(segments: Vec<BezierCurve>) -> Result<Self> {
        if segments.is_empty() {
            return Err(GeometryError::Degenerate("empty poly-Bézier".into()).into());
        }
        if let Some(i) = segments
            .windows(2)
            .position(|w| w[0].end().fuzzy_ne(&w[1].start()))
        {
            return Err(GeometryError::Degenerate(format!(
                "segment {} does not start at the end of segment {i}",
                i + 1
            ))
            .into());
        }
        Ok(Self { segments })
    }

    /// Interpolates `points` with a C1-continuous cubic chain.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for fewer than two points.
    pub fn interpolate_cubic(points: &[Point]) -> Result<Self> {
        Self::interpolate_cubic_with_coefficient(1.0, points)
    }

    /// Interpolates `points` with cubic segments whose handles are scaled by
    /// `curve_width_coefficient` (`0` yields straight segments).
    ///
    /// Each handle is parallel to the chord between the neighbours of its
    /// anchor point; the first and last anchor use themselves as the missing
    /// neighbour.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for fewer than two points.
    pub fn interpolate_cubic_with_coefficient(
        curve_width_coefficient: f64,
        points: &[Point],
    ) -> Result<Self> {
        let n = points.len();
        if n < 2 {
            return Err(OperationError::InvalidInput(format!(
                "cubic interpolation needs at least 2 points, got {n}"
            ))
            .into());
        }

        let k = curve_width_coefficient / 6.0;
        let segments = (0..n - 1)
            .map(|i| {
                let prev = points[i.saturating_sub(1)];
                let start = points[i];
                let end = points[i + 1];
                let next = points[(i + 2).min(n - 1)];
                BezierCurve::cubic(
                    start,
                    start + (end - prev) * k,
                    end - (next - start) * k,
                    end,
                )
            })
            .collect();
        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[BezierCurve] {
        &self.segments
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if `p` lies on one of the segments.
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        self.segments.iter().any(|s| s.contains(p))
    }

    /// Intersection points with any other curve.
    #[must_use]
    pub fn intersections<C: Curve + ?Sized>(&self, other: &C) -> Vec<Point> {
        super::curve_intersections(self, other)
    }

    #[must_use]
    pub fn transformed(&self, t: &AffineTransform) -> Self {
        Self {
            segments: self.segments.iter().map(|s| s.transformed(t)).collect(),
        }
    }

    /// Returns an open path tracing the chain.
    #[must_use]
    pub fn to_path(&self) -> Path {
        Path::from_curves(&self.segments)
    }

    /// Maps a global parameter to a segment and its local parameter.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn locate(&self, t: f64) -> Result<(&BezierCurve, f64)> {
        let t = self.domain().clamp(t)?;
        let last = self.segments.len() - 1;
        let index = (t.floor() as usize).min(last);
        Ok((&self.segments[index], t - index as f64))
    }
}

impl Curve for PolyBezier {
    fn point_at(&self, t: f64) -> Result<Point> {
        let (segment, local) = self.locate(t)?;
        Ok(segment.sample(local))
    }

    fn tangent(&self, t: f64) -> Result<Vector> {
        let (segment, local) = self.locate(t)?;
        Ok(segment.derivative_at(local))
    }

    #[allow(clippy::cast_precision_loss)]
    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.segments.len() as f64)
    }

    fn start_point(&self) -> Point {
        self.segments[0].start()
    }

    fn end_point(&self) -> Point {
        self.segments[self.segments.len() - 1].end()
    }

    fn bounds(&self) -> Rectangle {
        self.segments[1..]
            .iter()
            .fold(self.segments[0].bounds(), |acc, s| acc.union(&s.bounds()))
    }

    fn to_bezier(&self) -> Vec<BezierCurve> {
        self.segments.clone()
    }
}

impl FuzzyEq for PolyBezier {
    fn fuzzy_eq(&self, other: &PolyBezier) -> bool {
        self.segments.as_slice().fuzzy_eq(other.segments.as_slice())
    }
}
