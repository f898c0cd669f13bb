use crate::geometry::{Point, Vector};

use super::precision;

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` unless the
/// directions are parallel (within precision) or one of them is null.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point,
    d1: &Vector,
    p2: &Point,
    d2: &Vector,
) -> Option<(f64, f64)> {
    if d1.is_null() || d2.is_null() || d1.is_parallel_to(d2) {
        return None;
    }
    let cross = d1.cross(d2);
    let diff = *p2 - *p1;
    let t = diff.cross(d2) / cross;
    let u = diff.cross(d1) / cross;
    Some((t, u))
}

/// Returns `true` if `t` lies in `[0, 1]` within precision.
#[must_use]
pub fn in_unit_interval(t: f64) -> bool {
    precision::greater_or_equal(t, 0.0) && precision::smaller_or_equal(t, 1.0)
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are the segment
/// parameters clamped to `[0, 1]`. Parallel segments yield `None`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point,
    a1: &Point,
    b0: &Point,
    b1: &Point,
) -> Option<(Point, f64, f64)> {
    let da = *a1 - *a0;
    let db = *b1 - *b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Include endpoints within precision.
    if in_unit_interval(t) && in_unit_interval(u) {
        let t = t.clamp(0.0, 1.0);
        Some((*a0 + da * t, t, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Intersection of a line segment with an axis-aligned ellipse.
///
/// The segment goes from `a0` to `a1`; the ellipse has `center` and radii
/// `rx`, `ry`. Returns `(point, t_seg)` pairs in segment order. A segment
/// that only touches the ellipse yields a single point.
#[must_use]
pub fn line_ellipse_intersect_2d(
    a0: &Point,
    a1: &Point,
    center: &Point,
    rx: f64,
    ry: f64,
) -> Vec<(Point, f64)> {
    let mut results = Vec::new();
    if rx <= 0.0 || ry <= 0.0 {
        return results;
    }

    // Work in coordinates where the ellipse is the unit circle.
    let u0 = (a0.x - center.x) / rx;
    let v0 = (a0.y - center.y) / ry;
    let du = (a1.x - a0.x) / rx;
    let dv = (a1.y - a0.y) / ry;

    let a = du * du + dv * dv;
    let b = 2.0 * (u0 * du + v0 * dv);
    let c = u0 * u0 + v0 * v0 - 1.0;

    if precision::equal(a, 0.0) {
        // Degenerate segment: a point, which may lie on the outline.
        if precision::equal(c + 1.0, 1.0) {
            results.push((*a0, 0.0));
        }
        return results;
    }

    let roots = if precision::equal(b * b, 4.0 * a * c) {
        // Tangent case: single root.
        vec![-b / (2.0 * a)]
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return results;
        }
        let disc_sqrt = discriminant.sqrt();
        vec![(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
    };

    for t_seg in roots {
        if !in_unit_interval(t_seg) {
            continue;
        }
        let t_seg = t_seg.clamp(0.0, 1.0);
        results.push((a0.lerp(a1, t_seg), t_seg));
    }

    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::precision::FuzzyEq;
    use approx::assert_abs_diff_eq;

    #[test]
    fn line_line_perpendicular() {
        let p1 = Point::new(0.0, 0.0);
        let d1 = Vector::new(1.0, 0.0);
        let p2 = Point::new(0.5, -1.0);
        let d2 = Vector::new(0.0, 1.0);
        let (t, u) = line_line_intersect_2d(&p1, &d1, &p2, &d2).unwrap();
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        let p1 = Point::new(0.0, 0.0);
        let d1 = Vector::new(1.0, 0.0);
        let p2 = Point::new(0.0, 1.0);
        let d2 = Vector::new(-3.0, 0.0);
        assert!(line_line_intersect_2d(&p1, &d1, &p2, &d2).is_none());
    }

    #[test]
    fn segment_segment_crossing() {
        let (pt, t, u) = segment_segment_intersect_2d(
            &Point::new(0.0, 0.0),
            &Point::new(2.0, 2.0),
            &Point::new(0.0, 2.0),
            &Point::new(2.0, 0.0),
        )
        .unwrap();
        assert!(pt.fuzzy_eq(&Point::new(1.0, 1.0)));
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn segment_segment_touching_endpoints() {
        let hit = segment_segment_intersect_2d(
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 0.0),
            &Point::new(1.0, 0.0),
            &Point::new(1.0, 5.0),
        );
        let (pt, t, u) = hit.unwrap();
        assert!(pt.fuzzy_eq(&Point::new(1.0, 0.0)));
        assert_abs_diff_eq!(t, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn segment_segment_no_crossing() {
        assert!(segment_segment_intersect_2d(
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 0.0),
            &Point::new(0.0, 1.0),
            &Point::new(1.0, 1.0),
        )
        .is_none());
        assert!(segment_segment_intersect_2d(
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 1.0),
            &Point::new(3.0, 0.0),
            &Point::new(2.5, 1.0),
        )
        .is_none());
    }

    #[test]
    fn line_ellipse_two_crossings() {
        let hits = line_ellipse_intersect_2d(
            &Point::new(-5.0, 0.0),
            &Point::new(5.0, 0.0),
            &Point::origin(),
            3.0,
            2.0,
        );
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        assert!(hits[0].0.fuzzy_eq(&Point::new(-3.0, 0.0)));
        assert!(hits[1].0.fuzzy_eq(&Point::new(3.0, 0.0)));
    }

    #[test]
    fn line_ellipse_tangent() {
        let hits = line_ellipse_intersect_2d(
            &Point::new(-3.0, 2.0),
            &Point::new(3.0, 2.0),
            &Point::origin(),
            3.0,
            2.0,
        );
        assert_eq!(hits.len(), 1, "hits={hits:?}");
        assert!(hits[0].0.fuzzy_eq(&Point::new(0.0, 2.0)));
    }

    #[test]
    fn line_ellipse_miss_and_short_segment() {
        assert!(line_ellipse_intersect_2d(
            &Point::new(-5.0, 3.0),
            &Point::new(5.0, 3.0),
            &Point::origin(),
            3.0,
            2.0,
        )
        .is_empty());

        // Segment entirely inside the ellipse.
        assert!(line_ellipse_intersect_2d(
            &Point::new(-1.0, 0.0),
            &Point::new(1.0, 0.0),
            &Point::origin(),
            3.0,
            2.0,
        )
        .is_empty());
    }
}
