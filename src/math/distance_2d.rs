use crate::geometry::Point;

/// Returns the minimum distance from `p` to the line segment from `a` to `b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point, a: &Point, b: &Point) -> f64 {
    p.distance(&closest_point_on_segment(p, a, b))
}

/// Returns the point of the segment `a`–`b` closest to `p`.
#[must_use]
pub fn closest_point_on_segment(p: &Point, a: &Point, b: &Point) -> Point {
    let d = *b - *a;
    let len_sq = d.square_length();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return *a;
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((*p - *a).dot(&d) / len_sq).clamp(0.0, 1.0);
    *a + d * t
}

/// Returns the minimum distance between the segments `a0`–`a1` and `b0`–`b1`,
/// assuming they do not cross.
#[must_use]
pub fn segment_to_segment_dist(a0: &Point, a1: &Point, b0: &Point, b1: &Point) -> f64 {
    point_to_segment_dist(a0, b0, b1)
        .min(point_to_segment_dist(a1, b0, b1))
        .min(point_to_segment_dist(b0, a0, a1))
        .min(point_to_segment_dist(b1, a0, a1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn projection_inside_segment() {
        let d = point_to_segment_dist(
            &Point::new(1.0, 2.0),
            &Point::new(0.0, 0.0),
            &Point::new(4.0, 0.0),
        );
        assert_abs_diff_eq!(d, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn projection_clamped_to_endpoint() {
        let d = point_to_segment_dist(
            &Point::new(7.0, 4.0),
            &Point::new(0.0, 0.0),
            &Point::new(4.0, 0.0),
        );
        assert_abs_diff_eq!(d, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_segment() {
        let d = point_to_segment_dist(
            &Point::new(3.0, 4.0),
            &Point::new(0.0, 0.0),
            &Point::new(0.0, 0.0),
        );
        assert_abs_diff_eq!(d, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_segments() {
        let d = segment_to_segment_dist(
            &Point::new(0.0, 0.0),
            &Point::new(4.0, 0.0),
            &Point::new(1.0, 0.5),
            &Point::new(3.0, 0.5),
        );
        assert_abs_diff_eq!(d, 0.5, epsilon = 1e-12);
    }
}
