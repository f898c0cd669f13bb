use crate::geometry::Point;

/// Winding number of the closed polygon `points` around `p`.
///
/// The polygon is implicitly closed. Each upward edge crossing to the left
/// of `p` counts +1, each downward crossing to the right counts -1.
#[must_use]
pub fn winding_number(p: &Point, points: &[Point]) -> i32 {
    let n = points.len();
    if n < 2 {
        return 0;
    }
    let mut winding = 0;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let side = (*b - *a).cross(&(*p - *a));
        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}
