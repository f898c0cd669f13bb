use super::TOLERANCE;

/// Real roots of `a * t + b = 0`.
///
/// Returns an empty vector when the equation is degenerate (`a ≈ 0`).
#[must_use]
pub fn solve_linear(a: f64, b: f64) -> Vec<f64> {
    if a.abs() < TOLERANCE {
        return Vec::new();
    }
    vec![-b / a]
}

/// Real roots of `a * t² + b * t + c = 0`, in ascending order.
///
/// Falls back to [`solve_linear`] when `a` vanishes. A double root is
/// reported once.
#[must_use]
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    let scale = a.abs().max(b.abs()).max(c.abs());
    if scale < TOLERANCE {
        return Vec::new();
    }
    if a.abs() < TOLERANCE * scale {
        return solve_linear(b, c);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < -TOLERANCE * scale * scale {
        return Vec::new();
    }
    if discriminant <= TOLERANCE * scale * scale {
        return vec![-b / (2.0 * a)];
    }

    // Numerically stable form: avoid cancellation between -b and sqrt(disc).
    let sqrt_disc = discriminant.sqrt();
    let q = -0.5 * (b + b.signum() * sqrt_disc);
    let (r0, r1) = if q.abs() < TOLERANCE {
        ((-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a))
    } else {
        (q / a, c / q)
    };
    if r0 <= r1 {
        vec![r0, r1]
    } else {
        vec![r1, r0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn linear_root() {
        let roots = solve_linear(2.0, -4.0);
        assert_eq!(roots.len(), 1);
        assert_abs_diff_eq!(roots[0], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn linear_degenerate() {
        assert!(solve_linear(0.0, 1.0).is_empty());
    }

    #[test]
    fn quadratic_two_roots_sorted() {
        // (t - 3)(t + 1) = t² - 2t - 3
        let roots = solve_quadratic(1.0, -2.0, -3.0);
        assert_eq!(roots.len(), 2);
        assert_abs_diff_eq!(roots[0], -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(roots[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn quadratic_double_root() {
        let roots = solve_quadratic(1.0, -2.0, 1.0);
        assert_eq!(roots.len(), 1);
        assert_abs_diff_eq!(roots[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn quadratic_no_real_roots() {
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn quadratic_degenerates_to_linear() {
        let roots = solve_quadratic(0.0, 2.0, -1.0);
        assert_eq!(roots.len(), 1);
        assert_abs_diff_eq!(roots[0], 0.5, epsilon = 1e-12);
    }
}
