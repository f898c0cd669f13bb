use std::fmt;

use crate::error::{Result, TransformError};
use crate::geometry::{Point, Vector};
use crate::math::precision::{self, FuzzyEq};
use crate::math::Matrix3;

/// A 2D affine transform `[x', y'] = M · [x, y] + t`.
///
/// The coefficients follow the usual naming: `m00`, `m01`, `m10`, `m11` form
/// the linear part `M` and `m02`, `m12` the translation `t`. Internally the
/// transform is kept as a homogeneous 3x3 matrix.
///
/// Builder-style operations (`translate`, `rotate`, `scale_by`, `shear_by`)
/// append to the transform, i.e. the new operation is applied to points
/// *before* the existing ones. Every mutating operation has a pure
/// counterpart returning a new transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: Matrix3,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Creates a transform from its six coefficients, in column order.
    #[must_use]
    pub fn new(m00: f64, m10: f64, m01: f64, m11: f64, m02: f64, m12: f64) -> Self {
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            m00, m01, m02,
            m10, m11, m12,
            0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// Creates a transform from `[m00, m10, m01, m11, m02, m12]`.
    #[must_use]
    pub fn from_flat_matrix(flat: &[f64; 6]) -> Self {
        Self::new(flat[0], flat[1], flat[2], flat[3], flat[4], flat[5])
    }

    #[must_use]
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Rotation by `theta` radians about the origin.
    #[must_use]
    pub fn rotation(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::from_sin_cos(sin, cos)
    }

    /// Rotation by `theta` radians about `anchor`.
    #[must_use]
    pub fn rotation_about(theta: f64, anchor: &Point) -> Self {
        Self::about(&Self::rotation(theta), anchor)
    }

    /// Rotation that maps the positive x axis onto the direction of `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`](crate::error::GeometryError::ZeroVector) if `v` is null.
    pub fn rotation_from_vector(v: &Vector) -> Result<Self> {
        let unit = v.normalized()?;
        Ok(Self::from_sin_cos(unit.y, unit.x))
    }

    /// Like [`rotation_from_vector`](Self::rotation_from_vector), about `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`](crate::error::GeometryError::ZeroVector) if `v` is null.
    pub fn rotation_from_vector_about(v: &Vector, anchor: &Point) -> Result<Self> {
        Ok(Self::about(&Self::rotation_from_vector(v)?, anchor))
    }

    /// Rotation by `quadrants` quarter turns, with exact coefficients.
    #[must_use]
    pub fn quadrant_rotation(quadrants: i32) -> Self {
        match quadrants.rem_euclid(4) {
            0 => Self::identity(),
            1 => Self::from_sin_cos(1.0, 0.0),
            2 => Self::from_sin_cos(0.0, -1.0),
            _ => Self::from_sin_cos(-1.0, 0.0),
        }
    }

    #[must_use]
    pub fn quadrant_rotation_about(quadrants: i32, anchor: &Point) -> Self {
        Self::about(&Self::quadrant_rotation(quadrants), anchor)
    }

    #[must_use]
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Shear transform: `x' = x + shx * y`, `y' = shy * x + y`.
    #[must_use]
    pub fn shear(shx: f64, shy: f64) -> Self {
        Self::new(1.0, shy, shx, 1.0, 0.0, 0.0)
    }

    fn from_sin_cos(sin: f64, cos: f64) -> Self {
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Conjugates `t` with a translation so that it operates about `anchor`.
    fn about(t: &AffineTransform, anchor: &Point) -> Self {
        Self::translation(anchor.x, anchor.y)
            .concatenated(t)
            .concatenated(&Self::translation(-anchor.x, -anchor.y))
    }

    /// Returns `[m00, m10, m01, m11, m02, m12]`.
    #[must_use]
    pub fn flat_matrix(&self) -> [f64; 6] {
        let m = &self.matrix;
        [
            m[(0, 0)],
            m[(1, 0)],
            m[(0, 1)],
            m[(1, 1)],
            m[(0, 2)],
            m[(1, 2)],
        ]
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        let m = &self.matrix;
        m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]
    }

    /// The determinant is compared against the squared largest linear
    /// coefficient, so uniformly small scales stay invertible.
    fn is_singular(&self) -> bool {
        let [m00, m10, m01, m11, _, _] = self.flat_matrix();
        let scale = m00.abs().max(m10.abs()).max(m01.abs()).max(m11.abs());
        self.determinant().abs() <= precision::PRECISION_FRACTION * scale * scale
    }

    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.matrix[(0, 0)]
    }

    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.matrix[(1, 1)]
    }

    #[must_use]
    pub fn shear_x(&self) -> f64 {
        self.matrix[(0, 1)]
    }

    #[must_use]
    pub fn shear_y(&self) -> f64 {
        self.matrix[(1, 0)]
    }

    #[must_use]
    pub fn translate_x(&self) -> f64 {
        self.matrix[(0, 2)]
    }

    #[must_use]
    pub fn translate_y(&self) -> f64 {
        self.matrix[(1, 2)]
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.fuzzy_eq(&Self::identity())
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.concatenate(&Self::translation(tx, ty));
    }

    #[must_use]
    pub fn translated(&self, tx: f64, ty: f64) -> Self {
        self.concatenated(&Self::translation(tx, ty))
    }

    pub fn rotate(&mut self, theta: f64) {
        self.concatenate(&Self::rotation(theta));
    }

    #[must_use]
    pub fn rotated(&self, theta: f64) -> Self {
        self.concatenated(&Self::rotation(theta))
    }

    pub fn rotate_about(&mut self, theta: f64, anchor: &Point) {
        self.concatenate(&Self::rotation_about(theta, anchor));
    }

    #[must_use]
    pub fn rotated_about(&self, theta: f64, anchor: &Point) -> Self {
        self.concatenated(&Self::rotation_about(theta, anchor))
    }

    /// Appends a quarter-turn rotation with exact coefficients.
    pub fn quadrant_rotate(&mut self, quadrants: i32) {
        self.concatenate(&Self::quadrant_rotation(quadrants));
    }

    pub fn scale_by(&mut self, sx: f64, sy: f64) {
        self.concatenate(&Self::scale(sx, sy));
    }

    #[must_use]
    pub fn scaled_by(&self, sx: f64, sy: f64) -> Self {
        self.concatenated(&Self::scale(sx, sy))
    }

    pub fn shear_by(&mut self, shx: f64, shy: f64) {
        self.concatenate(&Self::shear(shx, shy));
    }

    #[must_use]
    pub fn sheared_by(&self, shx: f64, shy: f64) -> Self {
        self.concatenated(&Self::shear(shx, shy))
    }

    /// `self = self · other`: the result applies `other` first, then `self`.
    pub fn concatenate(&mut self, other: &AffineTransform) {
        self.matrix *= other.matrix;
    }

    #[must_use]
    pub fn concatenated(&self, other: &AffineTransform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// `self = other · self`: the result applies `self` first, then `other`.
    pub fn pre_concatenate(&mut self, other: &AffineTransform) {
        self.matrix = other.matrix * self.matrix;
    }

    #[must_use]
    pub fn pre_concatenated(&self, other: &AffineTransform) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Returns the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertible`] if the determinant is zero
    /// relative to the magnitude of the linear coefficients.
    pub fn inverse(&self) -> Result<Self> {
        let determinant = self.determinant();
        if self.is_singular() {
            return Err(TransformError::NonInvertible { determinant }.into());
        }
        let matrix = self
            .matrix
            .try_inverse()
            .ok_or(TransformError::NonInvertible { determinant })?;
        Ok(Self { matrix })
    }

    /// Replaces this transform by its inverse. On failure `self` is left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertible`] if the determinant is zero
    /// relative to the magnitude of the linear coefficients.
    pub fn invert(&mut self) -> Result<()> {
        *self = self.inverse()?;
        Ok(())
    }

    /// Maps `p` through this transform.
    #[must_use]
    pub fn transform_point(&self, p: &Point) -> Point {
        let [m00, m10, m01, m11, m02, m12] = self.flat_matrix();
        Point::new(m00 * p.x + m01 * p.y + m02, m10 * p.x + m11 * p.y + m12)
    }

    /// Maps every point of `points`, returning the results in order.
    #[must_use]
    pub fn transform_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.transform_point(p)).collect()
    }

    /// Applies only the linear part (no translation), for direction vectors.
    #[must_use]
    pub fn delta_transform(&self, v: &Vector) -> Vector {
        let [m00, m10, m01, m11, _, _] = self.flat_matrix();
        Vector::new(m00 * v.x + m01 * v.y, m10 * v.x + m11 * v.y)
    }

    /// Maps `p` through the inverse of this transform.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertible`] if this transform has no
    /// inverse.
    pub fn inverse_transform_point(&self, p: &Point) -> Result<Point> {
        Ok(self.inverse()?.transform_point(p))
    }
}

impl FuzzyEq for AffineTransform {
    fn fuzzy_eq(&self, other: &AffineTransform) -> bool {
        self.flat_matrix()[..].fuzzy_eq(&other.flat_matrix()[..])
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [m00, m10, m01, m11, m02, m12] = self.flat_matrix();
        write!(f, "AffineTransform[[{m00}, {m01}, {m02}], [{m10}, {m11}, {m12}]]")
    }
}
