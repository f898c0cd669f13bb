use std::f64::consts::TAU;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{GeometryError, Result};
use crate::math::precision::{self, FuzzyEq};
use crate::math::Vector2;

use super::Point;

/// A direction with magnitude in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The vector pointing from `from` to `to`.
    #[must_use]
    pub fn between(from: &Point, to: &Point) -> Self {
        *to - *from
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn square_length(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[must_use]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product of the two vectors.
    #[must_use]
    pub fn cross(&self, other: &Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Returns `true` if this is the zero vector, within precision.
    #[must_use]
    pub fn is_null(&self) -> bool {
        precision::equal(self.x, 0.0) && precision::equal(self.y, 0.0)
    }

    /// Returns `true` if both vectors point along the same line.
    ///
    /// The cross product is normalized by the vector lengths so the test does
    /// not depend on magnitudes. A null vector is parallel to everything.
    #[must_use]
    pub fn is_parallel_to(&self, other: &Vector) -> bool {
        if self.is_null() || other.is_null() {
            return true;
        }
        precision::equal(self.cross(other) / (self.length() * other.length()), 0.0)
    }

    /// Returns `true` if both vectors are perpendicular. A null vector is
    /// orthogonal to everything.
    #[must_use]
    pub fn is_orthogonal_to(&self, other: &Vector) -> bool {
        if self.is_null() || other.is_null() {
            return true;
        }
        precision::equal(self.dot(other) / (self.length() * other.length()), 0.0)
    }

    /// Returns the unit vector with the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] for a null vector.
    pub fn normalized(&self) -> Result<Vector> {
        if self.is_null() {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(*self / self.length())
    }

    /// The vector rotated by 90° counter-clockwise, `(-y, x)`.
    #[must_use]
    pub fn orthogonal_complement(&self) -> Vector {
        Vector::new(-self.y, self.x)
    }

    /// Rotates counter-clockwise by `angle` radians (mathematical orientation).
    #[must_use]
    pub fn rotated_ccw(&self, angle: f64) -> Vector {
        let (sin, cos) = angle.sin_cos();
        Vector::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[must_use]
    pub fn rotated_cw(&self, angle: f64) -> Vector {
        self.rotated_ccw(-angle)
    }

    /// Angle between the positive x axis and this vector, in `[0, 2π)`.
    #[must_use]
    pub fn x_axis_angle(&self) -> f64 {
        normalize_angle(self.y.atan2(self.x))
    }

    /// Unsigned angle between the two vectors, in `[0, π]`.
    #[must_use]
    pub fn angle(&self, other: &Vector) -> f64 {
        let norm = self.length() * other.length();
        if norm <= 0.0 {
            return 0.0;
        }
        (self.dot(other) / norm).clamp(-1.0, 1.0).acos()
    }

    /// Counter-clockwise angle from this vector to `other`, in `[0, 2π)`.
    #[must_use]
    pub fn angle_ccw(&self, other: &Vector) -> f64 {
        normalize_angle(other.x_axis_angle() - self.x_axis_angle())
    }

    /// Clockwise angle from this vector to `other`, in `[0, 2π)`.
    #[must_use]
    pub fn angle_cw(&self, other: &Vector) -> f64 {
        normalize_angle(TAU - self.angle_ccw(other))
    }
}

/// Maps an angle into `[0, 2π)`, snapping values within precision of a full
/// turn to zero.
fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if precision::equal(a, TAU) {
        0.0
    } else {
        a
    }
}

impl FuzzyEq for Vector {
    fn fuzzy_eq(&self, other: &Vector) -> bool {
        precision::equal(self.x, other.x) && precision::equal(self.y, other.y)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        Vector::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl From<Vector2> for Vector {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector> for Vector2 {
    fn from(v: Vector) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector({}, {})", self.x, self.y)
    }
}
