pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod precision;
pub mod roots;

/// 2D point type used for interop with nalgebra.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type used for interop with nalgebra.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3x3 homogeneous transformation matrix.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Tolerance below which a quantity is treated as exactly zero in
/// closed-form solvers, independent of operand magnitude.
pub const TOLERANCE: f64 = 1e-12;
