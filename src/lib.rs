pub mod error;
pub mod geometry;
pub mod math;
pub mod transform;

pub use error::{PlanarError, Result};
pub use geometry::{
    BezierCurve, CubicCurve, Curve, Dimension, Ellipse, Line, Path, Point, PolyBezier, Rectangle,
    Shape, Vector,
};
pub use math::precision::FuzzyEq;
pub use transform::AffineTransform;
