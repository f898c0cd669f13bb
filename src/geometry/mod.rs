pub mod curve;
mod dimension;
mod point;
pub mod shape;
mod vector;

pub use curve::{
    curve_intersections, BezierCurve, CubicCurve, Curve, CurveDomain, IntersectionParams, Line,
    PolyBezier,
};
pub use dimension::Dimension;
pub use point::Point;
pub use shape::{
    shape_intersections, Ellipse, Path, PathBuilder, Rectangle, Segment, Shape, WindingRule,
};
pub use vector::Vector;
