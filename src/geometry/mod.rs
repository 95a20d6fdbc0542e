pub mod curve;
pub mod surface;

pub use curve::{Arc, Curve, CurveDomain, LineSegment, LocationCurve};
pub use surface::{OrientedBox, Plane};
