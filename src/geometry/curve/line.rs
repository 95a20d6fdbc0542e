use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A bounded straight segment defined by a start point, a unit direction and
/// a length.
///
/// The parametric form is: `P(t) = start + t * direction`, `t ∈ [0, length]`.
#[derive(Debug, Clone)]
pub struct LineSegment {
    start: Point3,
    direction: Vector3,
    length: f64,
}

impl LineSegment {
    /// Creates a segment between two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn from_points(start: Point3, end: Point3) -> Result<Self> {
        let delta = end - start;
        let length = delta.norm();
        if length < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            start,
            direction: delta / length,
            length,
        })
    }

    /// Returns the start point of the segment.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the unit direction vector of the segment.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }
}

impl Curve for LineSegment {
    fn evaluate(&self, t: f64) -> Point3 {
        self.start + self.direction * t
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.length)
    }

    fn length(&self) -> f64 {
        self.length
    }
}
