mod arc;
mod line;

pub use arc::Arc;
pub use line::LineSegment;

use crate::math::Point3;

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }
}

/// Trait for bounded parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    fn evaluate(&self, t: f64) -> Point3;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Arc length of the curve over its whole domain.
    fn length(&self) -> f64;

    /// Point at the start of the domain.
    fn start_point(&self) -> Point3 {
        self.evaluate(self.domain().t_min)
    }

    /// Point at the end of the domain.
    fn end_point(&self) -> Point3 {
        self.evaluate(self.domain().t_max)
    }
}

/// The location curve of a linear element such as a duct, pipe or wall.
#[derive(Debug, Clone)]
pub enum LocationCurve {
    /// A straight run.
    Line(LineSegment),
    /// A curved run.
    Arc(Arc),
}

impl LocationCurve {
    /// Returns the straight segment, or `None` for curved runs.
    #[must_use]
    pub fn as_line(&self) -> Option<&LineSegment> {
        match self {
            Self::Line(line) => Some(line),
            Self::Arc(_) => None,
        }
    }

    /// Returns the curve as a trait object.
    #[must_use]
    pub fn as_curve(&self) -> &dyn Curve {
        match self {
            Self::Line(line) => line,
            Self::Arc(arc) => arc,
        }
    }
}
