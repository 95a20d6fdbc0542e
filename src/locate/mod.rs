//! Penetration locator: where a straight conduit run passes through walls.

mod identity;

pub use identity::{same_surface, LinkedId, SurfaceIdentity};

use std::collections::HashSet;

use crate::error::{GeometryError, Result};
use crate::geometry::{Curve, LineSegment};
use crate::host::RayCaster;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::model::ElementId;

/// A straight duct or pipe run treated as a line for intersection purposes.
#[derive(Debug, Clone)]
pub struct ConduitSegment {
    start: Point3,
    direction: Vector3,
    length: f64,
    diameter: f64,
}

impl ConduitSegment {
    /// Creates a segment from a start point, a direction and a length.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction is zero-length, or the length or the
    /// diameter is not positive.
    pub fn new(start: Point3, direction: Vector3, length: f64, diameter: f64) -> Result<Self> {
        let norm = direction.norm();
        if norm < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        if length < TOLERANCE {
            return Err(GeometryError::Degenerate("conduit length must be positive".into()).into());
        }
        if diameter < TOLERANCE {
            return Err(GeometryError::Degenerate("conduit diameter must be positive".into()).into());
        }
        Ok(Self {
            start,
            direction: direction / norm,
            length,
            diameter,
        })
    }

    /// Creates a segment running along a straight centerline.
    ///
    /// The caller guarantees a positive `diameter`.
    #[must_use]
    pub fn along(line: &LineSegment, diameter: f64) -> Self {
        Self {
            start: *line.start(),
            direction: *line.direction(),
            length: line.length(),
            diameter,
        }
    }

    /// Returns the start point of the run.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the unit direction of the run.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Returns the length of the run.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the outer diameter of the run.
    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Point at `distance` along the run.
    #[must_use]
    pub fn point_at(&self, distance: f64) -> Point3 {
        self.start + self.direction * distance
    }
}

/// One ray/wall intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Element that was hit.
    pub surface_id: ElementId,
    /// Linked element, if the hit lives in a linked document.
    pub linked_id: LinkedId,
    /// Distance from the ray origin along its direction, `>= 0`.
    pub distance: f64,
}

impl SurfaceHit {
    /// Returns the identity used to deduplicate hits.
    #[must_use]
    pub fn identity(&self) -> SurfaceIdentity {
        SurfaceIdentity::from(self)
    }
}

/// Where an opening must be cut and how large it is.
#[derive(Debug, Clone, PartialEq)]
pub struct PenetrationRequest {
    /// Point on the conduit centerline where it meets the surface.
    pub position: Point3,
    /// Surface the opening is cut into.
    pub surface_id: ElementId,
    /// Opening size.
    pub diameter: f64,
}

/// Finds the surfaces a conduit run passes through.
///
/// Hits at or beyond the end of the run are dropped. Hits that reference the
/// same surface are collapsed to the first one the caster returned, whatever
/// its distance: when a surface is reported more than once (entry and exit
/// faces, for instance) the opening lands on the first reported hit, not
/// necessarily the nearest one.
pub fn locate(segment: &ConduitSegment, caster: &impl RayCaster) -> Vec<PenetrationRequest> {
    let mut seen = HashSet::new();
    caster
        .cast(&segment.start, &segment.direction)
        .into_iter()
        .filter(|hit| hit.distance < segment.length)
        .filter(|hit| seen.insert(hit.identity()))
        .map(|hit| PenetrationRequest {
            position: segment.point_at(hit.distance),
            surface_id: hit.surface_id,
            diameter: segment.diameter,
        })
        .collect()
}
