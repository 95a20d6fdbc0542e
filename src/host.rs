//! Seams between the hole placement logic and the modeling host.
//!
//! The command reads the host through [`ModelRepository`], casts rays through
//! a [`RayCaster`] and writes through [`PlacementHost`]. The in-memory
//! [`Application`](crate::model::Application) implements all three; tests use
//! closures as casters.

use crate::error::Result;
use crate::geometry::LocationCurve;
use crate::locate::{ConduitSegment, SurfaceHit};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::model::{DocumentId, ElementId};
use crate::placement::PlacementCommand;

/// Casts rays against a fixed set of target surfaces.
pub trait RayCaster {
    /// Returns every surface hit along the ray `origin + t * direction`,
    /// `t >= 0`, in the caster's own order.
    fn cast(&self, origin: &Point3, direction: &Vector3) -> Vec<SurfaceHit>;
}

impl<F> RayCaster for F
where
    F: Fn(&Point3, &Vector3) -> Vec<SurfaceHit>,
{
    fn cast(&self, origin: &Point3, direction: &Vector3) -> Vec<SurfaceHit> {
        self(origin, direction)
    }
}

/// Kind of conduit element collected from the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConduitKind {
    Duct,
    Pipe,
}

/// Read-only, typed queries over the host's documents.
pub trait ModelRepository {
    /// The document holes are placed into.
    fn active_document(&self) -> DocumentId;

    /// First open document whose title contains `marker`.
    fn find_document_by_title_substring(&self, marker: &str) -> Option<DocumentId>;

    /// First family symbol of the family named `family_name`.
    fn find_family_symbol(&self, doc: DocumentId, family_name: &str) -> Option<ElementId>;

    /// First 3D view that is not a template.
    fn find_first_non_template_view(&self, doc: DocumentId) -> Option<ElementId>;

    /// Every conduit run of the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not exist.
    fn segments_of_kind(&self, doc: DocumentId, kind: ConduitKind) -> Result<Vec<ConduitRun>>;

    /// A caster against the walls of `doc` visible in `view`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document or view does not exist.
    fn surface_caster(&self, doc: DocumentId, view: ElementId) -> Result<impl RayCaster + '_>;

    /// The level hosting a surface element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element does not exist or is not a wall.
    fn host_level(&self, doc: DocumentId, surface: ElementId) -> Result<ElementId>;
}

/// Mutating side of the host.
pub trait PlacementHost {
    /// Runs `work` inside a named transaction on `doc`.
    ///
    /// Every mutation made by `work` is committed when it returns `Ok` and
    /// rolled back when it returns `Err`.
    ///
    /// # Errors
    ///
    /// Returns the error from `work`, or an error if the transaction cannot
    /// be opened.
    fn transaction<T, F>(&mut self, doc: DocumentId, name: &str, work: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>;

    /// Activates a family symbol. Returns `true` if it was inactive.
    ///
    /// # Errors
    ///
    /// Returns an error outside of a transaction or if the symbol is unknown.
    fn activate_family_symbol(&mut self, doc: DocumentId, symbol: ElementId) -> Result<bool>;

    /// Executes one placement command, returning the new instance id.
    ///
    /// # Errors
    ///
    /// Returns an error outside of a transaction or if the command references
    /// missing elements or parameters.
    fn place(&mut self, doc: DocumentId, command: &PlacementCommand) -> Result<ElementId>;
}

/// The repository's view of one duct or pipe.
#[derive(Debug, Clone)]
pub struct ConduitRun {
    /// Element in the source document.
    pub element: ElementId,
    pub kind: ConduitKind,
    /// Centerline of the run.
    pub location: LocationCurve,
    /// Outer diameter; `None` for non-round profiles.
    pub diameter: Option<f64>,
}

impl ConduitRun {
    /// The straight segment to locate penetrations for, or `None` for curved
    /// runs and runs without a positive diameter.
    #[must_use]
    pub fn segment(&self) -> Option<ConduitSegment> {
        let line = self.location.as_line()?;
        let diameter = self.diameter.filter(|d| *d >= TOLERANCE)?;
        Some(ConduitSegment::along(line, diameter))
    }
}
