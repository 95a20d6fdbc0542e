use tracing::warn;

use crate::error::Result;
use crate::geometry::OrientedBox;
use crate::host::RayCaster;
use crate::locate::{LinkedId, SurfaceHit};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Document, ElementId};

/// Casts rays against the walls of one document that are visible in a view.
///
/// Every wall the ray passes through is reported twice, once where the ray
/// enters the wall and once where it leaves, unless the ray starts inside the
/// wall. Walls are visited in document order and their hits are not sorted
/// by distance.
#[derive(Debug)]
pub struct WallIntersector {
    walls: Vec<(ElementId, OrientedBox)>,
}

impl WallIntersector {
    /// Collects the solids of the walls visible in `view`.
    ///
    /// Walls whose solid is degenerate are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if `view` is not a 3D view of `doc`.
    pub fn new(doc: &Document, view: ElementId) -> Result<Self> {
        let view = doc.view(view)?;
        let walls = doc
            .walls()
            .filter(|(id, _)| view.shows(*id))
            .filter_map(|(id, wall)| match wall.solid() {
                Ok(solid) => Some((id, solid)),
                Err(err) => {
                    warn!(wall = ?id, error = %err, "skipping wall without a valid solid");
                    None
                }
            })
            .collect();
        Ok(Self { walls })
    }
}

impl RayCaster for WallIntersector {
    fn cast(&self, origin: &Point3, direction: &Vector3) -> Vec<SurfaceHit> {
        let norm = direction.norm();
        if norm < TOLERANCE {
            return Vec::new();
        }
        let dir = direction / norm;

        let mut hits = Vec::new();
        for (id, solid) in &self.walls {
            let Some((t_enter, t_exit)) = solid.ray_interval(origin, &dir) else {
                continue;
            };
            if t_exit < 0.0 {
                continue;
            }
            let hit = |distance| SurfaceHit {
                surface_id: *id,
                linked_id: LinkedId::NotLinked,
                distance,
            };
            if t_enter >= 0.0 {
                hits.push(hit(t_enter));
            }
            hits.push(hit(t_exit));
        }
        hits
    }
}
