use std::collections::{BTreeMap, HashSet};

use crate::error::{GeometryError, Result};
use crate::geometry::{Curve, LineSegment, LocationCurve, OrientedBox};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::placement::StructuralType;

use super::ElementId;

/// Any element stored in a [`Document`](super::Document).
#[derive(Debug, Clone)]
pub enum Element {
    Level(Level),
    Wall(Wall),
    Duct(Duct),
    Pipe(Pipe),
    View3D(View3D),
    FamilySymbol(FamilySymbol),
    FamilyInstance(FamilyInstance),
}

impl Element {
    /// Human-readable kind name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Level(_) => "level",
            Self::Wall(_) => "wall",
            Self::Duct(_) => "duct",
            Self::Pipe(_) => "pipe",
            Self::View3D(_) => "3D view",
            Self::FamilySymbol(_) => "family symbol",
            Self::FamilyInstance(_) => "family instance",
        }
    }
}

/// A named elevation.
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub elevation: f64,
}

/// A straight wall.
///
/// The solid spans the baseline horizontally, `thickness` centered on the
/// baseline, and `height` upwards from the baseline.
#[derive(Debug, Clone)]
pub struct Wall {
    /// Baseline at the bottom of the wall.
    pub location: LineSegment,
    pub thickness: f64,
    pub height: f64,
    /// Level the wall is based on.
    pub level: ElementId,
}

impl Wall {
    /// Returns the wall solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the baseline is vertical or the wall has no
    /// thickness or height.
    pub fn solid(&self) -> Result<OrientedBox> {
        let dir = self.location.direction();
        let along = Vector3::new(dir.x, dir.y, 0.0);
        let run = along.norm() * self.location.length();
        if run < TOLERANCE {
            return Err(GeometryError::Degenerate("wall baseline is vertical".into()).into());
        }
        let along = along.normalize();
        let up = Vector3::z();
        let across = up.cross(&along);

        let corner: Point3 = *self.location.start() - across * (self.thickness / 2.0);
        OrientedBox::new(corner, [along, across, up], [run, self.thickness, self.height])
    }
}

/// Cross-section of a duct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DuctProfile {
    Round { diameter: f64 },
    Rectangular { width: f64, height: f64 },
}

/// An air duct run.
#[derive(Debug, Clone)]
pub struct Duct {
    pub location: LocationCurve,
    pub profile: DuctProfile,
}

impl Duct {
    /// Outer diameter of round ducts; `None` for rectangular ones.
    #[must_use]
    pub fn diameter(&self) -> Option<f64> {
        match self.profile {
            DuctProfile::Round { diameter } => Some(diameter),
            DuctProfile::Rectangular { .. } => None,
        }
    }
}

/// A pipe run.
#[derive(Debug, Clone)]
pub struct Pipe {
    pub location: LocationCurve,
    pub diameter: f64,
}

/// A 3D view, used to decide which elements rays can hit.
#[derive(Debug, Clone, Default)]
pub struct View3D {
    pub name: String,
    pub is_template: bool,
    /// Elements hidden in this view.
    pub hidden: HashSet<ElementId>,
}

impl View3D {
    /// Creates a visible, non-template view.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns whether `element` is visible in the view.
    #[must_use]
    pub fn shows(&self, element: ElementId) -> bool {
        !self.hidden.contains(&element)
    }
}

/// A placeable type of a loadable family.
#[derive(Debug, Clone)]
pub struct FamilySymbol {
    pub family_name: String,
    pub name: String,
    /// Inactive symbols must be activated before instances can be placed.
    pub is_active: bool,
    /// Instance parameters defined by the family.
    pub parameters: Vec<String>,
}

/// A placed instance of a family symbol.
#[derive(Debug, Clone)]
pub struct FamilyInstance {
    pub symbol: ElementId,
    /// Hosting wall.
    pub host: ElementId,
    pub level: ElementId,
    pub position: Point3,
    pub structural_type: StructuralType,
    pub parameters: BTreeMap<String, f64>,
}

/// Describes a location curve for log output.
pub(crate) fn describe(curve: &LocationCurve) -> String {
    let c = curve.as_curve();
    let (a, b) = (c.start_point(), c.end_point());
    format!(
        "({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3})",
        a.x, a.y, a.z, b.x, b.y, b.z
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn level_id() -> ElementId {
        let mut arena: SlotMap<ElementId, ()> = SlotMap::with_key();
        arena.insert(())
    }

    #[test]
    fn wall_solid_is_centered_on_baseline() {
        let wall = Wall {
            location: LineSegment::from_points(Point3::new(5.0, -3.0, 0.0), Point3::new(5.0, 3.0, 0.0))
                .unwrap(),
            thickness: 0.4,
            height: 3.0,
            level: level_id(),
        };
        let solid = wall.solid().unwrap();
        let (t0, t1) = solid
            .ray_interval(&Point3::new(0.0, 0.0, 1.0), &Vector3::x())
            .unwrap();
        assert_relative_eq!(t0, 4.8, epsilon = 1e-9);
        assert_relative_eq!(t1, 5.2, epsilon = 1e-9);
    }

    #[test]
    fn ray_above_wall_misses() {
        let wall = Wall {
            location: LineSegment::from_points(Point3::new(5.0, -3.0, 0.0), Point3::new(5.0, 3.0, 0.0))
                .unwrap(),
            thickness: 0.4,
            height: 3.0,
            level: level_id(),
        };
        let solid = wall.solid().unwrap();
        assert!(solid
            .ray_interval(&Point3::new(0.0, 0.0, 3.5), &Vector3::x())
            .is_none());
    }

    #[test]
    fn vertical_baseline_is_degenerate() {
        let wall = Wall {
            location: LineSegment::from_points(Point3::origin(), Point3::new(0.0, 0.0, 3.0)).unwrap(),
            thickness: 0.2,
            height: 3.0,
            level: level_id(),
        };
        assert!(wall.solid().is_err());
    }

    #[test]
    fn rectangular_duct_has_no_diameter() {
        let line = LineSegment::from_points(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
        let duct = Duct {
            location: LocationCurve::Line(line),
            profile: DuctProfile::Rectangular {
                width: 0.4,
                height: 0.2,
            },
        };
        assert!(duct.diameter().is_none());
    }
}
