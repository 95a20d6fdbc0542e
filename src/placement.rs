//! Declarative description of one hole instance to create.

use std::collections::BTreeMap;

use crate::locate::PenetrationRequest;
use crate::math::Point3;
use crate::model::ElementId;

/// Structural role of a placed family instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StructuralType {
    #[default]
    NonStructural,
}

/// A family instance the host should create.
///
/// The placement logic only builds these; the host executes them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementCommand {
    /// Family symbol (type) to instantiate.
    pub family_symbol: ElementId,
    /// Insertion point.
    pub position: Point3,
    /// Wall hosting the instance.
    pub host_surface: ElementId,
    /// Level the instance is associated with.
    pub level: ElementId,
    pub structural_type: StructuralType,
    /// Instance parameter values by name.
    pub parameters: BTreeMap<String, f64>,
}

impl PlacementCommand {
    /// Builds a hole placement for a penetration.
    ///
    /// The hole is square in elevation: both `width_parameter` and
    /// `height_parameter` are set to the conduit diameter.
    #[must_use]
    pub fn hole(
        family_symbol: ElementId,
        request: &PenetrationRequest,
        level: ElementId,
        width_parameter: &str,
        height_parameter: &str,
    ) -> Self {
        let parameters = BTreeMap::from([
            (width_parameter.to_owned(), request.diameter),
            (height_parameter.to_owned(), request.diameter),
        ]);
        Self {
            family_symbol,
            position: request.position,
            host_surface: request.surface_id,
            level,
            structural_type: StructuralType::NonStructural,
            parameters,
        }
    }
}
