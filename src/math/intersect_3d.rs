use crate::geometry::surface::Plane;

use super::{Point3, Vector3, TOLERANCE};

/// Relationship of a line with a plane.
#[derive(Debug)]
pub enum LinePlaneRelation {
    /// Line intersects the plane at a single point.
    Point { point: Point3, t: f64 },
    /// Line is parallel to the plane (does not intersect).
    Parallel,
    /// Line lies entirely on the plane.
    OnPlane,
}

/// Computes the intersection of a line `origin + t * dir` with a plane.
#[must_use]
pub fn line_plane_intersect(origin: &Point3, dir: &Vector3, plane: &Plane) -> LinePlaneRelation {
    let normal = plane.plane_normal();
    let denom = normal.dot(dir);

    let diff = plane.origin() - origin;
    let numer = normal.dot(&diff);

    if denom.abs() < TOLERANCE {
        if numer.abs() < TOLERANCE {
            LinePlaneRelation::OnPlane
        } else {
            LinePlaneRelation::Parallel
        }
    } else {
        let t = numer / denom;
        let point = origin + dir * t;
        LinePlaneRelation::Point { point, t }
    }
}

/// Signed distance from a point to a plane.
/// Positive = on the normal side, negative = opposite.
#[must_use]
pub fn signed_distance_to_plane(point: &Point3, plane: &Plane) -> f64 {
    let diff = point - plane.origin();
    plane.plane_normal().dot(&diff)
}

/// Parameter interval in which the line `origin + t * dir` lies between two
/// parallel planes.
///
/// `low` and `high` must share a normal, with `high` on the positive side of
/// `low`. Returns `None` when the line runs parallel to the planes outside the
/// slab. A line running parallel inside the slab (or on either face) is
/// unbounded.
#[must_use]
pub fn slab_interval(
    origin: &Point3,
    dir: &Vector3,
    low: &Plane,
    high: &Plane,
) -> Option<(f64, f64)> {
    match (
        line_plane_intersect(origin, dir, low),
        line_plane_intersect(origin, dir, high),
    ) {
        (LinePlaneRelation::Point { t: t_low, .. }, LinePlaneRelation::Point { t: t_high, .. }) => {
            Some((t_low.min(t_high), t_low.max(t_high)))
        }
        _ => {
            let above_low = signed_distance_to_plane(origin, low) >= -TOLERANCE;
            let below_high = signed_distance_to_plane(origin, high) <= TOLERANCE;
            (above_low && below_high).then_some((f64::NEG_INFINITY, f64::INFINITY))
        }
    }
}
