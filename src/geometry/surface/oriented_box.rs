use crate::error::{GeometryError, Result};
use crate::math::intersect_3d::slab_interval;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::Plane;

/// A box with arbitrary orientation, bounded by three pairs of parallel planes.
///
/// The box spans `corner + a * axes[0] + b * axes[1] + c * axes[2]` for
/// `a ∈ [0, extents[0]]`, `b ∈ [0, extents[1]]`, `c ∈ [0, extents[2]]`.
#[derive(Debug, Clone)]
pub struct OrientedBox {
    slabs: [(Plane, Plane); 3],
}

impl OrientedBox {
    /// Creates a box from a corner, three axis directions and the extent along
    /// each axis.
    ///
    /// # Errors
    ///
    /// Returns an error if an axis is zero-length or an extent is not positive.
    pub fn new(corner: Point3, axes: [Vector3; 3], extents: [f64; 3]) -> Result<Self> {
        if extents.iter().any(|e| *e < TOLERANCE) {
            return Err(GeometryError::Degenerate("box extents must be positive".into()).into());
        }
        let slab = |i: usize| -> Result<(Plane, Plane)> {
            let low = Plane::from_normal(corner, axes[i])?;
            let high = low.offset(extents[i]);
            Ok((low, high))
        };
        Ok(Self {
            slabs: [slab(0)?, slab(1)?, slab(2)?],
        })
    }

    /// Parameter interval `(t_enter, t_exit)` over which the line
    /// `origin + t * dir` lies inside the box.
    ///
    /// Parameters may be negative when the box is behind `origin`. Returns
    /// `None` when the line misses the box.
    #[must_use]
    pub fn ray_interval(&self, origin: &Point3, dir: &Vector3) -> Option<(f64, f64)> {
        let mut t_enter = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;
        for (low, high) in &self.slabs {
            let (t0, t1) = slab_interval(origin, dir, low, high)?;
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit + TOLERANCE {
                return None;
            }
        }
        (t_enter.is_finite() && t_exit.is_finite()).then_some((t_enter, t_exit))
    }
}
