use crate::model::ElementId;

use super::SurfaceHit;

/// Identity of an element that lives in an externally referenced document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LinkedId {
    /// The hit element lives in the document being cast against.
    #[default]
    NotLinked,
    /// Id of the hit element inside the linked document.
    Linked(ElementId),
}

/// The part of a [`SurfaceHit`] that decides whether two hits reference the
/// same penetration.
///
/// Two identities are equal iff both the surface id and the linked id match.
/// The hit distance takes no part in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceIdentity {
    /// Element that was hit.
    pub surface_id: ElementId,
    /// Linked element, if the hit lives in a linked document.
    pub linked_id: LinkedId,
}

impl From<&SurfaceHit> for SurfaceIdentity {
    fn from(hit: &SurfaceHit) -> Self {
        Self {
            surface_id: hit.surface_id,
            linked_id: hit.linked_id,
        }
    }
}

/// Returns whether two hits reference the same surface element.
#[must_use]
pub fn same_surface(a: &SurfaceHit, b: &SurfaceHit) -> bool {
    a.surface_id == b.surface_id && a.linked_id == b.linked_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn ids() -> (ElementId, ElementId) {
        let mut arena: SlotMap<ElementId, ()> = SlotMap::with_key();
        (arena.insert(()), arena.insert(()))
    }

    fn hit(surface_id: ElementId, linked_id: LinkedId, distance: f64) -> SurfaceHit {
        SurfaceHit {
            surface_id,
            linked_id,
            distance,
        }
    }

    fn hash_of(identity: &SurfaceIdentity) -> u64 {
        let mut hasher = DefaultHasher::new();
        identity.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn distance_is_not_part_of_identity() {
        let (a, _) = ids();
        let near = hit(a, LinkedId::NotLinked, 1.0);
        let far = hit(a, LinkedId::NotLinked, 7.5);
        assert!(same_surface(&near, &far));
        assert_eq!(SurfaceIdentity::from(&near), SurfaceIdentity::from(&far));
    }

    #[test]
    fn different_surfaces_differ() {
        let (a, b) = ids();
        assert!(!same_surface(
            &hit(a, LinkedId::NotLinked, 1.0),
            &hit(b, LinkedId::NotLinked, 1.0)
        ));
    }

    #[test]
    fn linked_id_participates_in_identity() {
        let (a, b) = ids();
        let local = hit(a, LinkedId::NotLinked, 2.0);
        let linked = hit(a, LinkedId::Linked(b), 2.0);
        assert!(!same_surface(&local, &linked));
        assert_ne!(SurfaceIdentity::from(&local), SurfaceIdentity::from(&linked));
    }

    #[test]
    fn equal_identities_hash_equally() {
        let (a, b) = ids();
        let x = SurfaceIdentity::from(&hit(a, LinkedId::Linked(b), 0.5));
        let y = SurfaceIdentity::from(&hit(a, LinkedId::Linked(b), 3.0));
        assert_eq!(hash_of(&x), hash_of(&y));
    }
}
