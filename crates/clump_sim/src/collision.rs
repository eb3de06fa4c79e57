//! Circle collision between entities.
//!
//! All entities share `ENTITY_RADIUS`, and two centers touch when they are at
//! most `2 * (ENTITY_RADIUS / 2)` apart. That is one radius, not two.
//!
//! `CollisionIndex` is a frozen snapshot of entities. Collision resolution
//! builds one from the controlled set before walking the strays, so an entity
//! that changes type during the walk does not affect the rest of that pass.

use glam::Vec3;

use crate::entity::{Entity, ENTITY_RADIUS};

/// Center distance at or below which two entities collide.
pub const CONTACT_DISTANCE: f32 = 2.0 * (ENTITY_RADIUS / 2.0);

/// Pairwise test shared by `Entity::collides_with` and `CollisionIndex`.
pub fn circles_touch(a: Vec3, b: Vec3) -> bool {
    a.distance(b) <= CONTACT_DISTANCE
}

#[derive(Debug, Clone, Default)]
pub struct CollisionIndex {
    entries: Vec<Entity>,
}

impl CollisionIndex {
    pub fn from_entities<'a, I>(entities: I) -> Self
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        let entries = entities.into_iter().cloned().collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if `entity` touches any snapshot entry. Stops at the first hit.
    pub fn hits(&self, entity: &Entity) -> bool {
        entity.collides_with_any(&self.entries)
    }

}
