//! Entities: positioned, typed, collidable units owned by the registry.
//!
//! Every entity is a circle of the same fixed radius. The type decides whether
//! the entity follows input (Player, Attached) or waits to be picked up (Stray).

use glam::{Vec2, Vec3};
use std::fmt;

use crate::collision::circles_touch;

/// Shared radius of every entity. Not configurable per instance.
pub const ENTITY_RADIUS: f32 = 1.0;

/// RGBA presentation color. Opaque to simulation logic.
pub type Rgba = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    /// Freshly created, not yet typed. Never observable outside the registry.
    #[default]
    Null,
    Player,
    Attached,
    Stray,
}

impl EntityType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Player => "Player",
            Self::Attached => "Attached",
            Self::Stray => "Stray",
        }
    }

    pub fn is_controlled(self) -> bool {
        matches!(self, Self::Player | Self::Attached)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    position: Vec3,
    kind: EntityType,
    color: Rgba,
}

impl Entity {
    pub(crate) fn new(id: EntityId) -> Self {
        Self {
            id,
            position: Vec3::ZERO,
            kind: EntityType::Null,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn kind(&self) -> EntityType {
        self.kind
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn radius(&self) -> f32 {
        ENTITY_RADIUS
    }

    /// Planar input maps onto the ground plane: input x to world x, input y to world z.
    /// No bounds checking here; the registry clamps the lead entity afterwards.
    pub fn move_from_input(&mut self, input: Vec2, speed: f32) {
        self.position += Vec3::new(input.x, 0.0, input.y) * speed;
    }

    pub fn collides_with(&self, other: &Entity) -> bool {
        circles_touch(self.position, other.position)
    }

    /// Stops at the first hit, in the order given. The registry's collision
    /// pass reaches this through `CollisionIndex::hits` on a snapshot of the
    /// controlled set.
    pub fn collides_with_any<'a, I>(&self, others: I) -> bool
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        others.into_iter().any(|other| self.collides_with(other))
    }

    pub fn set_type(&mut self, kind: EntityType, color: Rgba) {
        self.kind = kind;
        self.color = color;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn is_controlled(&self) -> bool {
        self.kind.is_controlled()
    }
}
