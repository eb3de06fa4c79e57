//! The entity registry: owns every entity and runs the per-tick pipeline.
//!
//! Two entry points mutate state, and the host calls them strictly in sequence:
//!
//!  - `fixed_tick(input)` -- movement. The lead player moves by the input, is
//!    clamped into the play area, and the *effective* delta (after clamping) is
//!    applied to every attached follower.
//!  - `tick()` -- logic. Strays touching the controlled set become attached,
//!    then at most one stray is spawned if the stray count is below target.
//!
//! Entities live in a `Vec` in creation order. All queries and the collision
//! pass walk that order, which keeps runs with the same spawn source identical.

use glam::{Vec2, Vec3};

use crate::bounds::PlayArea;
use crate::collision::CollisionIndex;
use crate::entity::{Entity, EntityId, EntityType, Rgba};
use crate::events::{SimEvent, SoundHandle};
use crate::settings::{EntityColors, GameSettings};
use crate::spawn::{spawn_point, SpawnSource};

/// Read-only copy of an entity for the render host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityType,
    pub position: Vec3,
    pub color: Rgba,
}

pub struct EntityRegistry {
    entities: Vec<Entity>,
    next_id: u64,
    play_area: Option<PlayArea>,
    colors: EntityColors,
    movement_speed: f32,
    stray_target: usize,
    stick_sound: SoundHandle,
    spawner: Box<dyn SpawnSource>,
    events: Vec<SimEvent>,
}

impl EntityRegistry {
    pub fn new(settings: &GameSettings, spawner: Box<dyn SpawnSource>) -> Self {
        Self {
            entities: Vec::new(),
            next_id: 0,
            play_area: settings.play_area,
            colors: settings.colors,
            movement_speed: settings.movement_speed,
            stray_target: settings.stray_target,
            stick_sound: settings.stick_sound_handle(),
            spawner,
            events: Vec::new(),
        }
    }

    pub fn play_area(&self) -> Option<PlayArea> {
        self.play_area
    }

    pub fn stray_target(&self) -> usize {
        self.stray_target
    }

    /// Where a new game places the player.
    pub fn spawn_center(&self) -> Vec3 {
        self.play_area.map_or(Vec3::ZERO, |area| area.center())
    }

    // --- Lifecycle ----------------------------------------------------------

    /// Destroy every entity. Pending events refer to destroyed entities and
    /// are dropped with them.
    pub fn reset(&mut self) {
        if !self.entities.is_empty() {
            log::debug!("Resetting registry ({} entities)", self.entities.len());
        }
        self.entities.clear();
        self.events.clear();
    }

    pub fn start_new_game(&mut self) {
        self.reset();

        let center = self.spawn_center();
        let Some(player) = self.spawn(EntityType::Player, center) else {
            // Unreachable after a reset: there is no other player to conflict with.
            log::error!("New game could not place a player");
            return;
        };
        for _ in 0..self.stray_target {
            self.new_stray();
        }

        log::info!(
            "New game: player {} at ({:.2}, {:.2}), {} strays",
            player,
            center.x,
            center.z,
            self.stray_count()
        );
        self.events.push(SimEvent::GameStarted { player });
    }

    /// Create an entity of `kind` at `position`. Returns `None` (and creates
    /// nothing) when the type assignment is refused, e.g. a second Player.
    pub fn spawn(&mut self, kind: EntityType, position: Vec3) -> Option<EntityId> {
        let id = self.new_entity();
        if !self.change_entity_state(id, kind) {
            self.entities.pop();
            return None;
        }
        if let Some(entity) = self.entity_mut(id) {
            entity.set_position(position);
        }
        Some(id)
    }

    fn new_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity::new(id));
        id
    }

    fn new_stray(&mut self) -> Option<EntityId> {
        let position = spawn_point(self.spawner.as_mut(), self.play_area.as_ref());
        let id = self.spawn(EntityType::Stray, position)?;
        log::trace!(
            "Stray {} spawned at ({:.2}, {:.2})",
            id,
            position.x,
            position.z
        );
        self.events.push(SimEvent::StraySpawned { id, position });
        Some(id)
    }

    // --- Queries ------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Player and Attached entities, in registry order.
    pub fn controlled(&self) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.is_controlled()).collect()
    }

    /// Everything not controlled, in registry order.
    pub fn strays(&self) -> Vec<&Entity> {
        self.entities.iter().filter(|e| !e.is_controlled()).collect()
    }

    pub fn stray_count(&self) -> usize {
        self.entities.iter().filter(|e| !e.is_controlled()).count()
    }

    /// First Player in registry order.
    pub fn get_lead_player(&self) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.kind() == EntityType::Player)
    }

    pub fn views(&self) -> Vec<EntityView> {
        self.entities
            .iter()
            .map(|e| EntityView {
                id: e.id(),
                kind: e.kind(),
                position: e.position(),
                color: e.color(),
            })
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    // --- State transitions ----------------------------------------------------

    /// Apply a type change and its color. Refused changes are logged and leave
    /// the entity untouched:
    ///  - target `Null`
    ///  - unknown id
    ///  - a second Player while another entity already is one
    ///  - anything other than `Null -> *` or `Stray -> Attached`
    pub fn change_entity_state(&mut self, id: EntityId, kind: EntityType) -> bool {
        let Some(color) = self.colors.color_for(kind) else {
            log::warn!("Entity {}: refusing transition to {}", id, kind);
            return false;
        };
        if kind == EntityType::Player
            && self
                .entities
                .iter()
                .any(|e| e.kind() == EntityType::Player && e.id() != id)
        {
            log::warn!(
                "Entity {}: refusing transition to Player, a lead player already exists",
                id
            );
            return false;
        }
        let Some(entity) = self.entity_mut(id) else {
            log::warn!("Entity {}: not in registry, ignoring transition to {}", id, kind);
            return false;
        };

        let from = entity.kind();
        if !transition_allowed(from, kind) {
            log::warn!("Entity {}: illegal transition {} -> {}", id, from, kind);
            return false;
        }
        entity.set_type(kind, color);
        true
    }

    // --- Tick pipeline --------------------------------------------------------

    pub fn tick(&mut self) {
        self.entity_collisions();

        if self.stray_count() < self.stray_target {
            self.new_stray();
        }
    }

    /// Attach every stray touching the controlled set. The controlled set is
    /// snapshotted once up front: a stray attached in this pass does not pick
    /// up other strays until the next tick.
    pub fn entity_collisions(&mut self) {
        let index =
            CollisionIndex::from_entities(self.entities.iter().filter(|e| e.is_controlled()));
        if index.is_empty() {
            return;
        }

        let captured: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|e| !e.is_controlled() && index.hits(e))
            .map(Entity::id)
            .collect();

        for stray in captured {
            if self.change_entity_state(stray, EntityType::Attached) {
                log::debug!("Stray {} stuck to the clump", stray);
                self.events.push(SimEvent::EntityAttached {
                    id: stray,
                    sound: self.stick_sound.clone(),
                });
            }
        }
    }

    pub fn fixed_tick(&mut self, input: Vec2) {
        let Some(lead_index) = self
            .entities
            .iter()
            .position(|e| e.kind() == EntityType::Player)
        else {
            log::trace!("fixed_tick skipped: no lead player");
            return;
        };

        let lead = &mut self.entities[lead_index];
        let before = lead.position();
        lead.move_from_input(input, self.movement_speed);
        if let Some(area) = self.play_area {
            lead.set_position(area.clamp(lead.position()));
            debug_assert!(area.contains(lead.position()));
        }
        let delta = lead.position() - before;
        if delta == Vec3::ZERO {
            return;
        }

        // Followers trail the clamped movement and are not clamped themselves.
        for follower in self
            .entities
            .iter_mut()
            .filter(|e| e.kind() == EntityType::Attached)
        {
            follower.set_position(follower.position() + delta);
        }
    }
}

fn transition_allowed(from: EntityType, to: EntityType) -> bool {
    from == to
        || matches!(
            (from, to),
            (EntityType::Null, _) | (EntityType::Stray, EntityType::Attached)
        )
}
