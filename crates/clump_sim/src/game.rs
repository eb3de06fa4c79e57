//! Top-level game state machine.
//!
//! `Starting` runs once: it starts a new game and moves to `Playing`.
//! `Playing` runs the registry's logic tick every frame. A restart request
//! is handled by the configured `RestartPolicy`.

use glam::Vec2;
use serde::Deserialize;
use std::fmt;

use crate::events::SimEvent;
use crate::registry::{EntityRegistry, EntityView};
use crate::settings::GameSettings;
use crate::spawn::SpawnSource;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Starting,
    Playing,
}

impl GameState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Starting => "Starting",
            Self::Playing => "Playing",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a restart request does while `Playing`.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Go back to `Starting`; the next tick starts a fresh game.
    #[default]
    ReturnToStarting,
    /// Stay in `Playing` and ignore the request.
    Inert,
}

/// Host input for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Normalized planar movement, each axis in `[-1, 1]`.
    pub movement: Vec2,
    /// Edge-triggered: true only on the frame the restart action was pressed.
    pub restart: bool,
}

pub struct GameLoop {
    state: GameState,
    restart_policy: RestartPolicy,
    registry: EntityRegistry,
}

impl GameLoop {
    pub fn new(settings: &GameSettings, spawner: Box<dyn SpawnSource>) -> Self {
        Self {
            state: GameState::Starting,
            restart_policy: settings.restart_policy,
            registry: EntityRegistry::new(settings, spawner),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn restart_policy(&self) -> RestartPolicy {
        self.restart_policy
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Movement phase. Ignored until a game is running.
    pub fn fixed_tick(&mut self, movement: Vec2) {
        if self.state == GameState::Playing {
            self.registry.fixed_tick(movement);
        }
    }

    /// Logic phase: one state handler, then the registry tick if still playing.
    pub fn tick(&mut self, restart_requested: bool) {
        match self.state {
            GameState::Starting => self.update_starting(),
            GameState::Playing => self.update_playing(restart_requested),
        }

        if self.state == GameState::Playing {
            self.registry.tick();
        }
    }

    /// Convenience for hosts that run exactly one movement step per frame.
    pub fn step(&mut self, input: FrameInput) {
        self.fixed_tick(input.movement);
        self.tick(input.restart);
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.registry.drain_events()
    }

    pub fn views(&self) -> Vec<EntityView> {
        self.registry.views()
    }

    fn update_starting(&mut self) {
        self.registry.start_new_game();
        self.transition(GameState::Playing);
    }

    fn update_playing(&mut self, restart_requested: bool) {
        if !restart_requested {
            return;
        }
        match self.restart_policy {
            RestartPolicy::ReturnToStarting => {
                log::info!("Restart requested");
                self.transition(GameState::Starting);
            }
            RestartPolicy::Inert => {
                log::debug!("Restart requested but restart policy is inert");
            }
        }
    }

    fn transition(&mut self, next: GameState) {
        if self.state != next {
            log::debug!("Game state: {} -> {}", self.state, next);
        }
        self.state = next;
    }
}
