//! Effects produced by a tick and drained by the host once the tick returns.

use glam::Vec3;
use std::fmt;
use std::sync::Arc;

use crate::entity::EntityId;

/// Opaque reference to the "stick" sound. The simulation only forwards it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoundHandle(Arc<str>);

impl SoundHandle {
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SoundHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// Emitted once per Stray to Attached transition.
    EntityAttached { id: EntityId, sound: SoundHandle },
    StraySpawned { id: EntityId, position: Vec3 },
    GameStarted { player: EntityId },
}

impl SimEvent {
    /// Sound the host should play for this event, if any.
    pub fn sound(&self) -> Option<&SoundHandle> {
        match self {
            Self::EntityAttached { sound, .. } => Some(sound),
            Self::StraySpawned { .. } | Self::GameStarted { .. } => None,
        }
    }
}
