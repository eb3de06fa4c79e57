//! Simulation core for a top-down stray-collecting prototype.
//!
//! The host owns timing and presentation. Each frame it calls
//! `GameLoop::fixed_tick` for every due fixed step, then `GameLoop::tick`
//! once, then drains `SimEvent`s and reads `EntityView`s for drawing.

pub mod bounds;
pub mod collision;
pub mod entity;
pub mod events;
pub mod game;
pub mod registry;
pub mod replay;
pub mod settings;
pub mod spawn;

pub use bounds::PlayArea;
pub use entity::{Entity, EntityId, EntityType};
pub use events::{SimEvent, SoundHandle};
pub use game::{FrameInput, GameLoop, GameState, RestartPolicy};
pub use registry::{EntityRegistry, EntityView};
pub use settings::GameSettings;
pub use spawn::SpawnSource;
