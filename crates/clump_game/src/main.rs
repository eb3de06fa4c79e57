//! Clump -- headless host for the stray-collecting simulation.
//!
//! The host stands in for the renderer/audio side of the game:
//!
//!   1. `advance(frame_dt)` -- feed the fixed-step clock one replay frame
//!   2. `while should_step()` -- run the movement phase at fixed cadence
//!   3. `tick(restart)` -- run the state machine + collision phase once
//!   4. drain events -- "play" stick sounds, count spawns and restarts
//!
//! Usage: `clump_game [replay.json] [settings.json]`. A missing or invalid
//! settings file falls back to defaults; an invalid replay falls back to an
//! idle run so the simulation still exercises spawn maintenance.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clump_core::rng::GameRng;
use clump_core::time::TimeState;
use clump_sim::replay::{load_replay_from_path, ReplaySequence};
use clump_sim::settings::{load_settings_from_path, GameSettings};
use clump_sim::{EntityType, GameLoop, SimEvent};

const SETTINGS_PATH: &str = "assets/settings/game_settings.json";
const REPLAY_PATH: &str = "assets/replays/demo_replay.json";
const IDLE_FALLBACK_FRAMES: u32 = 600;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct HostStats {
    frames: u64,
    fixed_steps: u64,
    games_started: u32,
    strays_spawned: u32,
    sounds_played: HashMap<String, u32>,
}

impl HostStats {
    fn total_sounds(&self) -> u32 {
        self.sounds_played.values().sum()
    }
}

fn run_replay(game: &mut GameLoop, time: &mut TimeState, replay: &ReplaySequence) -> HostStats {
    let mut stats = HostStats::default();

    for input in replay.expanded_inputs() {
        time.advance(replay.frame_dt);
        while time.should_step() {
            game.fixed_tick(input.movement);
        }
        game.tick(input.restart);

        // Effects are consumed only after the tick has returned.
        for event in game.drain_events() {
            handle_event(&event, &mut stats);
        }
        time.end_frame();
        stats.frames += 1;
        stats.fixed_steps += u64::from(time.steps_this_frame);
    }

    stats
}

fn handle_event(event: &SimEvent, stats: &mut HostStats) {
    match event {
        SimEvent::EntityAttached { id, sound } => {
            log::debug!("Entity {} attached, playing '{}'", id, sound);
            *stats.sounds_played.entry(sound.to_string()).or_insert(0) += 1;
        }
        SimEvent::StraySpawned { id, position } => {
            log::trace!(
                "Stray {} appeared at ({:.2}, {:.2})",
                id,
                position.x,
                position.z
            );
            stats.strays_spawned += 1;
        }
        SimEvent::GameStarted { player } => {
            log::info!("Game started, lead player {}", player);
            stats.games_started += 1;
        }
    }
}

fn load_settings(path: &Path) -> GameSettings {
    if !path.exists() {
        log::warn!(
            "Settings file '{}' not found, using defaults.",
            path.display()
        );
        return GameSettings::default();
    }
    match load_settings_from_path(path) {
        Ok(settings) => {
            log::info!("Settings loaded: {}", path.display());
            settings
        }
        Err(err) => {
            log::error!("{err}. Using default settings.");
            GameSettings::default()
        }
    }
}

fn load_replay(path: &Path) -> ReplaySequence {
    match load_replay_from_path(path) {
        Ok(replay) => {
            log::info!(
                "Replay loaded: {} ({} entries)",
                path.display(),
                replay.frames.len()
            );
            replay
        }
        Err(err) => {
            log::error!("{err}. Running {IDLE_FALLBACK_FRAMES} idle frames instead.");
            ReplaySequence::idle(IDLE_FALLBACK_FRAMES)
        }
    }
}

fn log_summary(game: &GameLoop, time: &TimeState, stats: &HostStats) {
    log::info!(
        "Finished: {} frames, {} fixed steps ({:.2}s simulated, alpha {:.2}), {} game(s), {} strays spawned, {} stick sounds",
        stats.frames,
        stats.fixed_steps,
        time.simulated_seconds(),
        time.interpolation_alpha,
        stats.games_started,
        stats.strays_spawned,
        stats.total_sounds()
    );

    let registry = game.registry();
    let attached = registry
        .iter()
        .filter(|e| e.kind() == EntityType::Attached)
        .count();
    log::info!(
        "Final state {}: {} entities ({} attached, {} strays)",
        game.state(),
        registry.len(),
        attached,
        registry.stray_count()
    );
    for view in game.views() {
        log::info!(
            "  {} {:<8} ({:>7.2}, {:>7.2}) rgba={:?}",
            view.id,
            view.kind,
            view.position.x,
            view.position.z,
            view.color
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Clump starting...");

    let mut args = std::env::args().skip(1);
    let replay_path = PathBuf::from(args.next().unwrap_or_else(|| REPLAY_PATH.to_string()));
    let settings_path = PathBuf::from(args.next().unwrap_or_else(|| SETTINGS_PATH.to_string()));

    let settings = load_settings(&settings_path);
    let rng = match settings.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    log::info!(
        "Spawn seed {} (set \"seed\" in settings to reproduce)",
        rng.seed()
    );

    let replay = load_replay(&replay_path);
    let mut time = TimeState::new();
    let mut game = GameLoop::new(&settings, Box::new(rng));

    let stats = run_replay(&mut game, &mut time, &replay);
    log_summary(&game, &time, &stats);
}
