//! Scripted input sequences for headless runs and determinism checks.

use glam::Vec2;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::game::FrameInput;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    /// Wall-clock duration of one frame, fed to the fixed-step clock.
    #[serde(default = "default_frame_dt")]
    pub frame_dt: f64,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub move_x: f32,
    #[serde(default)]
    pub move_z: f32,
    #[serde(default)]
    pub restart: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    /// A sequence that stands still for `frames` frames.
    pub fn idle(frames: u32) -> Self {
        Self {
            frame_dt: default_frame_dt(),
            frames: vec![ReplayFrame {
                move_x: 0.0,
                move_z: 0.0,
                restart: false,
                repeat: frames,
            }],
        }
    }

    /// One `FrameInput` per frame. Movement is clamped to `[-1, 1]` per axis and
    /// a restart fires only on the first frame of a repeated entry.
    pub fn expanded_inputs(&self) -> Vec<FrameInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let movement = Vec2::new(frame.move_x.clamp(-1.0, 1.0), frame.move_z.clamp(-1.0, 1.0));
            for i in 0..frame.repeat.max(1) {
                out.push(FrameInput {
                    movement,
                    restart: frame.restart && i == 0,
                });
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if !(replay.frame_dt.is_finite() && replay.frame_dt > 0.0) {
        return Err("Replay validation failed: frame_dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_frame_dt() -> f64 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameLoop;
    use crate::settings::GameSettings;
    use clump_core::rng::GameRng;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "clump_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frame_dt": 0.016666667,
              "frames": [
                { "move_x": 1.0, "repeat": 3 },
                { "move_z": -4.0 },
                { "restart": true, "repeat": 2 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 6);
        assert_eq!(expanded[0].movement, Vec2::new(1.0, 0.0));
        assert_eq!(expanded[3].movement, Vec2::new(0.0, -1.0));
        assert!(expanded[4].restart);
        assert!(!expanded[5].restart);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_empty_frames() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");

        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_non_positive_frame_dt() {
        let path = temp_file_path("bad_dt");
        fs::write(&path, r#"{ "frame_dt": 0.0, "frames": [{}] }"#).expect("write replay file");

        let err = load_replay_from_path(&path).expect_err("zero frame_dt should fail");
        assert!(err.contains("frame_dt must be > 0"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn idle_replay_has_no_movement() {
        let inputs = ReplaySequence::idle(4).expanded_inputs();
        assert_eq!(inputs.len(), 4);
        assert!(inputs.iter().all(|i| i.movement == Vec2::ZERO && !i.restart));
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay = ReplaySequence {
            frame_dt: default_frame_dt(),
            frames: vec![
                ReplayFrame { move_x: 1.0, move_z: 0.0, restart: false, repeat: 90 },
                ReplayFrame { move_x: 0.0, move_z: -1.0, restart: false, repeat: 60 },
                ReplayFrame { move_x: -1.0, move_z: 1.0, restart: false, repeat: 120 },
                ReplayFrame { move_x: 0.0, move_z: 0.0, restart: true, repeat: 1 },
                ReplayFrame { move_x: -1.0, move_z: -1.0, restart: false, repeat: 45 },
            ],
        };
        let inputs = replay.expanded_inputs();

        let run = || {
            let settings = GameSettings::default();
            let mut game = GameLoop::new(&settings, Box::new(GameRng::new(2024)));
            let mut attach_events = 0;
            for input in &inputs {
                game.step(*input);
                attach_events += game
                    .drain_events()
                    .iter()
                    .filter(|e| e.sound().is_some())
                    .count();
            }
            (game.views(), attach_events)
        };

        assert_eq!(run(), run());
    }
}
