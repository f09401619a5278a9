//! Tuning and level data loaded from JSON.
//!
//! Values are trusted once parsed: a negative health or zero timestep is the
//! caller's responsibility.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::Resource;
use glam::Vec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{CollisionShape, RectSpec};
use crate::interaction::ObjectKind;
use crate::locomotion::Gait;
use crate::{
    DEFAULT_FIXED_TIMESTEP, DEFAULT_GRAVITY, DEFAULT_HORIZONTAL_SPEED, DEFAULT_INITIAL_HEALTH,
    DEFAULT_JUMP_IMPULSE, DEFAULT_OBJECT_AMOUNT,
};

/// Errors raised while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The file was read but is not valid JSON for the expected shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Per-round tuning for the runner and the world it moves through.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    /// Constant horizontal speed.
    pub horizontal_speed: f32,
    /// Upward impulse per jump.
    pub jump_impulse: f32,
    /// Starting and maximum health.
    pub initial_health: i32,
    /// Vertical gravitational acceleration.
    pub gravity: f32,
    /// Length of one simulation step in seconds.
    pub fixed_timestep: f32,
    /// Collision box while running.
    pub shape: CollisionShape,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            horizontal_speed: DEFAULT_HORIZONTAL_SPEED,
            jump_impulse: DEFAULT_JUMP_IMPULSE,
            initial_health: DEFAULT_INITIAL_HEALTH,
            gravity: DEFAULT_GRAVITY,
            fixed_timestep: DEFAULT_FIXED_TIMESTEP,
            shape: CollisionShape::default(),
        }
    }
}

impl RunnerTuning {
    /// Parses tuning from a JSON string; missing fields take defaults.
    ///
    /// # Errors
    /// Returns [`serde_json::Error`] when the text is not valid tuning JSON.
    ///
    /// # Examples
    /// ```
    /// use cookie_runner::config::RunnerTuning;
    /// let tuning = RunnerTuning::from_json_str(r#"{ "jump_impulse": 12.5 }"#).unwrap();
    /// assert_eq!(tuning.jump_impulse, 12.5);
    /// assert_eq!(tuning.initial_health, 20);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Loads tuning from a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_json(path)
    }

    /// Movement constants for a runner built from this tuning.
    #[must_use]
    pub const fn gait(&self) -> Gait {
        Gait {
            horizontal_speed: self.horizontal_speed,
            jump_impulse: self.jump_impulse,
        }
    }
}

fn default_amount() -> u32 {
    DEFAULT_OBJECT_AMOUNT
}

/// A coin or obstacle as authored in a level file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectPlacement {
    /// Coin or obstacle.
    pub kind: ObjectKind,
    /// Score gained or health lost.
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Trigger rectangle.
    pub rect: RectSpec,
}

/// Geometry and objects making up one course.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Where the runner's feet start.
    pub spawn: [f32; 2],
    /// Region the runner must stay inside.
    pub play_area: RectSpec,
    /// Walkable ground rectangles.
    pub ground: Vec<RectSpec>,
    /// Coins and obstacles.
    #[serde(default)]
    pub objects: Vec<ObjectPlacement>,
}

impl LevelLayout {
    /// Loads a level from a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_json(path)
    }

    /// Spawn point as a vector.
    #[must_use]
    pub const fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.spawn[0], self.spawn[1])
    }

    /// Built-in course: two platforms with a gap, a row of coins, and a few
    /// obstacles to jump or slide past.
    #[must_use]
    pub fn demo() -> Self {
        let coin = |x: f32, y: f32| ObjectPlacement {
            kind: ObjectKind::Coin,
            amount: DEFAULT_OBJECT_AMOUNT,
            rect: RectSpec {
                x,
                y,
                width: 0.5,
                height: 0.5,
            },
        };
        let obstacle = |x: f32, height: f32| ObjectPlacement {
            kind: ObjectKind::Obstacle,
            amount: DEFAULT_OBJECT_AMOUNT,
            rect: RectSpec {
                x,
                y: height * 0.5,
                width: 0.8,
                height,
            },
        };

        let mut objects: Vec<_> = (0..8u8)
            .map(|i| coin(6.0 + f32::from(i) * 1.5, 0.75))
            .collect();
        objects.push(obstacle(24.0, 1.0));
        objects.push(coin(30.0, 3.0));
        objects.push(obstacle(40.0, 1.2));
        objects.push(coin(52.0, 0.75));

        Self {
            spawn: [0.0, 0.0],
            play_area: RectSpec {
                x: 60.0,
                y: 5.0,
                width: 140.0,
                height: 30.0,
            },
            ground: vec![
                RectSpec {
                    x: 20.0,
                    y: -0.5,
                    width: 50.0,
                    height: 1.0,
                },
                RectSpec {
                    x: 80.0,
                    y: -0.5,
                    width: 60.0,
                    height: 1.0,
                },
            ],
            objects,
        }
    }
}
