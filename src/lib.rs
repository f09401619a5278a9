#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing the side-scrolling runner simulation.
//!
//! The locomotion, sensing and interaction rules are plain Rust operating on
//! [`Runner`], [`Body`] and [`WorldObject`]; [`RunnerPlugin`] schedules them
//! as Bevy systems on a fixed step.
pub mod config;
pub mod constants;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod level;
pub mod locomotion;
pub mod logging;
pub mod plugin;
pub mod presentation;
pub mod sensing;
pub mod systems;
pub use constants::*;

// Re-export commonly used items
pub use config::{ConfigError, LevelLayout, RunnerTuning};
pub use geometry::{Aabb, CollisionShape};
pub use input::{IntentInbox, RunnerIntent};
pub use interaction::{ObjectKind, Player, ScoreBoard, WorldObject};
pub use level::{spawn_level, spawn_runner};
pub use locomotion::{
    is_airborne, Body, Gait, PresentationEvent, PresentationSink, Runner, RunnerState,
};
pub use logging::init as init_logging;
pub use plugin::{RunnerPlugin, RunnerSet};
pub use presentation::{HudSnapshot, Notification, ObjectConsumed, RunnerDied};
pub use sensing::{sense_step, PhysicsProbe, Terrain};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use cookie_runner::prelude::*;
    //! ```

    pub use crate::HudSnapshot;
    pub use crate::LevelLayout;
    pub use crate::Runner;
    pub use crate::RunnerIntent;
    pub use crate::RunnerPlugin;
    pub use crate::RunnerState;
    pub use crate::RunnerTuning;
    pub use crate::ScoreBoard;
}
