//! Locomotion and physics constants used across systems.
//!
//! Per-character tuning lives in [`crate::config::RunnerTuning`]; the
//! defaults for that tuning are collected here alongside the fixed rules.

/// Airborne transitions allowed before the runner must land again.
pub const JUMP_MAX: u8 = 2;
/// Distance below a shape that still counts as touching the ground.
pub const GROUND_CONTACT_TOLERANCE: f32 = 0.01;
/// Default horizontal run speed in world units per second.
pub const DEFAULT_HORIZONTAL_SPEED: f32 = 5.0;
/// Default upward impulse applied on each jump, against a unit mass.
pub const DEFAULT_JUMP_IMPULSE: f32 = 10.0;
/// Default starting (and maximum) health.
pub const DEFAULT_INITIAL_HEALTH: i32 = 20;
/// Default gravitational acceleration along the y axis.
pub const DEFAULT_GRAVITY: f32 = -9.81;
/// Default length of one simulation step in seconds.
pub const DEFAULT_FIXED_TIMESTEP: f32 = 0.02;
/// Amount granted or taken by a level object when none is authored.
pub const DEFAULT_OBJECT_AMOUNT: u32 = 10;
