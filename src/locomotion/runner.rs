//! Runner aggregate and its transition table.

use bevy::prelude::Component;
use glam::Vec2;
use log::{debug, trace};

use super::{PresentationEvent, PresentationSink, RunnerState};
use crate::geometry::CollisionShape;
use crate::{DEFAULT_HORIZONTAL_SPEED, DEFAULT_JUMP_IMPULSE};

/// Constant per-character movement tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gait {
    /// Horizontal velocity enforced on every simulation step.
    pub horizontal_speed: f32,
    /// Upward impulse applied when entering a jump state.
    pub jump_impulse: f32,
}

impl Default for Gait {
    fn default() -> Self {
        Self {
            horizontal_speed: DEFAULT_HORIZONTAL_SPEED,
            jump_impulse: DEFAULT_JUMP_IMPULSE,
        }
    }
}

/// Sign of the vertical velocity as seen by landing detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalMotion {
    /// Strictly positive vertical velocity.
    Rising,
    /// Falling or vertically stationary.
    NotRising,
}

/// Rigid-body state driven by the kinematics step.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Multiplier applied to world gravity.
    pub gravity_scale: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
        }
    }
}

impl Body {
    /// Classifies the current vertical velocity.
    #[must_use]
    pub fn vertical_motion(&self) -> VerticalMotion {
        if self.velocity.y > 0.0 {
            VerticalMotion::Rising
        } else {
            VerticalMotion::NotRising
        }
    }

    /// Adds an instantaneous upward impulse against a unit mass.
    pub fn apply_upward_impulse(&mut self, impulse: f32) {
        self.velocity.y += impulse;
    }

    /// Stops all motion and disables gravity.
    pub fn freeze(&mut self) {
        self.gravity_scale = 0.0;
        self.velocity = Vec2::ZERO;
    }
}

/// The player character's locomotion and vitals.
///
/// Fields are private so that state and health only change through
/// [`Runner::request_state`] and [`Runner::set_health`], which keep
/// `health <= 0` and `state == Dead` in agreement.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Runner {
    state: RunnerState,
    health: i32,
    max_health: i32,
    jump_count: u8,
    shape: CollisionShape,
    grounded: bool,
    gait: Gait,
}

impl Runner {
    /// Creates a runner in the `Run` state with full health.
    #[must_use]
    pub const fn new(max_health: i32, shape: CollisionShape, gait: Gait) -> Self {
        Self {
            state: RunnerState::Run,
            health: max_health,
            max_health,
            jump_count: 0,
            shape,
            grounded: false,
            gait,
        }
    }

    /// Current locomotion state.
    #[must_use]
    pub const fn state(&self) -> RunnerState {
        self.state
    }

    /// Current health; zero or below means dead.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Health the runner started the round with.
    #[must_use]
    pub const fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Airborne transitions since the runner last left a jump state.
    #[must_use]
    pub const fn jump_count(&self) -> u8 {
        self.jump_count
    }

    /// Current collision shape, shrunk while sliding.
    #[must_use]
    pub const fn shape(&self) -> &CollisionShape {
        &self.shape
    }

    /// Result of the most recent ground contact test.
    #[must_use]
    pub const fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Movement tuning for this runner.
    #[must_use]
    pub const fn gait(&self) -> &Gait {
        &self.gait
    }

    /// Records the outcome of the latest ground contact test.
    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Transitions to `next`, running the exit actions of the current state
    /// and the enter actions of `next`, then notifies `sink`.
    ///
    /// Returns `false` without side effects when `next` is the current state
    /// or the runner is dead.
    pub fn request_state<S>(&mut self, next: RunnerState, body: &mut Body, sink: &mut S) -> bool
    where
        S: PresentationSink + ?Sized,
    {
        if next == self.state || self.state.is_dead() {
            trace!("ignoring transition {:?} -> {next:?}", self.state);
            return false;
        }

        // Jump -> DoubleJump keeps counting; the counter spans one airborne run.
        match self.state {
            RunnerState::Slide => self.shape.restore_from_slide(),
            RunnerState::Jump | RunnerState::DoubleJump if !next.is_airborne() => {
                self.jump_count = 0;
            }
            RunnerState::Run
            | RunnerState::Jump
            | RunnerState::DoubleJump
            | RunnerState::Dead => {}
        }

        match next {
            RunnerState::Slide => self.shape.shrink_for_slide(),
            RunnerState::Jump | RunnerState::DoubleJump => {
                body.apply_upward_impulse(self.gait.jump_impulse);
                self.jump_count = self.jump_count.saturating_add(1);
            }
            RunnerState::Dead => body.freeze(),
            RunnerState::Run => {}
        }

        debug!("runner {:?} -> {next:?}", self.state);
        self.state = next;
        sink.notify(PresentationEvent::StateChanged(next));
        true
    }

    /// Assigns health, requesting `Dead` when it drops to zero or below.
    ///
    /// The new value is always forwarded to `sink`, after any death
    /// notification.
    pub fn set_health<S>(&mut self, value: i32, body: &mut Body, sink: &mut S)
    where
        S: PresentationSink + ?Sized,
    {
        self.health = value;
        if value <= 0 {
            self.request_state(RunnerState::Dead, body, sink);
        }
        sink.notify(PresentationEvent::HealthChanged(value));
    }

    /// Reduces health by `amount` through [`Self::set_health`].
    pub fn take_damage<S>(&mut self, amount: u32, body: &mut Body, sink: &mut S)
    where
        S: PresentationSink + ?Sized,
    {
        let value = self.health.saturating_sub_unsigned(amount);
        self.set_health(value, body, sink);
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(
            crate::DEFAULT_INITIAL_HEALTH,
            CollisionShape::default(),
            Gait::default(),
        )
    }
}
