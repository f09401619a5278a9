//! Runner state machine.
//!
//! [`Runner`] owns the discrete locomotion state and applies the exit and
//! enter actions of every transition. Side effects on motion land in the
//! runner's [`Body`]; everything the presentation layer should hear about
//! is pushed into a [`PresentationSink`].

mod policy;
mod runner;

pub use runner::{Body, Gait, Runner, VerticalMotion};

use bevy::prelude::Reflect;
use serde::Serialize;

use crate::interaction::ObjectKind;

/// Discrete locomotion states of the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize)]
pub enum RunnerState {
    /// Grounded locomotion.
    #[default]
    Run,
    /// Grounded with a reduced collision shape.
    Slide,
    /// First airborne state.
    Jump,
    /// Second airborne state.
    DoubleJump,
    /// Terminal state; the runner is frozen for the rest of the round.
    Dead,
}

impl RunnerState {
    /// Returns `true` for the two jumping states.
    ///
    /// # Examples
    /// ```
    /// use cookie_runner::RunnerState;
    /// assert!(RunnerState::DoubleJump.is_airborne());
    /// assert!(!RunnerState::Slide.is_airborne());
    /// ```
    #[must_use]
    pub const fn is_airborne(self) -> bool {
        matches!(self, Self::Jump | Self::DoubleJump)
    }

    /// Returns `true` once the runner has died.
    #[must_use]
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// Free-function form of [`RunnerState::is_airborne`].
#[must_use]
pub const fn is_airborne(state: RunnerState) -> bool {
    state.is_airborne()
}

/// Read-only notification for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PresentationEvent {
    /// A transition was committed.
    StateChanged(RunnerState),
    /// Health was assigned, whether or not it changed the state.
    HealthChanged(i32),
    /// The score board total changed.
    ScoreChanged(u64),
    /// A world object was consumed and should stop rendering and colliding.
    ObjectConsumed(ObjectKind),
}

/// Receiver of [`PresentationEvent`]s.
///
/// The simulation only ever writes to a sink; nothing flows back.
pub trait PresentationSink {
    /// Delivers one notification.
    fn notify(&mut self, event: PresentationEvent);
}

impl PresentationSink for Vec<PresentationEvent> {
    fn notify(&mut self, event: PresentationEvent) {
        self.push(event);
    }
}

/// Sink that discards everything.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Silent;

#[cfg(test)]
impl PresentationSink for Silent {
    fn notify(&mut self, _event: PresentationEvent) {}
}
