//! Input-facing request policies layered over the transition table.

use log::trace;

use super::{Body, PresentationSink, Runner, RunnerState};
use crate::JUMP_MAX;

impl Runner {
    /// Requests `Jump` or `DoubleJump` depending on how many jumps have
    /// already been taken.
    ///
    /// Ignored while dead or once [`JUMP_MAX`] jumps have been used.
    pub fn on_jump_pressed<S>(&mut self, body: &mut Body, sink: &mut S) -> bool
    where
        S: PresentationSink + ?Sized,
    {
        if self.state().is_dead() || self.jump_count() >= JUMP_MAX {
            trace!(
                "jump ignored in {:?} after {} jumps",
                self.state(),
                self.jump_count()
            );
            return false;
        }
        let next = if self.jump_count() == 0 {
            RunnerState::Jump
        } else {
            RunnerState::DoubleJump
        };
        self.request_state(next, body, sink)
    }

    /// Requests `Slide` when grounded and alive.
    ///
    /// A runner that has just taken off still carries the last sensed ground
    /// contact; its airborne state rejects the request.
    pub fn on_crouch_pressed<S>(&mut self, body: &mut Body, sink: &mut S) -> bool
    where
        S: PresentationSink + ?Sized,
    {
        if !self.can_change_stance() {
            trace!("crouch ignored in {:?}", self.state());
            return false;
        }
        self.request_state(RunnerState::Slide, body, sink)
    }

    /// Returns to `Run` when grounded, alive and still sliding.
    ///
    /// A release whose press was rejected, or that arrives after something
    /// else already ended the slide, changes nothing.
    pub fn on_crouch_released<S>(&mut self, body: &mut Body, sink: &mut S) -> bool
    where
        S: PresentationSink + ?Sized,
    {
        if !self.can_change_stance() || self.state() != RunnerState::Slide {
            trace!("crouch release ignored in {:?}", self.state());
            return false;
        }
        self.request_state(RunnerState::Run, body, sink)
    }

    // `grounded` is refreshed by sensing, after intents; an airborne state
    // means the runner has left the ground since then.
    fn can_change_stance(&self) -> bool {
        self.is_grounded() && !self.state().is_airborne() && !self.state().is_dead()
    }
}
