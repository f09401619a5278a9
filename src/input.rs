//! Input adapter turning raw button edges into runner intents.
//!
//! Intents arrive as [`RunnerIntent`] messages at any rate and are folded
//! into an [`IntentInbox`], which keeps at most one pending jump and one
//! pending crouch edge, in the order they arrived, until the next
//! simulation step drains it.

use bevy::input::keyboard::KeyCode;
use bevy::input::ButtonInput;
use bevy::prelude::*;
use log::trace;

/// Zero-payload requests raised by the player.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunnerIntent {
    /// Jump button went down.
    JumpPressed,
    /// Crouch button went down.
    CrouchPressed,
    /// Crouch button came up.
    CrouchReleased,
}

/// Intents buffered between simulation steps, in arrival order.
///
/// Holds at most one jump and one crouch edge. A repeated jump keeps its
/// first position; a later crouch edge replaces the earlier one and moves
/// behind anything already queued.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct IntentInbox {
    pending: Vec<RunnerIntent>,
}

impl IntentInbox {
    /// Records an intent.
    pub fn push(&mut self, intent: RunnerIntent) {
        match intent {
            RunnerIntent::JumpPressed => {
                if self.pending.contains(&intent) {
                    return;
                }
            }
            RunnerIntent::CrouchPressed | RunnerIntent::CrouchReleased => {
                self.pending.retain(|queued| !queued.is_crouch_edge());
            }
        }
        self.pending.push(intent);
    }

    /// Records several intents in order.
    pub fn extend<I>(&mut self, intents: I)
    where
        I: IntoIterator<Item = RunnerIntent>,
    {
        for intent in intents {
            self.push(intent);
        }
    }

    /// Removes and returns the pending intents in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = RunnerIntent> {
        std::mem::take(&mut self.pending).into_iter()
    }

    /// Returns `true` when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl RunnerIntent {
    /// Returns `true` for the two crouch button edges.
    #[must_use]
    pub const fn is_crouch_edge(self) -> bool {
        matches!(self, Self::CrouchPressed | Self::CrouchReleased)
    }
}

/// Keys mapped to each intent.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct InputBindings {
    /// Keys that trigger a jump.
    pub jump: Vec<KeyCode>,
    /// Keys held to slide.
    pub crouch: Vec<KeyCode>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            jump: vec![KeyCode::Space, KeyCode::ArrowUp],
            crouch: vec![KeyCode::ArrowDown, KeyCode::KeyS],
        }
    }
}

/// Translates keyboard edges into [`RunnerIntent`] messages.
///
/// Does nothing when the app has no keyboard input resource, as in headless
/// runs.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn keyboard_intent_system(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<InputBindings>,
    mut intents: MessageWriter<RunnerIntent>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    if keyboard.any_just_pressed(bindings.jump.iter().copied()) {
        intents.write(RunnerIntent::JumpPressed);
    }
    if keyboard.any_just_pressed(bindings.crouch.iter().copied()) {
        intents.write(RunnerIntent::CrouchPressed);
    }
    if keyboard.any_just_released(bindings.crouch.iter().copied()) {
        intents.write(RunnerIntent::CrouchReleased);
    }
}

/// Folds newly written intents into the [`IntentInbox`].
pub fn collect_intents_system(
    mut intents: MessageReader<RunnerIntent>,
    mut inbox: ResMut<IntentInbox>,
) {
    for intent in intents.read() {
        trace!("intent {intent:?}");
        inbox.push(*intent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use RunnerIntent::{CrouchPressed, CrouchReleased, JumpPressed};

    fn queued(intents: &[RunnerIntent]) -> Vec<RunnerIntent> {
        let mut inbox = IntentInbox::default();
        inbox.extend(intents.iter().copied());
        let drained: Vec<_> = inbox.drain().collect();
        assert!(inbox.is_empty());
        drained
    }

    #[rstest]
    #[case::repeated_jumps_collapse(&[JumpPressed, JumpPressed], &[JumpPressed])]
    #[case::latest_crouch_edge_wins(&[CrouchPressed, CrouchReleased], &[CrouchReleased])]
    #[case::release_then_press(&[CrouchReleased, CrouchPressed], &[CrouchPressed])]
    #[case::crouch_before_jump(&[CrouchPressed, JumpPressed], &[CrouchPressed, JumpPressed])]
    #[case::jump_before_crouch(&[JumpPressed, CrouchPressed], &[JumpPressed, CrouchPressed])]
    #[case::replaced_edge_moves_back(
        &[CrouchPressed, JumpPressed, CrouchReleased],
        &[JumpPressed, CrouchReleased]
    )]
    #[case::jump_keeps_first_slot(
        &[JumpPressed, CrouchPressed, JumpPressed],
        &[JumpPressed, CrouchPressed]
    )]
    fn inbox_keeps_arrival_order(
        #[case] intents: &[RunnerIntent],
        #[case] expected: &[RunnerIntent],
    ) {
        assert_eq!(queued(intents), expected);
    }

    #[rstest]
    fn keyboard_edges_become_intents() {
        let mut app = App::new();
        app.add_message::<RunnerIntent>()
            .init_resource::<InputBindings>()
            .init_resource::<IntentInbox>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(
                Update,
                (keyboard_intent_system, collect_intents_system).chain(),
            );

        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::Space);
            keys.press(KeyCode::ArrowDown);
        }
        app.update();

        let mut inbox = app.world_mut().resource_mut::<IntentInbox>();
        assert_eq!(
            inbox.drain().collect::<Vec<_>>(),
            vec![JumpPressed, CrouchPressed]
        );
    }

    #[rstest]
    fn headless_app_without_keyboard_is_quiet() {
        let mut app = App::new();
        app.add_message::<RunnerIntent>()
            .init_resource::<InputBindings>()
            .init_resource::<IntentInbox>()
            .add_systems(
                Update,
                (keyboard_intent_system, collect_intents_system).chain(),
            );
        app.update();
        assert!(app.world().resource::<IntentInbox>().is_empty());
    }
}
