//! Bevy plugin wiring the runner systems into the schedule.

use bevy::prelude::*;

use crate::config::RunnerTuning;
use crate::input::{
    collect_intents_system, keyboard_intent_system, InputBindings, IntentInbox, RunnerIntent,
};
use crate::interaction::ScoreBoard;
use crate::presentation::{HudSnapshot, PresentationPlugin};
use crate::sensing::{GroundMask, PlayArea, Terrain};
use crate::systems::{
    announce_spawned_runners_system, apply_intents_system, interaction_system,
    kinematics_system, sense_system,
};

/// Ordered stages of one simulation step.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunnerSet {
    /// Spawn announcements and buffered player intents.
    Intents,
    /// Run speed, ground contact, landing and bounds checks.
    Sensing,
    /// World object overlaps.
    Interaction,
    /// Gravity and position integration.
    Kinematics,
}

/// Bevy plugin installing the runner simulation.
///
/// Simulation systems run in `FixedUpdate` at the tuning's
/// `fixed_timestep`. Insert a [`RunnerTuning`] before adding the plugin to
/// override the defaults; level geometry is installed separately with
/// [`crate::level::spawn_level`].
#[derive(Debug, Default)]
pub struct RunnerPlugin;

impl Plugin for RunnerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunnerTuning>();
        let tuning = app.world().resource::<RunnerTuning>().clone();

        app.insert_resource(Time::<Fixed>::from_seconds(f64::from(
            tuning.fixed_timestep,
        )));
        app.insert_resource(HudSnapshot::with_max_health(tuning.initial_health));
        app.add_plugins(PresentationPlugin);

        app.add_message::<RunnerIntent>();
        app.init_resource::<IntentInbox>();
        app.init_resource::<InputBindings>();
        app.init_resource::<ScoreBoard>();
        app.init_resource::<Terrain>();
        app.init_resource::<PlayArea>();
        app.init_resource::<GroundMask>();

        app.add_systems(
            PreUpdate,
            (keyboard_intent_system, collect_intents_system).chain(),
        );

        app.configure_sets(
            FixedUpdate,
            (
                RunnerSet::Intents,
                RunnerSet::Sensing,
                RunnerSet::Interaction,
                RunnerSet::Kinematics,
            )
                .chain(),
        );
        app.add_systems(
            FixedUpdate,
            (
                (announce_spawned_runners_system, apply_intents_system)
                    .chain()
                    .in_set(RunnerSet::Intents),
                sense_system.in_set(RunnerSet::Sensing),
                interaction_system.in_set(RunnerSet::Interaction),
                kinematics_system.in_set(RunnerSet::Kinematics),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn plugin_initialises_resources() {
        let mut app = App::new();
        app.add_plugins(RunnerPlugin);
        let world = app.world();
        assert!(world.contains_resource::<RunnerTuning>());
        assert!(world.contains_resource::<IntentInbox>());
        assert!(world.contains_resource::<ScoreBoard>());
        assert!(world.contains_resource::<Terrain>());
        assert!(world.contains_resource::<HudSnapshot>());
        assert_eq!(world.resource::<ScoreBoard>().score(), 0);
    }

    #[rstest]
    fn plugin_keeps_inserted_tuning() {
        let mut app = App::new();
        app.insert_resource(RunnerTuning {
            initial_health: 3,
            ..RunnerTuning::default()
        });
        app.add_plugins(RunnerPlugin);
        assert_eq!(app.world().resource::<RunnerTuning>().initial_health, 3);
        assert_eq!(app.world().resource::<HudSnapshot>().max_health, 3);
    }
}
