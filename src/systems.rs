//! Fixed-step systems bridging the runner rules with Bevy ECS.
//!
//! Each system borrows the components it needs, runs the engine-free rule
//! from [`crate::locomotion`], [`crate::sensing`] or [`crate::interaction`]
//! with a [`RunnerSink`], and forwards what the sink collected as
//! [`Notification`] messages.

use bevy::prelude::*;
use glam::Vec2;
use log::info;

use crate::config::RunnerTuning;
use crate::input::{IntentInbox, RunnerIntent};
use crate::interaction::{Hitbox, Overlapping, Player, ScoreBoard, WorldObject};
use crate::locomotion::{Body, PresentationEvent, Runner};
use crate::presentation::{Notification, ObjectConsumed, RunnerDied, RunnerSink};
use crate::sensing::{integrate, sense_step, GroundMask, PlayArea, Terrain};

type PlayerRunners<'w, 's> =
    Query<'w, 's, (Entity, &'static mut Runner, &'static mut Body), With<Player>>;

type ActorRow = (
    Entity,
    &'static Transform,
    &'static mut Runner,
    &'static mut Body,
    Has<Player>,
);

fn planar(transform: &Transform) -> Vec2 {
    Vec2::new(transform.translation.x, transform.translation.y)
}

fn flush(
    sink: RunnerSink,
    runner: &Runner,
    notifications: &mut MessageWriter<Notification>,
    commands: &mut Commands,
) {
    if sink.recorded_death() {
        commands.trigger(RunnerDied {
            runner: sink.runner(),
            health: runner.health(),
        });
    }
    notifications.write_batch(sink.into_notifications());
}

/// Reports the starting state and health of newly spawned runners.
pub fn announce_spawned_runners_system(
    runners: Query<(Entity, &Runner), Added<Runner>>,
    mut notifications: MessageWriter<Notification>,
) {
    for (entity, runner) in &runners {
        info!(
            "runner {entity:?} spawned with {} health",
            runner.health()
        );
        notifications.write(Notification {
            runner: entity,
            event: PresentationEvent::StateChanged(runner.state()),
        });
        notifications.write(Notification {
            runner: entity,
            event: PresentationEvent::HealthChanged(runner.health()),
        });
    }
}

/// Drains the buffered intents and applies them, in arrival order, to every
/// player-controlled runner.
pub fn apply_intents_system(
    mut inbox: ResMut<IntentInbox>,
    mut runners: PlayerRunners<'_, '_>,
    mut notifications: MessageWriter<Notification>,
    mut commands: Commands,
) {
    if inbox.is_empty() {
        return;
    }
    let intents: Vec<_> = inbox.drain().collect();

    for (entity, mut runner, mut body) in &mut runners {
        let mut sink = RunnerSink::new(entity);
        for intent in &intents {
            match intent {
                RunnerIntent::JumpPressed => runner.on_jump_pressed(&mut body, &mut sink),
                RunnerIntent::CrouchPressed => runner.on_crouch_pressed(&mut body, &mut sink),
                RunnerIntent::CrouchReleased => runner.on_crouch_released(&mut body, &mut sink),
            };
        }
        flush(sink, &runner, &mut notifications, &mut commands);
    }
}

/// Runs [`sense_step`] against the [`Terrain`] for every runner.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn sense_system(
    mut runners: Query<(Entity, &Transform, &mut Runner, &mut Body)>,
    terrain: Res<Terrain>,
    area: Res<PlayArea>,
    ground: Res<GroundMask>,
    mut notifications: MessageWriter<Notification>,
    mut commands: Commands,
) {
    for (entity, transform, mut runner, mut body) in &mut runners {
        let mut sink = RunnerSink::new(entity);
        sense_step(
            &mut runner,
            &mut body,
            planar(transform),
            terrain.as_ref(),
            ground.0,
            area.0,
            &mut sink,
        );
        flush(sink, &runner, &mut notifications, &mut commands);
    }
}

/// Resolves overlaps between runners and active world objects.
///
/// Each object is consumed by at most one runner per step; once inactive it
/// is skipped for the rest of the round.
pub fn interaction_system(
    mut objects: Query<(Entity, &Transform, &Hitbox, &mut WorldObject)>,
    mut actors: Query<ActorRow>,
    mut score: ResMut<ScoreBoard>,
    mut notifications: MessageWriter<Notification>,
    mut consumed: MessageWriter<ObjectConsumed>,
    mut commands: Commands,
) {
    for (object_entity, object_transform, hitbox, mut object) in &mut objects {
        if !object.is_active() {
            continue;
        }
        let object_bounds = hitbox.world_aabb(planar(object_transform));

        for (entity, transform, mut runner, mut body, is_player) in &mut actors {
            let bounds = runner.shape().world_aabb(planar(transform));
            if !bounds.intersects(&object_bounds) {
                continue;
            }

            let mut sink = RunnerSink::new(entity);
            let other = if is_player {
                Overlapping::Character {
                    runner: &mut runner,
                    body: &mut body,
                }
            } else {
                Overlapping::Other
            };
            let outcome = object.on_overlap(other, &mut score, &mut sink);
            flush(sink, &runner, &mut notifications, &mut commands);

            if let Some(kind) = outcome {
                consumed.write(ObjectConsumed {
                    object: object_entity,
                    kind,
                });
                break;
            }
        }
    }
}

/// Integrates gravity and velocity for every runner.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn kinematics_system(
    mut runners: Query<(&Runner, &mut Body, &mut Transform)>,
    terrain: Res<Terrain>,
    ground: Res<GroundMask>,
    tuning: Res<RunnerTuning>,
) {
    for (runner, mut body, mut transform) in &mut runners {
        let mut position = planar(&transform);
        integrate(
            runner,
            &mut body,
            &mut position,
            &terrain,
            ground.0,
            tuning.gravity,
            tuning.fixed_timestep,
        );
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}
