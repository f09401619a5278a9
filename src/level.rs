//! Spawning the runner and the level described by a [`LevelLayout`].
//!
//! Level geometry becomes the [`Terrain`] and [`PlayArea`] resources; each
//! placement becomes an entity carrying a [`WorldObject`] and a [`Hitbox`].

use bevy::prelude::*;
use glam::Vec2;
use log::{info, warn};

use crate::config::{LevelLayout, ObjectPlacement, RunnerTuning};
use crate::interaction::{Hitbox, Player, WorldObject};
use crate::locomotion::{Body, Runner};
use crate::sensing::{PlayArea, Terrain};

/// Components making up the player's runner.
#[derive(Bundle)]
pub struct RunnerBundle {
    /// Player marker for player-specific queries.
    pub player: Player,
    /// Locomotion state machine.
    pub runner: Runner,
    /// Velocity and gravity scale.
    pub body: Body,
    /// Feet position.
    pub transform: Transform,
    /// Human-readable name for debugging.
    pub name: Name,
}

impl RunnerBundle {
    /// Creates a full-health runner standing at `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cookie_runner::config::RunnerTuning;
    /// use cookie_runner::level::RunnerBundle;
    /// use glam::Vec2;
    ///
    /// let bundle = RunnerBundle::new(&RunnerTuning::default(), Vec2::new(2.0, 0.0));
    /// assert_eq!(bundle.runner.health(), 20);
    /// assert_eq!(bundle.transform.translation.x, 2.0);
    /// ```
    #[must_use]
    pub fn new(tuning: &RunnerTuning, position: Vec2) -> Self {
        Self {
            player: Player,
            runner: Runner::new(tuning.initial_health, tuning.shape, tuning.gait()),
            body: Body::default(),
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            name: Name::new("Runner"),
        }
    }
}

/// Components making up one coin or obstacle.
#[derive(Bundle)]
pub struct ObjectBundle {
    /// Kind, amount and consumption flag.
    pub object: WorldObject,
    /// Trigger rectangle size.
    pub hitbox: Hitbox,
    /// Centre of the trigger rectangle.
    pub transform: Transform,
    /// Human-readable name for debugging.
    pub name: Name,
}

impl From<&ObjectPlacement> for ObjectBundle {
    fn from(placement: &ObjectPlacement) -> Self {
        let rect = placement.rect;
        Self {
            object: WorldObject::new(placement.kind, placement.amount),
            hitbox: Hitbox(Vec2::new(rect.width, rect.height)),
            transform: Transform::from_xyz(rect.x, rect.y, 0.0),
            name: Name::new(format!("{:?}", placement.kind)),
        }
    }
}

/// Spawns the player's runner at `position` and returns its entity.
pub fn spawn_runner(world: &mut World, tuning: &RunnerTuning, position: Vec2) -> Entity {
    world.spawn(RunnerBundle::new(tuning, position)).id()
}

/// Installs the level geometry, spawns its objects and the runner, and
/// returns the runner entity.
///
/// Replaces any previously installed [`Terrain`] and [`PlayArea`].
pub fn spawn_level(world: &mut World, layout: &LevelLayout, tuning: &RunnerTuning) -> Entity {
    let mut terrain = Terrain::default();
    for rect in &layout.ground {
        terrain.push_ground(rect.to_aabb());
    }
    let area = layout.play_area.to_aabb();
    world.insert_resource(terrain);
    world.insert_resource(PlayArea(area));

    world.spawn_batch(
        layout
            .objects
            .iter()
            .map(ObjectBundle::from)
            .collect::<Vec<_>>(),
    );

    let spawn = layout.spawn_point();
    if !area.contains(spawn) {
        warn!("spawn point {spawn:?} lies outside the play area");
    }
    info!(
        "level spawned: {} ground rects, {} objects",
        layout.ground.len(),
        layout.objects.len()
    );
    spawn_runner(world, tuning, spawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::ObjectKind;
    use crate::locomotion::RunnerState;
    use crate::sensing::{LayerMask, PhysicsProbe};
    use rstest::rstest;

    #[rstest]
    fn demo_level_populates_world() {
        let mut world = World::new();
        let layout = LevelLayout::demo();
        let runner = spawn_level(&mut world, &layout, &RunnerTuning::default());

        let objects = world
            .query::<&WorldObject>()
            .iter(&world)
            .filter(|object| object.is_active())
            .count();
        assert_eq!(objects, layout.objects.len());
        assert_eq!(world.resource::<Terrain>().solids.len(), layout.ground.len());

        let spawned = world.get::<Runner>(runner).expect("runner spawned");
        assert_eq!(spawned.state(), RunnerState::Run);
        assert!(world.get::<Player>(runner).is_some());
    }

    #[rstest]
    fn runner_spawns_on_demo_ground() {
        let mut world = World::new();
        let tuning = RunnerTuning::default();
        let runner = spawn_level(&mut world, &LevelLayout::demo(), &tuning);
        let position = world
            .get::<Transform>(runner)
            .map(|t| Vec2::new(t.translation.x, t.translation.y))
            .expect("runner has a transform");
        let shape = tuning.shape.world_aabb(position);
        assert!(world
            .resource::<Terrain>()
            .is_grounded(shape, LayerMask::GROUND));
    }

    #[rstest]
    fn placement_becomes_centred_hitbox() {
        let layout = LevelLayout::demo();
        let obstacle = layout
            .objects
            .iter()
            .find(|p| p.kind == ObjectKind::Obstacle)
            .expect("demo has an obstacle");
        let bundle = ObjectBundle::from(obstacle);
        assert_eq!(bundle.object.kind(), ObjectKind::Obstacle);
        assert_eq!(
            bundle
                .hitbox
                .world_aabb(Vec2::new(obstacle.rect.x, obstacle.rect.y)),
            obstacle.rect.to_aabb()
        );
    }
}
