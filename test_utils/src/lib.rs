//! Utility helpers for tests.
//!
//! Apps built here never run `App::update`; [`step`] drives the schedules
//! directly so each call is exactly one simulation step regardless of wall
//! clock time.

use bevy::ecs::message::{Message, Messages};
use bevy::prelude::*;
use cookie_runner::geometry::Aabb;
use cookie_runner::sensing::{PlayArea, Terrain};
use cookie_runner::{
    spawn_runner, HudSnapshot, Notification, Runner, RunnerIntent, RunnerPlugin, RunnerTuning,
    ScoreBoard,
};
use glam::Vec2;

/// Half-width of the ground strip installed by [`RunnerTestAppBuilder::with_flat_ground`].
pub const FLAT_GROUND_HALF_WIDTH: f32 = 500.0;

/// Builder for test `App` instances with [`RunnerPlugin`] installed.
pub struct RunnerTestAppBuilder {
    app: App,
}

impl Default for RunnerTestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RunnerTestAppBuilder {
    /// Creates an app with default tuning and no level geometry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tuning(RunnerTuning::default())
    }

    /// Creates an app using `tuning`.
    #[must_use]
    pub fn with_tuning(tuning: RunnerTuning) -> Self {
        let mut app = App::new();
        app.insert_resource(tuning).add_plugins(RunnerPlugin);
        Self { app }
    }

    /// Installs a wide ground strip whose top face is `y = 0`.
    #[must_use]
    pub fn with_flat_ground(mut self) -> Self {
        self.app.world_mut().resource_mut::<Terrain>().push_ground(Aabb {
            min: Vec2::new(-FLAT_GROUND_HALF_WIDTH, -1.0),
            max: Vec2::new(FLAT_GROUND_HALF_WIDTH, 0.0),
        });
        self
    }

    /// Restricts the play area to `area`.
    #[must_use]
    pub fn with_play_area(mut self, area: Aabb) -> Self {
        self.app.insert_resource(PlayArea(area));
        self
    }

    /// Spawns the player's runner with its feet at `position`.
    #[must_use]
    pub fn spawn_runner_at(mut self, position: Vec2) -> (Self, Entity) {
        let tuning = self.app.world().resource::<RunnerTuning>().clone();
        let entity = spawn_runner(self.app.world_mut(), &tuning, position);
        (self, entity)
    }

    /// Build and return the configured `App`.
    #[must_use]
    pub fn build(self) -> App {
        self.app
    }
}

/// Runs one input frame, one fixed simulation step and one presentation
/// frame.
pub fn step(app: &mut App) {
    let world = app.world_mut();
    world.run_schedule(PreUpdate);
    world.run_schedule(FixedUpdate);
    world.run_schedule(Update);
}

/// Runs [`step`] `count` times.
pub fn step_n(app: &mut App, count: usize) {
    for _ in 0..count {
        step(app);
    }
}

/// Queues an intent as if the input layer had raised it.
pub fn press(app: &mut App, intent: RunnerIntent) {
    app.world_mut().write_message(intent);
}

/// Returns a copy of the runner on `entity`.
///
/// # Panics
/// Panics if `entity` has no [`Runner`].
#[must_use]
pub fn runner(app: &App, entity: Entity) -> Runner {
    app.world()
        .get::<Runner>(entity)
        .cloned()
        .unwrap_or_else(|| panic!("{entity:?} has no Runner"))
}

/// Returns the planar position of `entity`.
///
/// # Panics
/// Panics if `entity` has no [`Transform`].
#[must_use]
pub fn position(app: &App, entity: Entity) -> Vec2 {
    app.world()
        .get::<Transform>(entity)
        .map(|t| Vec2::new(t.translation.x, t.translation.y))
        .unwrap_or_else(|| panic!("{entity:?} has no Transform"))
}

/// Current score.
#[must_use]
pub fn score(app: &App) -> u64 {
    app.world().resource::<ScoreBoard>().score()
}

/// Current HUD snapshot.
#[must_use]
pub fn hud(app: &App) -> HudSnapshot {
    *app.world().resource::<HudSnapshot>()
}

/// Removes and returns every buffered message of type `M`.
pub fn drain_messages<M: Message>(app: &mut App) -> Vec<M> {
    app.world_mut()
        .resource_mut::<Messages<M>>()
        .drain()
        .collect()
}

/// Removes and returns every buffered runner notification.
pub fn drain_notifications(app: &mut App) -> Vec<Notification> {
    drain_messages(app)
}
