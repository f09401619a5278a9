//! Presentation-facing notifications and the HUD mirror.
//!
//! The simulation writes [`Notification`] and [`ObjectConsumed`] messages
//! from the fixed step. `PresentationPlugin` systems in `Update` only read
//! them, folding each notification into a [`HudSnapshot`] that a renderer
//! can display; a renderer hides objects named by [`ObjectConsumed`].
//! Nothing here writes back into simulation components.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, info};

use crate::interaction::ObjectKind;
use crate::locomotion::{PresentationEvent, PresentationSink, RunnerState};

/// A [`PresentationEvent`] raised for a specific runner.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// Runner the event concerns.
    pub runner: Entity,
    /// What changed.
    pub event: PresentationEvent,
}

/// A world object was consumed and should stop rendering and colliding.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectConsumed {
    /// The consumed object.
    pub object: Entity,
    /// Its kind.
    pub kind: ObjectKind,
}

/// Raised once when a runner enters the terminal state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerDied {
    /// The runner that died.
    pub runner: Entity,
    /// Health at the moment of death.
    pub health: i32,
}

/// [`PresentationSink`] that buffers events for one runner so a system can
/// forward them as messages once its mutable borrows end.
#[derive(Debug)]
pub struct RunnerSink {
    runner: Entity,
    events: Vec<PresentationEvent>,
}

impl RunnerSink {
    /// Starts an empty buffer for `runner`.
    #[must_use]
    pub const fn new(runner: Entity) -> Self {
        Self {
            runner,
            events: Vec::new(),
        }
    }

    /// Runner the buffered events belong to.
    #[must_use]
    pub const fn runner(&self) -> Entity {
        self.runner
    }

    /// `true` when a `Dead` transition was recorded.
    #[must_use]
    pub fn recorded_death(&self) -> bool {
        self.events
            .contains(&PresentationEvent::StateChanged(RunnerState::Dead))
    }

    /// Converts the buffered events into messages.
    pub fn into_notifications(self) -> impl Iterator<Item = Notification> {
        let runner = self.runner;
        self.events
            .into_iter()
            .map(move |event| Notification { runner, event })
    }
}

impl PresentationSink for RunnerSink {
    fn notify(&mut self, event: PresentationEvent) {
        self.events.push(event);
    }
}

/// Latest values observed by the presentation layer.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    /// Last committed runner state.
    pub state: RunnerState,
    /// Last reported health.
    pub health: i32,
    /// Health corresponding to a full bar.
    pub max_health: i32,
    /// Last reported score.
    pub score: u64,
    /// Objects hidden so far.
    pub consumed: usize,
}

impl Default for HudSnapshot {
    fn default() -> Self {
        Self {
            state: RunnerState::Run,
            health: crate::DEFAULT_INITIAL_HEALTH,
            max_health: crate::DEFAULT_INITIAL_HEALTH,
            score: 0,
            consumed: 0,
        }
    }
}

impl HudSnapshot {
    /// Full-health snapshot for a runner starting with `max_health`.
    #[must_use]
    pub fn with_max_health(max_health: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            ..Self::default()
        }
    }

    /// Applies one notification.
    pub fn apply(&mut self, event: PresentationEvent) {
        match event {
            PresentationEvent::StateChanged(state) => self.state = state,
            PresentationEvent::HealthChanged(health) => self.health = health,
            PresentationEvent::ScoreChanged(score) => self.score = score,
            PresentationEvent::ObjectConsumed(_) => self.consumed += 1,
        }
    }

    /// Score line as shown on screen.
    ///
    /// # Examples
    /// ```
    /// use cookie_runner::presentation::HudSnapshot;
    /// let hud = HudSnapshot { score: 40, ..HudSnapshot::default() };
    /// assert_eq!(hud.score_label(), "Score : 40");
    /// ```
    #[must_use]
    pub fn score_label(&self) -> String {
        format!("Score : {}", self.score)
    }

    /// Fill level of the health bar in `[0, 1]`.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Health values are small enough to be exact in f32."
    )]
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Folds runner notifications into the [`HudSnapshot`].
pub fn mirror_notifications_system(
    mut notifications: MessageReader<Notification>,
    mut hud: ResMut<HudSnapshot>,
) {
    for Notification { runner, event } in notifications.read().copied() {
        debug!("presentation: {runner:?} {event:?}");
        hud.apply(event);
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_runner_death(event: On<RunnerDied>) {
    let RunnerDied { runner, health } = event.event();
    info!("runner {runner:?} died with {health} health");
}

/// Plugin owning the read-only presentation mirror.
#[derive(Debug, Default)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<Notification>();
        app.add_message::<ObjectConsumed>();
        app.init_resource::<HudSnapshot>();
        app.add_observer(log_runner_death);
        app.add_systems(Update, mirror_notifications_system);
    }
}
