//! Single-use world objects and the score board they feed.

use bevy::prelude::{Component, Resource};
use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;
use crate::locomotion::{Body, PresentationEvent, PresentationSink, Runner};

/// What a world object does when the player touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Adds its amount to the score.
    Coin,
    /// Removes its amount from the player's health.
    Obstacle,
}

/// Marker identifying the entity controlled by the player.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Player;

/// Trigger rectangle size of a world object, centred on its position.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hitbox(pub Vec2);

impl Hitbox {
    /// World-space rectangle for an object at `position`.
    #[must_use]
    pub fn world_aabb(&self, position: Vec2) -> Aabb {
        Aabb::from_center_size(position, self.0)
    }
}

/// A coin or obstacle placed in the level.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldObject {
    kind: ObjectKind,
    amount: u32,
    active: bool,
}

/// The entity overlapping a world object.
#[derive(Debug)]
pub enum Overlapping<'a> {
    /// The player's runner.
    Character {
        /// Runner whose health an obstacle reduces.
        runner: &'a mut Runner,
        /// Body frozen if the hit is fatal.
        body: &'a mut Body,
    },
    /// Anything else; world objects ignore it.
    Other,
}

impl WorldObject {
    /// Creates an active object.
    #[must_use]
    pub const fn new(kind: ObjectKind, amount: u32) -> Self {
        Self {
            kind,
            amount,
            active: true,
        }
    }

    /// Kind fixed at placement.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Magnitude fixed at placement.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }

    /// `false` once consumed; inactive objects ignore all overlaps.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Applies this object's effect to the overlapping entity and retires it.
    ///
    /// Returns the consumed kind, or `None` when the object was already
    /// consumed or the overlapping entity is not the character.
    pub fn on_overlap<S>(
        &mut self,
        other: Overlapping<'_>,
        score: &mut ScoreBoard,
        sink: &mut S,
    ) -> Option<ObjectKind>
    where
        S: PresentationSink + ?Sized,
    {
        if !self.active {
            return None;
        }
        let Overlapping::Character { runner, body } = other else {
            return None;
        };

        match self.kind {
            ObjectKind::Obstacle => runner.take_damage(self.amount, body, sink),
            ObjectKind::Coin => score.add(self.amount, sink),
        }

        self.active = false;
        debug!("{:?} worth {} consumed", self.kind, self.amount);
        sink.notify(PresentationEvent::ObjectConsumed(self.kind));
        Some(self.kind)
    }
}

/// Round-wide score accumulator.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u64,
}

impl ScoreBoard {
    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Increases the score and notifies `sink` of the new total.
    pub fn add<S>(&mut self, amount: u32, sink: &mut S)
    where
        S: PresentationSink + ?Sized,
    {
        self.score = self.score.saturating_add(u64::from(amount));
        sink.notify(PresentationEvent::ScoreChanged(self.score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locomotion::RunnerState;
    use crate::DEFAULT_INITIAL_HEALTH;
    use rstest::rstest;

    fn hit(
        object: &mut WorldObject,
        runner: &mut Runner,
        score: &mut ScoreBoard,
    ) -> Vec<PresentationEvent> {
        let mut body = Body::default();
        let mut events = Vec::new();
        object.on_overlap(
            Overlapping::Character {
                runner,
                body: &mut body,
            },
            score,
            &mut events,
        );
        events
    }

    #[rstest]
    fn coin_adds_score_once() {
        let mut coin = WorldObject::new(ObjectKind::Coin, 10);
        let mut runner = Runner::default();
        let mut score = ScoreBoard::default();

        let events = hit(&mut coin, &mut runner, &mut score);
        assert_eq!(score.score(), 10);
        assert!(!coin.is_active());
        assert_eq!(
            events,
            vec![
                PresentationEvent::ScoreChanged(10),
                PresentationEvent::ObjectConsumed(ObjectKind::Coin),
            ]
        );

        let events = hit(&mut coin, &mut runner, &mut score);
        assert_eq!(score.score(), 10);
        assert!(events.is_empty());
    }

    #[rstest]
    fn fatal_obstacle_kills_and_retires() {
        let mut obstacle = WorldObject::new(ObjectKind::Obstacle, 25);
        let mut runner = Runner::default();
        let mut score = ScoreBoard::default();
        assert_eq!(runner.health(), DEFAULT_INITIAL_HEALTH);

        let events = hit(&mut obstacle, &mut runner, &mut score);
        assert_eq!(runner.health(), -5);
        assert_eq!(runner.state(), RunnerState::Dead);
        assert!(!obstacle.is_active());
        assert_eq!(
            events,
            vec![
                PresentationEvent::StateChanged(RunnerState::Dead),
                PresentationEvent::HealthChanged(-5),
                PresentationEvent::ObjectConsumed(ObjectKind::Obstacle),
            ]
        );
    }

    #[rstest]
    fn non_character_overlap_is_ignored() {
        let mut coin = WorldObject::new(ObjectKind::Coin, 10);
        let mut score = ScoreBoard::default();
        let mut events = Vec::new();
        assert_eq!(
            coin.on_overlap(Overlapping::Other, &mut score, &mut events),
            None
        );
        assert!(coin.is_active());
        assert_eq!(score.score(), 0);
        assert!(events.is_empty());
    }

    #[rstest]
    #[case(&[10, 0, 5, 7])]
    #[case(&[u32::MAX, u32::MAX])]
    fn score_never_decreases(#[case] amounts: &[u32]) {
        let mut score = ScoreBoard::default();
        let mut previous = score.score();
        for &amount in amounts {
            let mut coin = WorldObject::new(ObjectKind::Coin, amount);
            let mut runner = Runner::default();
            hit(&mut coin, &mut runner, &mut score);
            assert!(score.score() >= previous);
            previous = score.score();
        }
    }

    #[rstest]
    fn obstacles_never_touch_score() {
        let mut score = ScoreBoard::default();
        score.add(30, &mut Vec::new());
        let mut runner = Runner::default();
        let mut obstacle = WorldObject::new(ObjectKind::Obstacle, 5);
        hit(&mut obstacle, &mut runner, &mut score);
        assert_eq!(score.score(), 30);
        assert_eq!(runner.health(), DEFAULT_INITIAL_HEALTH - 5);
    }
}
