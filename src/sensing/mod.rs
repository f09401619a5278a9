//! Per-step physics sensing and the built-in kinematic world.
//!
//! [`sense_step`] is the fixed-step rule set: it enforces run speed, refreshes
//! ground contact, detects landings and kills runners that leave the play
//! area. World queries go through [`PhysicsProbe`] so a different physics
//! backend can answer them; [`Terrain`] is the one shipped with the crate.

mod kinematics;

pub use kinematics::integrate;

use bevy::prelude::Resource;
use glam::Vec2;
use log::debug;

use crate::geometry::Aabb;
use crate::locomotion::{Body, PresentationSink, Runner, RunnerState, VerticalMotion};
use crate::GROUND_CONTACT_TOLERANCE;

/// Bit set of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Layer holding walkable ground.
    pub const GROUND: Self = Self(1);

    /// Returns `true` when the two masks share any layer.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

/// World queries required by [`sense_step`].
#[cfg_attr(test, mockall::automock)]
pub trait PhysicsProbe {
    /// Returns `true` when `shape` touches a solid on any layer in `mask`.
    fn is_grounded(&self, shape: Aabb, mask: LayerMask) -> bool;

    /// Returns `true` when `point` lies within `region`.
    fn overlaps_region(&self, point: Vec2, region: Aabb) -> bool {
        region.contains(point)
    }
}

/// One solid rectangle of level geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solid {
    /// World-space bounds.
    pub bounds: Aabb,
    /// Layers the solid belongs to.
    pub layers: LayerMask,
}

/// Static level geometry.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Terrain {
    /// Every solid in the level.
    pub solids: Vec<Solid>,
}

impl Terrain {
    /// Adds a solid on the ground layer.
    pub fn push_ground(&mut self, bounds: Aabb) {
        self.solids.push(Solid {
            bounds,
            layers: LayerMask::GROUND,
        });
    }

    /// Solids that belong to any layer in `mask`.
    pub fn solids_in(&self, mask: LayerMask) -> impl Iterator<Item = &Solid> {
        self.solids
            .iter()
            .filter(move |solid| solid.layers.intersects(mask))
    }
}

impl PhysicsProbe for Terrain {
    fn is_grounded(&self, shape: Aabb, mask: LayerMask) -> bool {
        let probe = shape.extend_down(GROUND_CONTACT_TOLERANCE);
        self.solids_in(mask)
            .any(|solid| solid.bounds.intersects(&probe))
    }
}

/// Boundary region the runner must stay inside.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayArea(pub Aabb);

impl Default for PlayArea {
    /// Effectively unbounded until a level installs its own area.
    fn default() -> Self {
        Self(Aabb::from_center_size(Vec2::ZERO, Vec2::splat(1.0e6)))
    }
}

/// Layers counted as ground by [`sense_step`].
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundMask(pub LayerMask);

impl Default for GroundMask {
    fn default() -> Self {
        Self(LayerMask::GROUND)
    }
}

/// Runs the sensing rules for one fixed step.
///
/// Dead runners are skipped entirely so they stay frozen. The landing check
/// ignores ground contact while the body is still rising, which covers the
/// step on which a jump impulse was applied from the ground.
pub fn sense_step<P, S>(
    runner: &mut Runner,
    body: &mut Body,
    position: Vec2,
    probe: &P,
    ground: LayerMask,
    area: Aabb,
    sink: &mut S,
) where
    P: PhysicsProbe + ?Sized,
    S: PresentationSink + ?Sized,
{
    if runner.state().is_dead() {
        return;
    }

    body.velocity.x = runner.gait().horizontal_speed;
    let grounded = probe.is_grounded(runner.shape().world_aabb(position), ground);
    runner.set_grounded(grounded);

    if runner.state().is_airborne()
        && grounded
        && body.vertical_motion() == VerticalMotion::NotRising
    {
        runner.request_state(RunnerState::Run, body, sink);
    }

    if !probe.overlaps_region(position, area) {
        debug!("runner left the play area at {position:?}");
        runner.set_health(0, body, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locomotion::{PresentationEvent, Silent};
    use crate::DEFAULT_HORIZONTAL_SPEED;
    use mockall::predicate::{always, eq};
    use rstest::{fixture, rstest};

    #[fixture]
    fn area() -> Aabb {
        Aabb::from_center_size(Vec2::ZERO, Vec2::splat(100.0))
    }

    fn probe(grounded: bool, inside: bool) -> MockPhysicsProbe {
        let mut probe = MockPhysicsProbe::new();
        probe
            .expect_is_grounded()
            .with(always(), eq(LayerMask::GROUND))
            .return_const(grounded);
        probe.expect_overlaps_region().return_const(inside);
        probe
    }

    fn airborne_runner() -> (Runner, Body) {
        let mut runner = Runner::default();
        let mut body = Body::default();
        runner.request_state(RunnerState::Jump, &mut body, &mut Silent);
        (runner, body)
    }

    #[rstest]
    fn enforces_horizontal_speed(area: Aabb) {
        let mut runner = Runner::default();
        let mut body = Body::default();
        sense_step(
            &mut runner,
            &mut body,
            Vec2::ZERO,
            &probe(true, true),
            LayerMask::GROUND,
            area,
            &mut Vec::new(),
        );
        assert_eq!(body.velocity.x, DEFAULT_HORIZONTAL_SPEED);
        assert!(runner.is_grounded());
    }

    #[rstest]
    fn rising_runner_does_not_land(area: Aabb) {
        let (mut runner, mut body) = airborne_runner();
        assert!(body.velocity.y > 0.0);
        sense_step(
            &mut runner,
            &mut body,
            Vec2::ZERO,
            &probe(true, true),
            LayerMask::GROUND,
            area,
            &mut Vec::new(),
        );
        assert_eq!(runner.state(), RunnerState::Jump);
    }

    #[rstest]
    #[case::falling(-1.0)]
    #[case::resting(0.0)]
    fn grounded_descent_lands(area: Aabb, #[case] vy: f32) {
        let (mut runner, mut body) = airborne_runner();
        body.velocity.y = vy;
        let mut events = Vec::new();
        sense_step(
            &mut runner,
            &mut body,
            Vec2::ZERO,
            &probe(true, true),
            LayerMask::GROUND,
            area,
            &mut events,
        );
        assert_eq!(runner.state(), RunnerState::Run);
        assert_eq!(runner.jump_count(), 0);
        assert_eq!(events, vec![PresentationEvent::StateChanged(RunnerState::Run)]);
    }

    #[rstest]
    fn falling_without_ground_stays_airborne(area: Aabb) {
        let (mut runner, mut body) = airborne_runner();
        body.velocity.y = -3.0;
        sense_step(
            &mut runner,
            &mut body,
            Vec2::ZERO,
            &probe(false, true),
            LayerMask::GROUND,
            area,
            &mut Vec::new(),
        );
        assert_eq!(runner.state(), RunnerState::Jump);
        assert!(!runner.is_grounded());
    }

    #[rstest]
    fn leaving_play_area_kills(area: Aabb) {
        let mut runner = Runner::default();
        let mut body = Body::default();
        let mut events = Vec::new();
        sense_step(
            &mut runner,
            &mut body,
            Vec2::new(0.0, -80.0),
            &probe(false, false),
            LayerMask::GROUND,
            area,
            &mut events,
        );
        assert_eq!(runner.state(), RunnerState::Dead);
        assert_eq!(runner.health(), 0);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(
            events,
            vec![
                PresentationEvent::StateChanged(RunnerState::Dead),
                PresentationEvent::HealthChanged(0),
            ]
        );
    }

    #[rstest]
    fn dead_runner_is_not_sensed(area: Aabb) {
        let mut runner = Runner::default();
        let mut body = Body::default();
        runner.set_health(0, &mut body, &mut Vec::new());
        let mut untouched = MockPhysicsProbe::new();
        untouched.expect_is_grounded().never();
        untouched.expect_overlaps_region().never();
        sense_step(
            &mut runner,
            &mut body,
            Vec2::ZERO,
            &untouched,
            LayerMask::GROUND,
            area,
            &mut Vec::new(),
        );
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[rstest]
    #[case::standing(Vec2::new(0.0, 0.0), true)]
    #[case::hovering_within_tolerance(Vec2::new(0.0, GROUND_CONTACT_TOLERANCE * 0.5), true)]
    #[case::hovering(Vec2::new(0.0, 0.5), false)]
    #[case::past_the_edge(Vec2::new(12.0, 0.0), false)]
    fn terrain_ground_contact(#[case] position: Vec2, #[case] expected: bool) {
        let mut terrain = Terrain::default();
        terrain.push_ground(Aabb {
            min: Vec2::new(-10.0, -1.0),
            max: Vec2::new(10.0, 0.0),
        });
        let shape = Runner::default().shape().world_aabb(position);
        assert_eq!(terrain.is_grounded(shape, LayerMask::GROUND), expected);
    }

    #[test]
    fn other_layers_are_not_ground() {
        let mut terrain = Terrain::default();
        terrain.solids.push(Solid {
            bounds: Aabb {
                min: Vec2::new(-10.0, -1.0),
                max: Vec2::new(10.0, 0.0),
            },
            layers: LayerMask(1 << 1),
        });
        let shape = Runner::default().shape().world_aabb(Vec2::ZERO);
        assert!(!terrain.is_grounded(shape, LayerMask::GROUND));
    }
}
