//! Gravity integration and ground resolution for the built-in world.

use glam::Vec2;

use super::{LayerMask, Terrain};
use crate::locomotion::{Body, Runner, VerticalMotion};

/// Advances `position` by one step of length `dt`.
///
/// Gravity is scaled by the body's `gravity_scale`. A body that is not
/// rising and whose feet cross the top face of a `ground` solid is placed on
/// that face with its vertical velocity zeroed. Dead runners are left
/// untouched.
pub fn integrate(
    runner: &Runner,
    body: &mut Body,
    position: &mut Vec2,
    terrain: &Terrain,
    ground: LayerMask,
    gravity: f32,
    dt: f32,
) {
    if runner.state().is_dead() {
        return;
    }

    body.velocity.y += gravity * body.gravity_scale * dt;
    let previous = *position;
    *position += body.velocity * dt;

    if body.vertical_motion() == VerticalMotion::Rising {
        return;
    }

    let shape = runner.shape();
    let feet_before = previous.y + shape.bottom_offset();
    let feet_after = position.y + shape.bottom_offset();
    let footprint = shape.world_aabb(*position);

    let landing = terrain
        .solids_in(ground)
        .filter(|solid| solid.bounds.overlaps_horizontally(&footprint))
        .map(|solid| solid.bounds.max.y)
        .filter(|&top| feet_before >= top && feet_after <= top)
        .reduce(f32::max);

    if let Some(top) = landing {
        position.y = top - shape.bottom_offset();
        body.velocity.y = 0.0;
    }
}
