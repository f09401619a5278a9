//! Axis-aligned rectangles and the runner's collision shape.
//!
//! Everything here operates on plain `glam` vectors so the rules can be
//! exercised without a Bevy world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle described by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Bottom-left corner.
    pub min: Vec2,
    /// Top-right corner.
    pub max: Vec2,
}

impl Aabb {
    /// Builds a rectangle centred on `center` with the given full `size`.
    ///
    /// # Examples
    /// ```
    /// use cookie_runner::geometry::Aabb;
    /// use glam::Vec2;
    /// let rect = Aabb::from_center_size(Vec2::new(0.0, 1.0), Vec2::new(2.0, 2.0));
    /// assert_eq!(rect.min, Vec2::new(-1.0, 0.0));
    /// assert_eq!(rect.max, Vec2::new(1.0, 2.0));
    /// ```
    #[must_use]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns `true` when `point` lies inside or on the edge of the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Returns `true` when the two rectangles overlap or share an edge.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Horizontal overlap only, ignoring the vertical axis.
    #[must_use]
    pub fn overlaps_horizontally(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && other.min.x <= self.max.x
    }

    /// Extends the bottom edge downwards by `distance`.
    #[must_use]
    pub fn extend_down(self, distance: f32) -> Self {
        Self {
            min: Vec2::new(self.min.x, self.min.y - distance),
            max: self.max,
        }
    }
}

/// Authored rectangle as it appears in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectSpec {
    /// Centre x coordinate.
    pub x: f32,
    /// Centre y coordinate.
    pub y: f32,
    /// Full width.
    pub width: f32,
    /// Full height.
    pub height: f32,
}

impl RectSpec {
    /// Converts the authored rectangle into an [`Aabb`].
    #[must_use]
    pub fn to_aabb(self) -> Aabb {
        Aabb::from_center_size(
            Vec2::new(self.x, self.y),
            Vec2::new(self.width, self.height),
        )
    }
}

/// Box collider attached to the runner, relative to its position.
///
/// The offset locates the box centre; with the default offset of half the
/// height the runner's position sits at its feet, so halving both offset
/// and height keeps the feet on the ground while sliding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionShape {
    /// Centre of the box relative to the owner's position.
    pub offset: [f32; 2],
    /// Full width and height of the box.
    pub size: [f32; 2],
}

impl Default for CollisionShape {
    fn default() -> Self {
        Self {
            offset: [0.0, 1.0],
            size: [1.0, 2.0],
        }
    }
}

impl CollisionShape {
    /// Builds a shape from an offset and size.
    #[must_use]
    pub const fn new(offset: Vec2, size: Vec2) -> Self {
        Self {
            offset: [offset.x, offset.y],
            size: [size.x, size.y],
        }
    }

    /// Offset of the box centre as a vector.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        Vec2::new(self.offset[0], self.offset[1])
    }

    /// Full size of the box as a vector.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.size[0], self.size[1])
    }

    /// Halves the vertical offset and height.
    ///
    /// [`Self::restore_from_slide`] undoes it exactly as long as the halved
    /// values are normal floats; subnormal sizes lose their low bit.
    pub fn shrink_for_slide(&mut self) {
        self.offset[1] -= self.offset[1] / 2.0;
        self.size[1] -= self.size[1] / 2.0;
    }

    /// Doubles the vertical offset and height, reversing
    /// [`Self::shrink_for_slide`].
    pub fn restore_from_slide(&mut self) {
        self.offset[1] += self.offset[1];
        self.size[1] += self.size[1];
    }

    /// World-space rectangle for an owner standing at `position`.
    #[must_use]
    pub fn world_aabb(&self, position: Vec2) -> Aabb {
        Aabb::from_center_size(position + self.offset(), self.size())
    }

    /// Vertical distance from the owner's position to the bottom of the box.
    #[must_use]
    pub fn bottom_offset(&self) -> f32 {
        self.offset[1] - self.size[1].abs() * 0.5
    }
}
