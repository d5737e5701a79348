use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::geometry::{round_px, Rect};
use crate::systems::collision::{self, Axis, Collidable};

/// Sides of an entity that were pushed back by a solid tile during the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// A moving body.
///
/// `pos` is authoritative. Collision bounds are derived from it on demand and
/// never stored.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities are skipped by the physics step.
    pub active: bool,
    /// Position in pixel space. Sits at the centre of the `width` x `height` box.
    pub pos: Vec2,
    /// Velocity, integrated as pixels per frame.
    pub vel: Vec2,
    /// Sprite width in pixels.
    pub width: i32,
    /// Sprite height in pixels.
    pub height: i32,
    /// Collision box relative to the sprite's top-left corner.
    pub hitbox: Rect,
    /// Filled in by the physics step.
    pub contacts: Contacts,
}

impl Entity {
    /// Create a new entity at the origin with an empty sprite box.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            width: 0,
            height: 0,
            hitbox: Rect::default(),
            contacts: Contacts::default(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Set the sprite size. The hitbox defaults to the whole sprite.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self.hitbox = Rect::new(0, 0, width, height);
        self
    }

    pub fn with_hitbox(mut self, hitbox: Rect) -> Self {
        self.hitbox = hitbox;
        self
    }

    // -- Derived geometry --

    /// Half the sprite size, in whole pixels.
    pub fn origin(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }

    /// Top-left corner of the sprite box.
    pub fn top_left(&self) -> Vec2 {
        self.pos - self.origin()
    }

    /// Collision rectangle in pixel space.
    pub fn bounds(&self) -> Rect {
        let tl = self.top_left();
        let x = round_px(tl.x) as i32;
        let y = round_px(tl.y) as i32;
        self.hitbox.offset(x, y)
    }

    /// Tile coordinate of the raw position (not the bounds centre).
    pub fn tile_coordinates(&self, tile_width: i32, tile_height: i32) -> (i32, i32) {
        (
            (self.pos.x / tile_width as f32).floor() as i32,
            (self.pos.y / tile_height as f32).floor() as i32,
        )
    }

    /// Standing on a solid tile after the last step.
    pub fn grounded(&self) -> bool {
        self.contacts.bottom
    }

    /// `pos.x += round_px(vel.x)`.
    pub fn apply_velocity_x(&mut self) {
        self.pos.x += round_px(self.vel.x);
    }

    /// `pos.y += round_px(vel.y)`.
    pub fn apply_velocity_y(&mut self) {
        self.pos.y += round_px(self.vel.y);
    }
}

impl Collidable for Entity {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn set_velocity(&mut self, vel: Vec2) {
        self.vel = vel;
    }

    fn bounds(&self) -> Rect {
        Entity::bounds(self)
    }

    /// Records which side is about to be pushed back. Resolution itself is done
    /// by the tile's hook.
    fn on_collision(&mut self, other: &mut dyn Collidable, axis: Axis) {
        let tile = other.bounds();
        if collision::penetration(&*self, &tile, axis).is_none() {
            return;
        }
        match axis {
            Axis::Horizontal if self.vel.x > 0.0 => self.contacts.right = true,
            Axis::Horizontal => self.contacts.left = true,
            Axis::Vertical if self.vel.y > 0.0 => self.contacts.bottom = true,
            Axis::Vertical => self.contacts.top = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_use_rounded_top_left_plus_hitbox() {
        // 32x32 sprite with a 12x30 hitbox offset (10, 2).
        let e = Entity::new(EntityId(1))
            .with_size(32, 32)
            .with_hitbox(Rect::new(10, 2, 12, 30))
            .with_pos(Vec2::new(100.4, 50.6));
        assert_eq!(e.origin(), Vec2::new(16.0, 16.0));
        // top-left = (84.4, 34.6) -> (84, 35)
        assert_eq!(e.bounds(), Rect::new(94, 37, 12, 30));
    }

    #[test]
    fn half_pixel_positions_round_up_on_both_sides_of_zero() {
        let e = Entity::new(EntityId(1)).with_size(16, 16).with_pos(Vec2::new(7.5, 8.5));
        // top-left = (-0.5, 0.5)
        assert_eq!(e.bounds(), Rect::new(0, 1, 16, 16));
    }

    #[test]
    fn odd_sizes_use_integer_half() {
        let e = Entity::new(EntityId(1)).with_size(13, 7).with_pos(Vec2::new(6.0, 3.0));
        assert_eq!(e.origin(), Vec2::new(6.0, 3.0));
        assert_eq!(e.bounds(), Rect::new(0, 0, 13, 7));
    }

    #[test]
    fn tile_coordinates_floor_raw_position() {
        let e = Entity::new(EntityId(1)).with_pos(Vec2::new(175.0, 191.9));
        assert_eq!(e.tile_coordinates(32, 32), (5, 5));
        let e = e.with_pos(Vec2::new(-0.5, 0.0));
        assert_eq!(e.tile_coordinates(32, 32), (-1, 0));
    }

    #[test]
    fn velocity_is_rounded_on_integration() {
        let mut e = Entity::new(EntityId(1)).with_vel(Vec2::new(1.6, -0.4));
        e.apply_velocity_x();
        e.apply_velocity_y();
        assert_eq!(e.pos, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn builder_sets_fields() {
        let e = Entity::new(EntityId(3)).with_tag("player").with_size(16, 24);
        assert_eq!(e.tag, "player");
        assert_eq!(e.hitbox, Rect::new(0, 0, 16, 24));
        assert!(e.active);
        assert!(!e.contacts.any());
    }
}
