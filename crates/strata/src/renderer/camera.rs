use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Mat4, Vec2, Vec4};

use crate::core::geometry::Rect;

/// Smallest zoom the camera accepts. Keeps the view transform invertible.
pub const MIN_ZOOM: f32 = 0.01;

/// Zoom used when limits have no area and the real floor would be infinite.
pub const MAX_ZOOM: f32 = 1000.0;

/// Where the camera may look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraLimits {
    /// Free roaming and zooming.
    #[default]
    Unbounded,
    /// The visible area must stay inside this world-space rectangle.
    Bounded(Rect),
}

impl CameraLimits {
    pub fn rect(&self) -> Option<Rect> {
        match *self {
            CameraLimits::Unbounded => None,
            CameraLimits::Bounded(rect) => Some(rect),
        }
    }
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ViewUniform {
    pub view_projection: [[f32; 4]; 4],
}

/// Zoomable 2D camera that can be held inside a limiting rectangle.
///
/// `position` is a view-space offset: the world point shown at the top-left of
/// the viewport when zoom is 1. Zoom scales around the viewport centre, so at
/// other zoom levels the visible top-left is found by inverting the view
/// transform.
///
/// With [`CameraLimits::Bounded`] every public mutator leaves the camera with
/// `zoom >= max(viewport / limits)` and the visible rectangle inside the limits.
#[derive(Debug, Clone)]
pub struct Camera {
    viewport: Vec2,
    origin: Vec2,
    position: Vec2,
    zoom: f32,
    limits: CameraLimits,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let viewport = Vec2::new(viewport_width, viewport_height);
        Self {
            viewport,
            origin: viewport / 2.0,
            position: Vec2::ZERO,
            zoom: 1.0,
            limits: CameraLimits::Unbounded,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn limits(&self) -> CameraLimits {
        self.limits
    }

    /// Viewport size in screen pixels.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Viewport centre in screen pixels; the pivot for zoom.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// World point at the centre of the screen.
    pub fn center(&self) -> Vec2 {
        self.position + self.origin
    }

    // -- Transforms --

    /// World -> screen.
    pub fn view_matrix(&self) -> Affine2 {
        Affine2::from_translation(self.origin)
            * Affine2::from_scale(Vec2::splat(self.zoom))
            * Affine2::from_translation(-self.origin - self.position)
    }

    /// Screen -> world.
    pub fn inverse_view_matrix(&self) -> Affine2 {
        self.view_matrix().inverse()
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.view_matrix().transform_point2(world)
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.inverse_view_matrix().transform_point2(screen)
    }

    /// View transform followed by a Y-down orthographic projection of the viewport.
    pub fn projection_matrix(&self) -> Mat4 {
        let view = self.view_matrix();
        let view4 = Mat4::from_cols(
            Vec4::new(view.matrix2.x_axis.x, view.matrix2.x_axis.y, 0.0, 0.0),
            Vec4::new(view.matrix2.y_axis.x, view.matrix2.y_axis.y, 0.0, 0.0),
            Vec4::Z,
            Vec4::new(view.translation.x, view.translation.y, 0.0, 1.0),
        );
        let projection = Mat4::orthographic_rh(0.0, self.viewport.x, self.viewport.y, 0.0, 0.0, 1.0);
        projection * view4
    }

    pub fn view_uniform(&self) -> ViewUniform {
        ViewUniform {
            view_projection: self.projection_matrix().to_cols_array_2d(),
        }
    }

    /// World-space rectangle currently on screen, as (min, max).
    pub fn visible_rect(&self) -> (Vec2, Vec2) {
        let min = self.screen_to_world(Vec2::ZERO);
        (min, min + self.viewport / self.zoom)
    }

    /// Check if a world-space point is visible in the viewport.
    pub fn is_visible(&self, point: Vec2) -> bool {
        let (min, max) = self.visible_rect();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Check if a world-space rectangle overlaps the viewport.
    pub fn is_rect_visible(&self, rect: &Rect) -> bool {
        let (min, max) = self.visible_rect();
        let (r_min, r_max) = (rect.min(), rect.max());
        r_max.x >= min.x && r_min.x <= max.x && r_max.y >= min.y && r_min.y <= max.y
    }

    // -- Mutators --

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(MIN_ZOOM);
        self.validate_zoom();
        self.validate_position();
    }

    /// Add `delta` to the current zoom.
    pub fn zoom_by(&mut self, delta: f32) {
        self.set_zoom(self.zoom + delta);
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.validate_position();
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.set_position(self.position + delta);
    }

    /// Replace the limits and immediately bring zoom and position in line.
    pub fn set_limits(&mut self, limits: CameraLimits) {
        self.limits = limits;
        if let CameraLimits::Bounded(rect) = limits {
            if (rect.width as f32) < self.viewport.x || (rect.height as f32) < self.viewport.y {
                log::warn!(
                    "camera limits {:?} are smaller than the {}x{} viewport; zoom will be forced up",
                    rect,
                    self.viewport.x,
                    self.viewport.y,
                );
            }
        }
        self.validate_zoom();
        self.validate_position();
    }

    /// Centre the view on `target` at once.
    pub fn look_at(&mut self, target: Vec2) {
        self.position = target - self.origin;
        self.validate_position();
    }

    /// Move the view centre a fraction `t` of the way toward `target`.
    pub fn lerp_look_at(&mut self, target: Vec2, t: f32) {
        let center = self.center().lerp(target, t.clamp(0.0, 1.0));
        self.position = center - self.origin;
        self.validate_position();
    }

    /// Zoom 1, position zero, then re-applied limits.
    pub fn reset(&mut self) {
        self.set_zoom(1.0);
        self.set_position(Vec2::ZERO);
    }

    /// Raise zoom until the visible area fits inside the limits.
    fn validate_zoom(&mut self) {
        let Some(rect) = self.limits.rect() else {
            return;
        };
        let floor_x = self.viewport.x / rect.width as f32;
        let floor_y = self.viewport.y / rect.height as f32;
        let mut floor = floor_x.max(floor_y);
        if !floor.is_finite() || rect.is_empty() {
            floor = MAX_ZOOM;
        }
        self.zoom = self.zoom.max(floor);
    }

    /// Slide the view back inside the limits.
    ///
    /// Clamps the visible top-left into `[limits.min, limits.max - visible size]`
    /// and shifts `position` by the same amount.
    pub fn validate_position(&mut self) {
        let Some(rect) = self.limits.rect() else {
            return;
        };
        let top_left = self.screen_to_world(Vec2::ZERO);
        let size = self.viewport / self.zoom;
        let lower = rect.min();
        let upper = rect.max() - size;
        let clamped = Vec2::new(
            top_left.x.min(upper.x).max(lower.x),
            top_left.y.min(upper.y).max(lower.y),
        );
        self.position += clamped - top_left;
    }
}
