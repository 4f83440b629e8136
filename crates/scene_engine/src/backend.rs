//! Graphics-subsystem collaborator
//!
//! The renderer composes over this trait instead of inheriting from a
//! native renderer type, so the scene bookkeeping can be exercised against
//! a mock backend and the public contract stays independent of any one
//! graphics API. Redraw requests are fire-and-forget; the backend may
//! coalesce or defer actual pixel output.

use std::collections::HashSet;

use crate::actor::ActorKey;
use crate::bounds::Bounds;
use crate::camera::Camera;

/// Operations the scene layer needs from the graphics subsystem
pub trait RenderBackend {
    /// Attach a low-level drawable prop for an actor
    fn add_prop(&mut self, key: ActorKey);

    /// Detach the drawable prop for an actor
    fn remove_prop(&mut self, key: ActorKey);

    /// Force-detach every remaining drawable prop
    fn remove_all_props(&mut self);

    /// Request a redraw; may be coalesced or deferred
    fn request_render(&mut self);

    /// Slide the camera along its view direction until `bounds` is framed
    fn reset_camera(&mut self, camera: &mut Camera, bounds: &Bounds);

    /// Recompute the camera's near/far clipping distances for `bounds`
    fn reset_clipping_range(&mut self, camera: &mut Camera, bounds: &Bounds);

    /// Viewport pick rectangle as (x0, y0, x1, y1)
    fn pick_rect(&self) -> (i32, i32, i32, i32);
}

/// Headless backend used by tests and non-interactive operation
///
/// Tracks attached props and counts calls so tests can assert on the
/// renderer's side effects. The camera fit is a deterministic slide: keep
/// the current view direction, retarget the focal point at the bounds
/// center and back off by the bounds diagonal.
#[derive(Debug, Default)]
pub struct NullBackend {
    props: HashSet<ActorKey>,
    renders: usize,
    camera_resets: usize,
    pick_rect: (i32, i32, i32, i32),
}

impl NullBackend {
    /// Create a backend with no attached props
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently attached props
    pub fn prop_count(&self) -> usize {
        self.props.len()
    }

    /// Whether a prop is attached for `key`
    pub fn has_prop(&self, key: ActorKey) -> bool {
        self.props.contains(&key)
    }

    /// Redraw requests seen so far
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Camera fits performed so far
    pub fn camera_reset_count(&self) -> usize {
        self.camera_resets
    }

    /// Seed the pick rectangle returned by [`RenderBackend::pick_rect`]
    pub fn set_pick_rect(&mut self, rect: (i32, i32, i32, i32)) {
        self.pick_rect = rect;
    }
}

impl RenderBackend for NullBackend {
    fn add_prop(&mut self, key: ActorKey) {
        self.props.insert(key);
    }

    fn remove_prop(&mut self, key: ActorKey) {
        self.props.remove(&key);
    }

    fn remove_all_props(&mut self) {
        self.props.clear();
    }

    fn request_render(&mut self) {
        self.renders += 1;
    }

    fn reset_camera(&mut self, camera: &mut Camera, bounds: &Bounds) {
        self.camera_resets += 1;
        let direction = camera.view_direction();
        let center = bounds.center();
        let distance = bounds.diagonal().max(1.0);
        camera.set_focal_point(center);
        camera.set_position(center - direction * distance);
        self.reset_clipping_range(camera, bounds);
    }

    fn reset_clipping_range(&mut self, camera: &mut Camera, bounds: &Bounds) {
        let diagonal = bounds.diagonal().max(1.0);
        camera.set_clipping_range(diagonal * 0.01, diagonal * 100.0);
    }

    fn pick_rect(&self) -> (i32, i32, i32, i32) {
        self.pick_rect
    }
}
