//! Viewport renderer
//!
//! Composition root for one rendering viewport: owns the actor registry,
//! the scene scale, the camera and the bound decorations, and keeps them
//! consistent across every mutation. The graphics subsystem is reached
//! only through the [`RenderBackend`] trait, so the whole layer runs
//! headless under tests.
//!
//! Control flow for a scene mutation: the registry is updated, the
//! decorations are compared against the new aggregate bounds and
//! regenerated if they drifted, and the camera is either refit or a plain
//! redraw is requested depending on the [`CameraPolicy`] and whether an
//! explicit camera position was ever chosen.

use crate::actor::{Actor, ActorKey, ActorKind, AddActorInput, Culling};
use crate::backend::RenderBackend;
use crate::bounds::Bounds;
use crate::camera::{Camera, CameraLocation, CameraPolicy, CameraPose, ViewPreset};
use crate::decorations::{
    AxesMarkerState, AxesMarkerStyle, BoundingBoxState, BoundingBoxStyle, CubeAxesState,
    CubeAxesStyle,
};
use crate::error::SceneResult;
use crate::foundation::math::Vec3;
use crate::registry::ActorRegistry;
use crate::scalar_bar::{ScalarBarObserver, ScalarBarSlots};
use crate::scale::{scale_point, Scale};
use crate::theme::Theme;

/// Options accepted by [`Renderer::add_actor`]
#[derive(Debug, Clone)]
pub struct AddActorOptions {
    /// Registry name; a unique one is generated when omitted
    pub name: Option<String>,
    /// What the addition does to the camera
    pub policy: CameraPolicy,
    /// Whether viewport picking may select the actor
    pub pickable: bool,
    /// Face-culling mode in string form; validated before registration
    pub culling: Option<String>,
}

impl Default for AddActorOptions {
    fn default() -> Self {
        Self {
            name: None,
            policy: CameraPolicy::AutoIfUnset,
            pickable: true,
            culling: None,
        }
    }
}

impl AddActorOptions {
    /// Options registering under `name`
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Override the camera policy
    #[must_use]
    pub fn policy(mut self, policy: CameraPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override pickability
    #[must_use]
    pub fn pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    /// Request face culling; `"front"` or `"back"` (and their aliases)
    #[must_use]
    pub fn culling(mut self, culling: impl Into<String>) -> Self {
        self.culling = Some(culling.into());
        self
    }
}

/// What to remove: a name, an actor key, or an ordered collection of
/// either
///
/// One polymorphic entry point replaces the original's runtime type
/// dispatch on the removal argument.
#[derive(Debug, Clone)]
pub enum RemoveTarget {
    /// Remove by registry name
    Name(String),
    /// Remove by actor key
    Key(ActorKey),
    /// Remove each target in order
    Many(Vec<RemoveTarget>),
}

impl From<&str> for RemoveTarget {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for RemoveTarget {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<ActorKey> for RemoveTarget {
    fn from(key: ActorKey) -> Self {
        Self::Key(key)
    }
}

impl From<Vec<RemoveTarget>> for RemoveTarget {
    fn from(targets: Vec<RemoveTarget>) -> Self {
        Self::Many(targets)
    }
}

/// Scene-management layer for one rendering viewport
///
/// Generic over the graphics backend so tests and headless use run
/// against [`crate::backend::NullBackend`].
pub struct Renderer<B: RenderBackend> {
    backend: B,
    registry: ActorRegistry,
    scale: Scale,
    camera: Camera,
    camera_set: bool,
    bounding_box: Option<BoundingBoxState>,
    cube_axes: Option<CubeAxesState>,
    axes_marker: Option<AxesMarkerState>,
    scalar_bar_slots: ScalarBarSlots,
    scalar_bar_observer: Option<Box<dyn ScalarBarObserver>>,
    theme: Theme,
}

impl<B: RenderBackend> Renderer<B> {
    /// Create a renderer with the default theme
    pub fn new(backend: B) -> Self {
        Self::with_theme(backend, Theme::default())
    }

    /// Create a renderer with a caller-provided theme
    pub fn with_theme(backend: B, theme: Theme) -> Self {
        Self {
            backend,
            registry: ActorRegistry::new(),
            scale: Scale::default(),
            camera: Camera::new(),
            camera_set: false,
            bounding_box: None,
            cube_axes: None,
            axes_marker: None,
            scalar_bar_slots: ScalarBarSlots::new(theme.max_color_bars),
            scalar_bar_observer: None,
            theme,
        }
    }

    /// Borrow the graphics backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrow the graphics backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The active theme
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Borrow the camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Whether an explicit camera position has ever been chosen
    pub fn camera_set(&self) -> bool {
        self.camera_set
    }

    /// Number of registered actors, decorations included
    pub fn actor_count(&self) -> usize {
        self.registry.len()
    }

    /// Look up an actor key by registry name
    pub fn actor_key(&self, name: &str) -> Option<ActorKey> {
        self.registry.key_of(name)
    }

    /// Borrow a registered actor
    pub fn actor(&self, key: ActorKey) -> Option<&Actor> {
        self.registry.get(key)
    }

    /// Mutably borrow an actor's style properties
    pub fn properties_mut(&mut self, key: ActorKey) -> Option<&mut crate::actor::ActorProperties> {
        self.registry.get_mut(key).map(|actor| &mut actor.properties)
    }

    // ------------------------------------------------------------------
    // Actor registry operations
    // ------------------------------------------------------------------

    /// Add an actor (or wrap a bare mapper handle) under a unique name
    ///
    /// If `opts.name` is already registered the prior entry is removed
    /// first, without resetting the camera, so replacement is atomic from
    /// the caller's perspective. Culling is validated before anything is
    /// mutated; a rejected option leaves the registry untouched. Style
    /// properties of the registered actor stay reachable through
    /// [`Renderer::properties_mut`].
    pub fn add_actor(
        &mut self,
        input: impl Into<AddActorInput>,
        opts: AddActorOptions,
    ) -> SceneResult<ActorKey> {
        let culling = match opts.culling.as_deref() {
            Some(spec) => spec.parse::<Culling>()?,
            None => Culling::None,
        };
        let mut actor = input.into().into_actor();
        actor.pickable = opts.pickable;
        actor.culling = culling;
        Ok(self.register(actor, opts.name, opts.policy))
    }

    /// Remove actors by name, key, or an ordered collection of either
    ///
    /// Returns true when at least one removal succeeded. A name that is
    /// not registered is not an error; the call returns false and the
    /// scene is untouched. Removal by name also sweeps `"{name}-"`
    /// children registered for multi-block data.
    pub fn remove_actor(&mut self, target: impl Into<RemoveTarget>, policy: CameraPolicy) -> bool {
        self.remove_target(target.into(), policy)
    }

    fn remove_target(&mut self, target: RemoveTarget, policy: CameraPolicy) -> bool {
        match target {
            RemoveTarget::Many(targets) => {
                let mut removed = false;
                for entry in targets {
                    removed |= self.remove_target(entry, policy);
                }
                removed
            }
            RemoveTarget::Name(name) => {
                let children = self.registry.names_with_prefix(&name);
                if !children.is_empty() {
                    let targets = children.into_iter().map(RemoveTarget::Name).collect();
                    self.remove_target(RemoveTarget::Many(targets), policy);
                }
                match self.registry.key_of(&name) {
                    Some(key) => self.remove_key(key, policy),
                    None => false,
                }
            }
            RemoveTarget::Key(key) => self.remove_key(key, policy),
        }
    }

    fn remove_key(&mut self, key: ActorKey, policy: CameraPolicy) -> bool {
        let Some(actor) = self.registry.get(key) else {
            return false;
        };
        let mapper = actor.mapper;

        // Colorbar cleanup happens before the prop is detached so the
        // observer can still resolve the mapper.
        if let Some(mapper) = mapper {
            if let Some(observer) = self.scalar_bar_observer.as_mut() {
                observer.actor_removed(mapper, &mut self.scalar_bar_slots);
            }
        }

        self.backend.remove_prop(key);
        if let Some(removed) = self.registry.remove(key) {
            log::debug!("removed actor {:?} ({})", key, removed.name());
        }

        if self.bounding_box.as_ref().is_some_and(|state| state.key == key) {
            self.bounding_box = None;
        }
        if self.cube_axes.as_ref().is_some_and(|state| state.key == key) {
            self.cube_axes = None;
        }
        if self.axes_marker.as_ref().is_some_and(|state| state.key == key) {
            self.axes_marker = None;
        }

        self.update_decorations();
        self.apply_camera_policy(policy, false);
        true
    }

    /// Remove every registered actor without resetting the camera, then
    /// force-detach any remaining low-level props
    pub fn clear(&mut self) {
        for key in self.registry.keys() {
            self.remove_actor(key, CameraPolicy::NeverReset);
        }
        self.backend.remove_all_props();
    }

    fn register(&mut self, actor: Actor, name: Option<String>, policy: CameraPolicy) -> ActorKey {
        let replaced = match name.as_deref() {
            Some(name) => self.remove_actor(name, CameraPolicy::NeverReset),
            None => false,
        };
        let key = self.registry.insert(actor, name);
        self.backend.add_prop(key);
        if let Some(actor) = self.registry.get(key) {
            log::debug!("registered actor {:?} ({})", key, actor.name());
        }
        self.apply_camera_policy(policy, replaced);
        self.update_decorations();
        self.reset_clipping_range();
        key
    }

    // ------------------------------------------------------------------
    // Bounds
    // ------------------------------------------------------------------

    /// Union bounding volume of all non-decoration actors
    ///
    /// Read-only and linear in actor count; an empty scene reports the
    /// degenerate unit box.
    pub fn bounds(&self) -> Bounds {
        self.registry.aggregate_bounds()
    }

    /// Center of the aggregate bounding volume
    pub fn center(&self) -> Vec3 {
        self.bounds().center()
    }

    // ------------------------------------------------------------------
    // Scale
    // ------------------------------------------------------------------

    /// The current per-axis scene scale
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Scale the scene independently along each axis
    ///
    /// Missing axes keep their previous factor; zero and negative factors
    /// normalize to 1. The scale is realized as the camera's
    /// model-transform matrix, so actor geometry is never touched.
    pub fn set_scale(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>, reset_camera: bool) {
        self.scale.set(x, y, z);
        self.camera.set_model_transform(self.scale.to_matrix());
        self.backend.request_render();
        if reset_camera {
            self.update_decorations();
            self.reset_camera();
        }
    }

    /// Map a point between world coordinates and the camera's scaled space
    pub fn scale_point(&self, point: Vec3, invert: bool) -> SceneResult<Vec3> {
        scale_point(self.camera.model_transform(), point, invert)
    }

    // ------------------------------------------------------------------
    // Camera
    // ------------------------------------------------------------------

    /// Camera pose in unscaled world coordinates
    pub fn camera_position(&self) -> SceneResult<CameraPose> {
        self.camera.world_pose()
    }

    /// Place the camera
    ///
    /// Accepts a named planar shorthand, a bare view direction from the
    /// scene center, or an explicit pose. `None` is a no-op. An explicit
    /// pose transitions the camera into the set state, suppressing
    /// auto-fit on later scene changes.
    pub fn set_camera_position(&mut self, location: Option<CameraLocation>) -> SceneResult<()> {
        let Some(location) = location else {
            return Ok(());
        };
        match location {
            CameraLocation::Preset { preset, negative } => {
                let mut vector = preset.vector();
                if negative {
                    vector = -vector;
                }
                self.view_vector(vector, Some(preset.view_up()))
            }
            CameraLocation::Direction(vector) => self.view_vector(vector, None),
            CameraLocation::Pose(pose) => {
                self.camera.set_world_position(pose.position)?;
                self.camera.set_world_focal_point(pose.focal_point)?;
                self.camera.set_view_up(pose.view_up);
                self.reset_clipping_range();
                self.camera_set = true;
                Ok(())
            }
        }
    }

    /// Point the camera at the scene center from `focal + vector`
    pub fn view_vector(&mut self, vector: Vec3, view_up: Option<Vec3>) -> SceneResult<()> {
        let focal = self.center();
        let view_up = view_up.unwrap_or_else(|| Vec3::from(self.theme.camera.viewup));
        self.set_camera_position(Some(CameraLocation::Pose(CameraPose {
            position: vector + focal,
            focal_point: focal,
            view_up,
        })))?;
        self.reset_camera();
        Ok(())
    }

    /// View the XY plane
    pub fn view_xy(&mut self, negative: bool) -> SceneResult<()> {
        self.view_preset(ViewPreset::Xy, negative)
    }

    /// View the YX plane
    pub fn view_yx(&mut self, negative: bool) -> SceneResult<()> {
        self.view_preset(ViewPreset::Yx, negative)
    }

    /// View the XZ plane
    pub fn view_xz(&mut self, negative: bool) -> SceneResult<()> {
        self.view_preset(ViewPreset::Xz, negative)
    }

    /// View the ZX plane
    pub fn view_zx(&mut self, negative: bool) -> SceneResult<()> {
        self.view_preset(ViewPreset::Zx, negative)
    }

    /// View the YZ plane
    pub fn view_yz(&mut self, negative: bool) -> SceneResult<()> {
        self.view_preset(ViewPreset::Yz, negative)
    }

    /// View the ZY plane
    pub fn view_zy(&mut self, negative: bool) -> SceneResult<()> {
        self.view_preset(ViewPreset::Zy, negative)
    }

    fn view_preset(&mut self, preset: ViewPreset, negative: bool) -> SceneResult<()> {
        self.set_camera_position(Some(CameraLocation::Preset { preset, negative }))
    }

    /// Default camera pose: the scene center plus the theme's offset
    /// direction, divided by the scene scale
    ///
    /// Falls back to the origin as focal point when the scene center is
    /// undefined.
    pub fn default_camera_pose(&self, negative: bool) -> CameraPose {
        let center = self.center();
        let focal = if center.iter().any(|c| c.is_nan()) {
            Vec3::zeros()
        } else {
            center
        };
        let mut offset = Vec3::from(self.theme.camera.position);
        if negative {
            offset = -offset;
        }
        offset = offset.component_div(&self.scale.as_vec3());
        CameraPose {
            position: offset + focal,
            focal_point: focal,
            view_up: Vec3::from(self.theme.camera.viewup),
        }
    }

    /// Reset the camera to the default isometric view
    ///
    /// Transitions the camera back to the unset state so subsequent scene
    /// changes keep auto-fitting, then performs a bounds fit.
    pub fn view_isometric(&mut self, negative: bool) -> SceneResult<()> {
        let pose = self.default_camera_pose(negative);
        self.set_camera_position(Some(CameraLocation::Pose(pose)))?;
        self.camera_set = false;
        self.reset_camera();
        Ok(())
    }

    /// Slide the camera along its view direction until all actors are
    /// framed, then request a redraw
    pub fn reset_camera(&mut self) {
        let bounds = self.bounds();
        self.backend.reset_camera(&mut self.camera, &bounds);
        self.backend.request_render();
    }

    /// Recompute the camera's clipping range for the current bounds
    pub fn reset_clipping_range(&mut self) {
        let bounds = self.bounds();
        self.backend.reset_clipping_range(&mut self.camera, &bounds);
    }

    /// Aim the camera at a world-space point
    pub fn set_focus(&mut self, point: Vec3) -> SceneResult<()> {
        self.camera.set_world_focal_point(point)
    }

    /// Move the camera to a world-space point
    ///
    /// Transitions the camera into the set state. With `reset` the camera
    /// is refit to the scene bounds afterwards.
    pub fn set_position(&mut self, point: Vec3, reset: bool) -> SceneResult<()> {
        self.camera.set_world_position(point)?;
        if reset {
            self.reset_camera();
        }
        self.camera_set = true;
        Ok(())
    }

    /// Set the camera's view-up direction
    pub fn set_viewup(&mut self, vector: Vec3) {
        self.camera.set_view_up(vector);
    }

    fn apply_camera_policy(&mut self, policy: CameraPolicy, replaced: bool) {
        match policy {
            CameraPolicy::ForceReset => self.reset_camera(),
            CameraPolicy::NeverReset => self.backend.request_render(),
            CameraPolicy::AutoIfUnset => {
                if !self.camera_set && !replaced {
                    self.reset_camera();
                } else {
                    self.backend.request_render();
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Decorations
    // ------------------------------------------------------------------

    /// Key of the live bounding-box decoration, if any
    pub fn bounding_box_actor(&self) -> Option<ActorKey> {
        self.bounding_box.as_ref().map(|state| state.key)
    }

    /// Key of the live cube-axes decoration, if any
    pub fn cube_axes_actor(&self) -> Option<ActorKey> {
        self.cube_axes.as_ref().map(|state| state.key)
    }

    /// Live cube-axes state, if any
    pub fn cube_axes(&self) -> Option<&CubeAxesState> {
        self.cube_axes.as_ref()
    }

    /// Add an unlabeled box outline at the scene bounds
    ///
    /// Any pre-existing bounding-box decoration is destroyed first; at
    /// most one exists at a time. The decoration is registered like an
    /// ordinary actor but never contributes to the aggregate bounds.
    pub fn add_bounding_box(&mut self, style: BoundingBoxStyle, policy: CameraPolicy) -> ActorKey {
        self.remove_bounding_box();
        let bounds = self.bounds();
        let mut actor = Actor::with_bounds(bounds);
        actor.kind = ActorKind::BoundingBox;
        actor.pickable = false;
        actor.culling = style.culling;
        actor.properties.color = style.color.unwrap_or(self.theme.outline_color);
        actor.properties.opacity = style.opacity;
        actor.properties.line_width = style.line_width;
        actor.properties.render_lines_as_tubes = style.render_lines_as_tubes;
        actor.properties.lighting = style.lighting.unwrap_or(self.theme.lighting);
        let key = self.register(actor, Some("bounding-box".to_string()), policy);
        self.bounding_box = Some(BoundingBoxState { key, bounds, style });
        key
    }

    /// Destroy the bounding-box decoration if one exists
    pub fn remove_bounding_box(&mut self) {
        if let Some(state) = self.bounding_box.take() {
            self.remove_actor(state.key, CameraPolicy::NeverReset);
        }
    }

    /// Add a cube-axes grid annotating the scene bounds
    ///
    /// Any pre-existing cube-axes decoration is destroyed first. The
    /// style is validated before anything is mutated. 2D tick rendering
    /// is forced on while the scene scale is anisotropic, since 3D ticks
    /// are visually unreliable under a non-uniform model transform.
    pub fn show_bounds(
        &mut self,
        style: CubeAxesStyle,
        bounds: Option<Bounds>,
    ) -> SceneResult<ActorKey> {
        style.validate()?;
        self.remove_bounds_axes();

        let base = bounds.unwrap_or_else(|| self.bounds());
        let padded = base.padded(style.padding);
        let use_2d = style.use_2d || !self.scale.is_identity();

        let mut actor = Actor::with_bounds(padded);
        actor.kind = ActorKind::CubeAxes;
        actor.pickable = false;
        actor.properties.color = style.color.unwrap_or(self.theme.font.color);

        let all_edges = style.all_edges;
        let edge_style = BoundingBoxStyle {
            color: style.color,
            corner_factor: style.corner_factor,
            ..BoundingBoxStyle::default()
        };

        let key = self.register(actor, Some("cube-axes".to_string()), CameraPolicy::NeverReset);
        self.cube_axes = Some(CubeAxesState {
            key,
            bounds: padded,
            style,
            use_2d,
        });

        if all_edges {
            self.add_bounding_box(edge_style, CameraPolicy::NeverReset);
        }
        Ok(key)
    }

    /// Destroy the cube-axes decoration if one exists
    pub fn remove_bounds_axes(&mut self) {
        if let Some(state) = self.cube_axes.take() {
            self.remove_actor(state.key, CameraPolicy::NeverReset);
        }
    }

    /// Key of the live axes marker, if any
    pub fn axes_marker_actor(&self) -> Option<ActorKey> {
        self.axes_marker.as_ref().map(|state| state.key)
    }

    /// Live axes-marker state, if any
    pub fn axes_marker(&self) -> Option<&AxesMarkerState> {
        self.axes_marker.as_ref()
    }

    /// Add an axes glyph anchored at the origin
    ///
    /// The marker is ordinary scene content: it is registered under a
    /// generated name, contributes to the aggregate bounds, and never
    /// moves the camera. A repeat call replaces the previous marker.
    pub fn add_axes_marker(&mut self, style: AxesMarkerStyle) -> ActorKey {
        if let Some(state) = self.axes_marker.take() {
            self.remove_actor(state.key, CameraPolicy::NeverReset);
        }
        let length = style.total_length;
        let mut actor = Actor::with_bounds(Bounds::new(0.0, length, 0.0, length, 0.0, length));
        actor.kind = ActorKind::Marker;
        actor.properties.line_width = Some(style.line_width);
        let key = self.register(actor, None, CameraPolicy::NeverReset);
        self.axes_marker = Some(AxesMarkerState { key, style });
        key
    }

    /// Synchronize decorations with the current aggregate bounds
    ///
    /// Called after every bounds-affecting mutation. A bounding box whose
    /// cached bounds drifted beyond floating tolerance is destroyed and
    /// recreated with the same style; cube axes are resized in place and
    /// their 2D mode follows the scale.
    pub fn update_decorations(&mut self) {
        let current = self.bounds();

        let regenerate = self.bounding_box.as_ref().and_then(|state| {
            if state.bounds.approx_eq(&current) {
                None
            } else {
                Some(state.style.clone())
            }
        });
        if let Some(style) = regenerate {
            log::debug!("scene bounds drifted; regenerating bounding-box decoration");
            self.remove_bounding_box();
            self.add_bounding_box(style, CameraPolicy::NeverReset);
        }

        let scale_identity = self.scale.is_identity();
        if let Some(state) = &mut self.cube_axes {
            state.bounds = current;
            state.use_2d = state.style.use_2d || !scale_identity;
            if let Some(actor) = self.registry.get_mut(state.key) {
                actor.bounds = Some(current);
            }
        }
    }

    // ------------------------------------------------------------------
    // Scalar-bar linkage
    // ------------------------------------------------------------------

    /// Install the facade-side colorbar hook
    pub fn set_scalar_bar_observer(&mut self, observer: Box<dyn ScalarBarObserver>) {
        self.scalar_bar_observer = Some(observer);
    }

    /// Detach and return the colorbar hook, if one is installed
    pub fn take_scalar_bar_observer(&mut self) -> Option<Box<dyn ScalarBarObserver>> {
        self.scalar_bar_observer.take()
    }

    /// Claim a colorbar display slot
    pub fn reserve_scalar_bar_slot(&mut self) -> Option<u32> {
        self.scalar_bar_slots.acquire()
    }

    /// Return a colorbar display slot to the pool
    pub fn release_scalar_bar_slot(&mut self, slot: u32) {
        self.scalar_bar_slots.release(slot);
    }

    // ------------------------------------------------------------------
    // Teardown and picking
    // ------------------------------------------------------------------

    /// Viewport pick rectangle as (x0, y0, x1, y1)
    pub fn get_pick_position(&self) -> (i32, i32, i32, i32) {
        self.backend.pick_rect()
    }

    /// Release everything this renderer owns
    ///
    /// Tolerates absent decorations and always completes: decoration
    /// state is dropped, every prop is force-detached, the registry is
    /// emptied and the facade hook is released.
    pub fn deep_clean(&mut self) {
        self.cube_axes = None;
        self.bounding_box = None;
        self.axes_marker = None;
        self.backend.remove_all_props();
        self.registry.clear();
        self.scalar_bar_observer = None;
        log::debug!("renderer deep-cleaned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::MapperId;
    use crate::backend::NullBackend;
    use crate::error::SceneError;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn renderer() -> Renderer<NullBackend> {
        let _ = env_logger::builder().is_test(true).try_init();
        Renderer::new(NullBackend::new())
    }

    fn unit_actor(lo: f64, hi: f64) -> Actor {
        Actor::with_bounds(Bounds::new(lo, hi, lo, hi, lo, hi))
    }

    #[test]
    fn test_bounds_follow_add_and_remove() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("a"))
            .unwrap();
        assert_eq!(r.bounds(), Bounds::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0));

        r.add_actor(unit_actor(1.0, 2.0), AddActorOptions::named("b"))
            .unwrap();
        assert_eq!(r.bounds(), Bounds::new(0.0, 2.0, 0.0, 2.0, 0.0, 2.0));

        assert!(r.remove_actor("a", CameraPolicy::NeverReset));
        assert_eq!(r.bounds(), Bounds::new(1.0, 2.0, 1.0, 2.0, 1.0, 2.0));

        assert!(r.remove_actor("b", CameraPolicy::NeverReset));
        assert_eq!(r.bounds(), Bounds::DEGENERATE);
    }

    #[test]
    fn test_duplicate_name_replaces_previous_actor() {
        let mut r = renderer();
        let first = r
            .add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("mesh"))
            .unwrap();
        let second = r
            .add_actor(unit_actor(5.0, 6.0), AddActorOptions::named("mesh"))
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(r.actor_count(), 1);
        assert_eq!(r.actor_key("mesh"), Some(second));
        assert!(!r.backend().has_prop(first));
        assert!(r.backend().has_prop(second));
        assert_eq!(r.bounds(), Bounds::new(5.0, 6.0, 5.0, 6.0, 5.0, 6.0));
    }

    #[test]
    fn test_remove_missing_name_is_soft() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("a"))
            .unwrap();
        let renders_before = r.backend().render_count();

        assert!(!r.remove_actor("ghost", CameraPolicy::NeverReset));
        assert_eq!(r.actor_count(), 1);
        assert_eq!(r.backend().render_count(), renders_before);

        // Removing twice is idempotent.
        assert!(r.remove_actor("a", CameraPolicy::NeverReset));
        assert!(!r.remove_actor("a", CameraPolicy::NeverReset));
    }

    #[test]
    fn test_invalid_culling_rejected_before_mutation() {
        let mut r = renderer();
        let result = r.add_actor(
            unit_actor(0.0, 1.0),
            AddActorOptions::named("bad").culling("sideways"),
        );
        assert!(matches!(result, Err(SceneError::InvalidCulling(_))));
        assert_eq!(r.actor_count(), 0);
        assert!(r.actor_key("bad").is_none());
    }

    #[test]
    fn test_culling_applied_when_valid() {
        let mut r = renderer();
        let key = r
            .add_actor(
                unit_actor(0.0, 1.0),
                AddActorOptions::named("front").culling("front"),
            )
            .unwrap();
        assert_eq!(r.actor(key).unwrap().culling, Culling::Front);
    }

    #[test]
    fn test_prefix_sweep_removes_multiblock_children() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("block-0"))
            .unwrap();
        r.add_actor(unit_actor(1.0, 2.0), AddActorOptions::named("block-1"))
            .unwrap();

        // The exact name is absent, so the sweep reports false even
        // though the children were removed.
        assert!(!r.remove_actor("block", CameraPolicy::NeverReset));
        assert_eq!(r.actor_count(), 0);
    }

    #[test]
    fn test_scale_point_round_trip() {
        let mut r = renderer();
        r.set_scale(Some(2.0), None, None, false);
        let point = Vec3::new(0.3, -7.0, 2.5);
        let scaled = r.scale_point(point, false).unwrap();
        let back = r.scale_point(scaled, true).unwrap();
        assert_relative_eq!(back, point, epsilon = 1e-12);
    }

    #[test]
    fn test_set_scale_zero_clamps_to_one() {
        let mut r = renderer();
        r.set_scale(Some(0.0), Some(3.0), None, false);
        assert_eq!(r.scale(), Scale::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_explicit_pose_suppresses_auto_fit() {
        let mut r = renderer();
        let pose = CameraPose {
            position: Vec3::new(5.0, 5.0, 5.0),
            focal_point: Vec3::zeros(),
            view_up: Vec3::new(0.0, 0.0, 1.0),
        };
        r.set_camera_position(Some(CameraLocation::Pose(pose))).unwrap();
        assert!(r.camera_set());

        let resets_before = r.backend().camera_reset_count();
        let renders_before = r.backend().render_count();
        r.add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("a"))
            .unwrap();

        assert_eq!(r.backend().camera_reset_count(), resets_before);
        assert!(r.backend().render_count() > renders_before);
        let after = r.camera_position().unwrap();
        assert_relative_eq!(after.position, pose.position, epsilon = 1e-12);
        assert_relative_eq!(after.focal_point, pose.focal_point, epsilon = 1e-12);
        assert_relative_eq!(after.view_up, pose.view_up);
    }

    #[test]
    fn test_unset_camera_auto_fits_on_add() {
        let mut r = renderer();
        let resets_before = r.backend().camera_reset_count();
        r.add_actor(unit_actor(0.0, 2.0), AddActorOptions::named("a"))
            .unwrap();
        assert!(r.backend().camera_reset_count() > resets_before);
        assert!(!r.camera_set());
    }

    #[test]
    fn test_none_camera_position_is_a_no_op() {
        let mut r = renderer();
        r.set_camera_position(None).unwrap();
        assert!(!r.camera_set());
    }

    #[test]
    fn test_view_isometric_returns_to_unset_and_centers() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 2.0), AddActorOptions::named("a"))
            .unwrap();
        r.set_camera_position(Some(CameraLocation::Pose(CameraPose {
            position: Vec3::new(9.0, 9.0, 9.0),
            focal_point: Vec3::zeros(),
            view_up: Vec3::new(0.0, 0.0, 1.0),
        })))
        .unwrap();
        assert!(r.camera_set());

        r.view_isometric(false).unwrap();
        assert!(!r.camera_set());
        // The fit re-targets the focal point at the scene center.
        assert_relative_eq!(r.camera().focal_point(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_default_camera_pose_empty_scene() {
        let r = renderer();
        let pose = r.default_camera_pose(false);
        // Degenerate unit box centers at the origin.
        assert_relative_eq!(pose.focal_point, Vec3::zeros());
        assert_relative_eq!(pose.position, Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(pose.view_up, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_default_camera_pose_divides_offset_by_scale() {
        let mut r = renderer();
        r.set_scale(Some(2.0), Some(4.0), None, false);
        let pose = r.default_camera_pose(true);
        assert_relative_eq!(pose.position, Vec3::new(-0.5, -0.25, -1.0));
    }

    #[test]
    fn test_named_views_orient_the_camera() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 2.0), AddActorOptions::named("a"))
            .unwrap();
        r.view_xz(false).unwrap();
        // xz looks along -Y toward the center.
        let direction = r.camera().view_direction();
        assert_relative_eq!(direction, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(r.camera().view_up(), Vec3::new(0.0, 0.0, 1.0));
        assert!(r.camera_set());
    }

    #[test]
    fn test_bounding_box_regenerates_when_bounds_drift() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("a"))
            .unwrap();
        let first = r.add_bounding_box(BoundingBoxStyle::default(), CameraPolicy::NeverReset);
        assert_eq!(r.bounding_box_actor(), Some(first));

        r.add_actor(unit_actor(-5.0, 5.0), AddActorOptions::named("big"))
            .unwrap();

        let second = r.bounding_box_actor().expect("decoration should survive");
        assert_ne!(first, second, "drifted bounds must rebuild the box");
        assert!(!r.backend().has_prop(first));
        let decoration = r.actor(second).unwrap();
        assert_eq!(decoration.bounds, Some(r.bounds()));
        assert_eq!(decoration.kind, ActorKind::BoundingBox);
        assert!(!decoration.pickable);
    }

    #[test]
    fn test_bounding_box_does_not_feed_back_into_bounds() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("a"))
            .unwrap();
        let before = r.bounds();
        r.add_bounding_box(BoundingBoxStyle::default(), CameraPolicy::NeverReset);
        assert_eq!(r.bounds(), before);
    }

    #[test]
    fn test_cube_axes_follow_bounds_in_place() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("a"))
            .unwrap();
        let key = r.show_bounds(CubeAxesStyle::default(), None).unwrap();

        r.add_actor(unit_actor(-3.0, 3.0), AddActorOptions::named("big"))
            .unwrap();

        let state = r.cube_axes().unwrap();
        assert_eq!(state.key, key, "cube axes resize in place");
        assert_eq!(state.bounds, r.bounds());
    }

    #[test]
    fn test_cube_axes_2d_mode_follows_scale() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("a"))
            .unwrap();
        r.show_bounds(CubeAxesStyle::default(), None).unwrap();
        assert!(!r.cube_axes().unwrap().use_2d);

        r.set_scale(Some(2.0), None, None, true);
        assert!(r.cube_axes().unwrap().use_2d);

        r.set_scale(Some(1.0), None, None, true);
        assert!(!r.cube_axes().unwrap().use_2d);
    }

    #[test]
    fn test_show_bounds_rejects_bad_padding() {
        let mut r = renderer();
        let style = CubeAxesStyle {
            padding: 1.5,
            ..CubeAxesStyle::default()
        };
        assert!(matches!(
            r.show_bounds(style, None),
            Err(SceneError::InvalidPadding(_))
        ));
        assert!(r.cube_axes().is_none());
        assert_eq!(r.actor_count(), 0);
    }

    #[test]
    fn test_show_bounds_applies_padding() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 2.0), AddActorOptions::named("a"))
            .unwrap();
        let style = CubeAxesStyle {
            padding: 0.5,
            ..CubeAxesStyle::default()
        };
        r.show_bounds(style, None).unwrap();
        let state = r.cube_axes().unwrap();
        assert_relative_eq!(state.bounds.x_min, -1.0);
        assert_relative_eq!(state.bounds.x_max, 3.0);
    }

    struct RecordingObserver {
        removed: Rc<RefCell<Vec<MapperId>>>,
        slot: u32,
    }

    impl ScalarBarObserver for RecordingObserver {
        fn actor_removed(&mut self, mapper: MapperId, slots: &mut ScalarBarSlots) {
            self.removed.borrow_mut().push(mapper);
            slots.release(self.slot);
        }
    }

    #[test]
    fn test_actor_removal_notifies_scalar_bar_observer() {
        let mut r = renderer();
        let slot = r.reserve_scalar_bar_slot().unwrap();
        let removed = Rc::new(RefCell::new(Vec::new()));
        r.set_scalar_bar_observer(Box::new(RecordingObserver {
            removed: Rc::clone(&removed),
            slot,
        }));

        let mut actor = unit_actor(0.0, 1.0);
        actor.mapper = Some(MapperId(42));
        r.add_actor(actor, AddActorOptions::named("field")).unwrap();

        assert!(r.remove_actor("field", CameraPolicy::NeverReset));
        assert_eq!(removed.borrow().as_slice(), &[MapperId(42)]);
        // The observer released its display slot back into the pool.
        assert_eq!(r.reserve_scalar_bar_slot(), Some(slot));
    }

    #[test]
    fn test_replacement_cascades_colorbar_cleanup() {
        let mut r = renderer();
        let removed = Rc::new(RefCell::new(Vec::new()));
        r.set_scalar_bar_observer(Box::new(RecordingObserver {
            removed: Rc::clone(&removed),
            slot: 0,
        }));

        let mut first = unit_actor(0.0, 1.0);
        first.mapper = Some(MapperId(1));
        r.add_actor(first, AddActorOptions::named("mesh")).unwrap();

        let mut second = unit_actor(2.0, 3.0);
        second.mapper = Some(MapperId(2));
        r.add_actor(second, AddActorOptions::named("mesh")).unwrap();

        assert_eq!(removed.borrow().as_slice(), &[MapperId(1)]);
    }

    #[test]
    fn test_clear_removes_everything_without_reset() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("a"))
            .unwrap();
        r.add_bounding_box(BoundingBoxStyle::default(), CameraPolicy::NeverReset);
        let resets_before = r.backend().camera_reset_count();

        r.clear();

        assert_eq!(r.actor_count(), 0);
        assert_eq!(r.backend().prop_count(), 0);
        assert!(r.bounding_box_actor().is_none());
        assert_eq!(r.backend().camera_reset_count(), resets_before);
        assert_eq!(r.bounds(), Bounds::DEGENERATE);
    }

    #[test]
    fn test_deep_clean_always_completes() {
        let mut r = renderer();
        r.deep_clean();

        r.add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("a"))
            .unwrap();
        r.add_bounding_box(BoundingBoxStyle::default(), CameraPolicy::NeverReset);
        r.show_bounds(CubeAxesStyle::default(), None).unwrap();
        r.set_scalar_bar_observer(Box::new(RecordingObserver {
            removed: Rc::new(RefCell::new(Vec::new())),
            slot: 0,
        }));

        r.deep_clean();
        assert_eq!(r.actor_count(), 0);
        assert_eq!(r.backend().prop_count(), 0);
        assert!(r.bounding_box_actor().is_none());
        assert!(r.cube_axes().is_none());
        assert!(r.take_scalar_bar_observer().is_none());

        // A second pass is a no-op.
        r.deep_clean();
    }

    #[test]
    fn test_mapper_input_gets_wrapped_and_properties_are_reachable() {
        let mut r = renderer();
        let key = r
            .add_actor(MapperId(7), AddActorOptions::named("wrapped"))
            .unwrap();
        assert_eq!(r.actor(key).unwrap().mapper, Some(MapperId(7)));

        let props = r.properties_mut(key).unwrap();
        props.color = [1.0, 0.0, 0.0];
        assert_eq!(r.actor(key).unwrap().properties.color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_pick_position_passthrough() {
        let mut r = renderer();
        r.backend_mut().set_pick_rect((1, 2, 3, 4));
        assert_eq!(r.get_pick_position(), (1, 2, 3, 4));
    }

    #[test]
    fn test_axes_marker_registers_as_scene_content() {
        let mut r = renderer();
        let key = r.add_axes_marker(AxesMarkerStyle::default());

        assert_eq!(r.axes_marker_actor(), Some(key));
        let actor = r.actor(key).unwrap();
        assert_eq!(actor.kind, ActorKind::Marker);
        assert!(actor.name().starts_with("actor-"), "marker gets a generated name");
        assert_eq!(actor.properties.line_width, Some(2.0));
        // Unlike the bound decorations, the marker feeds the bounds.
        assert_eq!(r.bounds(), Bounds::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_axes_marker_replaced_on_repeat_and_cleared_on_removal() {
        let mut r = renderer();
        let first = r.add_axes_marker(AxesMarkerStyle::default());
        let second = r.add_axes_marker(AxesMarkerStyle {
            total_length: 3.0,
            ..AxesMarkerStyle::default()
        });

        assert_ne!(first, second);
        assert_eq!(r.actor_count(), 1);
        assert!(!r.backend().has_prop(first));
        assert_eq!(r.bounds(), Bounds::new(0.0, 3.0, 0.0, 3.0, 0.0, 3.0));

        assert!(r.remove_actor(second, CameraPolicy::NeverReset));
        assert!(r.axes_marker().is_none());

        r.add_axes_marker(AxesMarkerStyle::default());
        r.deep_clean();
        assert!(r.axes_marker().is_none());
    }

    #[test]
    fn test_remove_empty_collection_is_a_no_op() {
        let mut r = renderer();
        r.add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("a"))
            .unwrap();
        let renders_before = r.backend().render_count();

        assert!(!r.remove_actor(RemoveTarget::Many(vec![]), CameraPolicy::NeverReset));
        assert_eq!(r.actor_count(), 1);
        assert_eq!(r.backend().render_count(), renders_before);
    }

    #[test]
    fn test_remove_many_mixed_targets() {
        let mut r = renderer();
        let key = r
            .add_actor(unit_actor(0.0, 1.0), AddActorOptions::named("a"))
            .unwrap();
        r.add_actor(unit_actor(1.0, 2.0), AddActorOptions::named("b"))
            .unwrap();

        let removed = r.remove_actor(
            RemoveTarget::Many(vec![
                RemoveTarget::Key(key),
                RemoveTarget::Name("ghost".to_string()),
                RemoveTarget::Name("b".to_string()),
            ]),
            CameraPolicy::NeverReset,
        );
        assert!(removed);
        assert_eq!(r.actor_count(), 0);
    }
}
