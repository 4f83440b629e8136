//! # Scene Engine
//!
//! Scene-management layer for one rendering viewport: a uniquely-named
//! actor registry, aggregate scene bounds, anisotropic axis scaling,
//! camera control with named view presets, and bound decorations (a
//! bounding-box outline and a cube-axes grid) that stay synchronized with
//! the evolving scene.
//!
//! The graphics subsystem is an external collaborator behind the
//! [`RenderBackend`] trait, so the whole layer runs headless — the
//! bundled [`NullBackend`] is enough for tests and non-interactive use.
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::{
//!     Actor, AddActorOptions, Bounds, CameraPolicy, NullBackend, Renderer,
//! };
//!
//! let mut renderer = Renderer::new(NullBackend::new());
//!
//! let actor = Actor::with_bounds(Bounds::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0));
//! renderer.add_actor(actor, AddActorOptions::named("cube")).unwrap();
//! assert_eq!(renderer.bounds(), Bounds::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0));
//!
//! renderer.remove_actor("cube", CameraPolicy::NeverReset);
//! assert_eq!(renderer.bounds(), Bounds::DEGENERATE);
//! ```

pub mod foundation;

pub mod actor;
pub mod backend;
pub mod bounds;
pub mod camera;
pub mod decorations;
pub mod error;
pub mod registry;
pub mod renderer;
pub mod scalar_bar;
pub mod scale;
pub mod theme;

pub use actor::{Actor, ActorKey, ActorKind, ActorProperties, AddActorInput, Culling, MapperId};
pub use backend::{NullBackend, RenderBackend};
pub use bounds::Bounds;
pub use camera::{Camera, CameraLocation, CameraPolicy, CameraPose, ViewPreset};
pub use decorations::{
    AxesMarkerStyle, BoundingBoxStyle, CubeAxesStyle, GridLocation, GridPlacement, TickLocation,
};
pub use error::{SceneError, SceneResult};
pub use renderer::{AddActorOptions, RemoveTarget, Renderer};
pub use scalar_bar::{ScalarBarObserver, ScalarBarSlots};
pub use scale::Scale;
pub use theme::{FontFamily, Theme};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        actor::{Actor, ActorKey, AddActorInput, Culling, MapperId},
        backend::{NullBackend, RenderBackend},
        bounds::Bounds,
        camera::{CameraLocation, CameraPolicy, CameraPose, ViewPreset},
        decorations::{BoundingBoxStyle, CubeAxesStyle},
        error::{SceneError, SceneResult},
        foundation::math::{Mat4, Vec3},
        renderer::{AddActorOptions, RemoveTarget, Renderer},
        theme::Theme,
    };
}
