//! Actor model
//!
//! An [`Actor`] is a named drawable handle tracked by the registry: an
//! optional world-space bounding box, a pickability flag, a face-culling
//! mode and a block of mutable style properties. The geometry itself lives
//! in the graphics subsystem; this layer only does the bookkeeping.

use std::fmt;
use std::str::FromStr;

use slotmap::new_key_type;

use crate::bounds::Bounds;
use crate::error::SceneError;

new_key_type! {
    /// Stable registry handle for an actor
    pub struct ActorKey;
}

/// Opaque handle to a mappable-geometry object owned by the graphics
/// subsystem
///
/// Used for the scalar-bar linkage: a colorbar tracks the mapper of the
/// actor it annotates, and actor removal is keyed off this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapperId(pub u64);

/// Face-culling mode applied to an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Culling {
    /// Render both faces
    #[default]
    None,
    /// Do not render front-facing polygons
    Front,
    /// Do not render back-facing polygons
    Back,
}

impl FromStr for Culling {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "front" | "frontface" | "f" => Ok(Self::Front),
            "back" | "backface" | "b" => Ok(Self::Back),
            other => Err(SceneError::InvalidCulling(other.to_string())),
        }
    }
}

/// Surface representation for an actor's geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Representation {
    /// Filled surface
    #[default]
    Surface,
    /// Edges only
    Wireframe,
    /// Vertices only
    Points,
}

/// Mutable style block attached to every actor
///
/// Returned to callers after registration so color, opacity and line style
/// can be adjusted without another registry lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorProperties {
    /// RGB color, each channel in [0, 1]
    pub color: [f64; 3],
    /// Opacity in [0, 1]
    pub opacity: f64,
    /// Line thickness override, in pixels
    pub line_width: Option<f64>,
    /// Whether the actor is shaded by scene lights
    pub lighting: bool,
    /// Draw line primitives as 3D tubes
    pub render_lines_as_tubes: bool,
    /// How the geometry surface is drawn
    pub representation: Representation,
}

impl Default for ActorProperties {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            line_width: None,
            lighting: true,
            render_lines_as_tubes: false,
            representation: Representation::Surface,
        }
    }
}

/// What role an actor plays in the scene
///
/// Decoration kinds are derived from the aggregate bounds and therefore
/// never contribute to it; folding them back in would let a decoration
/// inflate its own reference volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActorKind {
    /// Ordinary scene content; contributes to the aggregate bounds
    #[default]
    Data,
    /// Bounding-box outline decoration
    BoundingBox,
    /// Cube-axes grid decoration
    CubeAxes,
    /// Axes marker anchored at the origin
    ///
    /// Unlike the bound decorations, the marker is ordinary scene content
    /// and contributes to the aggregate bounds.
    Marker,
}

impl ActorKind {
    /// True for decoration actors excluded from bounds aggregation
    pub const fn is_decoration(self) -> bool {
        matches!(self, Self::BoundingBox | Self::CubeAxes)
    }
}

/// A named drawable scene element
#[derive(Debug, Clone)]
pub struct Actor {
    /// Unique registry name; assigned on insertion
    pub(crate) name: String,
    /// World-space bounding box; `None` when undefined
    pub bounds: Option<Bounds>,
    /// Mapper handle for scalar-bar linkage
    pub mapper: Option<MapperId>,
    /// Whether viewport picking may select this actor
    pub pickable: bool,
    /// Face-culling mode
    pub culling: Culling,
    /// Scene role; decorations are excluded from bounds aggregation
    pub kind: ActorKind,
    /// Mutable style block
    pub properties: ActorProperties,
}

impl Actor {
    /// Create an actor with undefined bounds
    pub fn new() -> Self {
        Self {
            name: String::new(),
            bounds: None,
            mapper: None,
            pickable: true,
            culling: Culling::None,
            kind: ActorKind::Data,
            properties: ActorProperties::default(),
        }
    }

    /// Create an actor with a known world-space bounding box
    pub fn with_bounds(bounds: Bounds) -> Self {
        Self {
            bounds: Some(bounds),
            ..Self::new()
        }
    }

    /// Wrap a bare mapper handle in a fresh actor
    pub fn from_mapper(mapper: MapperId) -> Self {
        Self {
            mapper: Some(mapper),
            ..Self::new()
        }
    }

    /// The unique name this actor is registered under
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Actor({})", self.name)
    }
}

/// Input accepted by `add_actor`
///
/// A bare mapper handle gets wrapped in a new default actor; a full actor
/// is registered as-is.
#[derive(Debug, Clone)]
pub enum AddActorInput {
    /// A fully-constructed actor
    Actor(Actor),
    /// A raw mappable-geometry handle
    Mapper(MapperId),
}

impl AddActorInput {
    /// Resolve the input into a concrete actor
    pub(crate) fn into_actor(self) -> Actor {
        match self {
            Self::Actor(actor) => actor,
            Self::Mapper(mapper) => Actor::from_mapper(mapper),
        }
    }
}

impl From<Actor> for AddActorInput {
    fn from(actor: Actor) -> Self {
        Self::Actor(actor)
    }
}

impl From<MapperId> for AddActorInput {
    fn from(mapper: MapperId) -> Self {
        Self::Mapper(mapper)
    }
}
