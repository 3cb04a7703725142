use super::camera::CameraState;
use super::ellipsoid::Ellipsoid;
use bevy::math::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Half-line in world space. The direction is normalised on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn point_at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// What the viewport is currently rendering. Selection only works in `Scene3D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportMode {
    Scene3D,
    Columbus,
    Scene2D,
    Unavailable,
}

/// Stable identity of a streamed tileset (its resource URL).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilesetId(pub String);

impl fmt::Display for TilesetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw pick answer from the viewport, before classification.
///
/// Hosts fill in whatever they know about the object under the pixel; the
/// engine decides what kind of object it is from these discriminants instead
/// of from the host's own type identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickedObject {
    /// Owning tileset, present for tile-derived content.
    pub tileset: Option<TilesetId>,
    /// Index of the feature inside its tile batch.
    pub batch_id: Option<u32>,
    /// Entity id for layer-store entities.
    pub entity_id: Option<String>,
    /// True when the object answers per-feature property lookups.
    pub has_properties: bool,
    pub properties: BTreeMap<String, Value>,
}

/// Key identifying a tile feature across picks: tileset plus batch index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureKey {
    pub tileset: TilesetId,
    pub batch_id: u32,
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.tileset, self.batch_id)
    }
}

/// An individually addressable feature of a 3D tileset.
#[derive(Debug, Clone, PartialEq)]
pub struct TileFeature {
    pub tileset: TilesetId,
    pub batch_id: u32,
    pub properties: BTreeMap<String, Value>,
}

impl TileFeature {
    pub fn key(&self) -> FeatureKey {
        FeatureKey {
            tileset: self.tileset.clone(),
            batch_id: self.batch_id,
        }
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Classified pick.
#[derive(Debug, Clone, PartialEq)]
pub enum PickResult {
    TileFeature(TileFeature),
    OtherEntity(Option<String>),
    None,
}

impl PickResult {
    /// Tags a raw pick. Only objects with a tileset, a batch index and the
    /// property capability count as tile features; anything else picked is
    /// some other entity (ground primitive, layer entity, terrain overlay).
    pub fn classify(picked: Option<PickedObject>) -> Self {
        let Some(picked) = picked else {
            return Self::None;
        };
        match (picked.tileset, picked.batch_id, picked.has_properties) {
            (Some(tileset), Some(batch_id), true) => Self::TileFeature(TileFeature {
                tileset,
                batch_id,
                properties: picked.properties,
            }),
            _ => Self::OtherEntity(picked.entity_id),
        }
    }

    pub fn into_tile_feature(self) -> Option<TileFeature> {
        match self {
            Self::TileFeature(feature) => Some(feature),
            _ => None,
        }
    }
}

/// Camera offset used by `look_at`, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingPitchRange {
    pub heading: f64,
    pub pitch: f64,
    pub range: f64,
}

/// Input sources a drawing session needs exclusive use of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputChannel {
    /// Canvas pointer events (confirm, move, finish).
    Pointer,
    /// Document-level key events (Escape).
    Keyboard,
}

/// Opaque registration returned by `Viewport::acquire_input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputHandle(pub u64);

/// The 3D viewport the selection tools operate on.
///
/// Implemented by the host application. The engine never owns the scene; it
/// only uses the operations below.
pub trait Viewport {
    fn mode(&self) -> ViewportMode;

    /// Camera ray through a canvas pixel.
    fn pick_ray(&self, pixel: DVec2) -> Option<Ray>;

    /// Ray/terrain intersection. `None` when terrain is not loaded or missed.
    fn pick_globe(&self, ray: &Ray) -> Option<DVec3>;

    /// Ray/ellipsoid intersection for a pixel.
    fn pick_ellipsoid(&self, pixel: DVec2) -> Option<DVec3> {
        let ray = self.pick_ray(pixel)?;
        let hit = Ellipsoid::WGS84.intersect_ray(&ray)?;
        Some(ray.point_at(hit.start))
    }

    /// Object under a canvas pixel.
    fn pick(&mut self, pixel: DVec2) -> Option<PickedObject>;

    /// World position to canvas pixel. `None` when behind the camera or off screen.
    fn world_to_screen(&self, position: DVec3) -> Option<DVec2>;

    fn camera(&self) -> CameraState;

    /// Render a frame now so picks see the current camera.
    fn force_render(&mut self);

    fn look_at(&mut self, target: DVec3, offset: HeadingPitchRange);

    fn acquire_input(&mut self, channel: InputChannel) -> InputHandle;

    fn release_input(&mut self, handle: InputHandle);

    /// Disables the viewport's built-in double-click action (camera tracking)
    /// so a double click can finish a polygon.
    fn suppress_default_double_click(&mut self) {}
}

/// Screen pixel to world position, terrain first.
///
/// Falls back to the bare ellipsoid when terrain is unavailable, so a vertex
/// can always be placed while the globe is under the cursor.
pub fn resolve_world_position<V: Viewport + ?Sized>(viewport: &V, pixel: DVec2) -> Option<DVec3> {
    if let Some(ray) = viewport.pick_ray(pixel) {
        if let Some(ground) = viewport.pick_globe(&ray) {
            return Some(ground);
        }
    }
    viewport.pick_ellipsoid(pixel)
}
