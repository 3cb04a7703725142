//! Viewport-facing building blocks: collaborator traits, ellipsoid math and
//! camera culling.

/// Camera snapshot, frustum culling volume and point visibility.
pub mod camera;

/// WGS84 ellipsoid conversions and ray intersection.
pub mod ellipsoid;

/// Layer store collaborator and the entities the tools draw.
pub mod layers;

/// Viewport collaborator, rays and classified picks.
pub mod viewport;

use layers::LayerStore;
use viewport::Viewport;

/// Everything the selection tools need from the host: a viewport and a layer store.
pub trait SceneHost: Viewport + LayerStore {}

impl<T: Viewport + LayerStore> SceneHost for T {}
