//! Interactive polygon selection of 3D tile features.
//!
//! ## Selection Flow
//!
//! ```text
//! activate()
//!   └─> PolygonTool::start()
//!       ├─> Create or clear the drawing layer
//!       ├─> Suppress the viewport's double-click action
//!       └─> Acquire pointer and keyboard input
//!
//! ConfirmPoint / MovePointer
//!   └─> Terrain pick, ellipsoid fallback
//!       ├─> Numbered marker per confirmed vertex
//!       └─> Preview polygon once three points exist
//!
//! Finish
//!   ├─> < 3 vertices: Cancelled (no sampling)
//!   └─> FeatureSampler::sample()
//!       ├─> Geodetic bounding box of the vertices
//!       ├─> Grid walk, point-in-polygon in lon/lat
//!       ├─> Project, force render, pick
//!       └─> Keep tile features, dedupe by tileset + batch id
//!
//! Teardown (finish, cancel, deactivate)
//!   ├─> Release input
//!   ├─> Clear and remove the drawing layer
//!   └─> Hide the feature info panel
//! ```
//!
//! The controller is single-shot: every completed or cancelled drawing leaves
//! it inactive.

/// Direct query of host entities inside a polygon.
pub mod entity_query;

/// Camera framing for newly created geometry.
pub mod framing;

/// Drawing state machine.
pub mod polygon;

/// Grid sampling of tile features under a polygon.
pub mod sampler;

/// Selection controller exposed to the host application.
pub mod tool_manager;
