//! Interactive polygon selection and spatial query for a 3D geospatial
//! viewport.
//!
//! The host application implements [`engine::viewport::Viewport`] and
//! [`engine::layers::LayerStore`] for its scene and hands it to a
//! [`SelectionController`]. Input events then drive a drawing session whose
//! finished polygon is grid-sampled for 3D tile features.

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod plugin;
pub mod rpc;
pub mod tools;

pub use config::{FramingConfig, SelectionConfig};
pub use engine::SceneHost;
pub use error::{Result, SelectionError};
pub use plugin::{PolygonSelectionPlugin, SelectionTool};
pub use tools::polygon::{CancelReason, DrawInput};
pub use tools::sampler::{FeatureSampler, SampledFeature, sample_features_in_polygon};
pub use tools::tool_manager::{SelectionController, SessionOutcome};
