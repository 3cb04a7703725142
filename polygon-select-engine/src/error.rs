//! Error types for the selection engine.
//!
//! Only configuration and environment problems surface as errors. Short
//! polygons and pick misses are ordinary outcomes and never reach this type.

use crate::engine::viewport::ViewportMode;

/// Result type alias
pub type Result<T> = std::result::Result<T, SelectionError>;

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// The viewport is not rendering the 3D scene.
    #[error("3D viewport is not available (current mode: {mode:?})")]
    ViewportUnavailable { mode: ViewportMode },

    /// Projection zone definition could not be parsed.
    #[error("Invalid zone definition: {0}")]
    InvalidZone(String),

    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SelectionError {
    /// Short code for notifications and log filtering.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ViewportUnavailable { .. } => "VIEWPORT_UNAVAILABLE",
            Self::InvalidZone(_) => "INVALID_ZONE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Config(_) => "CONFIG_PARSE",
            Self::Io(_) => "IO",
        }
    }
}
