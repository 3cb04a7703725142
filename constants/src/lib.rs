//! Shared constants for the polygon selection workspace.

pub mod coordinate_system;
pub mod render_settings;
pub mod selection;
