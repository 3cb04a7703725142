/// Preview polygon fill, orange with alpha (RGBA bytes).
pub const PREVIEW_FILL_RGBA: [u8; 4] = [255, 140, 0, 100];

/// Preview polygon outline.
pub const PREVIEW_OUTLINE_RGBA: [u8; 4] = [255, 140, 0, 255];

/// Vertex marker fill and outline.
pub const MARKER_FILL_RGBA: [u8; 4] = [255, 255, 0, 255];
pub const MARKER_OUTLINE_RGBA: [u8; 4] = [0, 0, 0, 255];

pub const MARKER_PIXEL_SIZE: f32 = 8.0;
pub const MARKER_OUTLINE_WIDTH: f32 = 2.0;

/// Screen-space offset of the marker index label.
pub const MARKER_LABEL_OFFSET_PX: [f32; 2] = [0.0, -30.0];

/// Subdistrict fill when a record carries no colour.
pub const SUBDISTRICT_DEFAULT_FILL_RGBA: [u8; 4] = [255, 0, 0, 255];
pub const SUBDISTRICT_OUTLINE_RGBA: [u8; 4] = [0, 0, 0, 255];
