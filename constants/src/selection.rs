/// Grid spacing in degrees used when sampling tile features under a polygon.
/// Roughly 11 m of latitude.
pub const DEFAULT_SAMPLE_STEP_DEGREES: f64 = 0.0001;

/// A polygon needs at least this many confirmed vertices to be sampled.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Name of the layer that holds the in-progress drawing.
pub const DRAW_LAYER_NAME: &str = "hide-entity-draw";

/// Entity id of the live preview polygon.
pub const PREVIEW_POLYGON_ID: &str = "drawing-polygon";

/// Prefix of the numbered vertex marker entity ids (`point-marker-1`, ...).
pub const POINT_MARKER_PREFIX: &str = "point-marker-";

/// Two left presses within this window are treated as a double click.
pub const DOUBLE_CLICK_WINDOW_MS: u64 = 300;

/// Maximum cursor travel in pixels between the presses of a double click.
pub const DOUBLE_CLICK_RADIUS_PX: f64 = 4.0;

/// Camera framing offsets used when new geometry is off screen.
pub const FRAMING_HEADING_DEGREES: f64 = 13.08;
pub const FRAMING_PITCH_DEGREES: f64 = -29.07;
pub const FRAMING_RANGE_METERS: f64 = 1000.0;

/// Smallest accepted sample step, about 0.1 mm of latitude.
pub const MIN_SAMPLE_STEP_DEGREES: f64 = 1e-9;

/// Upper bound on grid columns or rows for one sampling pass.
pub const MAX_GRID_CELLS_PER_AXIS: f64 = 1e8;

/// Layer holding subdistrict polygons added by camera framing.
pub const SUBDISTRICT_LAYER_NAME: &str = "subdistricts";

/// Entity id prefix of subdistrict polygons (`subdistrict-0`, ...).
pub const SUBDISTRICT_ID_PREFIX: &str = "subdistrict-";
