//! Pure geometry: projections, polygon containment and geodetic bounds.

/// Geodetic bounding boxes and the regular sample grid over them.
pub mod bounds;

/// UTM zone definitions and projected ↔ geodetic conversion.
pub mod coordinates;

/// Ray-casting point-in-polygon test.
pub mod polygon;
