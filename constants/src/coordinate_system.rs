/// WGS84 semi-major axis in metres.
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 flattening.
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// UTM central meridian scale factor.
pub const UTM_SCALE_FACTOR: f64 = 0.9996;

/// UTM false easting in metres, applied in both hemispheres.
pub const UTM_FALSE_EASTING: f64 = 500_000.0;

/// UTM false northing in metres for southern hemisphere zones.
pub const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Width of a UTM zone in degrees of longitude.
pub const UTM_ZONE_WIDTH_DEGREES: f64 = 6.0;

/// EPSG code ranges for WGS84 / UTM zones (north: 32601-32660, south: 32701-32760).
pub const EPSG_UTM_NORTH_BASE: u32 = 32600;
pub const EPSG_UTM_SOUTH_BASE: u32 = 32700;
