use crate::error::{Result, SelectionError};
use bevy::math::DVec2;
use constants::coordinate_system::{
    EPSG_UTM_NORTH_BASE, EPSG_UTM_SOUTH_BASE, UTM_FALSE_EASTING, UTM_FALSE_NORTHING_SOUTH,
    UTM_SCALE_FACTOR, UTM_ZONE_WIDTH_DEGREES, WGS84_FLATTENING, WGS84_SEMI_MAJOR_AXIS,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Longitude/latitude pair in degrees on the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geodetic {
    pub longitude: f64,
    pub latitude: f64,
}

impl Geodetic {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Planar view used by the point-in-polygon test (x = lon, y = lat).
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.longitude, self.latitude)
    }
}

/// A UTM zone on the WGS84 datum.
///
/// Accepts proj-style strings (`+proj=utm +zone=48 +datum=WGS84 +units=m +no_defs`,
/// optionally with `+south`) and EPSG codes (`EPSG:32648`, `EPSG:32748`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDefinition {
    pub zone: u8,
    pub south: bool,
}

impl ZoneDefinition {
    pub fn new(zone: u8, south: bool) -> Result<Self> {
        if !(1..=60).contains(&zone) {
            return Err(SelectionError::InvalidZone(format!(
                "UTM zone {zone} outside 1..=60"
            )));
        }
        Ok(Self { zone, south })
    }

    pub fn parse(definition: &str) -> Result<Self> {
        let trimmed = definition.trim();
        if let Some(code) = trimmed
            .strip_prefix("EPSG:")
            .or_else(|| trimmed.strip_prefix("epsg:"))
        {
            return Self::from_epsg(code);
        }

        let mut projection = None;
        let mut zone = None;
        let mut south = false;

        for token in trimmed.split_whitespace() {
            let token = token.trim_start_matches('+');
            let (key, value) = match token.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (token, None),
            };
            match (key, value) {
                ("proj", Some(value)) => projection = Some(value),
                ("zone", Some(value)) => {
                    zone = Some(value.parse::<u8>().map_err(|_| {
                        SelectionError::InvalidZone(format!("bad zone number '{value}'"))
                    })?);
                }
                ("south", None) => south = true,
                ("datum", Some(value)) | ("ellps", Some(value)) => {
                    if !value.eq_ignore_ascii_case("WGS84") {
                        return Err(SelectionError::InvalidZone(format!(
                            "unsupported datum '{value}'"
                        )));
                    }
                }
                ("units", Some(value)) => {
                    if value != "m" {
                        return Err(SelectionError::InvalidZone(format!(
                            "unsupported units '{value}'"
                        )));
                    }
                }
                // no_defs, towgs84 etc. carry no information for a WGS84 zone.
                _ => {}
            }
        }

        if projection != Some("utm") {
            return Err(SelectionError::InvalidZone(format!(
                "expected +proj=utm in '{trimmed}'"
            )));
        }
        let zone = zone.ok_or_else(|| {
            SelectionError::InvalidZone(format!("missing +zone in '{trimmed}'"))
        })?;
        Self::new(zone, south)
    }

    fn from_epsg(code: &str) -> Result<Self> {
        let code: u32 = code
            .parse()
            .map_err(|_| SelectionError::InvalidZone(format!("bad EPSG code '{code}'")))?;
        match code {
            c if c > EPSG_UTM_NORTH_BASE && c <= EPSG_UTM_NORTH_BASE + 60 => {
                Self::new((c - EPSG_UTM_NORTH_BASE) as u8, false)
            }
            c if c > EPSG_UTM_SOUTH_BASE && c <= EPSG_UTM_SOUTH_BASE + 60 => {
                Self::new((c - EPSG_UTM_SOUTH_BASE) as u8, true)
            }
            _ => Err(SelectionError::InvalidZone(format!(
                "EPSG:{code} is not a WGS84 UTM zone"
            ))),
        }
    }

    /// Central meridian of the zone in degrees.
    pub fn central_meridian(&self) -> f64 {
        f64::from(self.zone) * UTM_ZONE_WIDTH_DEGREES - 183.0
    }

    fn false_northing(&self) -> f64 {
        if self.south { UTM_FALSE_NORTHING_SOUTH } else { 0.0 }
    }
}

impl FromStr for ZoneDefinition {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Krüger series coefficients for the transverse Mercator projection.
struct KrugerSeries {
    /// Rectifying radius scaled by the central scale factor.
    k0a: f64,
    alpha: [f64; 3],
    beta: [f64; 3],
    delta: [f64; 3],
    /// 2·sqrt(n)/(1+n), the conformal latitude factor.
    conformal: f64,
}

impl KrugerSeries {
    fn wgs84() -> Self {
        let f = WGS84_FLATTENING;
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let rectifying = WGS84_SEMI_MAJOR_AXIS / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);

        Self {
            k0a: UTM_SCALE_FACTOR * rectifying,
            alpha: [
                n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0,
                13.0 * n2 / 48.0 - 3.0 * n3 / 5.0,
                61.0 * n3 / 240.0,
            ],
            beta: [
                n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0,
                n2 / 48.0 + n3 / 15.0,
                17.0 * n3 / 480.0,
            ],
            delta: [
                2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3,
                7.0 * n2 / 3.0 - 8.0 * n3 / 5.0,
                56.0 * n3 / 15.0,
            ],
            conformal: 2.0 * n.sqrt() / (1.0 + n),
        }
    }
}

/// Converts a planar UTM coordinate (easting `x`, northing `y`, metres) to
/// geodetic degrees.
pub fn projected_to_geodetic(x: f64, y: f64, zone: &ZoneDefinition) -> Geodetic {
    let series = KrugerSeries::wgs84();
    let xi = (y - zone.false_northing()) / series.k0a;
    let eta = (x - UTM_FALSE_EASTING) / series.k0a;

    let mut xi_prime = xi;
    let mut eta_prime = eta;
    for (j, beta) in series.beta.iter().enumerate() {
        let k = 2.0 * (j + 1) as f64;
        xi_prime -= beta * (k * xi).sin() * (k * eta).cosh();
        eta_prime -= beta * (k * xi).cos() * (k * eta).sinh();
    }

    let chi = (xi_prime.sin() / eta_prime.cosh()).asin();
    let mut latitude = chi;
    for (j, delta) in series.delta.iter().enumerate() {
        let k = 2.0 * (j + 1) as f64;
        latitude += delta * (k * chi).sin();
    }
    let longitude = zone.central_meridian().to_radians() + eta_prime.sinh().atan2(xi_prime.cos());

    Geodetic::new(longitude.to_degrees(), latitude.to_degrees())
}

/// Converts geodetic degrees to a planar UTM coordinate in the given zone.
/// Returns `(easting, northing)` in metres.
pub fn geodetic_to_projected(longitude: f64, latitude: f64, zone: &ZoneDefinition) -> DVec2 {
    let series = KrugerSeries::wgs84();
    let phi = latitude.to_radians();
    let d_lambda = (longitude - zone.central_meridian()).to_radians();

    let t = (phi.sin().atanh() - series.conformal * (series.conformal * phi.sin()).atanh()).sinh();
    let xi_prime = t.atan2(d_lambda.cos());
    let eta_prime = (d_lambda.sin() / (1.0 + t * t).sqrt()).atanh();

    let mut xi = xi_prime;
    let mut eta = eta_prime;
    for (j, alpha) in series.alpha.iter().enumerate() {
        let k = 2.0 * (j + 1) as f64;
        xi += alpha * (k * xi_prime).sin() * (k * eta_prime).cosh();
        eta += alpha * (k * xi_prime).cos() * (k * eta_prime).sinh();
    }

    DVec2::new(
        UTM_FALSE_EASTING + series.k0a * eta,
        zone.false_northing() + series.k0a * xi,
    )
}
