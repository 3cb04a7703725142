/// Geodetic bounding box tracking and grid enumeration
use super::coordinates::Geodetic;
use constants::selection::MAX_GRID_CELLS_PER_AXIS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl GeodeticBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
        }
    }

    /// Bounds of a point set, `None` when the set is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Geodetic>) -> Option<Self> {
        let mut bounds = Self::new();
        for point in points {
            bounds.update(point);
        }
        bounds.is_valid().then_some(bounds)
    }

    /// Update bounds with a new point
    pub fn update(&mut self, point: &Geodetic) {
        self.min_lon = self.min_lon.min(point.longitude);
        self.max_lon = self.max_lon.max(point.longitude);
        self.min_lat = self.min_lat.min(point.latitude);
        self.max_lat = self.max_lat.max(point.latitude);
    }

    pub fn is_valid(&self) -> bool {
        self.min_lon <= self.max_lon && self.min_lat <= self.max_lat
    }

    /// Width and height in degrees.
    pub fn dimensions(&self) -> (f64, f64) {
        (self.max_lon - self.min_lon, self.max_lat - self.min_lat)
    }

    /// Regular sample grid over the box, longitude outer and latitude inner.
    ///
    /// Both edges are inclusive. Samples are computed from the index rather
    /// than accumulated so wide boxes do not drift.
    pub fn grid(&self, step: f64) -> impl Iterator<Item = Geodetic> + '_ {
        let (lon_steps, lat_steps) = self.grid_dimensions(step);
        (0..lon_steps).flat_map(move |i| {
            let longitude = self.min_lon + i as f64 * step;
            (0..lat_steps)
                .map(move |j| Geodetic::new(longitude, self.min_lat + j as f64 * step))
        })
    }

    /// Number of grid columns and rows for `step`. Zero for invalid input,
    /// and for steps so small that an axis would exceed
    /// `MAX_GRID_CELLS_PER_AXIS`.
    pub fn grid_dimensions(&self, step: f64) -> (usize, usize) {
        if !self.is_valid() || !(step.is_finite() && step > 0.0) {
            return (0, 0);
        }
        let (width, height) = self.dimensions();
        let count = |extent: f64| {
            let cells = (extent / step + 1e-9).floor();
            (cells.is_finite() && cells < MAX_GRID_CELLS_PER_AXIS)
                .then(|| (cells as usize).saturating_add(1))
        };
        match (count(width), count(height)) {
            (Some(columns), Some(rows)) => (columns, rows),
            _ => (0, 0),
        }
    }
}

impl Default for GeodeticBounds {
    fn default() -> Self {
        Self::new()
    }
}
