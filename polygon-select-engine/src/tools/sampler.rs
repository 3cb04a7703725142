use crate::engine::ellipsoid::Ellipsoid;
use crate::engine::viewport::{FeatureKey, PickResult, TileFeature, Viewport};
use crate::geometry::bounds::GeodeticBounds;
use crate::geometry::coordinates::Geodetic;
use crate::geometry::polygon;
use bevy::log::{debug, info, warn};
use bevy::math::{DVec2, DVec3};
use std::collections::HashSet;

/// A tile feature found by the sampler, with the sample that first hit it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledFeature {
    pub feature: TileFeature,
    pub world_position: DVec3,
    pub screen_position: DVec2,
}

impl SampledFeature {
    pub fn key(&self) -> FeatureKey {
        self.feature.key()
    }
}

/// Counters from one sampling pass, logged at info level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleStats {
    /// Grid points enumerated over the bounding box.
    pub grid_points: usize,
    /// Grid points inside the polygon.
    pub inside: usize,
    /// Inside points that did not project onto the screen.
    pub projection_misses: usize,
    pub picks: usize,
    /// Picks that returned nothing or a non-tile object.
    pub pick_misses: usize,
    /// Picks of a feature already collected.
    pub duplicates: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleReport {
    /// Unique features in first-seen order.
    pub features: Vec<SampledFeature>,
    pub stats: SampleStats,
}

/// Grid sampler that discovers tile features inside a drawn polygon by
/// picking the screen position of every grid point.
///
/// Only features rendered under a sample pixel are found. Features hidden
/// behind others, off screen or smaller than the grid spacing are missed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSampler {
    step_degrees: f64,
    ellipsoid: Ellipsoid,
}

impl FeatureSampler {
    pub fn new(step_degrees: f64) -> Self {
        Self {
            step_degrees,
            ellipsoid: Ellipsoid::WGS84,
        }
    }

    /// Sample the polygon given by world-space `vertices`.
    ///
    /// Fewer than three vertices, a non-positive step, or a step too fine
    /// for the polygon's extent yields an empty report without touching the
    /// viewport.
    pub fn sample<V: Viewport + ?Sized>(&self, viewport: &mut V, vertices: &[DVec3]) -> SampleReport {
        let mut report = SampleReport::default();
        if vertices.len() < 3 {
            return report;
        }
        if !(self.step_degrees.is_finite() && self.step_degrees > 0.0) {
            warn!("[SELECT] invalid sample step {}, skipping scan", self.step_degrees);
            return report;
        }

        let outline: Vec<Geodetic> = vertices
            .iter()
            .filter_map(|vertex| self.ellipsoid.cartesian_to_cartographic(*vertex))
            .map(|cartographic| cartographic.geodetic())
            .collect();
        if outline.len() < 3 {
            warn!("[SELECT] polygon vertices could not be converted to lon/lat");
            return report;
        }
        let Some(bounds) = GeodeticBounds::from_points(&outline) else {
            return report;
        };
        let ring: Vec<DVec2> = outline.iter().map(Geodetic::as_dvec2).collect();

        let (columns, rows) = bounds.grid_dimensions(self.step_degrees);
        if columns == 0 || rows == 0 {
            warn!(
                "[SELECT] sample step {} is too fine for a {:.6}x{:.6} degree polygon, skipping scan",
                self.step_degrees,
                bounds.max_lon - bounds.min_lon,
                bounds.max_lat - bounds.min_lat
            );
            return report;
        }
        debug!(
            "[SELECT] scanning {columns}x{rows} grid, step {}°, lon {:.6}..{:.6}, lat {:.6}..{:.6}",
            self.step_degrees, bounds.min_lon, bounds.max_lon, bounds.min_lat, bounds.max_lat
        );

        let mut seen: HashSet<FeatureKey> = HashSet::new();
        for sample in bounds.grid(self.step_degrees) {
            report.stats.grid_points += 1;
            if !polygon::contains(sample.as_dvec2(), &ring) {
                continue;
            }
            report.stats.inside += 1;

            let world_position = self.ellipsoid.geodetic_to_cartesian(&sample);
            let Some(screen_position) = viewport.world_to_screen(world_position) else {
                report.stats.projection_misses += 1;
                continue;
            };

            // Picks read the last rendered frame.
            viewport.force_render();
            report.stats.picks += 1;
            let Some(feature) = PickResult::classify(viewport.pick(screen_position)).into_tile_feature()
            else {
                report.stats.pick_misses += 1;
                continue;
            };

            if !seen.insert(feature.key()) {
                report.stats.duplicates += 1;
                continue;
            }
            report.features.push(SampledFeature {
                feature,
                world_position,
                screen_position,
            });
        }

        let stats = &report.stats;
        info!(
            "[SELECT] sampled {} grid points ({} inside, {} picks): {} features, {} duplicates, {} off screen",
            stats.grid_points,
            stats.inside,
            stats.picks,
            report.features.len(),
            stats.duplicates,
            stats.projection_misses
        );
        report
    }
}

/// One-shot sampling of a polygon with the given grid step.
pub fn sample_features_in_polygon<V: Viewport + ?Sized>(
    viewport: &mut V,
    vertices: &[DVec3],
    step_degrees: f64,
) -> Vec<SampledFeature> {
    FeatureSampler::new(step_degrees)
        .sample(viewport, vertices)
        .features
}
