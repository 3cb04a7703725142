//! Subdistrict loading and camera framing for newly created geometry.
//!
//! After geometry is added to the scene the camera only moves when none of
//! it is already in view; a user who is looking at the area keeps their view.

use crate::config::SelectionConfig;
use crate::engine::SceneHost;
use crate::engine::camera::is_visible;
use crate::engine::ellipsoid::Ellipsoid;
use crate::engine::layers::{DrawEntity, DrawGeometry, LayerId};
use crate::engine::viewport::{HeadingPitchRange, Viewport};
use crate::error::Result;
use crate::geometry::coordinates::{ZoneDefinition, projected_to_geodetic};
use bevy::log::{debug, info};
use constants::render_settings::SUBDISTRICT_DEFAULT_FILL_RGBA;
use bevy::math::DVec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FramingOutcome {
    /// At least one vertex was inside the view frustum.
    AlreadyVisible,
    /// Camera was pointed at the first vertex of the last loop.
    Moved { target: DVec3 },
    NoGeometry,
}

/// Subdistrict record as delivered by the data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubdistrictRecord {
    pub m_polygon_loop: PolygonLoop,
    #[serde(default)]
    pub color: Option<[u8; 4]>,
    #[serde(default)]
    pub property_set: Option<PropertySet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonLoop {
    pub curve: Curve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// `[x, y]` or `[x, y, height]` per vertex.
    pub point: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySet {
    #[serde(default)]
    pub property: Value,
}

impl SubdistrictRecord {
    /// Loop vertices as world positions.
    ///
    /// With a zone the first two components are easting and northing in that
    /// zone, otherwise longitude and latitude in degrees. Points with fewer
    /// than two components are skipped.
    pub fn world_positions(&self, projection: Option<&ZoneDefinition>) -> Vec<DVec3> {
        self.m_polygon_loop
            .curve
            .point
            .iter()
            .filter_map(|point| {
                let (&x, &y) = (point.first()?, point.get(1)?);
                let height = point.get(2).copied().unwrap_or(0.0);
                let (longitude, latitude) = match projection {
                    Some(zone) => {
                        let geodetic = projected_to_geodetic(x, y, zone);
                        (geodetic.longitude, geodetic.latitude)
                    }
                    None => (x, y),
                };
                Some(Ellipsoid::WGS84.cartographic_to_cartesian(longitude, latitude, height))
            })
            .collect()
    }

    /// Display properties, empty when the record carries none.
    pub fn properties(&self) -> Vec<(String, String)> {
        let Some(Value::Object(map)) = self.property_set.as_ref().map(|set| &set.property) else {
            return Vec::new();
        };
        map.iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect()
    }

    /// Layer entity for this record, or `None` when no vertex is usable.
    pub fn draw_entity(&self, index: usize, projection: Option<&ZoneDefinition>) -> Option<DrawEntity> {
        let positions = self.world_positions(projection);
        if positions.is_empty() {
            return None;
        }
        Some(DrawEntity::subdistrict_polygon(
            index,
            positions,
            self.color.unwrap_or(SUBDISTRICT_DEFAULT_FILL_RGBA),
            self.properties(),
        ))
    }
}

/// Move the camera to the new loops unless some vertex is already visible.
pub fn frame_new_geometry<V: Viewport + ?Sized>(
    viewport: &mut V,
    loops: &[Vec<DVec3>],
    offset: HeadingPitchRange,
) -> FramingOutcome {
    let all: Vec<DVec3> = loops.iter().flatten().copied().collect();
    if all.is_empty() {
        return FramingOutcome::NoGeometry;
    }
    if is_visible(&all, &viewport.camera()) {
        debug!("[SELECT] {} new vertices already in view", all.len());
        return FramingOutcome::AlreadyVisible;
    }

    let Some(target) = loops.iter().rev().find_map(|ring| ring.first().copied()) else {
        return FramingOutcome::NoGeometry;
    };
    viewport.look_at(target, offset);
    info!("[SELECT] framing camera on {target:?}");
    FramingOutcome::Moved { target }
}

/// Replace the contents of `layer` with the subdistrict records, then frame
/// them with the configured projection and camera offset.
///
/// Records without a usable vertex are skipped. A bad projection fails
/// before the layer is touched.
pub fn frame_subdistricts<H: SceneHost + ?Sized>(
    host: &mut H,
    layer: LayerId,
    records: &[SubdistrictRecord],
    config: &SelectionConfig,
) -> Result<FramingOutcome> {
    let projection = config.projection()?;
    host.clear_layer(layer);

    let mut loops: Vec<Vec<DVec3>> = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let Some(entity) = record.draw_entity(index, projection.as_ref()) else {
            debug!("[SELECT] subdistrict {index} has no usable vertices");
            continue;
        };
        if let DrawGeometry::Polygon { positions, .. } = &entity.geometry {
            loops.push(positions.clone());
        }
        host.add_entity(layer, entity);
    }
    info!("[SELECT] loaded {} of {} subdistricts", loops.len(), records.len());
    Ok(frame_new_geometry(host, &loops, config.framing.offset()))
}
