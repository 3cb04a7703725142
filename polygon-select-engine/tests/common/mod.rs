#![allow(dead_code)]

use bevy::math::{DVec2, DVec3};
use polygon_select_engine::engine::camera::{CameraState, PerspectiveFrustum};
use polygon_select_engine::engine::ellipsoid::Ellipsoid;
use polygon_select_engine::engine::layers::{
    DrawEntity, DrawGeometry, EntityGeometry, EntitySnapshot, LayerId, LayerStore,
};
use polygon_select_engine::engine::viewport::{
    HeadingPitchRange, InputChannel, InputHandle, PickedObject, Ray, TilesetId, Viewport,
    ViewportMode,
};
use serde_json::json;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Longitude at pixel x = 0.
pub const LON0: f64 = 105.85;
/// Latitude at pixel y = 0.
pub const LAT0: f64 = 21.03;
pub const DEG_PER_PX: f64 = 1e-5;
pub const SCREEN_PX: f64 = 2000.0;

pub const TILESET: &str = "https://tiles.example/hanoi/tileset.json";

/// Screen pixel for a lon/lat, on the mock's linear mapping.
pub fn pixel(lon: f64, lat: f64) -> DVec2 {
    DVec2::new((lon - LON0) / DEG_PER_PX, (LAT0 - lat) / DEG_PER_PX)
}

pub fn world(lon: f64, lat: f64) -> DVec3 {
    Ellipsoid::WGS84.cartographic_to_cartesian(lon, lat, 0.0)
}

/// Axis-aligned lon/lat box, west/south/east/north.
#[derive(Debug, Clone, Copy)]
pub struct Footprint {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Footprint {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self { west, south, east, north }
    }

    fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }
}

#[derive(Debug, Clone)]
pub enum MockObject {
    TileFeature { batch_id: u32, footprint: Footprint },
    /// Picked but not a tile feature (ground primitive, overlay).
    Overlay { id: String, footprint: Footprint },
}

#[derive(Debug)]
struct MockLayer {
    name: String,
    entities: Vec<DrawEntity>,
}

/// Scene host over a flat screen mapping: pixel (x, y) sits at
/// lon = LON0 + x·1e-5, lat = LAT0 − y·1e-5.
#[derive(Debug)]
pub struct MockHost {
    pub mode: ViewportMode,
    pub terrain: bool,
    pub objects: Vec<MockObject>,
    pub loose_entities: Vec<EntitySnapshot>,
    pub camera: CameraState,
    /// Pixels whose pick ray misses the globe entirely.
    pub sky: Option<Footprint>,

    pub picks: usize,
    pub renders: usize,
    pub globe_picks: usize,
    pub double_click_suppressed: bool,
    pub look_at_calls: Vec<(DVec3, HeadingPitchRange)>,
    pub layers_created: usize,

    active_inputs: HashSet<InputHandle>,
    next_handle: u64,
    layers: HashMap<LayerId, MockLayer>,
    next_layer: u64,
}

impl MockHost {
    pub fn new() -> Self {
        let (lon, lat) = (LON0 + 0.01, LAT0 - 0.01);
        Self {
            mode: ViewportMode::Scene3D,
            terrain: true,
            objects: Vec::new(),
            loose_entities: Vec::new(),
            camera: CameraState::looking_at(
                Ellipsoid::WGS84.cartographic_to_cartesian(lon, lat, 2000.0),
                world(lon, lat),
                DVec3::Z,
                PerspectiveFrustum::default(),
            ),
            sky: None,
            picks: 0,
            renders: 0,
            globe_picks: 0,
            double_click_suppressed: false,
            look_at_calls: Vec::new(),
            layers_created: 0,
            active_inputs: HashSet::new(),
            next_handle: 1,
            layers: HashMap::new(),
            next_layer: 1,
        }
    }

    pub fn with_feature(mut self, batch_id: u32, footprint: Footprint) -> Self {
        self.objects.push(MockObject::TileFeature { batch_id, footprint });
        self
    }

    pub fn with_overlay(mut self, id: &str, footprint: Footprint) -> Self {
        self.objects.push(MockObject::Overlay {
            id: id.to_string(),
            footprint,
        });
        self
    }

    pub fn active_input_count(&self) -> usize {
        self.active_inputs.len()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_entity_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .layers
            .values()
            .flat_map(|layer| layer.entities.iter().map(|e| e.id.clone()))
            .collect();
        ids.sort();
        ids
    }

    /// Entities of the layer called `name`, in insertion order.
    pub fn layer_entities(&self, name: &str) -> Vec<DrawEntity> {
        self.layers
            .values()
            .filter(|layer| layer.name == name)
            .flat_map(|layer| layer.entities.iter().cloned())
            .collect()
    }

    pub fn layer_names(&self) -> Vec<String> {
        self.layers.values().map(|layer| layer.name.clone()).collect()
    }

    fn lon_lat(pixel: DVec2) -> (f64, f64) {
        (LON0 + pixel.x * DEG_PER_PX, LAT0 - pixel.y * DEG_PER_PX)
    }
}

impl Viewport for MockHost {
    fn mode(&self) -> ViewportMode {
        self.mode
    }

    fn pick_ray(&self, pixel: DVec2) -> Option<Ray> {
        let (lon, lat) = Self::lon_lat(pixel);
        if self.sky.is_some_and(|sky| sky.contains(lon, lat)) {
            return None;
        }
        let origin = Ellipsoid::WGS84.cartographic_to_cartesian(lon, lat, 1000.0);
        Some(Ray::new(origin, world(lon, lat) - origin))
    }

    fn pick_globe(&self, ray: &Ray) -> Option<DVec3> {
        if !self.terrain {
            return None;
        }
        let hit = Ellipsoid::WGS84.intersect_ray(ray)?;
        Some(ray.point_at(hit.start))
    }

    fn pick(&mut self, pixel: DVec2) -> Option<PickedObject> {
        self.picks += 1;
        let (lon, lat) = Self::lon_lat(pixel);
        self.objects.iter().find_map(|object| match object {
            MockObject::TileFeature { batch_id, footprint } if footprint.contains(lon, lat) => {
                Some(PickedObject {
                    tileset: Some(TilesetId(TILESET.to_string())),
                    batch_id: Some(*batch_id),
                    has_properties: true,
                    properties: BTreeMap::from([("id".to_string(), json!(batch_id))]),
                    ..Default::default()
                })
            }
            MockObject::Overlay { id, footprint } if footprint.contains(lon, lat) => {
                Some(PickedObject {
                    entity_id: Some(id.clone()),
                    ..Default::default()
                })
            }
            _ => None,
        })
    }

    fn world_to_screen(&self, position: DVec3) -> Option<DVec2> {
        let c = Ellipsoid::WGS84.cartesian_to_cartographic(position)?;
        let pixel = pixel(c.longitude, c.latitude);
        let on_screen = (0.0..=SCREEN_PX).contains(&pixel.x) && (0.0..=SCREEN_PX).contains(&pixel.y);
        on_screen.then_some(pixel)
    }

    fn camera(&self) -> CameraState {
        self.camera
    }

    fn force_render(&mut self) {
        self.renders += 1;
    }

    fn look_at(&mut self, target: DVec3, offset: HeadingPitchRange) {
        self.look_at_calls.push((target, offset));
    }

    fn acquire_input(&mut self, _channel: InputChannel) -> InputHandle {
        let handle = InputHandle(self.next_handle);
        self.next_handle += 1;
        self.active_inputs.insert(handle);
        handle
    }

    fn release_input(&mut self, handle: InputHandle) {
        self.active_inputs.remove(&handle);
    }

    fn suppress_default_double_click(&mut self) {
        self.double_click_suppressed = true;
    }
}

impl LayerStore for MockHost {
    fn create_layer(&mut self, name: &str) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        self.layers_created += 1;
        self.layers.insert(
            id,
            MockLayer {
                name: name.to_string(),
                entities: Vec::new(),
            },
        );
        id
    }

    fn remove_layer(&mut self, layer: LayerId) -> bool {
        self.layers.remove(&layer).is_some()
    }

    fn add_entity(&mut self, layer: LayerId, entity: DrawEntity) {
        if let Some(layer) = self.layers.get_mut(&layer) {
            layer.entities.retain(|existing| existing.id != entity.id);
            layer.entities.push(entity);
        }
    }

    fn remove_entity(&mut self, layer: LayerId, id: &str) -> bool {
        let Some(layer) = self.layers.get_mut(&layer) else {
            return false;
        };
        let before = layer.entities.len();
        layer.entities.retain(|entity| entity.id != id);
        layer.entities.len() != before
    }

    fn clear_layer(&mut self, layer: LayerId) {
        if let Some(layer) = self.layers.get_mut(&layer) {
            layer.entities.clear();
        }
    }

    fn entities(&self) -> Vec<EntitySnapshot> {
        let drawn = self.layers.values().flat_map(|layer| {
            layer.entities.iter().map(|entity| {
                let geometry = match &entity.geometry {
                    DrawGeometry::Polygon { positions, .. } => EntityGeometry::Polygon(positions.clone()),
                    DrawGeometry::PointMarker { position, .. } => EntityGeometry::Point(*position),
                };
                EntitySnapshot {
                    id: Some(entity.id.clone()),
                    name: None,
                    show: true,
                    position: None,
                    geometry,
                }
            })
        });
        self.loose_entities.iter().cloned().chain(drawn).collect()
    }
}
