use bevy::math::DVec3;
use constants::render_settings::{
    MARKER_FILL_RGBA, MARKER_LABEL_OFFSET_PX, MARKER_OUTLINE_RGBA, MARKER_OUTLINE_WIDTH,
    MARKER_PIXEL_SIZE, PREVIEW_FILL_RGBA, PREVIEW_OUTLINE_RGBA, SUBDISTRICT_OUTLINE_RGBA,
};
use constants::selection::{POINT_MARKER_PREFIX, PREVIEW_POLYGON_ID, SUBDISTRICT_ID_PREFIX};

/// Handle to a named layer (data source) in the host's layer store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// Visual description of an entity the engine asks the host to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawGeometry {
    Polygon {
        positions: Vec<DVec3>,
        fill_rgba: [u8; 4],
        outline_rgba: [u8; 4],
        clamp_to_ground: bool,
        /// Key/value pairs shown in the host's info panel.
        properties: Vec<(String, String)>,
    },
    PointMarker {
        position: DVec3,
        label: String,
        pixel_size: f32,
        fill_rgba: [u8; 4],
        outline_rgba: [u8; 4],
        outline_width: f32,
        label_offset_px: [f32; 2],
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawEntity {
    pub id: String,
    pub geometry: DrawGeometry,
}

impl DrawEntity {
    /// Live preview of the polygon being drawn.
    pub fn preview_polygon(positions: Vec<DVec3>) -> Self {
        Self {
            id: PREVIEW_POLYGON_ID.to_string(),
            geometry: DrawGeometry::Polygon {
                positions,
                fill_rgba: PREVIEW_FILL_RGBA,
                outline_rgba: PREVIEW_OUTLINE_RGBA,
                clamp_to_ground: true,
                properties: Vec::new(),
            },
        }
    }

    /// Ground-clamped subdistrict outline, numbered by its position in the
    /// loaded batch.
    pub fn subdistrict_polygon(
        index: usize,
        positions: Vec<DVec3>,
        fill_rgba: [u8; 4],
        properties: Vec<(String, String)>,
    ) -> Self {
        Self {
            id: format!("{SUBDISTRICT_ID_PREFIX}{index}"),
            geometry: DrawGeometry::Polygon {
                positions,
                fill_rgba,
                outline_rgba: SUBDISTRICT_OUTLINE_RGBA,
                clamp_to_ground: true,
                properties,
            },
        }
    }

    /// Numbered marker for the `index`-th confirmed vertex (1-based).
    pub fn vertex_marker(position: DVec3, index: usize) -> Self {
        Self {
            id: format!("{POINT_MARKER_PREFIX}{index}"),
            geometry: DrawGeometry::PointMarker {
                position,
                label: index.to_string(),
                pixel_size: MARKER_PIXEL_SIZE,
                fill_rgba: MARKER_FILL_RGBA,
                outline_rgba: MARKER_OUTLINE_RGBA,
                outline_width: MARKER_OUTLINE_WIDTH,
                label_offset_px: MARKER_LABEL_OFFSET_PX,
            },
        }
    }
}

/// True for the ids of the engine's own drawing entities.
pub fn is_drawing_entity(id: &str) -> bool {
    id == PREVIEW_POLYGON_ID || id.starts_with(POINT_MARKER_PREFIX)
}

/// Geometry of an existing host entity, as far as position queries need it.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityGeometry {
    Point(DVec3),
    Polygon(Vec<DVec3>),
    Polyline(Vec<DVec3>),
    Other,
}

/// Read-only view of a host entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Entity and owning layer are both shown.
    pub show: bool,
    /// Explicit position property, if any.
    pub position: Option<DVec3>,
    pub geometry: EntityGeometry,
}

/// Named, bulk-manageable groups of entities owned by the host.
pub trait LayerStore {
    fn create_layer(&mut self, name: &str) -> LayerId;

    /// Removes the layer and everything in it. Returns false if it was unknown.
    fn remove_layer(&mut self, layer: LayerId) -> bool;

    /// Adds an entity, replacing any entity with the same id in that layer.
    fn add_entity(&mut self, layer: LayerId, entity: DrawEntity);

    fn remove_entity(&mut self, layer: LayerId, id: &str) -> bool;

    fn clear_layer(&mut self, layer: LayerId);

    /// Every entity of every layer plus the host's loose entities.
    fn entities(&self) -> Vec<EntitySnapshot>;
}
