use crate::engine::ellipsoid::Ellipsoid;
use crate::engine::layers::{EntityGeometry, EntitySnapshot, LayerStore, is_drawing_entity};
use crate::geometry::polygon;
use bevy::log::debug;
use bevy::math::{DVec2, DVec3};

/// Position used to place an entity for containment tests.
///
/// Explicit position first, then the mean of a polygon's vertices, then the
/// middle vertex of a polyline.
pub fn representative_position(entity: &EntitySnapshot) -> Option<DVec3> {
    if let Some(position) = entity.position {
        return Some(position);
    }
    match &entity.geometry {
        EntityGeometry::Point(position) => Some(*position),
        EntityGeometry::Polygon(positions) if !positions.is_empty() => {
            Some(positions.iter().copied().sum::<DVec3>() / positions.len() as f64)
        }
        EntityGeometry::Polyline(positions) => positions.get(positions.len() / 2).copied(),
        _ => None,
    }
}

/// Ids of the shown host entities whose representative position lies inside
/// the polygon, tested in lon/lat degrees.
///
/// The selection tool's own preview and vertex markers are never returned,
/// nor are entities without an id.
pub fn entities_in_polygon<L: LayerStore + ?Sized>(store: &L, polygon_positions: &[DVec3]) -> Vec<String> {
    let ellipsoid = Ellipsoid::WGS84;
    let to_degrees = |position: DVec3| {
        ellipsoid
            .cartesian_to_cartographic(position)
            .map(|c| DVec2::new(c.longitude, c.latitude))
    };

    let ring: Vec<DVec2> = polygon_positions.iter().copied().filter_map(to_degrees).collect();
    if ring.len() < 3 {
        return Vec::new();
    }

    let mut ids = Vec::new();
    for entity in store.entities() {
        if !entity.show {
            continue;
        }
        let Some(id) = entity.id.as_deref() else {
            continue;
        };
        if is_drawing_entity(id) {
            continue;
        }
        let Some(point) = representative_position(&entity).and_then(to_degrees) else {
            continue;
        };
        if polygon::contains(point, &ring) {
            debug!(
                "[SELECT] entity {id} ({}) inside polygon at {:.6}, {:.6}",
                entity.name.as_deref().unwrap_or("unnamed"),
                point.x,
                point.y
            );
            ids.push(id.to_string());
        }
    }
    ids
}
