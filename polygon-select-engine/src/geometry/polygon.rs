use bevy::math::DVec2;

/// Horizontal ray-casting parity test.
///
/// The polygon may be open or closed (last vertex repeating the first); the
/// closing edge is always implied. Fewer than three vertices is never inside.
/// The test is agnostic to coordinate space, callers pass lon/lat degrees or
/// planar world coordinates alike.
///
/// Points lying exactly on an edge or vertex are implementation-defined: the
/// strict straddle test counts them as inside for some edges and outside for
/// others, so no caller may rely on either answer.
pub fn contains(point: DVec2, polygon: &[DVec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        // Straddle check excludes horizontal edges, so the division is safe.
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Arithmetic mean of the vertices, `None` for an empty slice.
pub fn centroid(points: &[DVec2]) -> Option<DVec2> {
    if points.is_empty() {
        return None;
    }
    Some(points.iter().copied().sum::<DVec2>() / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.5),
            DVec2::new(5.0, 4.0),
            DVec2::new(0.5, 3.0),
        ]
    }

    #[test]
    fn convex_quad_contains_its_centroid() {
        let polygon = quad();
        let centre = centroid(&polygon).unwrap();
        assert!(contains(centre, &polygon));
    }

    #[test]
    fn point_outside_bounding_box_is_outside() {
        let polygon = quad();
        assert!(!contains(DVec2::new(6.0, 2.0), &polygon));
        assert!(!contains(DVec2::new(-1.0, -1.0), &polygon));
        assert!(!contains(DVec2::new(2.0, 10.0), &polygon));
    }

    #[test]
    fn traversal_direction_does_not_matter() {
        let forward = quad();
        let mut reversed = forward.clone();
        reversed.reverse();

        for y in 0..12 {
            for x in 0..12 {
                let p = DVec2::new(x as f64 * 0.47 - 0.3, y as f64 * 0.41 - 0.2);
                assert_eq!(contains(p, &forward), contains(p, &reversed), "at {p:?}");
            }
        }
    }

    #[test]
    fn degenerate_polygons_contain_nothing() {
        assert!(!contains(DVec2::ZERO, &[]));
        assert!(!contains(DVec2::ZERO, &[DVec2::new(-1.0, -1.0)]));
        assert!(!contains(
            DVec2::ZERO,
            &[DVec2::new(-1.0, -1.0), DVec2::new(1.0, 1.0)]
        ));
    }

    #[test]
    fn explicitly_closed_ring_matches_open_ring() {
        let open = quad();
        let mut closed = open.clone();
        closed.push(open[0]);

        for p in [DVec2::new(2.0, 2.0), DVec2::new(4.9, 1.0), DVec2::new(0.2, 2.9)] {
            assert_eq!(contains(p, &open), contains(p, &closed));
        }
    }

    #[test]
    fn concave_notch_is_excluded() {
        // U shape opening upwards.
        let polygon = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(3.0, 0.0),
            DVec2::new(3.0, 3.0),
            DVec2::new(2.0, 3.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 3.0),
            DVec2::new(0.0, 3.0),
        ];
        assert!(!contains(DVec2::new(1.5, 2.0), &polygon));
        assert!(contains(DVec2::new(0.5, 2.0), &polygon));
        assert!(contains(DVec2::new(1.5, 0.5), &polygon));
    }
}
