use bevy::math::{DVec3, DVec4};
use serde::{Deserialize, Serialize};

/// Symmetric perspective frustum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveFrustum {
    /// Vertical field of view in radians.
    pub fov_y: f64,
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for PerspectiveFrustum {
    fn default() -> Self {
        Self {
            fov_y: 60f64.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 1.0,
            far: 5.0e8,
        }
    }
}

/// Snapshot of the viewport camera in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: DVec3,
    /// Unit view direction.
    pub direction: DVec3,
    /// Unit up vector, orthogonal to `direction`.
    pub up: DVec3,
    pub frustum: PerspectiveFrustum,
}

impl CameraState {
    /// Camera at `position` looking at `target`, with `up` re-orthogonalised.
    pub fn looking_at(position: DVec3, target: DVec3, up: DVec3, frustum: PerspectiveFrustum) -> Self {
        let direction = (target - position).normalize_or_zero();
        let right = direction.cross(up).normalize_or_zero();
        Self {
            position,
            direction,
            up: right.cross(direction).normalize_or_zero(),
            frustum,
        }
    }

    pub fn right(&self) -> DVec3 {
        self.direction.cross(self.up)
    }

    /// Six inward-facing planes bounding the visible region.
    pub fn culling_volume(&self) -> CullingVolume {
        let f = &self.frustum;
        let t = f.near * (f.fov_y * 0.5).tan();
        let b = -t;
        let r = t * f.aspect_ratio;
        let l = -r;

        let position = self.position;
        let direction = self.direction;
        let up = self.up;
        let right = self.right();
        let near_center = position + direction * f.near;
        let far_center = position + direction * f.far;

        let edge = |offset: DVec3| (near_center + offset - position).normalize_or_zero();
        let plane = |normal: DVec3, point: DVec3| {
            let normal = normal.normalize_or_zero();
            normal.extend(-normal.dot(point))
        };

        CullingVolume {
            planes: [
                plane(edge(right * l).cross(up), position),
                plane(up.cross(edge(right * r)), position),
                plane(right.cross(edge(up * b)), position),
                plane(edge(up * t).cross(right), position),
                plane(direction, near_center),
                plane(-direction, far_center),
            ],
        }
    }
}

/// Relation of a point to the frustum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersect {
    Outside,
    Inside,
}

/// Frustum as planes `(nx, ny, nz, d)` with `n·p + d >= 0` on the inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullingVolume {
    pub planes: [DVec4; 6],
}

impl CullingVolume {
    pub fn point_visibility(&self, point: DVec3) -> Intersect {
        let outside = self
            .planes
            .iter()
            .any(|plane| plane.truncate().dot(point) + plane.w < 0.0);
        if outside { Intersect::Outside } else { Intersect::Inside }
    }
}

/// True when at least one point is inside the camera frustum. An empty set is
/// never visible.
pub fn is_visible(points: &[DVec3], camera: &CameraState) -> bool {
    if points.is_empty() {
        return false;
    }
    let volume = camera.culling_volume();
    points
        .iter()
        .any(|point| volume.point_visibility(*point) == Intersect::Inside)
}
