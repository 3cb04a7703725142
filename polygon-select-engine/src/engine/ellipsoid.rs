use super::viewport::Ray;
use crate::geometry::coordinates::Geodetic;
use bevy::math::DVec3;
use constants::coordinate_system::{WGS84_FLATTENING, WGS84_SEMI_MAJOR_AXIS};

/// Geodetic position with ellipsoidal height in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartographic {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
}

impl Cartographic {
    pub fn geodetic(&self) -> Geodetic {
        Geodetic::new(self.longitude, self.latitude)
    }
}

/// Parametric interval along a ray where it is inside the ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayInterval {
    pub start: f64,
    pub stop: f64,
}

/// Reference ellipsoid in Earth-centred, Earth-fixed coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub radii: DVec3,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        radii: DVec3::new(
            WGS84_SEMI_MAJOR_AXIS,
            WGS84_SEMI_MAJOR_AXIS,
            WGS84_SEMI_MAJOR_AXIS * (1.0 - WGS84_FLATTENING),
        ),
    };

    fn eccentricity_squared(&self) -> f64 {
        let a2 = self.radii.x * self.radii.x;
        let b2 = self.radii.z * self.radii.z;
        (a2 - b2) / a2
    }

    /// Degrees and metres to a Cartesian position.
    pub fn cartographic_to_cartesian(&self, longitude: f64, latitude: f64, height: f64) -> DVec3 {
        let (lon, lat) = (longitude.to_radians(), latitude.to_radians());
        let e2 = self.eccentricity_squared();
        let prime_vertical = self.radii.x / (1.0 - e2 * lat.sin().powi(2)).sqrt();

        DVec3::new(
            (prime_vertical + height) * lat.cos() * lon.cos(),
            (prime_vertical + height) * lat.cos() * lon.sin(),
            (prime_vertical * (1.0 - e2) + height) * lat.sin(),
        )
    }

    /// Surface point (height 0) for a geodetic coordinate.
    pub fn geodetic_to_cartesian(&self, geodetic: &Geodetic) -> DVec3 {
        self.cartographic_to_cartesian(geodetic.longitude, geodetic.latitude, 0.0)
    }

    /// Cartesian position to degrees and height. `None` at the centre of the
    /// ellipsoid where longitude and latitude are undefined.
    pub fn cartesian_to_cartographic(&self, position: DVec3) -> Option<Cartographic> {
        if !position.is_finite() || position.length_squared() < 1.0 {
            return None;
        }

        let e2 = self.eccentricity_squared();
        let p = (position.x * position.x + position.y * position.y).sqrt();
        let longitude = position.y.atan2(position.x);

        if p < 1e-9 {
            // On the polar axis.
            let latitude = std::f64::consts::FRAC_PI_2.copysign(position.z);
            return Some(Cartographic {
                longitude: 0.0,
                latitude: latitude.to_degrees(),
                height: position.z.abs() - self.radii.z,
            });
        }

        let mut latitude = position.z.atan2(p * (1.0 - e2));
        let mut height = 0.0;
        for _ in 0..8 {
            let prime_vertical = self.radii.x / (1.0 - e2 * latitude.sin().powi(2)).sqrt();
            height = p / latitude.cos() - prime_vertical;
            latitude = position
                .z
                .atan2(p * (1.0 - e2 * prime_vertical / (prime_vertical + height)));
        }

        Some(Cartographic {
            longitude: longitude.to_degrees(),
            latitude: latitude.to_degrees(),
            height,
        })
    }

    /// Entry/exit parameters of the ray through the ellipsoid surface.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayInterval> {
        let inverse_radii = self.radii.recip();
        let q = ray.origin * inverse_radii;
        let w = ray.direction * inverse_radii;

        let a = w.length_squared();
        let b = 2.0 * q.dot(w);
        let c = q.length_squared() - 1.0;
        if a == 0.0 {
            return None;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let t0 = (-b - root) / (2.0 * a);
        let t1 = (-b + root) / (2.0 * a);

        if c > 0.0 {
            // Origin outside: both roots must be ahead of it.
            (t0 >= 0.0).then_some(RayInterval {
                start: t0,
                stop: t1,
            })
        } else {
            Some(RayInterval {
                start: 0.0,
                stop: t1,
            })
        }
    }
}
