//! CPU ray picking against the particle cloud and the target marker.
//!
//! Points are treated as spheres of radius `point_threshold`: the ray hits a
//! point when its closest approach (never behind the origin) is within that
//! distance. Point hits report the raw offset of the point's `x` component
//! in the flat position buffer; [`offset_to_index`] turns that into a
//! particle index.

use glam::{Vec2, Vec3};

use crate::camera::FollowCamera;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Ray from the camera through a pointer position in NDC.
    pub fn from_camera(ndc: Vec2, camera: &FollowCamera) -> Self {
        Self {
            origin: camera.position,
            direction: camera.ray_direction(ndc),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Closest point on the ray to `point`. Parameters behind the origin clamp to the origin.
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let t = (point - self.origin).dot(self.direction);
        if t < 0.0 {
            self.origin
        } else {
            self.at(t)
        }
    }

    /// Distance along the ray where it first meets a sphere, if it does.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let to_center = center - self.origin;
        let tca = to_center.dot(self.direction);
        let d2 = to_center.length_squared() - tca * tca;
        let r2 = radius * radius;
        if d2 > r2 {
            return None;
        }
        let thc = (r2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;
        if t1 < 0.0 {
            None
        } else if t0 < 0.0 {
            // Origin is inside the sphere.
            Some(t1)
        } else {
            Some(t0)
        }
    }
}

/// The invisible sphere that sits on the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub center: Vec3,
    pub radius: f32,
}

/// What the picking ray hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitKind {
    /// A particle, by raw offset into the flat position buffer.
    Point { offset: usize },
    /// The target marker.
    Marker,
}

/// One intersection, ordered by `distance` in query results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance from the ray origin to the hit.
    pub distance: f32,
    /// World-space hit location.
    pub point: Vec3,
    pub kind: HitKind,
}

impl Hit {
    /// Particle index of a point hit.
    pub fn particle_index(&self) -> Option<usize> {
        match self.kind {
            HitKind::Point { offset } => Some(offset_to_index(offset)),
            HitKind::Marker => None,
        }
    }
}

/// Convert a raw flat-buffer offset into a particle index.
///
/// Offsets always point at the `x` component, so they are multiples of three.
#[inline]
pub fn offset_to_index(offset: usize) -> usize {
    debug_assert!(offset % 3 == 0, "offset {offset} does not address an x component");
    offset / 3
}

/// Intersect `ray` with every point in `positions` (flat `x, y, z` triples)
/// and with `marker`. Hits come back sorted nearest first.
pub fn intersect(ray: &Ray, positions: &[f32], marker: Option<&Marker>, point_threshold: f32) -> Vec<Hit> {
    assert!(
        positions.len() % 3 == 0,
        "position buffer length {} is not a multiple of 3",
        positions.len()
    );

    let threshold_sq = point_threshold * point_threshold;
    let mut hits: Vec<Hit> = positions
        .chunks_exact(3)
        .enumerate()
        .filter_map(|(i, xyz)| {
            let p = Vec3::new(xyz[0], xyz[1], xyz[2]);
            let closest = ray.closest_point(p);
            if closest.distance_squared(p) < threshold_sq {
                Some(Hit {
                    distance: ray.origin.distance(closest),
                    point: closest,
                    kind: HitKind::Point { offset: i * 3 },
                })
            } else {
                None
            }
        })
        .collect();

    if let Some(marker) = marker {
        if let Some(t) = ray.intersect_sphere(marker.center, marker.radius) {
            hits.push(Hit {
                distance: t,
                point: ray.at(t),
                kind: HitKind::Marker,
            });
        }
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
