//! Pointer target tracking.
//!
//! The pointer ray is cut with the `z = 0` plane to get the swarm target.
//! The target only moves when a pointer event arrives.

use glam::{Vec2, Vec3};

use crate::camera::FollowCamera;
use crate::picking::{Marker, Ray};

/// Rays flatter than this against the target plane are ignored.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Holds the current target and the invisible marker that sits on it.
#[derive(Debug, Clone)]
pub struct TargetTracker {
    target: Vec3,
    pointer: Vec2,
    marker: Marker,
}

impl TargetTracker {
    pub fn new(marker_radius: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            pointer: Vec2::ZERO,
            marker: Marker {
                center: Vec3::ZERO,
                radius: marker_radius,
            },
        }
    }

    /// Project a pointer position (NDC) through `camera` onto the target plane.
    ///
    /// If the ray never meets the plane the previous target is kept. The
    /// pointer itself is always remembered for the picking ray.
    pub fn update(&mut self, pointer_ndc: Vec2, camera: &FollowCamera) -> Vec3 {
        self.pointer = pointer_ndc;
        let ray = Ray::from_camera(pointer_ndc, camera);
        match plane_hit(&ray) {
            Some(target) => {
                self.target = target;
                self.marker.center = target;
            }
            None => {
                tracing::trace!(target: "swarm::tracker", ?pointer_ndc, "pointer ray misses target plane");
            }
        }
        self.target
    }

    /// Force the target, e.g. for scripted runs.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.marker.center = target;
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Last pointer position seen, in NDC.
    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    #[inline]
    pub fn marker(&self) -> &Marker {
        &self.marker
    }
}

/// Where `ray` crosses `z = 0`, measured as `-origin.z / dir.z` along the ray.
fn plane_hit(ray: &Ray) -> Option<Vec3> {
    if ray.direction.z.abs() < PARALLEL_EPSILON {
        return None;
    }
    let distance = -ray.origin.z / ray.direction.z;
    let hit = ray.at(distance);
    hit.is_finite().then_some(hit)
}
