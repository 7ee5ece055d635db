// components/collider.rs
//
// Axis-aligned boxes and rays. Boxes follow translation and scale only.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use super::transform::Transform3D;

/// Axis-aligned bounding box collider, sized by half extents.
///
/// The world box follows the owning entity's translation and scale;
/// rotation is ignored (boxes stay axis-aligned).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    pub half_extents: Vec3,
}

impl BoxCollider {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }

    /// Unit cube (half extents of 0.5).
    pub fn unit() -> Self {
        Self::new(Vec3::splat(0.5))
    }

    /// World-space box for the given transform.
    pub fn bounds(&self, transform: &Transform3D) -> Aabb {
        let half = self.half_extents * transform.scale.abs();
        Aabb::from_center(transform.translation, half)
    }
}

/// A ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
}

/// World-space axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Test whether this box, moved by `delta`, overlaps `other`.
    /// Boxes that only share a face do not intersect.
    pub fn intersects(&self, other: &Aabb, delta: Vec3) -> bool {
        let min = self.min + delta;
        let max = self.max + delta;
        min.x < other.max.x
            && max.x > other.min.x
            && min.y < other.max.y
            && max.y > other.min.y
            && min.z < other.max.z
            && max.z > other.min.z
    }

    /// Slab test. Returns the distance along the ray to the first hit,
    /// or 0 when the ray starts inside the box.
    pub fn intersects_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if dir.abs() < f32::EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}
