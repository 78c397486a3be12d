//! Raycast targets that drops can land on.

use glam::{Vec2, Vec3};

use crate::camera::Ray;

/// A surface a picking ray can hit.
pub trait RaycastTarget {
    /// Nearest intersection in front of the ray origin, if any.
    fn intersect(&self, ray: &Ray) -> Option<Vec3>;

    /// Height of the target object's own origin. Palette drops sit on this
    /// rather than on the hit point.
    fn anchor_height(&self) -> f32;
}

/// A horizontal plane, optionally limited to a rectangular XZ footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub height: f32,
    /// `(min, max)` corners in XZ. `None` means unbounded.
    pub footprint: Option<(Vec2, Vec2)>,
}

impl GroundPlane {
    pub fn infinite(height: f32) -> Self {
        Self {
            height,
            footprint: None,
        }
    }
}

impl RaycastTarget for GroundPlane {
    fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let denom = ray.direction.y;
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (self.height - ray.origin.y) / denom;
        if t < 0.0 {
            return None;
        }
        let hit = ray.at(t);
        match self.footprint {
            Some((min, max)) => {
                let xz = Vec2::new(hit.x, hit.z);
                (xz.cmpge(min).all() && xz.cmple(max).all()).then_some(hit)
            }
            None => Some(hit),
        }
    }

    fn anchor_height(&self) -> f32 {
        self.height
    }
}

/// An axis-aligned slab of ground, hit on its outside faces only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundBox {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl GroundBox {
    /// Box of full `size` centered at `center`.
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }
}

impl RaycastTarget for GroundBox {
    fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let min = self.center - self.half_extents;
        let max = self.center + self.half_extents;
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir.abs() < 1e-8 {
                if origin < min[axis] || origin > max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (min[axis] - origin) / dir;
            let t2 = (max[axis] - origin) / dir;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
        }

        if t_near > t_far || t_near < 0.0 {
            return None;
        }
        Some(ray.at(t_near))
    }

    fn anchor_height(&self) -> f32 {
        self.center.y
    }
}
