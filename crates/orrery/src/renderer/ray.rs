use glam::Vec3;
use crate::api::types::EntityId;

/// A half-line used for picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction (zero for a degenerate ray, which never hits).
    pub direction: Vec3,
}

/// A ray/mesh intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: EntityId,
    /// Distance from the ray origin along the direction.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Nearest front-face intersection with a sphere.
    ///
    /// A ray starting inside the sphere only meets back faces and does not hit.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let c = oc.length_squared() - radius * radius;
        if c < 0.0 {
            return None;
        }
        let b = oc.dot(self.direction);
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let t = -b - discriminant.sqrt();
        (t >= 0.0).then_some(t)
    }
}
