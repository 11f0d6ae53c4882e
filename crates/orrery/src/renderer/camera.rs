//! Perspective camera and viewport math.
//!
//! Projection follows GL clip conventions: NDC x/y/z all span [-1, 1], and a
//! point behind the camera or past the far plane projects to `z > 1`.

use glam::{Mat4, Quat, Vec2, Vec3};

use super::ray::Ray;

/// Drawable area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width / height, falling back to 1 for a collapsed viewport.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Pixel position (origin top-left, Y down) → normalized device coordinates.
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.width * 2.0 - 1.0,
            -(screen.y / self.height) * 2.0 + 1.0,
        )
    }

    /// Normalized device coordinates → pixel position (origin top-left, Y down).
    pub fn ndc_to_screen(&self, ndc: Vec3) -> Vec2 {
        Vec2::new(
            (ndc.x * 0.5 + 0.5) * self.width,
            (ndc.y * -0.5 + 0.5) * self.height,
        )
    }
}

/// Right-handed perspective camera looking down its local -Z.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Position in world space.
    pub position: Vec3,
    /// Orientation, updated by [`look_at`](Self::look_at).
    pub rotation: Quat,
    /// World-space up used when orienting.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            up: Vec3::Y,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Rotate so the camera faces `target`.
    /// Leaves the orientation unchanged when the view direction is undefined
    /// (target at the camera, or straight along `up`).
    pub fn look_at(&mut self, target: Vec3) {
        let forward = target - self.position;
        if forward.length_squared() < 1e-12 || forward.cross(self.up).length_squared() < 1e-12 {
            return;
        }
        let (_, rotation, _) = Mat4::look_at_rh(self.position, target, self.up)
            .inverse()
            .to_scale_rotation_translation();
        self.rotation = rotation.normalize();
    }

    /// Update the aspect ratio from a viewport size.
    pub fn set_aspect(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Compute the view matrix (inverse of camera transform).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to normalized device coordinates.
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection_matrix().project_point3(world)
    }

    /// Distance of a world point in front of the camera along its view axis.
    /// Negative for points behind the camera.
    pub fn view_depth(&self, world: Vec3) -> f32 {
        -self.view_matrix().transform_point3(world).z
    }

    /// On-screen radius in pixels of a sphere at `world`.
    /// Zero when the center is not in front of the near plane.
    pub fn projected_radius(&self, world: Vec3, radius: f32, viewport: Viewport) -> f32 {
        let depth = self.view_depth(world);
        if depth <= self.near {
            return 0.0;
        }
        radius / (depth * (self.fov_y * 0.5).tan()) * viewport.height * 0.5
    }

    /// Ray from the camera through a point given in NDC.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let through = self
            .view_projection_matrix()
            .inverse()
            .project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, through - self.position)
    }
}
