//! Point-sprite clouds (starfields, dust).
//!
//! A cloud is a static set of world positions that share size and opacity.
//! Each frame the visible points are projected to pixels with perspective
//! size attenuation and written to a flat buffer for the host's point pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::core::rng::Rng;
use crate::renderer::camera::{PerspectiveCamera, Viewport};

/// Per-point render data. 4 floats = 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    /// Screen position in pixels (origin top-left).
    pub x: f32,
    pub y: f32,
    /// Diameter in pixels.
    pub size: f32,
    /// Opacity multiplier for the cloud color.
    pub alpha: f32,
}

impl PointInstance {
    pub const FLOATS: usize = 4;
}

/// A set of world-space points drawn as attenuated sprites.
#[derive(Debug, Clone)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    /// World-space size; on-screen size shrinks with depth.
    pub size: f32,
    pub alpha: f32,
}

impl PointCloud {
    pub fn new(positions: Vec<Vec3>, size: f32) -> Self {
        Self {
            positions,
            size,
            alpha: 1.0,
        }
    }

    /// `count` points uniformly spread over an axis-aligned cube of side `spread`
    /// centered on the origin.
    pub fn scattered(count: usize, spread: f32, size: f32, rng: &mut Rng) -> Self {
        let positions = (0..count)
            .map(|_| Vec3::new(rng.spread(spread), rng.spread(spread), rng.spread(spread)))
            .collect();
        Self::new(positions, size)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Flat buffer of projected points.
pub struct PointBuffer {
    points: Vec<PointInstance>,
    max: usize,
}

impl PointBuffer {
    pub fn with_capacity(max: usize) -> Self {
        Self {
            points: Vec::with_capacity(max),
            max,
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Push a point. Returns false once the buffer is full.
    pub fn push(&mut self, point: PointInstance) -> bool {
        if self.points.len() < self.max {
            self.points.push(point);
            true
        } else {
            false
        }
    }

    pub fn points(&self) -> &[PointInstance] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }
}

/// Project every visible point of `cloud` into `buffer` (appends).
///
/// Points behind the near plane, beyond the far plane or outside the
/// viewport are skipped.
pub fn build_point_buffer(
    cloud: &PointCloud,
    camera: &PerspectiveCamera,
    viewport: Viewport,
    buffer: &mut PointBuffer,
) {
    let view = camera.view_matrix();
    let view_proj = camera.view_projection_matrix();
    let scale = viewport.height * 0.5;
    let mut dropped = 0usize;

    for &world in &cloud.positions {
        let depth = -view.transform_point3(world).z;
        if depth <= camera.near {
            continue;
        }
        let ndc = view_proj.project_point3(world);
        if ndc.z >= 1.0 || ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            continue;
        }
        let screen = viewport.ndc_to_screen(ndc);
        let pushed = buffer.push(PointInstance {
            x: screen.x,
            y: screen.y,
            size: cloud.size * scale / depth,
            alpha: cloud.alpha,
        });
        if !pushed {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::debug!("point buffer full: dropped {} visible points", dropped);
    }
}
