//! Lyon-based vector overlay rendering.
//!
//! Shapes are tessellated on the CPU into a flat triangle-list buffer
//! (x, y, r, g, b, a per vertex, pixel coordinates) that the host draws
//! before the SDF spheres. World-space paths are projected through the
//! camera first and split wherever they leave the view volume.
//!
//! ```ignore
//! // In Game::update():
//! ctx.vectors.stroke_world_path(&ring, true, &ctx.camera, ctx.viewport, 1.0, VectorColor::WHITE.with_alpha(0.1));
//! ctx.vectors.fill_circle(sun_screen, glow_radius, VectorColor::new(1.0, 0.78, 0.0, 0.25));
//! ```

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::renderer::camera::{PerspectiveCamera, Viewport};

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Stamps a flat color onto every tessellated vertex.
struct Flat(VectorColor);

impl Flat {
    fn vertex(&self, x: f32, y: f32) -> VectorVertex {
        VectorVertex { x, y, r: self.0.r, g: self.0.g, b: self.0.b, a: self.0.a }
    }
}

impl FillVertexConstructor<VectorVertex> for Flat {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        self.vertex(p.x, p.y)
    }
}

impl StrokeVertexConstructor<VectorVertex> for Flat {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        self.vertex(p.x, p.y)
    }
}

/// Tessellators plus the per-frame output buffer.
/// Cleared by the runner each frame and refilled by drawing commands.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
}

impl VectorState {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(max_vertices),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    /// Expand indexed geometry into the triangle list.
    fn flush_geometry(&mut self) {
        let VertexBuffers { vertices, indices } = &mut self.geometry;
        self.vertices.extend(indices.iter().map(|&i| vertices[i as usize]));
        vertices.clear();
        indices.clear();
    }

    fn polyline_path(points: &[Vec2], closed: bool) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(closed);
        builder.build()
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: VectorColor) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        self.fill_path(&builder.build(), color);
    }

    pub fn fill_path(&mut self, path: &Path, color: VectorColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, Flat(color)),
        );
        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    /// Stroke an open polyline.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 2 {
            return;
        }
        let path = Self::polyline_path(points, false);
        self.stroke_path(&path, width, color);
    }

    /// Stroke a closed polygon outline.
    pub fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 3 {
            return;
        }
        let path = Self::polyline_path(points, true);
        self.stroke_path(&path, width, color);
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, Flat(color)),
        );
        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    /// Stroke a world-space path as seen by `camera`.
    ///
    /// Vertices outside the view volume break the path into separate
    /// screen-space polylines. A closed path that is entirely visible is
    /// stroked as one closed outline.
    pub fn stroke_world_path(
        &mut self,
        world: &[Vec3],
        closed: bool,
        camera: &PerspectiveCamera,
        viewport: Viewport,
        width: f32,
        color: VectorColor,
    ) {
        let projected: Vec<Option<Vec2>> = world
            .iter()
            .map(|&p| project_visible(camera, viewport, p))
            .collect();

        let first_hidden = projected.iter().position(Option::is_none);
        let Some(hidden) = first_hidden else {
            let points: Vec<Vec2> = projected.into_iter().flatten().collect();
            if closed {
                self.stroke_polygon(&points, width, color);
            } else {
                self.stroke_polyline(&points, width, color);
            }
            return;
        };

        // A closed path is walked starting just past a hidden vertex so the
        // run that wraps around the end stays in one piece.
        let n = projected.len();
        let start = if closed { hidden + 1 } else { 0 };
        let mut run: Vec<Vec2> = Vec::new();
        for i in 0..n {
            match projected[(start + i) % n] {
                Some(p) => run.push(p),
                None => {
                    self.stroke_polyline(&run, width, color);
                    run.clear();
                }
            }
        }
        self.stroke_polyline(&run, width, color);
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

fn project_visible(camera: &PerspectiveCamera, viewport: Viewport, world: Vec3) -> Option<Vec2> {
    if camera.view_depth(world) <= camera.near {
        return None;
    }
    let ndc = camera.project(world);
    (ndc.z < 1.0).then(|| viewport.ndc_to_screen(ndc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> (PerspectiveCamera, Viewport) {
        let viewport = Viewport::new(800.0, 600.0);
        let mut camera = PerspectiveCamera::new(75.0, viewport.aspect(), 0.1, 3000.0)
            .with_position(Vec3::new(0.0, 150.0, 400.0));
        camera.look_at(Vec3::ZERO);
        (camera, viewport)
    }

    fn ring(radius: f32, segments: usize) -> Vec<Vec3> {
        (0..segments)
            .map(|i| {
                let a = i as f32 / segments as f32 * std::f32::consts::TAU;
                Vec3::new(radius * a.cos(), 0.0, radius * a.sin())
            })
            .collect()
    }

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(std::mem::size_of::<VectorVertex>(), VectorVertex::STRIDE_BYTES);
    }

    #[test]
    fn circle_carries_color() {
        let mut state = VectorState::new();
        let color = VectorColor::new(1.0, 0.78, 0.0, 0.5);
        state.fill_circle(Vec2::new(50.0, 50.0), 25.0, color);
        assert!(state.vertex_count() > 0);
        assert_eq!(state.vertex_count() % 3, 0);
        assert!(state.vertices().iter().all(|v| v.g == color.g && v.a == color.a));
    }

    #[test]
    fn degenerate_shapes_produce_nothing() {
        let mut state = VectorState::new();
        state.stroke_polygon(&[Vec2::ZERO, Vec2::ONE], 1.0, VectorColor::WHITE);
        state.fill_circle(Vec2::ZERO, 0.0, VectorColor::WHITE);
        state.stroke_polyline(&[Vec2::ZERO], 1.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn visible_ring_strokes_and_clears() {
        let (camera, viewport) = camera();
        let mut state = VectorState::new();
        state.stroke_world_path(&ring(120.0, 64), true, &camera, viewport, 1.0, VectorColor::WHITE.with_alpha(0.1));
        assert!(state.vertex_count() > 0);

        state.clear();
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn ring_around_camera_is_split_not_dropped() {
        let (camera, viewport) = camera();
        let mut state = VectorState::new();
        // The camera sits inside this ring, so part of it is behind the view.
        let mut path = ring(450.0, 128);
        for p in &mut path {
            p.y = 150.0;
        }
        state.stroke_world_path(&path, true, &camera, viewport, 1.0, VectorColor::WHITE);
        assert!(state.vertex_count() > 0);
    }

    #[test]
    fn path_entirely_behind_camera_draws_nothing() {
        let (camera, viewport) = camera();
        let mut state = VectorState::new();
        let behind: Vec<Vec3> = ring(10.0, 16).into_iter().map(|p| p + Vec3::new(0.0, 150.0, 600.0)).collect();
        state.stroke_world_path(&behind, true, &camera, viewport, 1.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 0);
    }
}
