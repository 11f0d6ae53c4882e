//! Vector overlay: faint orbit rings and the layered sun glow.

use glam::Vec3;
use orrery::{PerspectiveCamera, VectorColor, VectorState, Viewport};

use crate::scene_builder::OrbitRing;

const RING_COLOR: VectorColor = VectorColor::new(1.0, 1.0, 1.0, 0.1);
const RING_WIDTH: f32 = 1.0;

/// Glow gradient: core, middle, rim. The rim fades to half opacity.
const GLOW_STOPS: [(u8, u8, u8, f32); 3] = [
    (255, 255, 180, 1.0),
    (255, 200, 0, 1.0),
    (255, 100, 0, 0.5),
];
const GLOW_LAYERS: usize = 4;
/// Outermost glow radius as a multiple of the sun's on-screen radius.
const GLOW_REACH: f32 = 2.2;
/// Opacity of the innermost layer; each layer outward gets less.
const GLOW_ALPHA: f32 = 0.22;

pub fn draw_orbit_rings(vectors: &mut VectorState, rings: &[OrbitRing], camera: &PerspectiveCamera, viewport: Viewport) {
    for ring in rings {
        vectors.stroke_world_path(&ring.points, true, camera, viewport, RING_WIDTH, RING_COLOR);
    }
}

/// Color of the glow gradient at `t` in [0, 1] (core to rim).
fn glow_color(t: f32) -> VectorColor {
    let t = t.clamp(0.0, 1.0);
    let (from, to, local) = if t < 0.5 {
        (GLOW_STOPS[0], GLOW_STOPS[1], t / 0.5)
    } else {
        (GLOW_STOPS[1], GLOW_STOPS[2], (t - 0.5) / 0.5)
    };
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * local) / 255.0;
    VectorColor::new(
        mix(from.0, to.0),
        mix(from.1, to.1),
        mix(from.2, to.2),
        from.3 + (to.3 - from.3) * local,
    )
}

/// Translucent discs behind the sun, drawn outermost first.
pub fn draw_sun_glow(
    vectors: &mut VectorState,
    sun: Vec3,
    radius: f32,
    camera: &PerspectiveCamera,
    viewport: Viewport,
) {
    let screen_radius = camera.projected_radius(sun, radius, viewport);
    if screen_radius <= 0.0 {
        return;
    }
    let ndc = camera.project(sun);
    if ndc.z >= 1.0 {
        return;
    }
    let center = viewport.ndc_to_screen(ndc);

    for layer in (0..GLOW_LAYERS).rev() {
        let t = (layer + 1) as f32 / GLOW_LAYERS as f32;
        let scale = 1.0 + (GLOW_REACH - 1.0) * t;
        let base = glow_color(t);
        let alpha = base.a * GLOW_ALPHA * (1.0 - t * 0.6);
        vectors.fill_circle(center, screen_radius * scale, base.with_alpha(alpha));
    }
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

    #[test]
    fn gradient_hits_its_stops() {
        let core = glow_color(0.0);
        assert_eq!((core.r, core.b, core.a), (1.0, 180.0 / 255.0, 1.0));
        let mid = glow_color(0.5);
        assert!((mid.g - 200.0 / 255.0).abs() < 1e-6);
        let rim = glow_color(1.0);
        assert!((rim.g - 100.0 / 255.0).abs() < 1e-6);
        assert_eq!(rim.a, 0.5);
    }

    #[test]
    fn glow_draws_when_sun_in_view() {
        let (camera, viewport) = camera();
        let mut vectors = VectorState::new();
        draw_sun_glow(&mut vectors, Vec3::ZERO, 20.0, &camera, viewport);
        assert!(vectors.vertex_count() > 0);
        assert!(vectors.vertices().iter().all(|v| v.a > 0.0 && v.a < 0.25));
    }

    #[test]
    fn glow_skipped_when_sun_behind() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut camera = PerspectiveCamera::new(75.0, viewport.aspect(), 0.1, 3000.0)
            .with_position(Vec3::new(0.0, 0.0, 100.0));
        camera.look_at(Vec3::new(0.0, 0.0, 200.0));
        let mut vectors = VectorState::new();
        draw_sun_glow(&mut vectors, Vec3::ZERO, 20.0, &camera, viewport);
        assert_eq!(vectors.vertex_count(), 0);
    }

    #[test]
    fn rings_use_faint_white() {
        let (camera, viewport) = camera();
        let mut vectors = VectorState::new();
        draw_orbit_rings(&mut vectors, &[OrbitRing::new(120.0, 64)], &camera, viewport);
        assert!(vectors.vertex_count() > 0);
        assert!(vectors.vertices().iter().all(|v| v.r == 1.0 && v.a == 0.1));
    }
}
