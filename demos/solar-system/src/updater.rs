//! The per-frame step: advance angles, place labels, ease the camera target,
//! aim the camera.

use glam::{Vec2, Vec3};
use orrery::{EngineContext, PerspectiveCamera, Scene, Viewport};

use crate::config::MotionConfig;
use crate::scene_builder::{self, CelestialObject, LabelId, SolarScene};
use crate::state::{AppState, CameraState};

/// Where a label goes this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub label: LabelId,
    pub visible: bool,
    /// Pixel position (origin top-left); meaningful only when visible.
    pub screen: Vec2,
}

/// Advance orbit and spin angles by `dt` seconds and push them into the graph.
pub fn advance_bodies(objects: &mut [CelestialObject], ctx: &mut EngineContext, dt: f32, motion: &MotionConfig) {
    for object in objects.iter_mut() {
        if object.pivot.is_some() {
            object.orbit_angle += object.speed * dt * motion.orbit_rate;
        }
        object.spin_angle += motion.spin_rate * dt;
        scene_builder::apply_angles(object, &mut ctx.graph);
    }
}

/// Project every labelled body. Depth-only visibility: a label stays visible
/// even when another body sits between it and the camera.
pub fn project_labels(
    objects: &[CelestialObject],
    scene: &Scene,
    camera: &PerspectiveCamera,
    viewport: Viewport,
) -> Vec<LabelPlacement> {
    objects
        .iter()
        .filter_map(|object| {
            let label = object.label?;
            let world = scene.world_position(object.mesh)?;
            let ndc = camera.project(world);
            let visible = ndc.z < 1.0;
            Some(LabelPlacement {
                label,
                visible,
                screen: if visible { viewport.ndc_to_screen(ndc) } else { Vec2::ZERO },
            })
        })
        .collect()
}

/// Ease the camera target toward the focused body, or home to the origin.
pub fn smooth_target(state: &mut AppState, scene: &Scene, solar: &SolarScene, motion: &MotionConfig) {
    let focused = state.focus.and_then(|body| solar.world_position(scene, body));
    state.camera.target = match focused {
        Some(position) => state.camera.target.lerp(position, motion.focus_smoothing),
        None => state.camera.target.lerp(Vec3::ZERO, motion.home_smoothing),
    };
}

/// Copy the camera state onto the render camera and aim it.
pub fn orient_camera(camera: &mut PerspectiveCamera, state: &CameraState) {
    camera.position = state.position;
    camera.look_at(state.target);
}

/// Run one frame in order. While paused, bodies hold still and the target
/// does not ease, but labels are still placed and the camera still re-aims.
pub fn update_frame(
    state: &mut AppState,
    solar: &mut SolarScene,
    ctx: &mut EngineContext,
    dt: f32,
    motion: &MotionConfig,
) -> Vec<LabelPlacement> {
    if !state.paused {
        advance_bodies(&mut solar.objects, ctx, dt, motion);
    }
    ctx.propagate_transforms();

    let labels = project_labels(&solar.objects, &ctx.scene, &ctx.camera, ctx.viewport);

    if !state.paused {
        smooth_target(state, &ctx.scene, solar, motion);
    }
    orient_camera(&mut ctx.camera, &state.camera);
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{BodyCatalog, BodyIndex};
    use crate::config::SolarConfig;

    struct Fixture {
        ctx: EngineContext,
        solar: SolarScene,
        state: AppState,
        motion: MotionConfig,
    }

    fn fixture() -> Fixture {
        let mut ctx = EngineContext::default();
        let catalog = BodyCatalog::load().unwrap();
        let solar = scene_builder::build(&mut ctx, &catalog, &SolarConfig::default());
        let state = AppState::new(CameraState::new(Vec3::new(0.0, 150.0, 400.0), Vec3::ZERO));
        orient_camera(&mut ctx.camera, &state.camera);
        Fixture { ctx, solar, state, motion: MotionConfig::default() }
    }

    fn angles(solar: &SolarScene) -> Vec<(f32, f32)> {
        solar.objects.iter().map(|o| (o.orbit_angle, o.spin_angle)).collect()
    }

    fn frame(f: &mut Fixture, dt: f32) -> Vec<LabelPlacement> {
        update_frame(&mut f.state, &mut f.solar, &mut f.ctx, dt, &f.motion)
    }

    // The target starts at the origin, which is already the home smoothing goal.
    #[test]
    fn zero_dt_changes_only_orientation() {
        let mut f = fixture();
        f.ctx.camera.rotation = glam::Quat::IDENTITY;
        let before_angles = angles(&f.solar);
        let before_camera = f.state.camera;

        frame(&mut f, 0.0);

        assert_eq!(angles(&f.solar), before_angles);
        assert_eq!(f.state.camera, before_camera);
        assert_ne!(f.ctx.camera.rotation, glam::Quat::IDENTITY);
    }

    #[test]
    fn zero_dt_still_eases_an_off_goal_target() {
        let mut f = fixture();
        f.state.camera.target = Vec3::new(100.0, 0.0, 0.0);
        let before_angles = angles(&f.solar);

        frame(&mut f, 0.0);
        assert_eq!(angles(&f.solar), before_angles);
        assert!((f.state.camera.target - Vec3::new(95.0, 0.0, 0.0)).length() < 1e-4);

        // Same step size regardless of dt.
        f.state.camera.target = Vec3::new(100.0, 0.0, 0.0);
        frame(&mut f, 0.2);
        assert!((f.state.camera.target - Vec3::new(95.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn angles_advance_with_dt() {
        let mut f = fixture();
        frame(&mut f, 0.5);

        let earth = &f.solar.objects[3];
        assert!((earth.orbit_angle - 0.015 * 0.5 * 10.0).abs() < 1e-6);
        assert!((earth.spin_angle - 0.25).abs() < 1e-6);
        // The sun spins but has no orbit.
        assert_eq!(f.solar.objects[0].orbit_angle, 0.0);
        assert!((f.solar.objects[0].spin_angle - 0.25).abs() < 1e-6);

        let pos = f.solar.world_position(&f.ctx.scene, BodyIndex(3)).unwrap();
        assert!((pos.length() - 120.0).abs() < 1e-3);
        assert!(pos.z < 0.0);
    }

    #[test]
    fn focused_target_converges_geometrically() {
        let mut f = fixture();
        f.state.paused = false;
        f.state.focus = Some(BodyIndex(3));

        let mut last = f.state.camera.target.distance(f.solar.world_position(&f.ctx.scene, BodyIndex(3)).unwrap());
        for _ in 0..30 {
            frame(&mut f, 0.0);
            let goal = f.solar.world_position(&f.ctx.scene, BodyIndex(3)).unwrap();
            let now = f.state.camera.target.distance(goal);
            assert!(now < last);
            assert!((now - last * 0.9).abs() < 1e-3);
            last = now;
        }
    }

    #[test]
    fn unfocused_target_drifts_home() {
        let mut f = fixture();
        f.state.camera.target = Vec3::new(100.0, 0.0, 0.0);
        frame(&mut f, 0.016);
        assert!((f.state.camera.target - Vec3::new(95.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn pause_freezes_rotation() {
        let mut f = fixture();
        frame(&mut f, 0.1);
        let before = angles(&f.solar);
        let earth_before = f.solar.world_position(&f.ctx.scene, BodyIndex(3)).unwrap();

        f.state.paused = true;
        for _ in 0..20 {
            frame(&mut f, 0.1);
        }
        f.state.paused = false;

        assert_eq!(angles(&f.solar), before);
        assert_eq!(f.solar.world_position(&f.ctx.scene, BodyIndex(3)).unwrap(), earth_before);
    }

    #[test]
    fn pause_freezes_target_but_camera_still_aims() {
        let mut f = fixture();
        f.state.paused = true;
        f.state.camera.target = Vec3::new(50.0, 0.0, 0.0);
        frame(&mut f, 0.1);
        assert_eq!(f.state.camera.target, Vec3::new(50.0, 0.0, 0.0));
        let ndc = f.ctx.camera.project(Vec3::new(50.0, 0.0, 0.0));
        assert!(ndc.x.abs() < 1e-3 && ndc.y.abs() < 1e-3);
    }

    #[test]
    fn labels_follow_projection() {
        let mut f = fixture();
        let labels = frame(&mut f, 0.0);
        assert_eq!(labels.len(), f.solar.objects.len());

        let sun = labels[0];
        assert_eq!(sun.label, LabelId(0));
        assert!(sun.visible);
        assert!((sun.screen - Vec2::new(400.0, 300.0)).length() < 0.5);
    }

    #[test]
    fn labels_behind_camera_hide_and_update_while_paused() {
        let mut f = fixture();
        f.state.paused = true;
        // Put the camera between the sun and Neptune, looking away from the sun.
        f.state.camera = CameraState::new(Vec3::new(200.0, 0.0, 0.0), Vec3::new(500.0, 0.0, 0.0));
        orient_camera(&mut f.ctx.camera, &f.state.camera);

        let labels = frame(&mut f, 0.1);
        assert!(!labels[0].visible);
        assert!(labels[8].visible);
    }
}
