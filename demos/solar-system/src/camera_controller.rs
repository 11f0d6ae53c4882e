//! Orbit / pan / zoom over an explicit [`CameraState`].
//!
//! Orbit rotates the camera about the target on a sphere, pan translates
//! camera and target together, zoom scales the distance between them.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use orrery::PointerButton;

use crate::config::ControlConfig;
use crate::state::{CameraState, PointerState};

/// Rotate the camera about the target. Keeps the distance, clamps the polar angle.
pub fn orbit(camera: &mut CameraState, dx: f32, dy: f32, controls: &ControlConfig) {
    if !dx.is_finite() || !dy.is_finite() {
        return;
    }
    let offset = camera.offset();
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return;
    }

    let phi = offset.z.atan2(offset.x) - dx * controls.orbit_sensitivity;
    let theta = ((offset.y / radius).clamp(-1.0, 1.0).acos() - dy * controls.orbit_sensitivity)
        .clamp(controls.polar_margin, PI - controls.polar_margin);

    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    camera.position = camera.target
        + Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi) * radius;
}

/// Slide camera and target together across the view plane.
pub fn pan(camera: &mut CameraState, dx: f32, dy: f32, up: Vec3, controls: &ControlConfig) {
    if !dx.is_finite() || !dy.is_finite() {
        return;
    }
    let back = camera.offset();
    let right = up.cross(back).normalize_or_zero();
    let screen_up = back.cross(right).normalize_or_zero();
    let shift = right * (-dx * controls.pan_sensitivity) + screen_up * (dy * controls.pan_sensitivity);

    camera.position += shift;
    camera.target += shift;
}

/// Move the camera along its line to the target, one wheel tick at a time.
/// Positive `delta_y` moves away.
pub fn zoom(camera: &mut CameraState, delta_y: f32, controls: &ControlConfig) {
    if delta_y == 0.0 || !delta_y.is_finite() {
        return;
    }
    let offset = camera.offset();
    let direction = match offset.try_normalize() {
        Some(dir) => dir,
        None => Vec3::Z,
    };
    let factor = if delta_y > 0.0 {
        1.0 + controls.zoom_step
    } else {
        1.0 - controls.zoom_step
    };
    let distance = (offset.length() * factor).clamp(controls.min_distance, controls.max_distance);
    camera.position = camera.target + direction * distance;
}

pub fn pointer_down(pointer: &mut PointerState, at: Vec2, button: PointerButton) {
    match button {
        PointerButton::Primary => pointer.primary_down = true,
        PointerButton::Secondary => pointer.secondary_down = true,
        _ => {}
    }
    pointer.last = at;
}

pub fn pointer_up(pointer: &mut PointerState, button: PointerButton) {
    match button {
        PointerButton::Primary => pointer.primary_down = false,
        PointerButton::Secondary => pointer.secondary_down = false,
        _ => {}
    }
}

/// Apply a cursor move: orbit while primary is held, pan while secondary is held.
pub fn pointer_move(
    pointer: &mut PointerState,
    camera: &mut CameraState,
    at: Vec2,
    up: Vec3,
    controls: &ControlConfig,
) {
    let delta = at - pointer.last;
    if pointer.primary_down {
        orbit(camera, delta.x, delta.y, controls);
    }
    if pointer.secondary_down {
        pan(camera, delta.x, delta.y, up, controls);
    }
    pointer.last = at;
}
