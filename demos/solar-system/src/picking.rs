//! Click picking and the info panel actions.

use glam::Vec2;
use orrery::{PerspectiveCamera, Scene, Viewport};

use crate::bodies::{BodyCatalog, BodyIndex};
use crate::scene_builder::SolarScene;
use crate::state::AppState;

/// The body under a screen position, nearest first. Only body meshes are
/// candidates; rings and stars are not in the scene as pickable meshes.
pub fn pick(
    camera: &PerspectiveCamera,
    viewport: Viewport,
    screen: Vec2,
    scene: &Scene,
    solar: &SolarScene,
) -> Option<BodyIndex> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }
    let ray = camera.ray_from_ndc(viewport.screen_to_ndc(screen));
    let hit = scene.raycast(&ray, &solar.pickable()).into_iter().next()?;
    solar.body_for_mesh(hit.id)
}

/// Primary click handler. A miss leaves focus and panel untouched.
pub fn click(
    state: &mut AppState,
    catalog: &BodyCatalog,
    camera: &PerspectiveCamera,
    viewport: Viewport,
    screen: Vec2,
    scene: &Scene,
    solar: &SolarScene,
) -> Option<BodyIndex> {
    let body = pick(camera, viewport, screen, scene, solar)?;
    let descriptor = catalog.get(body)?;
    state.focus = Some(body);
    state.panel.show(descriptor);
    log::debug!("selected {}", descriptor.name);
    Some(body)
}

/// Close action: drop focus and hide the panel.
pub fn close(state: &mut AppState) {
    state.focus = None;
    state.panel.hide();
}

/// Focus action: snap the camera target onto the focused body.
/// Returns false when nothing is focused.
pub fn focus(state: &mut AppState, scene: &Scene, solar: &SolarScene) -> bool {
    let Some(position) = state.focus.and_then(|body| solar.world_position(scene, body)) else {
        return false;
    };
    state.camera.target = position;
    true
}
