/// Solar System: a sun, eight planets and a starfield around an orbit camera.
///
/// Drag with the primary button to orbit, with the secondary button to pan,
/// scroll to zoom, click a body for its info panel.

use glam::{Vec2, Vec3};
use orrery::*;
use serde::Serialize;

use crate::bodies::BodyCatalog;
use crate::camera_controller;
use crate::config::SolarConfig;
#[cfg(feature = "vectors")]
use crate::decor;
use crate::picking;
use crate::scene_builder::{self, SolarScene};
use crate::state::{AppState, CameraState, InfoPanel};
use crate::updater::{self, LabelPlacement};

// ── Custom event kinds from the page ─────────────────────────────────

const CUSTOM_CLOSE_PANEL: u32 = 1;
const CUSTOM_FOCUS: u32 = 2;
const CUSTOM_RESET_VIEW: u32 = 3;
const CUSTOM_TOGGLE_PAUSE: u32 = 4;

// ── Game event kinds to the page ─────────────────────────────────────

/// a = label index, b = x, c = y (pixels).
const EVENT_LABEL_SHOWN: f32 = 1.0;
/// a = label index.
const EVENT_LABEL_HIDDEN: f32 = 2.0;
/// a = focused body index or -1, b = 1 when the panel is open.
const EVENT_SELECTION: f32 = 3.0;
/// a = 1 when paused.
const EVENT_PAUSE_STATE: f32 = 4.0;

/// Overlay state read by the page through `get_ui_json`.
#[derive(Serialize)]
struct UiSnapshot<'a> {
    panel: &'a InfoPanel,
    paused: bool,
    focused: Option<&'a str>,
    /// Label text, indexed by label id.
    labels: Vec<&'a str>,
}

pub struct SolarSystem {
    catalog: BodyCatalog,
    config: SolarConfig,
    state: AppState,
    solar: SolarScene,
}

impl SolarSystem {
    pub fn new() -> Self {
        let catalog = BodyCatalog::load().expect("embedded body catalog is invalid");
        let config = SolarConfig::default();
        let state = AppState::new(CameraState::new(Vec3::from(config.home_position), Vec3::ZERO));
        Self {
            catalog,
            config,
            state,
            solar: SolarScene::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn reset_view(&mut self) {
        self.state.focus = None;
        self.state.camera = CameraState::new(Vec3::from(self.config.home_position), Vec3::ZERO);
        log::info!("view reset");
    }

    fn toggle_pause(&mut self) {
        self.state.paused = !self.state.paused;
        log::debug!("paused: {}", self.state.paused);
    }

    fn handle_input(&mut self, ctx: &EngineContext, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                camera_controller::pointer_down(&mut self.state.pointer, Vec2::new(x, y), button);
            }
            InputEvent::PointerUp { button, .. } => {
                camera_controller::pointer_up(&mut self.state.pointer, button);
            }
            InputEvent::PointerMove { x, y } => {
                camera_controller::pointer_move(
                    &mut self.state.pointer,
                    &mut self.state.camera,
                    Vec2::new(x, y),
                    ctx.camera.up,
                    &self.config.controls,
                );
            }
            InputEvent::Wheel { delta_y } => {
                camera_controller::zoom(&mut self.state.camera, delta_y, &self.config.controls);
            }
            InputEvent::Click { x, y, over_overlay: false } => {
                picking::click(
                    &mut self.state,
                    &self.catalog,
                    &ctx.camera,
                    ctx.viewport,
                    Vec2::new(x, y),
                    &ctx.scene,
                    &self.solar,
                );
            }
            InputEvent::Click { over_overlay: true, .. } => {}
            InputEvent::Custom { kind, .. } => match kind {
                CUSTOM_CLOSE_PANEL => picking::close(&mut self.state),
                CUSTOM_FOCUS => {
                    if picking::focus(&mut self.state, &ctx.scene, &self.solar) {
                        log::debug!("target snapped to focused body");
                    }
                }
                CUSTOM_RESET_VIEW => self.reset_view(),
                CUSTOM_TOGGLE_PAUSE => self.toggle_pause(),
                _ => log::debug!("unknown custom event {}", kind),
            },
        }
    }

    fn emit_events(&self, ctx: &mut EngineContext, labels: &[LabelPlacement]) {
        for placement in labels {
            let index = placement.label.0 as f32;
            let event = if placement.visible {
                GameEvent::new(EVENT_LABEL_SHOWN, index, placement.screen.x, placement.screen.y)
            } else {
                GameEvent::new(EVENT_LABEL_HIDDEN, index, 0.0, 0.0)
            };
            ctx.emit_event(event);
        }

        let focused = self.state.focus.map(|b| b.0 as f32).unwrap_or(-1.0);
        let panel_open = if self.state.panel.visible { 1.0 } else { 0.0 };
        ctx.emit_event(GameEvent::new(EVENT_SELECTION, focused, panel_open, 0.0));

        let paused = if self.state.paused { 1.0 } else { 0.0 };
        ctx.emit_event(GameEvent::new(EVENT_PAUSE_STATE, paused, 0.0, 0.0));
    }

    #[cfg(feature = "vectors")]
    fn draw_decor(&self, ctx: &mut EngineContext) {
        decor::draw_orbit_rings(&mut ctx.vectors, &self.solar.rings, &ctx.camera, ctx.viewport);
        if let Some(sun) = self.solar.objects.first() {
            if let Some(position) = ctx.scene.world_position(sun.mesh) {
                let radius = self.catalog.star().radius;
                decor::draw_sun_glow(&mut ctx.vectors, position, radius, &ctx.camera, ctx.viewport);
            }
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 3000.0,
            camera_position: Vec3::from(self.config.home_position),
            max_sdf_instances: 32,
            max_points: 16384,
            max_events: 64,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.solar = scene_builder::build(ctx, &self.catalog, &self.config);
        updater::orient_camera(&mut ctx.camera, &self.state.camera);
        log::info!("solar system ready: {} bodies", self.solar.objects.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        for event in input.iter() {
            self.handle_input(ctx, event);
        }

        let labels = updater::update_frame(&mut self.state, &mut self.solar, ctx, dt, &self.config.motion);

        #[cfg(feature = "vectors")]
        self.draw_decor(ctx);

        self.emit_events(ctx, &labels);
    }

    fn configure(&mut self, json: &str) {
        match SolarConfig::from_json(json) {
            Ok(config) => {
                self.config = config;
                log::info!("configuration updated");
            }
            Err(err) => log::warn!("ignoring invalid configuration: {}", err),
        }
    }

    fn ui_json(&self) -> Option<String> {
        let snapshot = UiSnapshot {
            panel: &self.state.panel,
            paused: self.state.paused,
            focused: self
                .state
                .focus
                .and_then(|b| self.catalog.get(b))
                .map(|b| b.name.as_str()),
            labels: self.catalog.bodies().iter().map(|b| b.name.as_str()).collect(),
        };
        serde_json::to_string(&snapshot).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::BodyIndex;

    fn started() -> (SolarSystem, EngineContext) {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::new(&game.config());
        game.init(&mut ctx);
        (game, ctx)
    }

    fn step(game: &mut SolarSystem, ctx: &mut EngineContext, events: &[InputEvent], dt: f32) {
        let mut input = InputQueue::new();
        for &event in events {
            input.push(event);
        }
        ctx.clear_frame_data();
        game.update(ctx, &input, dt);
    }

    fn custom(kind: u32) -> InputEvent {
        InputEvent::Custom { kind, a: 0.0, b: 0.0, c: 0.0 }
    }

    fn screen_of(ctx: &EngineContext, world: Vec3) -> Vec2 {
        ctx.viewport.ndc_to_screen(ctx.camera.project(world))
    }

    fn earth_click(game: &SolarSystem, ctx: &EngineContext, over_overlay: bool) -> InputEvent {
        let earth = game.solar.world_position(&ctx.scene, BodyIndex(3)).unwrap();
        let at = screen_of(ctx, earth);
        InputEvent::Click { x: at.x, y: at.y, over_overlay }
    }

    #[test]
    fn starts_at_home_looking_at_sun() {
        let (game, ctx) = started();
        assert_eq!(game.state().camera.position, Vec3::new(0.0, 150.0, 400.0));
        assert_eq!(ctx.camera.position, Vec3::new(0.0, 150.0, 400.0));
        let sun = screen_of(&ctx, Vec3::ZERO);
        assert!((sun - Vec2::new(400.0, 300.0)).length() < 0.5);
    }

    #[test]
    fn click_earth_opens_panel_and_emits_selection() {
        let (mut game, mut ctx) = started();
        let click = earth_click(&game, &ctx, false);
        step(&mut game, &mut ctx, &[click], 0.0);

        assert_eq!(game.state().focus, Some(BodyIndex(3)));
        assert_eq!(game.state().panel.diameter, "12,742 km");
        assert_eq!(game.state().panel.moons, "1");
        let selection = ctx.events.iter().find(|e| e.kind == EVENT_SELECTION).unwrap();
        assert_eq!((selection.a, selection.b), (3.0, 1.0));

        let json: serde_json::Value = serde_json::from_str(&game.ui_json().unwrap()).unwrap();
        assert_eq!(json["focused"], "Earth");
        assert_eq!(json["panel"]["visible"], true);
        assert_eq!(json["panel"]["moons"], "1");
        assert_eq!(json["labels"][0], "Sun");
    }

    #[test]
    fn click_over_overlay_is_ignored() {
        let (mut game, mut ctx) = started();
        let click = earth_click(&game, &ctx, true);
        step(&mut game, &mut ctx, &[click], 0.0);
        assert_eq!(game.state().focus, None);
        assert!(!game.state().panel.visible);
    }

    #[test]
    fn focus_then_close() {
        let (mut game, mut ctx) = started();
        let click = earth_click(&game, &ctx, false);
        step(&mut game, &mut ctx, &[click], 0.0);

        step(&mut game, &mut ctx, &[custom(CUSTOM_FOCUS)], 0.0);
        // Snapped onto Earth, then one smoothing step toward the same spot.
        assert!((game.state().camera.target - Vec3::new(120.0, 0.0, 0.0)).length() < 1e-3);

        step(&mut game, &mut ctx, &[custom(CUSTOM_CLOSE_PANEL)], 0.0);
        assert_eq!(game.state().focus, None);
        assert!(!game.state().panel.visible);
    }

    #[test]
    fn reset_view_restores_home_and_keeps_panel() {
        let (mut game, mut ctx) = started();
        let click = earth_click(&game, &ctx, false);
        step(&mut game, &mut ctx, &[click, InputEvent::Wheel { delta_y: 100.0 }], 0.016);

        step(&mut game, &mut ctx, &[custom(CUSTOM_RESET_VIEW)], 0.0);
        assert_eq!(game.state().focus, None);
        assert_eq!(game.state().camera.position, Vec3::new(0.0, 150.0, 400.0));
        assert_eq!(game.state().camera.target, Vec3::ZERO);
        assert!(game.state().panel.visible);
    }

    #[test]
    fn toggle_pause_emits_state_and_freezes_bodies() {
        let (mut game, mut ctx) = started();
        step(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_PAUSE)], 0.0);
        let pause = ctx.events.iter().find(|e| e.kind == EVENT_PAUSE_STATE).unwrap();
        assert_eq!(pause.a, 1.0);

        let before = game.solar.world_position(&ctx.scene, BodyIndex(2)).unwrap();
        for _ in 0..10 {
            step(&mut game, &mut ctx, &[], 0.1);
        }
        assert_eq!(game.solar.world_position(&ctx.scene, BodyIndex(2)).unwrap(), before);

        step(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_PAUSE)], 0.1);
        assert_ne!(game.solar.world_position(&ctx.scene, BodyIndex(2)).unwrap(), before);
    }

    #[test]
    fn drag_and_wheel_move_the_camera() {
        let (mut game, mut ctx) = started();
        let start = game.state().camera;
        step(
            &mut game,
            &mut ctx,
            &[
                InputEvent::PointerDown { x: 100.0, y: 100.0, button: PointerButton::Primary },
                InputEvent::PointerMove { x: 160.0, y: 100.0 },
                InputEvent::PointerUp { x: 160.0, y: 100.0, button: PointerButton::Primary },
                InputEvent::PointerMove { x: 300.0, y: 300.0 },
            ],
            0.0,
        );
        let orbited = game.state().camera;
        assert_ne!(orbited.position, start.position);
        assert!((orbited.distance() - start.distance()).abs() < 1e-2);

        step(&mut game, &mut ctx, &[InputEvent::Wheel { delta_y: -1.0 }], 0.0);
        assert!((game.state().camera.distance() - start.distance() * 0.9).abs() < 1e-2);
    }

    #[test]
    fn every_label_reported_each_frame() {
        let (mut game, mut ctx) = started();
        step(&mut game, &mut ctx, &[], 0.016);
        let label_events = ctx
            .events
            .iter()
            .filter(|e| e.kind == EVENT_LABEL_SHOWN || e.kind == EVENT_LABEL_HIDDEN)
            .count();
        assert_eq!(label_events, game.solar.objects.len());
        assert!(ctx.events.len() <= game.config().max_events);
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn rings_and_glow_are_drawn() {
        let (mut game, mut ctx) = started();
        step(&mut game, &mut ctx, &[], 0.016);
        assert!(ctx.vectors.vertex_count() > 0);
    }

    #[test]
    fn configure_applies_valid_and_ignores_invalid() {
        let (mut game, _) = started();
        game.configure(r#"{"motion": {"orbit_rate": 20}}"#);
        assert_eq!(game.config.motion.orbit_rate, 20.0);

        game.configure("not json");
        assert_eq!(game.config.motion.orbit_rate, 20.0);
    }

    #[test]
    fn out_of_range_override_keeps_previous_config() {
        let (mut game, mut ctx) = started();
        let before = game.config.clone();

        game.configure(r#"{"controls": {"min_distance": 2000, "max_distance": 30}}"#);
        assert_eq!(game.config, before);
        game.configure(r#"{"controls": {"polar_margin": 2.0}}"#);
        assert_eq!(game.config, before);

        // Zoom and orbit still run against the previous limits.
        step(
            &mut game,
            &mut ctx,
            &[
                InputEvent::Wheel { delta_y: 1.0 },
                InputEvent::PointerDown { x: 100.0, y: 100.0, button: PointerButton::Primary },
                InputEvent::PointerMove { x: 100.0, y: 400.0 },
            ],
            0.0,
        );
        let distance = game.state().camera.distance();
        assert!((30.0..=1500.0).contains(&distance));
    }
}
