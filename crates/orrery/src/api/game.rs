use glam::Vec3;

use crate::api::types::{EntityId, GameEvent};
use crate::core::scene::Scene;
use crate::extensions::transform::TransformGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{PerspectiveCamera, Viewport};
use crate::systems::lighting::LightState;
use crate::systems::points::PointCloud;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Initial viewport size in CSS pixels (replaced on the first resize).
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera position.
    pub camera_position: Vec3,
    /// Maximum number of SDF sphere instances (default: 64).
    pub max_sdf_instances: usize,
    /// Maximum number of vector vertices (default: 65536).
    pub max_vector_vertices: usize,
    /// Maximum number of projected points (default: 16384).
    pub max_points: usize,
    /// Maximum number of game events per frame (default: 64).
    pub max_events: usize,
    /// Frame deltas above this many seconds are clamped (tab switches, breakpoints).
    pub max_frame_dt: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 3000.0,
            camera_position: Vec3::new(0.0, 0.0, 100.0),
            max_sdf_instances: 64,
            max_vector_vertices: 65536,
            max_points: 16384,
            max_events: 64,
            max_frame_dt: 0.25,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The frame tick. `input` holds every event queued since the last frame,
    /// in arrival order; `dt` is the clamped frame delta in seconds.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);

    /// Apply a JSON override of game-specific settings. Called after init.
    fn configure(&mut self, _json: &str) {}

    /// Overlay UI state for the host page, serialized as JSON.
    fn ui_json(&self) -> Option<String> {
        None
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub camera: PerspectiveCamera,
    pub viewport: Viewport,
    pub lights: LightState,
    pub point_clouds: Vec<PointCloud>,
    #[cfg(feature = "vectors")]
    pub vectors: VectorState,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        let camera = PerspectiveCamera::new(config.fov_y_degrees, viewport.aspect(), config.near, config.far)
            .with_position(config.camera_position);
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            camera,
            viewport,
            lights: LightState::new(),
            point_clouds: Vec::new(),
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            events: Vec::with_capacity(config.max_events),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Resize the drawable area and keep the camera aspect in step.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.camera.set_aspect(self.viewport);
    }

    /// Recompute world transforms for everything in the transform graph.
    pub fn propagate_transforms(&mut self) {
        self.graph.propagate(&mut self.scene);
    }

    /// Clear per-frame transient data (events, vector geometry).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        #[cfg(feature = "vectors")]
        self.vectors.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::extensions::transform::LocalTransform;

    #[test]
    fn context_builds_camera_from_config() {
        let config = GameConfig {
            viewport_width: 1200.0,
            viewport_height: 600.0,
            camera_position: Vec3::new(0.0, 150.0, 400.0),
            ..GameConfig::default()
        };
        let ctx = EngineContext::new(&config);

        assert_eq!(ctx.camera.position, Vec3::new(0.0, 150.0, 400.0));
        assert!((ctx.camera.aspect - 2.0).abs() < 1e-6);
        assert!((ctx.camera.fov_y - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(ctx.camera.far, 3000.0);
    }

    #[test]
    fn resize_updates_viewport_and_aspect() {
        let mut ctx = EngineContext::default();
        ctx.resize(1000.0, 500.0);
        assert_eq!(ctx.viewport, Viewport::new(1000.0, 500.0));
        assert!((ctx.camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn ids_are_unique() {
        let mut ctx = EngineContext::default();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn clear_frame_data_drops_events() {
        let mut ctx = EngineContext::default();
        ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(ctx.events.len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn propagate_moves_children() {
        let mut ctx = EngineContext::default();
        let pivot = ctx.next_id();
        let child = ctx.next_id();
        ctx.scene.spawn(Entity::new(pivot));
        ctx.scene.spawn(Entity::new(child));
        ctx.graph.register(pivot);
        ctx.graph.register_with(child, LocalTransform::new().with_offset(Vec3::X * 80.0));
        ctx.graph.set_parent(child, Some(pivot));

        ctx.propagate_transforms();
        assert_eq!(ctx.scene.world_position(child), Some(Vec3::new(80.0, 0.0, 0.0)));
    }
}
