use orrery::{
    Game, GameConfig, EngineContext,
    InputEvent, InputQueue, SDFBuffer, PointBuffer,
    FrameClock, ProtocolLayout,
};
use orrery::bridge::protocol::*;
use orrery::systems::points::build_point_buffer;
use orrery::systems::sdf_render::build_sdf_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `solar-system`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    sdf_buffer: SDFBuffer,
    point_buffer: PointBuffer,
    header: [f32; HEADER_FLOATS],
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::new(&config),
            input: InputQueue::new(),
            clock: FrameClock::new(config.max_frame_dt),
            sdf_buffer: SDFBuffer::with_capacity(config.max_sdf_instances),
            point_buffer: PointBuffer::with_capacity(config.max_points),
            header: [0.0; HEADER_FLOATS],
            game,
            layout,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.build_buffers();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply a new canvas size immediately, ahead of the next tick.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }
        self.ctx.resize(width, height);
    }

    /// Forward a JSON settings override to the game.
    pub fn configure(&mut self, json: &str) {
        self.game.configure(json);
    }

    /// Run one frame: update the game, drain input, rebuild render buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let dt = self.clock.advance(dt);
        self.game.update(&mut self.ctx, &self.input, dt);

        // Drain input after update
        self.input.drain();

        self.build_buffers();
    }

    fn build_buffers(&mut self) {
        build_sdf_buffer(
            self.ctx.scene.iter(),
            &self.ctx.camera,
            self.ctx.viewport,
            &self.ctx.lights,
            &mut self.sdf_buffer,
        );

        self.point_buffer.clear();
        for cloud in &self.ctx.point_clouds {
            build_point_buffer(cloud, &self.ctx.camera, self.ctx.viewport, &mut self.point_buffer);
        }

        if self.ctx.events.len() > self.layout.max_events {
            log::warn!(
                "dropping {} game events over capacity",
                self.ctx.events.len() - self.layout.max_events
            );
            self.ctx.events.truncate(self.layout.max_events);
        }

        self.write_header();
    }

    fn write_header(&mut self) {
        let ambient = self.ctx.lights.ambient();
        let sdf_count = self.sdf_instance_count();
        let vector_count = self.vector_vertex_count_raw();
        let h = &mut self.header;
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h[HEADER_FRAME_COUNTER] = self.clock.frames() as f32;
        h[HEADER_VIEWPORT_WIDTH] = self.ctx.viewport.width;
        h[HEADER_VIEWPORT_HEIGHT] = self.ctx.viewport.height;
        h[HEADER_MAX_SDF_INSTANCES] = self.layout.max_sdf_instances as f32;
        h[HEADER_SDF_INSTANCE_COUNT] = sdf_count as f32;
        h[HEADER_MAX_VECTOR_VERTICES] = self.layout.max_vector_vertices as f32;
        h[HEADER_VECTOR_VERTEX_COUNT] = vector_count as f32;
        h[HEADER_MAX_POINTS] = self.layout.max_points as f32;
        h[HEADER_POINT_COUNT] = self.point_buffer.point_count() as f32;
        h[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        h[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        h[HEADER_AMBIENT_R] = ambient[0];
        h[HEADER_AMBIENT_G] = ambient[1];
        h[HEADER_AMBIENT_B] = ambient[2];
        h[HEADER_ELAPSED] = self.clock.elapsed() as f32;
    }

    #[cfg(feature = "vectors")]
    fn vector_vertex_count_raw(&self) -> u32 {
        (self.ctx.vectors.vertex_count() as u32).min(self.layout.max_vector_vertices as u32)
    }

    #[cfg(not(feature = "vectors"))]
    fn vector_vertex_count_raw(&self) -> u32 {
        0
    }

    /// The overlay UI state as JSON (`null` when the game has none).
    pub fn ui_json(&self) -> String {
        self.game.ui_json().unwrap_or_else(|| "null".to_string())
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn sdf_instances_ptr(&self) -> *const f32 {
        self.sdf_buffer.instances_ptr()
    }

    pub fn sdf_instance_count(&self) -> u32 {
        self.sdf_buffer.instance_count() as u32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.point_buffer.points_ptr()
    }

    pub fn point_count(&self) -> u32 {
        self.point_buffer.point_count() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.ctx.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vector_vertex_count_raw()
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.viewport.width
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.viewport.height
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_sdf_instances(&self) -> u32 {
        self.layout.max_sdf_instances as u32
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_points(&self) -> u32 {
        self.layout.max_points as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
