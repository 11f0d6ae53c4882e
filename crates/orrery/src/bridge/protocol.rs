/// Shared buffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [SDF spheres: max_sdf_instances × 12 floats]
/// [Vectors: max_vector_vertices × 6 floats]
/// [Points: max_points × 4 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame alongside the counts.
/// The host reads them from the header to compute offsets dynamically.
/// Draw order is points, then vectors, then SDF spheres (far to near).

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_VIEWPORT_WIDTH: usize = 2;
pub const HEADER_VIEWPORT_HEIGHT: usize = 3;
pub const HEADER_MAX_SDF_INSTANCES: usize = 4;
pub const HEADER_SDF_INSTANCE_COUNT: usize = 5;
pub const HEADER_MAX_VECTOR_VERTICES: usize = 6;
pub const HEADER_VECTOR_VERTEX_COUNT: usize = 7;
pub const HEADER_MAX_POINTS: usize = 8;
pub const HEADER_POINT_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_AMBIENT_R: usize = 12;
pub const HEADER_AMBIENT_G: usize = 13;
pub const HEADER_AMBIENT_B: usize = 14;
pub const HEADER_ELAPSED: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per SDF instance: x, y, radius, rotation, r, g, b, shininess, emissive, depth, light_x, light_y.
pub const SDF_INSTANCE_FLOATS: usize = 12;

/// Floats per vector vertex: x, y, r, g, b, a.
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Floats per point: x, y, size, alpha.
pub const POINT_FLOATS: usize = 4;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_sdf_instances: usize,
    pub max_vector_vertices: usize,
    pub max_points: usize,
    pub max_events: usize,

    /// Offset (in floats) where each section begins.
    pub sdf_data_offset: usize,
    pub vector_data_offset: usize,
    pub point_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_sdf_instances: usize,
        max_vector_vertices: usize,
        max_points: usize,
        max_events: usize,
    ) -> Self {
        let sdf_data_offset = HEADER_FLOATS;
        let vector_data_offset = sdf_data_offset + max_sdf_instances * SDF_INSTANCE_FLOATS;
        let point_data_offset = vector_data_offset + max_vector_vertices * VECTOR_VERTEX_FLOATS;
        let event_data_offset = point_data_offset + max_points * POINT_FLOATS;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_sdf_instances,
            max_vector_vertices,
            max_points,
            max_events,
            sdf_data_offset,
            vector_data_offset,
            point_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_sdf_instances,
            config.max_vector_vertices,
            config.max_points,
            config.max_events,
        )
    }
}
