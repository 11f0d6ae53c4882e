pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, SDFShape, SDFColor};
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use core::rng::Rng;
pub use renderer::camera::{PerspectiveCamera, Viewport};
pub use renderer::ray::{Ray, RayHit};
pub use renderer::sdf_instance::{SDFInstance, SDFBuffer};
pub use input::queue::{InputEvent, InputQueue, PointerButton};
pub use bridge::protocol::ProtocolLayout;
pub use systems::lighting::{PointLight, LightState};
pub use systems::points::{PointCloud, PointInstance, PointBuffer};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};

// Extensions: decoupled optional systems
pub use extensions::{TransformGraph, LocalTransform};
