pub mod camera;
pub mod ray;
pub mod sdf_instance;

pub use camera::{PerspectiveCamera, Viewport};
pub use ray::{Ray, RayHit};
pub use sdf_instance::{SDFBuffer, SDFInstance};
