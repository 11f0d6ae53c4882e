// extensions/mod.rs
//
// Optional extension modules.
// Decoupled from core Entity/Scene; games opt in by creating these systems.

pub mod transform;

pub use transform::{TransformGraph, LocalTransform};
