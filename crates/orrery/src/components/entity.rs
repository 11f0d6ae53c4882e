use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;

/// A scene node: identity, world transform and an optional sphere mesh.
///
/// `pos`, `rotation` and `scale` are world-space values. Entities that take
/// part in a [`TransformGraph`](crate::extensions::TransformGraph) have them
/// overwritten on every propagate.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Orientation in world space.
    pub rotation: Quat,
    /// Per-axis scale in world space.
    pub scale: Vec3,
    /// SDF mesh. Entities without one are invisible pivots.
    pub mesh: Option<MeshComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Radius of the mesh's bounding sphere in world units, if it has one.
    pub fn bounding_radius(&self) -> Option<f32> {
        self.mesh
            .as_ref()
            .map(|m| m.shape.radius() * self.scale.max_element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{SDFColor, SDFShape};

    #[test]
    fn builder_sets_fields() {
        let e = Entity::new(EntityId(7))
            .with_tag("earth")
            .with_pos(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(e.tag, "earth");
        assert_eq!(e.pos, Vec3::new(1.0, 2.0, 3.0));
        assert!(e.active);
        assert!(e.mesh.is_none());
    }

    #[test]
    fn bounding_radius_follows_scale() {
        let mut e = Entity::new(EntityId(1))
            .with_mesh(MeshComponent::new(SDFShape::Sphere { radius: 4.0 }, SDFColor::default()));
        e.scale = Vec3::new(1.0, 2.0, 1.0);
        assert_eq!(e.bounding_radius(), Some(8.0));
        assert_eq!(Entity::new(EntityId(2)).bounding_radius(), None);
    }
}
