use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::renderer::ray::{Ray, RayHit};

/// Simple entity storage using a flat Vec.
/// Lookups are linear scans over a few dozen entities.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// World-space position of an entity.
    pub fn world_position(&self, id: EntityId) -> Option<glam::Vec3> {
        self.get(id).map(|e| e.pos)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Intersect a ray against the meshes of the given entities.
    ///
    /// Only the listed candidates are tested; inactive or mesh-less entities
    /// never hit. Hits come back sorted nearest first.
    pub fn raycast(&self, ray: &Ray, candidates: &[EntityId]) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = candidates
            .iter()
            .filter_map(|&id| {
                let entity = self.get(id)?;
                if !entity.active {
                    return None;
                }
                let radius = entity.bounding_radius()?;
                let distance = ray.intersect_sphere(entity.pos, radius)?;
                Some(RayHit {
                    id,
                    distance,
                    point: ray.at(distance),
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
