// extensions/transform.rs
//
// Transform hierarchy extension: parent-child relationships by EntityId.
// Completely decoupled from Entity/Scene internals.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(pivot_id, LocalTransform::new());
//   graph.register_with(planet_id, LocalTransform::new().with_offset(Vec3::X * 120.0));
//   graph.set_parent(planet_id, Some(pivot_id));
//   graph.propagate(&mut scene);  // Updates world transforms from local ones

use std::collections::HashMap;
use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Local transform data for entities in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent (or world if no parent).
    pub offset: Vec3,
    /// Rotation relative to parent.
    pub rotation: Quat,
    /// Scale multiplier relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: LocalTransform,
}

/// Parent-child graph of local transforms.
///
/// Exists separately from Scene. A pivot is simply a mesh-less node whose
/// rotation carries its children around it.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Entities with no parent (top-level).
    roots: Vec<EntityId>,
    /// Set when hierarchy or locals change, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity as a root with default local transform.
    pub fn register(&mut self, id: EntityId) {
        self.register_with(id, LocalTransform::default());
    }

    /// Register an entity as a root with a specific local transform.
    pub fn register_with(&mut self, id: EntityId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
            if !self.roots.contains(&p) && self.get_parent(p).is_none() {
                self.roots.push(p);
            }
        }

        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    /// Replace only the local rotation.
    pub fn set_rotation(&mut self, id: EntityId, rotation: Quat) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local.rotation = rotation;
            self.dirty = true;
        }
    }

    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Propagate transforms from roots down through the hierarchy.
    /// Writes world pos/rotation/scale into the matching scene entities.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }
        for &root in &self.roots {
            self.propagate_recursive(root, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, scene);
        }
        self.dirty = false;
    }

    fn propagate_recursive(
        &self,
        id: EntityId,
        parent_pos: Vec3,
        parent_rot: Quat,
        parent_scale: Vec3,
        scene: &mut Scene,
    ) {
        let Some(node) = self.nodes.get(&id) else { return };
        let local = &node.local;

        let world_pos = parent_pos + parent_rot * (local.offset * parent_scale);
        let world_rot = parent_rot * local.rotation;
        let world_scale = parent_scale * local.scale;

        if let Some(entity) = scene.get_mut(id) {
            entity.pos = world_pos;
            entity.rotation = world_rot;
            entity.scale = world_scale;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world_pos, world_rot, world_scale, scene);
        }
    }
}
