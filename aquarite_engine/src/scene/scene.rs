/// Scene - the entity tree.
///
/// Entities live in a SlotMap arena; parent/child links are keys. A parent
/// exclusively owns its children: destroying an entity destroys its whole
/// subtree. The scene root is an entity like any other but can never be
/// reparented or destroyed.

use slotmap::SlotMap;
use crate::error::Result;
use crate::engine_bail;
use crate::renderer::Renderer;
use super::entity::{Entity, EntityKey, RenderMode, Transform};

/// Work item for the transform walk
enum Propagation {
    /// Derive the global from the parent's, then queue the children
    Visit(EntityKey, Option<Transform>),
    /// Subtree done; run the behavior hook
    Finish(EntityKey),
}

pub struct Scene {
    entities: SlotMap<EntityKey, Entity>,
    root: EntityKey,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene holding only its root.
    ///
    /// The root carries an all-zero transform so that its direct children
    /// end up with `global == local`.
    pub fn new() -> Self {
        let mut entities = SlotMap::with_key();
        let mut root = Entity::new("Root");
        root.set_scale(glam::Vec3::ZERO);
        let root = entities.insert(root);
        Self { entities, root }
    }

    pub fn root(&self) -> EntityKey {
        self.root
    }

    /// Insert an entity under the root.
    pub fn spawn(&mut self, entity: Entity) -> EntityKey {
        let key = self.entities.insert(entity);
        self.link(self.root, key);
        key
    }

    /// Insert an entity under `parent`.
    pub fn spawn_child(&mut self, parent: EntityKey, entity: Entity) -> Result<EntityKey> {
        if !self.entities.contains_key(parent) {
            engine_bail!(InvalidHierarchy, "aquarite::Scene",
                "spawn_child: unknown parent {:?}", parent);
        }
        let key = self.entities.insert(entity);
        self.link(parent, key);
        Ok(key)
    }

    /// Reparent `child` under `parent`, appending it to the parent's children.
    ///
    /// # Errors
    ///
    /// Returns an error if either key is unknown, if `child` is the root, or
    /// if `parent` lies in `child`'s subtree (including `parent == child`).
    pub fn add_child(&mut self, parent: EntityKey, child: EntityKey) -> Result<()> {
        if !self.entities.contains_key(parent) || !self.entities.contains_key(child) {
            engine_bail!(InvalidHierarchy, "aquarite::Scene",
                "add_child: unknown entity (parent {:?}, child {:?})", parent, child);
        }
        if child == self.root {
            engine_bail!(InvalidHierarchy, "aquarite::Scene",
                "add_child: the scene root cannot be reparented");
        }
        if self.is_ancestor_or_self(child, parent) {
            engine_bail!(InvalidHierarchy, "aquarite::Scene",
                "add_child: {:?} is in the subtree of {:?}; would create a cycle", parent, child);
        }

        self.unlink(child);
        self.link(parent, child);
        Ok(())
    }

    /// Destroy `child` and its whole subtree.
    ///
    /// Returns the destroyed keys in pre-order (the child first).
    ///
    /// # Errors
    ///
    /// Returns an error if `child` is not a direct child of `parent`.
    pub fn remove_child(&mut self, parent: EntityKey, child: EntityKey) -> Result<Vec<EntityKey>> {
        let is_child = self.entities.get(child).and_then(|e| e.parent) == Some(parent);
        if !is_child {
            engine_bail!(InvalidHierarchy, "aquarite::Scene",
                "remove_child: {:?} is not a child of {:?}", child, parent);
        }
        self.destroy(child)
    }

    /// Destroy any non-root entity and its whole subtree.
    ///
    /// Returns the destroyed keys in pre-order.
    pub fn destroy(&mut self, key: EntityKey) -> Result<Vec<EntityKey>> {
        if key == self.root {
            engine_bail!(InvalidHierarchy, "aquarite::Scene",
                "destroy: the scene root cannot be destroyed");
        }
        if !self.entities.contains_key(key) {
            engine_bail!(InvalidHierarchy, "aquarite::Scene",
                "destroy: unknown entity {:?}", key);
        }

        self.unlink(key);

        let subtree = self.subtree(key);
        for &k in &subtree {
            self.entities.remove(k);
        }
        Ok(subtree)
    }

    /// Keys of `key` and all its descendants, pre-order.
    pub fn subtree(&self, key: EntityKey) -> Vec<EntityKey> {
        let mut keys = Vec::new();
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            let Some(entity) = self.entities.get(k) else { continue };
            keys.push(k);
            stack.extend(entity.children.iter().rev().copied());
        }
        keys
    }

    fn is_ancestor_or_self(&self, ancestor: EntityKey, mut key: EntityKey) -> bool {
        loop {
            if key == ancestor {
                return true;
            }
            match self.entities.get(key).and_then(|e| e.parent) {
                Some(parent) => key = parent,
                None => return false,
            }
        }
    }

    fn link(&mut self, parent: EntityKey, child: EntityKey) {
        if let Some(entity) = self.entities.get_mut(child) {
            entity.parent = Some(parent);
        }
        if let Some(entity) = self.entities.get_mut(parent) {
            entity.children.push(child);
        }
    }

    fn unlink(&mut self, child: EntityKey) {
        let Some(parent) = self.entities.get_mut(child).and_then(|e| e.parent.take()) else {
            return;
        };
        if let Some(entity) = self.entities.get_mut(parent) {
            entity.children.retain(|&k| k != child);
        }
    }

    // ===== PER-FRAME PASSES =====

    /// Recompute every global transform, top-down from the root.
    ///
    /// Each node's global is derived before its children are visited; its
    /// behavior hook runs after the whole subtree has been updated. The walk
    /// uses an explicit stack, so hierarchy depth is bounded by memory only.
    pub fn propagate_transforms(&mut self, delta_time: f32) {
        let mut stack = vec![Propagation::Visit(self.root, None)];

        while let Some(step) = stack.pop() {
            match step {
                Propagation::Visit(key, parent_global) => {
                    let Some(entity) = self.entities.get_mut(key) else { continue };

                    let global = match parent_global {
                        Some(parent) => Transform::compose(&parent, entity.local()),
                        None => *entity.local(),
                    };
                    entity.set_global(global);

                    stack.push(Propagation::Finish(key));
                    stack.extend(
                        entity.children.iter().rev().map(|&child| Propagation::Visit(child, Some(global))),
                    );
                }
                Propagation::Finish(key) => {
                    let Some(entity) = self.entities.get_mut(key) else { continue };
                    if let Some(mut behavior) = entity.behavior.take() {
                        behavior.update(entity, delta_time);
                        entity.behavior = Some(behavior);
                    }
                }
            }
        }
    }

    /// Register every reachable entity that has a model with the renderer,
    /// in pre-order.
    pub fn collect(&self, renderer: &mut Renderer) -> Result<()> {
        for key in self.subtree(self.root) {
            let Some(entity) = self.entities.get(key) else { continue };
            if entity.model().is_none() {
                continue;
            }
            match entity.render_mode() {
                RenderMode::WorldSpace => renderer.register_entity(key)?,
                RenderMode::ScreenSpace => renderer.register_sprite(key)?,
            }
        }
        Ok(())
    }

    // ===== ACCESS =====

    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    pub fn contains(&self, key: EntityKey) -> bool {
        self.entities.contains_key(key)
    }

    /// Number of entities, root included
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over all entities (key, entity), in arena order
    pub fn entities(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// First entity with the given name, in arena order
    pub fn find_by_name(&self, name: &str) -> Option<EntityKey> {
        self.entities.iter().find(|(_, e)| e.name() == name).map(|(k, _)| k)
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
