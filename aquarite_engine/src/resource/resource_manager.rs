/// Central resource manager for the engine.
///
/// Stores models produced by the loader. Models are addressed by a stable
/// key (held by entities) and optionally by a unique name.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::engine_bail;
use super::model::Model;

new_key_type! {
    /// Stable key for a Model within a ResourceManager.
    ///
    /// Entities hold this key without owning the model. A removed model
    /// leaves dangling keys that simply stop resolving.
    pub struct ModelKey;
}

pub struct ResourceManager {
    models: SlotMap<ModelKey, Model>,
    model_names: FxHashMap<String, ModelKey>,
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceManager {
    /// Create a new empty resource manager
    pub fn new() -> Self {
        Self {
            models: SlotMap::with_key(),
            model_names: FxHashMap::default(),
        }
    }

    /// Add a model.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-empty name is already registered.
    pub fn add_model(&mut self, model: Model) -> Result<ModelKey> {
        if !model.name.is_empty() && self.model_names.contains_key(&model.name) {
            engine_bail!(InvalidResource, "aquarite::ResourceManager",
                "Model '{}' already exists", model.name);
        }

        let name = model.name.clone();
        let key = self.models.insert(model);
        if !name.is_empty() {
            self.model_names.insert(name, key);
        }
        Ok(key)
    }

    pub fn model(&self, key: ModelKey) -> Option<&Model> {
        self.models.get(key)
    }

    /// Mutable access to a model's contents. The name is not reachable
    /// from here; use [`rename_model`](Self::rename_model).
    pub fn model_mut(&mut self, key: ModelKey) -> Option<&mut Model> {
        self.models.get_mut(key)
    }

    /// Change a model's name and keep the name index in step.
    ///
    /// An empty name unregisters the model from name lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is stale or another model already holds
    /// the new name.
    pub fn rename_model(&mut self, key: ModelKey, new_name: &str) -> Result<()> {
        let Some(model) = self.models.get_mut(key) else {
            engine_bail!(InvalidResource, "aquarite::ResourceManager",
                "Cannot rename model {:?}: key is stale", key);
        };
        if model.name == new_name {
            return Ok(());
        }
        if !new_name.is_empty() && self.model_names.contains_key(new_name) {
            engine_bail!(InvalidResource, "aquarite::ResourceManager",
                "Model '{}' already exists", new_name);
        }

        let old_name = std::mem::replace(&mut model.name, new_name.to_string());
        if self.model_names.get(&old_name) == Some(&key) {
            self.model_names.remove(&old_name);
        }
        if !new_name.is_empty() {
            self.model_names.insert(new_name.to_string(), key);
        }
        Ok(())
    }

    pub fn model_key(&self, name: &str) -> Option<ModelKey> {
        self.model_names.get(name).copied()
    }

    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.model_key(name).and_then(|key| self.models.get(key))
    }

    /// Remove a model. Returns it, or None if the key is stale.
    pub fn remove_model(&mut self, key: ModelKey) -> Option<Model> {
        let model = self.models.remove(key)?;
        if self.model_names.get(&model.name) == Some(&key) {
            self.model_names.remove(&model.name);
        }
        Some(model)
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Remove all models
    pub fn clear(&mut self) {
        self.models.clear();
        self.model_names.clear();
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
