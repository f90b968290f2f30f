//! Baked model lookup by resource location.

use super::{BakedModel, SimpleBakedModel};
use crate::error::{MesherError, Result};
use crate::resolver::ModelResolver;
use crate::resource_pack::{normalize_location, ResourcePack};
use std::collections::HashMap;
use std::sync::Arc;

/// Owns every baked model of a resource pack, keyed by normalized location.
#[derive(Default)]
pub struct ModelManager {
    models: HashMap<String, Arc<dyn BakedModel>>,
}

impl ModelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and bake every model in the pack.
    ///
    /// Models whose parent chain cannot be resolved are skipped with a warning.
    pub fn from_pack(pack: &ResourcePack) -> Result<Self> {
        let resolver = ModelResolver::new(pack);
        let mut manager = Self::new();

        for (location, _) in pack.iter_models() {
            match resolver.resolve(&location) {
                Ok(resolved) => {
                    let baked = SimpleBakedModel::bake(&resolved, &resolver);
                    manager.insert(&location, Arc::new(baked));
                }
                Err(e) => log::warn!("Skipping model {}: {}", location, e),
            }
        }

        log::info!("Baked {} of {} models", manager.len(), pack.model_count());
        Ok(manager)
    }

    /// Register a model, replacing any previous one at the same location.
    pub fn insert(&mut self, location: &str, model: Arc<dyn BakedModel>) {
        self.models.insert(normalize_location(location), model);
    }

    pub fn get(&self, location: &str) -> Result<Arc<dyn BakedModel>> {
        self.models
            .get(&normalize_location(location))
            .cloned()
            .ok_or_else(|| MesherError::ResourceNotFound(location.to_string()))
    }

    pub fn contains(&self, location: &str) -> bool {
        self.models.contains_key(&normalize_location(location))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl std::fmt::Debug for ModelManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelManager")
            .field("models", &self.models.len())
            .finish()
    }
}
