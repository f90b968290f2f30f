//! Resource pack loading and parsing.
//!
//! This module loads model definitions from resource packs (ZIP files or
//! directories). Only `assets/<namespace>/models/**.json` is read; textures are
//! referenced by name and never decoded.

pub mod loader;
pub mod model;

pub use model::{BlockModel, ModelElement, ModelFace};

use std::collections::HashMap;

/// A loaded resource pack.
#[derive(Debug, Default, Clone)]
pub struct ResourcePack {
    /// Model definitions by namespace and model path.
    /// Key: namespace, Value: map of model_path to model.
    pub models: HashMap<String, HashMap<String, BlockModel>>,
}

impl ResourcePack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a model by full resource location (e.g., "computercraft:item/turtle_normal").
    pub fn get_model(&self, resource_location: &str) -> Option<&BlockModel> {
        let (namespace, path) = parse_resource_location(resource_location);
        self.models.get(namespace).and_then(|ns| ns.get(path))
    }

    /// Add a model.
    pub fn add_model(&mut self, namespace: &str, model_path: &str, model: BlockModel) {
        self.models
            .entry(namespace.to_string())
            .or_default()
            .insert(model_path.to_string(), model);
    }

    /// Get the total number of models.
    pub fn model_count(&self) -> usize {
        self.models.values().map(|m| m.len()).sum()
    }

    /// Iterate over every model as `(full resource location, model)`.
    pub fn iter_models(&self) -> impl Iterator<Item = (String, &BlockModel)> + '_ {
        self.models.iter().flat_map(|(namespace, models)| {
            models
                .iter()
                .map(move |(path, model)| (format!("{}:{}", namespace, path), model))
        })
    }

    /// Get all namespaces in the resource pack.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<_> = self.models.keys().map(|s| s.as_str()).collect();
        namespaces.sort();
        namespaces
    }
}

/// Parse a resource location into namespace and path.
/// "computercraft:item/turtle_normal" -> ("computercraft", "item/turtle_normal")
/// "block/stone" -> ("minecraft", "block/stone")
pub fn parse_resource_location(resource_location: &str) -> (&str, &str) {
    if let Some((namespace, path)) = resource_location.split_once(':') {
        (namespace, path)
    } else {
        ("minecraft", resource_location)
    }
}

/// Normalize a location so it always carries a namespace.
pub fn normalize_location(location: &str) -> String {
    if location.contains(':') {
        location.to_string()
    } else {
        format!("minecraft:{}", location)
    }
}
