//! Model inheritance resolution.

use crate::error::{MesherError, Result};
use crate::resource_pack::{normalize_location, BlockModel, ResourcePack};
use std::cell::RefCell;
use std::collections::HashMap;

/// Maximum depth for model inheritance to prevent infinite loops.
const MAX_INHERITANCE_DEPTH: usize = 10;

/// Maximum depth when following `#texture` variable chains.
const MAX_TEXTURE_DEPTH: usize = 10;

/// Resolves model inheritance chains.
pub struct ModelResolver<'a> {
    pack: &'a ResourcePack,
    cache: RefCell<HashMap<String, BlockModel>>,
}

impl<'a> ModelResolver<'a> {
    pub fn new(pack: &'a ResourcePack) -> Self {
        Self {
            pack,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Resolve a model with all inherited properties.
    pub fn resolve(&self, model_location: &str) -> Result<BlockModel> {
        let normalized = normalize_location(model_location);
        if let Some(cached) = self.cache.borrow().get(&normalized) {
            return Ok(cached.clone());
        }

        let resolved = self.resolve_internal(&normalized, 0)?;

        self.cache
            .borrow_mut()
            .insert(normalized, resolved.clone());

        Ok(resolved)
    }

    fn resolve_internal(&self, model_location: &str, depth: usize) -> Result<BlockModel> {
        if depth >= MAX_INHERITANCE_DEPTH {
            return Err(MesherError::ModelInheritanceTooDeep(
                model_location.to_string(),
            ));
        }

        let normalized = normalize_location(model_location);
        let base_model = self.pack.get_model(&normalized).ok_or_else(|| {
            MesherError::ModelResolution(format!("Model not found: {}", normalized))
        })?;

        let parent_location = match &base_model.parent {
            Some(parent) => parent.clone(),
            None => return Ok(base_model.clone()),
        };

        // builtin/* parents have no JSON; keep the reference so the baked model can
        // report a built-in renderer.
        if parent_location.starts_with("builtin/") {
            return Ok(base_model.clone());
        }

        let parent_model = self.resolve_internal(&parent_location, depth + 1)?;

        Ok(merge_models(&parent_model, base_model))
    }

    /// Fully resolve texture references in a model.
    /// Resolves chains like #side -> #all -> block/stone.
    pub fn resolve_textures(&self, model: &BlockModel) -> HashMap<String, String> {
        model
            .textures
            .iter()
            .map(|(key, value)| {
                (
                    key.clone(),
                    resolve_texture_chain(value, &model.textures, 0),
                )
            })
            .collect()
    }
}

/// Merge a parent model into a child model.
/// Child properties override parent properties.
fn merge_models(parent: &BlockModel, child: &BlockModel) -> BlockModel {
    let mut merged = parent.clone();

    for (key, value) in &child.textures {
        merged.textures.insert(key.clone(), value.clone());
    }

    if !child.elements.is_empty() {
        merged.elements = child.elements.clone();
    }

    if child.ambient_occlusion.is_some() {
        merged.ambient_occlusion = child.ambient_occlusion;
    }

    if child.gui_light.is_some() {
        merged.gui_light = child.gui_light.clone();
    }

    // Display contexts merge per key: a child overriding "gui" keeps the
    // parent's "firstperson_righthand".
    match (&merged.display, &child.display) {
        (Some(parent_display), Some(child_display)) => {
            if let (Some(parent_obj), Some(child_obj)) =
                (parent_display.as_object(), child_display.as_object())
            {
                let mut merged_display = parent_obj.clone();
                for (key, value) in child_obj {
                    merged_display.insert(key.clone(), value.clone());
                }
                merged.display = Some(serde_json::Value::Object(merged_display));
            } else {
                merged.display = child.display.clone();
            }
        }
        (None, Some(_)) => {
            merged.display = child.display.clone();
        }
        _ => {}
    }

    // Only a builtin/* reference survives the merge.
    merged.parent = parent
        .parent
        .clone()
        .filter(|p| p.starts_with("builtin/"));

    merged
}

fn resolve_texture_chain(
    reference: &str,
    textures: &HashMap<String, String>,
    depth: usize,
) -> String {
    if depth >= MAX_TEXTURE_DEPTH {
        return reference.to_string();
    }

    match reference.strip_prefix('#').and_then(|key| textures.get(key)) {
        Some(value) => resolve_texture_chain(value, textures, depth + 1),
        None => reference.to_string(),
    }
}
