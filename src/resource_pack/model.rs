//! Model JSON parsing.
//!
//! Models define geometry as cuboid elements in a 0-16 coordinate space.

use crate::types::{Direction, ElementRotation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parsed model from models/*.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockModel {
    /// Parent model to inherit from.
    #[serde(default)]
    pub parent: Option<String>,

    /// Ambient occlusion flag; `None` inherits from the parent, defaulting to on.
    #[serde(default, rename = "ambientocclusion", skip_serializing_if = "Option::is_none")]
    pub ambient_occlusion: Option<bool>,

    /// GUI lighting mode: "side" (3-D item) or "front" (flat icon).
    #[serde(default)]
    pub gui_light: Option<String>,

    /// Texture variable definitions.
    #[serde(default)]
    pub textures: HashMap<String, String>,

    /// Model elements (cuboids).
    #[serde(default)]
    pub elements: Vec<ModelElement>,

    /// Display transforms, kept verbatim.
    #[serde(default)]
    pub display: Option<serde_json::Value>,
}

impl BlockModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this model has its own elements (not inherited).
    pub fn has_elements(&self) -> bool {
        !self.elements.is_empty()
    }

    pub fn ambient_occlusion(&self) -> bool {
        self.ambient_occlusion.unwrap_or(true)
    }

    /// Flat icons use front lighting; everything else renders as a 3-D volume.
    pub fn is_gui_3d(&self) -> bool {
        self.gui_light.as_deref() != Some("front")
    }

    /// Whether the model is drawn by a built-in renderer rather than its quads.
    pub fn is_builtin_entity(&self) -> bool {
        self.parent.as_deref() == Some("builtin/entity")
    }

    /// Whether the chain ends in `builtin/generated`: a flat item built from `layerN` textures.
    pub fn is_builtin_generated(&self) -> bool {
        self.parent.as_deref() == Some("builtin/generated")
    }

    /// Resolve a texture reference (e.g., "#side") to a texture path.
    /// Returns None if the reference cannot be resolved.
    pub fn resolve_texture<'a>(&'a self, reference: &'a str) -> Option<&'a str> {
        match reference.strip_prefix('#') {
            Some(key) => self.textures.get(key).map(|s| s.as_str()),
            None => Some(reference),
        }
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelElement {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Optional rotation.
    #[serde(default)]
    pub rotation: Option<ElementRotation>,
    /// Whether this element receives shade.
    #[serde(default = "default_shade")]
    pub shade: bool,
    /// Face definitions.
    #[serde(default)]
    pub faces: HashMap<Direction, ModelFace>,
}

fn default_shade() -> bool {
    true
}

impl ModelElement {
    /// Minimum corner in block space (0-1).
    pub fn block_from(&self) -> [f32; 3] {
        [self.from[0] / 16.0, self.from[1] / 16.0, self.from[2] / 16.0]
    }

    /// Maximum corner in block space (0-1).
    pub fn block_to(&self) -> [f32; 3] {
        [self.to[0] / 16.0, self.to[1] / 16.0, self.to[2] / 16.0]
    }
}

/// A face of a model element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFace {
    /// UV coordinates [u1, v1, u2, v2] in 0-16 range.
    #[serde(default)]
    pub uv: Option<[f32; 4]>,
    /// Texture reference (e.g., "#side" or "block/stone").
    pub texture: String,
    /// Face direction for culling.
    #[serde(default)]
    pub cullface: Option<Direction>,
    /// UV rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub rotation: i32,
    /// Tint index into the caller's tint table (-1 = no tint).
    #[serde(default = "default_tint_index")]
    pub tintindex: i32,
}

fn default_tint_index() -> i32 {
    -1
}

impl ModelFace {
    /// Get the UV coordinates, defaulting to full texture if not specified.
    pub fn uv_or_default(&self) -> [f32; 4] {
        self.uv.unwrap_or([0.0, 0.0, 16.0, 16.0])
    }

    /// Get normalized UV coordinates (0-1 range).
    pub fn normalized_uv(&self) -> [f32; 4] {
        let uv = self.uv_or_default();
        [uv[0] / 16.0, uv[1] / 16.0, uv[2] / 16.0, uv[3] / 16.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_turtle_item_model() {
        let json = r#"{
            "parent": "computercraft:block/turtle_base",
            "gui_light": "side",
            "textures": {
                "texture": "computercraft:block/turtle_normal"
            }
        }"#;

        let model: BlockModel = serde_json::from_str(json).unwrap();
        assert_eq!(
            model.parent,
            Some("computercraft:block/turtle_base".to_string())
        );
        assert_eq!(model.ambient_occlusion, None);
        assert!(model.ambient_occlusion());
        assert!(model.is_gui_3d());
        assert!(!model.is_builtin_entity());
        assert!(!model.has_elements());
    }

    #[test]
    fn test_parse_model_with_tinted_elements() {
        let json = r##"{
            "textures": { "texture": "computercraft:block/turtle_colour" },
            "elements": [
                {
                    "from": [2, 2, 2],
                    "to": [14, 14, 13],
                    "faces": {
                        "down":  { "uv": [2.75, 0, 5.75, 3], "texture": "#texture", "tintindex": 0 },
                        "north": { "texture": "#texture", "rotation": 90 }
                    }
                }
            ]
        }"##;

        let model: BlockModel = serde_json::from_str(json).unwrap();
        let element = &model.elements[0];
        assert_eq!(element.block_from(), [0.125, 0.125, 0.125]);
        assert_eq!(element.block_to(), [0.875, 0.875, 0.8125]);

        let down = element.faces.get(&Direction::Down).unwrap();
        assert_eq!(down.tintindex, 0);
        let north = element.faces.get(&Direction::North).unwrap();
        assert_eq!(north.tintindex, -1);
        assert_eq!(north.rotation, 90);
        assert_eq!(north.normalized_uv(), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_front_lit_and_builtin_models() {
        let flat: BlockModel = serde_json::from_str(r#"{ "gui_light": "front" }"#).unwrap();
        assert!(!flat.is_gui_3d());

        let builtin: BlockModel = serde_json::from_str(r#"{ "parent": "builtin/entity" }"#).unwrap();
        assert!(builtin.is_builtin_entity());
    }

    #[test]
    fn test_resolve_texture() {
        let model = BlockModel {
            textures: [
                ("all".to_string(), "block/stone".to_string()),
                ("side".to_string(), "#all".to_string()),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };

        assert_eq!(model.resolve_texture("#all"), Some("block/stone"));
        assert_eq!(model.resolve_texture("#side"), Some("#all")); // Only one level
        assert_eq!(model.resolve_texture("block/dirt"), Some("block/dirt"));
        assert_eq!(model.resolve_texture("#missing"), None);
    }
}
