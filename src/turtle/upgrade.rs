//! Turtle upgrades: the tools and peripherals drawn on a turtle's sides.

use crate::error::Result;
use crate::model::{ModelManager, TransformedModel};
use crate::types::{Transform, TurtleSide};
use std::fmt::Debug;

/// Something that can be attached to the left or right of a turtle.
pub trait TurtleUpgrade: Debug + Send + Sync {
    /// Stable identifier, e.g. `minecraft:diamond_pickaxe`.
    fn id(&self) -> &str;

    /// The model drawn for this upgrade on `side`, with its placement transform.
    fn model(&self, models: &ModelManager, side: TurtleSide) -> Result<TransformedModel>;
}

/// A crafting table, drawn with dedicated left and right models.
#[derive(Debug, Clone)]
pub struct CraftingTableUpgrade {
    id: String,
    left_model: String,
    right_model: String,
}

impl CraftingTableUpgrade {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            left_model: "computercraft:item/turtle_crafting_table_left".to_string(),
            right_model: "computercraft:item/turtle_crafting_table_right".to_string(),
        }
    }
}

impl Default for CraftingTableUpgrade {
    fn default() -> Self {
        Self::new("minecraft:crafting_table")
    }
}

impl TurtleUpgrade for CraftingTableUpgrade {
    fn id(&self) -> &str {
        &self.id
    }

    fn model(&self, models: &ModelManager, side: TurtleSide) -> Result<TransformedModel> {
        let location = match side {
            TurtleSide::Left => &self.left_model,
            TurtleSide::Right => &self.right_model,
        };
        Ok(TransformedModel::untransformed(models.get(location)?))
    }
}

/// A tool item held flat against the turtle's side.
#[derive(Debug, Clone)]
pub struct ToolUpgrade {
    id: String,
    item_model: String,
}

impl ToolUpgrade {
    /// A tool drawn with the item model of the same name.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let (namespace, path) = crate::resource_pack::parse_resource_location(&id);
        let item_model = format!("{}:item/{}", namespace, path);
        Self { id, item_model }
    }

    pub fn with_item_model(mut self, location: impl Into<String>) -> Self {
        self.item_model = location.into();
        self
    }

    pub fn item_model(&self) -> &str {
        &self.item_model
    }

    /// Lays the item on its side and pushes it out to the turtle's left or right face.
    pub fn tool_transform(side: TurtleSide) -> Transform {
        let x_offset = match side {
            TurtleSide::Left => -0.40625,
            TurtleSide::Right => 0.40625,
        };
        Transform::from_rows([
            [0.0, 0.0, -1.0, 1.0 + x_offset],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, -1.0, 0.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

impl TurtleUpgrade for ToolUpgrade {
    fn id(&self) -> &str {
        &self.id
    }

    fn model(&self, models: &ModelManager, side: TurtleSide) -> Result<TransformedModel> {
        let model = models.get(&self.item_model)?;
        Ok(TransformedModel::new(model, Self::tool_transform(side)))
    }
}
