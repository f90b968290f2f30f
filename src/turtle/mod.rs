//! Turtle rendering.
//!
//! A turtle is drawn from up to four models: the body (picked by family and whether
//! it has been dyed), an optional overlay, and one upgrade on each side. There are
//! two ways to get geometry out:
//!
//! - [`TurtleRenderer::render`] places a turtle in the world: render offset, yaw,
//!   the upside-down easter egg and animated tool angles are all applied.
//! - [`TurtleRenderer::item_model`] builds the static [`CompositeModel`] used for
//!   the turtle's item form, shared between every turtle that looks the same.

mod cache;
mod config;
mod holiday;
mod upgrade;

pub use cache::{TurtleModelCache, TurtleModelKey};
pub use config::RendererConfig;
pub use holiday::Holiday;
pub use upgrade::{CraftingTableUpgrade, ToolUpgrade, TurtleUpgrade};

use crate::error::Result;
use crate::mesher::{Mesh, QuadEmitter, TintTable};
use crate::model::{CompositeModel, ModelManager};
use crate::types::{BlockPosition, Transform, TurtleSide};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const NORMAL_TURTLE_MODEL: &str = "computercraft:item/turtle_normal";
const ADVANCED_TURTLE_MODEL: &str = "computercraft:item/turtle_advanced";
const COLOUR_TURTLE_MODEL: &str = "computercraft:item/turtle_colour";
const ELF_OVERLAY_MODEL: &str = "computercraft:item/turtle_elf_overlay";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurtleFamily {
    #[default]
    Normal,
    Advanced,
}

impl std::str::FromStr for TurtleFamily {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "normal" => Ok(TurtleFamily::Normal),
            "advanced" => Ok(TurtleFamily::Advanced),
            other => Err(format!("unknown turtle family: {}", other)),
        }
    }
}

/// The body model for a turtle. Dyed turtles of either family share one model.
pub fn turtle_model_location(family: TurtleFamily, coloured: bool) -> &'static str {
    match (family, coloured) {
        (_, true) => COLOUR_TURTLE_MODEL,
        (TurtleFamily::Normal, false) => NORMAL_TURTLE_MODEL,
        (TurtleFamily::Advanced, false) => ADVANCED_TURTLE_MODEL,
    }
}

/// The overlay model: an explicit overlay wins, otherwise the elf hat at Christmas.
pub fn overlay_model_location(overlay: Option<&str>, christmas: bool) -> Option<&str> {
    match overlay {
        Some(overlay) => Some(overlay),
        None if christmas => Some(ELF_OVERLAY_MODEL),
        None => None,
    }
}

/// Everything about one turtle that affects how it is drawn.
#[derive(Debug, Clone, Default)]
pub struct TurtleState {
    pub family: TurtleFamily,
    /// Dye colour as `0xRRGGBB`.
    pub colour: Option<u32>,
    /// Overlay model location.
    pub overlay: Option<String>,
    pub label: Option<String>,
    pub left_upgrade: Option<Arc<dyn TurtleUpgrade>>,
    pub right_upgrade: Option<Arc<dyn TurtleUpgrade>>,
    /// Facing in degrees.
    pub yaw: f32,
    /// Offset from the block position while moving.
    pub offset: [f32; 3],
    pub left_tool_angle: f32,
    pub right_tool_angle: f32,
}

impl TurtleState {
    pub fn new(family: TurtleFamily) -> Self {
        Self {
            family,
            ..Self::default()
        }
    }

    pub fn with_colour(mut self, colour: u32) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn with_overlay(mut self, overlay: impl Into<String>) -> Self {
        self.overlay = Some(overlay.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_upgrade(mut self, side: TurtleSide, upgrade: Arc<dyn TurtleUpgrade>) -> Self {
        match side {
            TurtleSide::Left => self.left_upgrade = Some(upgrade),
            TurtleSide::Right => self.right_upgrade = Some(upgrade),
        }
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_offset(mut self, offset: [f32; 3]) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_tool_angle(mut self, side: TurtleSide, angle: f32) -> Self {
        match side {
            TurtleSide::Left => self.left_tool_angle = angle,
            TurtleSide::Right => self.right_tool_angle = angle,
        }
        self
    }

    pub fn upgrade(&self, side: TurtleSide) -> Option<&Arc<dyn TurtleUpgrade>> {
        match side {
            TurtleSide::Left => self.left_upgrade.as_ref(),
            TurtleSide::Right => self.right_upgrade.as_ref(),
        }
    }

    pub fn tool_angle(&self, side: TurtleSide) -> f32 {
        match side {
            TurtleSide::Left => self.left_tool_angle,
            TurtleSide::Right => self.right_tool_angle,
        }
    }
}

/// World placement of a turtle's body: offset, then a spin about the block centre.
///
/// Flipped turtles are also mirrored vertically about the centre.
pub fn base_transform(state: &TurtleState, config: &RendererConfig) -> Transform {
    let mut transform = Transform::from_translation(state.offset)
        .then(&Transform::from_translation([0.5, 0.5, 0.5]))
        .then(&Transform::from_rotation_y_degrees(180.0 - state.yaw));
    if config.is_flipped(state.label.as_deref()) {
        transform = transform.then(&Transform::from_scale([1.0, -1.0, 1.0]));
    }
    transform.then(&Transform::from_translation([-0.5, -0.5, -0.5]))
}

/// Swing of a tool about the turtle's horizontal mid-line.
pub fn upgrade_transform(tool_angle: f32) -> Transform {
    Transform::from_translation([0.0, 0.5, 0.5])
        .then(&Transform::from_rotation_x_degrees(tool_angle))
        .then(&Transform::from_translation([0.0, -0.5, -0.5]))
}

/// Where a turtle's nameplate is drawn, relative to its block.
///
/// Only labelled turtles show one, and only while the camera is looking at the
/// turtle's own block.
pub fn label_anchor(
    state: &TurtleState,
    block_pos: BlockPosition,
    camera_hit: Option<BlockPosition>,
) -> Option<[f32; 3]> {
    let looked_at = state.label.is_some() && camera_hit == Some(block_pos);
    looked_at.then_some([0.5, 1.2, 0.5])
}

/// Upside-down transform for the item model.
fn item_flip_transform() -> Transform {
    Transform::from_translation([0.0, 1.0, 0.0]).then(&Transform::from_scale([1.0, -1.0, 1.0]))
}

/// Builds turtle geometry from a model manager.
#[derive(Debug, Default)]
pub struct TurtleRenderer {
    config: RendererConfig,
    cache: TurtleModelCache,
}

impl TurtleRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            cache: TurtleModelCache::new(),
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn cache(&self) -> &TurtleModelCache {
        &self.cache
    }

    /// Draw a turtle placed in the world.
    ///
    /// The body is tinted with the dye colour. The overlay and upgrades are drawn
    /// untinted; each upgrade sits under its tool swing and its own placement.
    pub fn render(&self, state: &TurtleState, models: &ModelManager) -> Result<Mesh> {
        let world = base_transform(state, &self.config);
        let mut emitter = QuadEmitter::new();

        let body = models.get(turtle_model_location(state.family, state.colour.is_some()))?;
        emitter.emit_model(body.as_ref(), None, &world, &TintTable::from_colour(state.colour));

        let christmas = self.config.is_christmas();
        if let Some(location) = overlay_model_location(state.overlay.as_deref(), christmas) {
            let overlay = models.get(location)?;
            emitter.emit_model(overlay.as_ref(), None, &world, &TintTable::none());
        }

        for side in TurtleSide::ALL {
            let Some(upgrade) = state.upgrade(side) else {
                continue;
            };
            let attachment = upgrade.model(models, side)?;
            let transform = world
                .then(&upgrade_transform(state.tool_angle(side)))
                .then(attachment.matrix());
            emitter.emit_model(attachment.model().as_ref(), None, &transform, &TintTable::none());
        }

        log::debug!("Rendered turtle with {} quads", emitter.quads_emitted());
        Ok(emitter.finish())
    }

    /// The visual key of a turtle's item model.
    pub fn model_key(&self, state: &TurtleState) -> TurtleModelKey {
        TurtleModelKey {
            family: state.family,
            coloured: state.colour.is_some(),
            overlay: state.overlay.clone(),
            christmas: self.config.is_christmas(),
            left_upgrade: state.left_upgrade.as_ref().map(|u| u.id().to_string()),
            right_upgrade: state.right_upgrade.as_ref().map(|u| u.id().to_string()),
            flipped: self.config.is_flipped(state.label.as_deref()),
        }
    }

    /// The shared composite model for a turtle's item form.
    pub fn item_model(&self, state: &TurtleState, models: &ModelManager) -> Result<Arc<CompositeModel>> {
        self.cache.get_or_build(self.model_key(state), |key| {
            let base = models.get(turtle_model_location(key.family, key.coloured))?;
            let overlay = overlay_model_location(key.overlay.as_deref(), key.christmas)
                .map(|location| models.get(location))
                .transpose()?;
            let general = if key.flipped {
                item_flip_transform()
            } else {
                Transform::IDENTITY
            };
            let left = state
                .upgrade(TurtleSide::Left)
                .map(|u| u.model(models, TurtleSide::Left))
                .transpose()?;
            let right = state
                .upgrade(TurtleSide::Right)
                .map(|u| u.model(models, TurtleSide::Right))
                .transpose()?;
            Ok(CompositeModel::new(base, overlay, general, left, right))
        })
    }

    /// Draw a turtle's item model, tinted with its dye colour.
    pub fn render_item(&self, state: &TurtleState, models: &ModelManager) -> Result<Mesh> {
        let model = self.item_model(state, models)?;
        let mut emitter = QuadEmitter::new();
        emitter.emit_model(
            model.as_ref(),
            None,
            &Transform::IDENTITY,
            &TintTable::from_colour(state.colour),
        );
        Ok(emitter.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MesherError;
    use crate::model::quad::test_support::up_quad;
    use crate::model::{BakedModel, ModelData, SimpleBakedModel};
    use crate::types::Direction;

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    fn models() -> ModelManager {
        let mut models = ModelManager::new();
        let mut add = |location: &str, quads| {
            let model = SimpleBakedModel::from_quads(quads).with_particle(location);
            models.insert(location, Arc::new(model));
        };
        add(NORMAL_TURTLE_MODEL, vec![up_quad(1.0, 0)]);
        add(ADVANCED_TURTLE_MODEL, vec![up_quad(1.0, 0)]);
        add(COLOUR_TURTLE_MODEL, vec![up_quad(1.0, 0), up_quad(0.5, -1)]);
        add(ELF_OVERLAY_MODEL, vec![up_quad(1.25, -1)]);
        add("computercraft:item/turtle_crafting_table_left", vec![up_quad(0.0, -1)]);
        add("computercraft:item/turtle_crafting_table_right", vec![up_quad(0.0, -1)]);
        add("minecraft:item/diamond_pickaxe", vec![up_quad(0.0, 0)]);
        models
    }

    fn config(holiday: Holiday) -> RendererConfig {
        RendererConfig::default().with_holiday(holiday)
    }

    #[test]
    fn test_model_selection() {
        assert_eq!(turtle_model_location(TurtleFamily::Normal, false), NORMAL_TURTLE_MODEL);
        assert_eq!(turtle_model_location(TurtleFamily::Advanced, false), ADVANCED_TURTLE_MODEL);
        assert_eq!(turtle_model_location(TurtleFamily::Advanced, true), COLOUR_TURTLE_MODEL);
        assert_eq!(turtle_model_location(TurtleFamily::Normal, true), COLOUR_TURTLE_MODEL);

        assert_eq!(overlay_model_location(None, false), None);
        assert_eq!(overlay_model_location(None, true), Some(ELF_OVERLAY_MODEL));
        assert_eq!(
            overlay_model_location(Some("computercraft:item/turtle_rainbow_overlay"), true),
            Some("computercraft:item/turtle_rainbow_overlay")
        );
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!("advanced".parse::<TurtleFamily>(), Ok(TurtleFamily::Advanced));
        assert!("golden".parse::<TurtleFamily>().is_err());
    }

    #[test]
    fn test_base_transform_spins_about_centre() {
        let cfg = config(Holiday::None);
        // Yaw 180 leaves the model unrotated.
        let unrotated = base_transform(&TurtleState::default().with_yaw(180.0), &cfg);
        assert_close(unrotated.transform_point([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);

        // Yaw 0 turns it half way round the block centre.
        let turned = base_transform(&TurtleState::default(), &cfg);
        assert_close(turned.transform_point([0.0, 0.0, 0.0]), [1.0, 0.0, 1.0]);
        assert_close(turned.transform_point([0.5, 0.5, 0.5]), [0.5, 0.5, 0.5]);

        let moving = base_transform(&TurtleState::default().with_yaw(180.0).with_offset([0.0, 0.0, 0.25]), &cfg);
        assert_close(moving.transform_point([0.0, 0.0, 0.0]), [0.0, 0.0, 0.25]);
    }

    #[test]
    fn test_flipped_labels_mirror_vertically() {
        let cfg = config(Holiday::None);
        let state = TurtleState::default().with_yaw(180.0).with_label("Dinnerbone");
        let transform = base_transform(&state, &cfg);
        assert!(transform.is_mirroring());
        assert_close(transform.transform_point([0.0, 0.0, 0.0]), [0.0, 1.0, 0.0]);

        let plain = base_transform(&TurtleState::default().with_label("Steve"), &cfg);
        assert!(!plain.is_mirroring());
    }

    #[test]
    fn test_upgrade_transform_pivots_on_mid_line() {
        assert!(upgrade_transform(0.0).is_identity());
        let swung = upgrade_transform(90.0);
        assert_close(swung.transform_point([0.3, 0.5, 0.5]), [0.3, 0.5, 0.5]);
        assert_close(swung.transform_point([0.0, 0.5, 1.0]), [0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_render_tints_body_only() {
        let renderer = TurtleRenderer::new(config(Holiday::Christmas));
        let state = TurtleState::new(TurtleFamily::Normal)
            .with_yaw(180.0)
            .with_colour(0xFF0000)
            .with_upgrade(TurtleSide::Left, Arc::new(ToolUpgrade::new("minecraft:diamond_pickaxe")));

        let mesh = renderer.render(&state, &models()).unwrap();
        // Colour body (2) + elf overlay (1) + tool (1).
        assert_eq!(mesh.triangle_count(), 8);

        let red = [1.0, 0.0, 0.0, 1.0];
        let white = [1.0, 1.0, 1.0, 1.0];
        assert_eq!(mesh.vertices[0].color, red);
        assert_eq!(mesh.vertices[4].color, white);
        assert_eq!(mesh.vertices[8].color, white);
        // The tool has tint index 0 but upgrades are never tinted.
        assert_eq!(mesh.vertices[12].color, white);
        assert_close(mesh.vertices[8].position, [0.0, 1.25, 0.0]);
    }

    #[test]
    fn test_render_places_upgrades_with_tool_matrix() {
        let renderer = TurtleRenderer::new(config(Holiday::None));
        let state = TurtleState::new(TurtleFamily::Advanced)
            .with_yaw(180.0)
            .with_upgrade(TurtleSide::Right, Arc::new(ToolUpgrade::new("minecraft:diamond_pickaxe")));

        let mesh = renderer.render(&state, &models()).unwrap();
        assert_eq!(mesh.triangle_count(), 4);
        // First tool vertex is the item origin, moved onto the right face.
        assert_close(mesh.vertices[4].position, [1.40625, 0.0, 1.0]);
    }

    #[test]
    fn test_render_missing_model_is_an_error() {
        let renderer = TurtleRenderer::new(config(Holiday::None));
        let state = TurtleState::default().with_overlay("computercraft:item/turtle_missing_overlay");
        let result = renderer.render(&state, &models());
        assert!(matches!(result, Err(MesherError::ResourceNotFound(_))));
    }

    #[test]
    fn test_item_model_is_shared_per_key() {
        let renderer = TurtleRenderer::new(config(Holiday::None));
        let models = models();
        let pickaxe: Arc<dyn TurtleUpgrade> = Arc::new(ToolUpgrade::new("minecraft:diamond_pickaxe"));

        let a = TurtleState::new(TurtleFamily::Normal).with_upgrade(TurtleSide::Left, pickaxe.clone());
        let b = TurtleState::new(TurtleFamily::Normal)
            .with_upgrade(TurtleSide::Left, pickaxe.clone())
            .with_yaw(90.0);
        let c = TurtleState::new(TurtleFamily::Normal).with_upgrade(TurtleSide::Right, pickaxe);

        let model_a = renderer.item_model(&a, &models).unwrap();
        let model_b = renderer.item_model(&b, &models).unwrap();
        let model_c = renderer.item_model(&c, &models).unwrap();

        assert!(Arc::ptr_eq(&model_a, &model_b));
        assert!(!Arc::ptr_eq(&model_a, &model_c));
        assert_eq!(renderer.cache().len(), 2);

        let quads = model_a.quads(None, None, 0, &ModelData::empty());
        assert_eq!(quads.len(), 2);
        assert_eq!(model_a.particle_texture(), Some(NORMAL_TURTLE_MODEL));
    }

    #[test]
    fn test_render_item_flips_and_tints() {
        let renderer = TurtleRenderer::new(config(Holiday::None));
        let state = TurtleState::new(TurtleFamily::Normal)
            .with_colour(0x00FF00)
            .with_label("Grumm")
            .with_upgrade(TurtleSide::Right, Arc::new(CraftingTableUpgrade::default()));

        let mesh = renderer.render_item(&state, &models()).unwrap();
        // Colour body (2) + crafting table (1).
        assert_eq!(mesh.triangle_count(), 6);
        assert_eq!(mesh.vertices[0].color, [0.0, 1.0, 0.0, 1.0]);
        assert_close(mesh.vertices[0].position, [1.0, 0.0, 0.0]);
        assert!(renderer.model_key(&state).flipped);
    }

    #[test]
    fn test_label_anchor_follows_camera_hit() {
        let pos = BlockPosition::new(4, 70, -12);
        let labelled = TurtleState::new(TurtleFamily::Normal).with_label("miner");

        assert_eq!(label_anchor(&labelled, pos, Some(pos)), Some([0.5, 1.2, 0.5]));
        assert_eq!(label_anchor(&labelled, pos, Some(pos.neighbor(Direction::Up))), None);
        assert_eq!(label_anchor(&labelled, pos, None), None);

        let unlabelled = TurtleState::new(TurtleFamily::Normal);
        assert_eq!(label_anchor(&unlabelled, pos, Some(pos)), None);
    }
}
