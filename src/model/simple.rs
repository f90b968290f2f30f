//! Static baked models: quads precomputed from model JSON.

use super::quad::{Quad, QuadVertex};
use super::{BakedModel, ModelData};
use crate::resolver::ModelResolver;
use crate::resource_pack::{BlockModel, ModelElement, ModelFace};
use crate::types::{face_slot, Direction, FaceFilter, InputBlock, Transform, FACE_FILTER_COUNT};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// Texture used when a face references an undefined texture variable.
const MISSING_TEXTURE: &str = "minecraft:block/missing";

/// Flat items use at most `layer0..layer3`.
const GENERATED_LAYER_COUNT: usize = 4;

/// A model whose quads are fixed at construction.
#[derive(Debug, Clone)]
pub struct SimpleBakedModel {
    /// All quads in bake order.
    quads: Vec<Quad>,
    /// Quads grouped by face, same relative order as `quads`.
    faces: [Vec<Quad>; 6],
    ambient_occlusion: bool,
    gui_3d: bool,
    builtin_renderer: bool,
    particle: Option<String>,
}

impl SimpleBakedModel {
    /// Build from explicit quads.
    pub fn from_quads(quads: Vec<Quad>) -> Self {
        let mut faces: [Vec<Quad>; 6] = Default::default();
        for quad in &quads {
            faces[quad.face.index()].push(quad.clone());
        }
        Self {
            quads,
            faces,
            ambient_occlusion: true,
            gui_3d: true,
            builtin_renderer: false,
            particle: None,
        }
    }

    pub fn with_ambient_occlusion(mut self, enabled: bool) -> Self {
        self.ambient_occlusion = enabled;
        self
    }

    pub fn with_gui_3d(mut self, gui_3d: bool) -> Self {
        self.gui_3d = gui_3d;
        self
    }

    pub fn with_builtin_renderer(mut self, builtin: bool) -> Self {
        self.builtin_renderer = builtin;
        self
    }

    pub fn with_particle(mut self, texture: impl Into<String>) -> Self {
        self.particle = Some(texture.into());
        self
    }

    /// Bake an already-resolved model (no remaining parent chain).
    ///
    /// Element models bake their cuboid faces. Models without elements that end in
    /// `builtin/generated`, or that define `layer0`, bake as a flat item.
    pub fn bake(model: &BlockModel, resolver: &ModelResolver) -> Self {
        let textures = resolver.resolve_textures(model);
        let mut texture_cache: HashMap<String, Arc<str>> = HashMap::new();
        let mut intern = |path: String| -> Arc<str> {
            texture_cache
                .entry(path)
                .or_insert_with_key(|path| Arc::from(path.as_str()))
                .clone()
        };

        let mut quads = Vec::new();
        if model.has_elements() {
            for element in &model.elements {
                let element_transform = element
                    .rotation
                    .as_ref()
                    .map(|rotation| rotation.to_transform())
                    .unwrap_or_default();

                // HashMap order is arbitrary; bake faces in a fixed direction order.
                for direction in Direction::ALL {
                    let Some(face) = element.faces.get(&direction) else {
                        continue;
                    };
                    let texture = intern(resolve_face_texture(&face.texture, &textures));
                    let quad = bake_face(element, direction, face, texture);
                    quads.push(quad.transformed(&element_transform));
                }
            }
        } else if model.is_builtin_generated() || textures.contains_key("layer0") {
            for (layer, path) in generated_layers(&textures).into_iter().enumerate() {
                quads.extend(bake_layer(intern(path), layer as i32));
            }
        }

        let particle = textures
            .get("particle")
            .filter(|t| !t.starts_with('#'))
            .cloned();

        let mut baked = Self::from_quads(quads)
            .with_ambient_occlusion(model.ambient_occlusion())
            .with_gui_3d(model.is_gui_3d())
            .with_builtin_renderer(model.is_builtin_entity());
        baked.particle = particle;
        baked
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }
}

impl BakedModel for SimpleBakedModel {
    fn quads(
        &self,
        _state: Option<&InputBlock>,
        side: FaceFilter,
        _seed: u64,
        _data: &ModelData,
    ) -> Cow<'_, [Quad]> {
        let slot = face_slot(side);
        if slot == FACE_FILTER_COUNT - 1 {
            Cow::Borrowed(&self.quads)
        } else {
            Cow::Borrowed(&self.faces[slot])
        }
    }

    fn ambient_occlusion(&self) -> bool {
        self.ambient_occlusion
    }

    fn is_gui_3d(&self) -> bool {
        self.gui_3d
    }

    fn is_builtin_renderer(&self) -> bool {
        self.builtin_renderer
    }

    fn particle_texture(&self) -> Option<&str> {
        self.particle.as_deref()
    }
}

/// Resolve a texture reference to a path.
fn resolve_face_texture(reference: &str, resolved_textures: &HashMap<String, String>) -> String {
    match reference.strip_prefix('#') {
        Some(key) => resolved_textures
            .get(key)
            .filter(|t| !t.starts_with('#'))
            .cloned()
            .unwrap_or_else(|| MISSING_TEXTURE.to_string()),
        None => reference.to_string(),
    }
}

/// `layer0`, `layer1`, ... up to the first gap, at most four.
fn generated_layers(textures: &HashMap<String, String>) -> Vec<String> {
    (0..GENERATED_LAYER_COUNT)
        .map_while(|i| textures.get(&format!("layer{}", i)))
        .map(|t| {
            if t.starts_with('#') {
                MISSING_TEXTURE.to_string()
            } else {
                t.clone()
            }
        })
        .collect()
}

/// Front and back quads of one flat item layer, one pixel thick around the block centre.
/// The tint index is the layer index.
fn bake_layer(texture: Arc<str>, layer: i32) -> [Quad; 2] {
    let from = [0.0, 0.0, 7.5 / 16.0];
    let to = [1.0, 1.0, 8.5 / 16.0];
    let layer_quad = |direction: Direction, uv: [f32; 4]| {
        let positions = face_positions(direction, from, to);
        let uvs = face_uvs(uv);
        let normal = direction.normal();
        Quad {
            vertices: [0, 1, 2, 3].map(|i| QuadVertex::new(positions[i], normal, uvs[i])),
            face: direction,
            tint_index: layer,
            shade: true,
            texture: texture.clone(),
        }
    };

    [
        layer_quad(Direction::South, [0.0, 0.0, 1.0, 1.0]),
        // Seen from behind, so the texture is mirrored horizontally.
        layer_quad(Direction::North, [1.0, 0.0, 0.0, 1.0]),
    ]
}

/// Build the quad for one element face in block space, before element rotation.
fn bake_face(element: &ModelElement, direction: Direction, face: &ModelFace, texture: Arc<str>) -> Quad {
    let from = element.block_from();
    let to = element.block_to();
    let positions = face_positions(direction, from, to);
    let uvs = rotate_uvs(face_uvs(face.normalized_uv()), face.rotation);
    let normal = direction.normal();

    Quad {
        vertices: [0, 1, 2, 3].map(|i| QuadVertex::new(positions[i], normal, uvs[i])),
        face: direction,
        tint_index: face.tintindex,
        shade: element.shade,
        texture,
    }
}

/// UV order: top-left, top-right, bottom-right, bottom-left.
fn face_uvs(uv: [f32; 4]) -> [[f32; 2]; 4] {
    let (u1, v1, u2, v2) = (uv[0], uv[1], uv[2], uv[3]);
    [[u1, v1], [u2, v1], [u2, v2], [u1, v2]]
}

/// Rotate UV coordinates in 90 degree steps.
fn rotate_uvs(uvs: [[f32; 2]; 4], rotation: i32) -> [[f32; 2]; 4] {
    let steps = ((rotation / 90) % 4 + 4) % 4;
    let mut result = uvs;
    for _ in 0..steps {
        result = [result[3], result[0], result[1], result[2]];
    }
    result
}

/// The four corners of a face, counter-clockwise seen from outside, starting top-left
/// of the texture.
fn face_positions(direction: Direction, from: [f32; 3], to: [f32; 3]) -> [[f32; 3]; 4] {
    match direction {
        Direction::Down => [
            [from[0], from[1], to[2]],
            [to[0], from[1], to[2]],
            [to[0], from[1], from[2]],
            [from[0], from[1], from[2]],
        ],
        Direction::Up => [
            [from[0], to[1], from[2]],
            [to[0], to[1], from[2]],
            [to[0], to[1], to[2]],
            [from[0], to[1], to[2]],
        ],
        Direction::North => [
            [to[0], to[1], from[2]],
            [from[0], to[1], from[2]],
            [from[0], from[1], from[2]],
            [to[0], from[1], from[2]],
        ],
        Direction::South => [
            [from[0], to[1], to[2]],
            [to[0], to[1], to[2]],
            [to[0], from[1], to[2]],
            [from[0], from[1], to[2]],
        ],
        Direction::West => [
            [from[0], to[1], from[2]],
            [from[0], to[1], to[2]],
            [from[0], from[1], to[2]],
            [from[0], from[1], from[2]],
        ],
        Direction::East => [
            [to[0], to[1], to[2]],
            [to[0], to[1], from[2]],
            [to[0], from[1], from[2]],
            [to[0], from[1], to[2]],
        ],
    }
}
