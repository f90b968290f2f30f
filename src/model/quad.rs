//! Baked quads: the unit of geometry every model yields.

use crate::types::{Direction, Transform};
use std::sync::Arc;

/// A quad corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    /// Position in block space (0-1 for unrotated models).
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Texture coordinates (0-1 within the face's texture).
    pub uv: [f32; 2],
}

impl QuadVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// A four-vertex polygon with an optional tint slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    /// Corners in counter-clockwise order seen from the front.
    pub vertices: [QuadVertex; 4],
    /// Face the quad was baked for; face-filtered queries select on this.
    pub face: Direction,
    /// Index into the caller's tint table, -1 for an untinted quad.
    pub tint_index: i32,
    /// Whether directional shading applies.
    pub shade: bool,
    /// Resolved texture location.
    pub texture: Arc<str>,
}

impl Quad {
    pub fn has_tint(&self) -> bool {
        self.tint_index >= 0
    }

    /// The tint slot as an index, `None` when the quad is untinted.
    pub fn tint_slot(&self) -> Option<usize> {
        usize::try_from(self.tint_index).ok()
    }

    /// A copy of this quad with positions and normals transformed.
    ///
    /// Tint index, face, shade and texture are carried over unchanged. A mirroring
    /// transform reverses the vertex order so the quad keeps facing outwards.
    pub fn transformed(&self, transform: &Transform) -> Quad {
        if transform.is_identity() {
            return self.clone();
        }

        let mut vertices = self.vertices.map(|v| QuadVertex {
            position: transform.transform_point(v.position),
            normal: transform.transform_normal(v.normal),
            uv: v.uv,
        });
        if transform.is_mirroring() {
            vertices.reverse();
        }

        Quad {
            vertices,
            face: self.face,
            tint_index: self.tint_index,
            shade: self.shade,
            texture: Arc::clone(&self.texture),
        }
    }

    /// Position of every corner.
    pub fn positions(&self) -> [[f32; 3]; 4] {
        self.vertices.map(|v| v.position)
    }
}

/// Append `quads` to `out`, each transformed by `transform`.
pub fn transform_quads_into(out: &mut Vec<Quad>, quads: &[Quad], transform: &Transform) {
    out.reserve(quads.len());
    out.extend(quads.iter().map(|quad| quad.transformed(transform)));
}
