//! Turning baked models into triangle meshes.
//!
//! The [`QuadEmitter`] is the last stage of every render: it asks a model for its
//! full quad list, places the quads in the world, colours them from a
//! [`TintTable`] and appends them to a [`Mesh`].

pub mod geometry;
pub mod tint;

pub use geometry::{Mesh, Vertex};
pub use tint::TintTable;

use crate::model::{BakedModel, ModelData, Quad};
use crate::types::{InputBlock, Transform};

/// Appends model quads to a mesh.
#[derive(Debug, Default)]
pub struct QuadEmitter {
    mesh: Mesh,
    quads_emitted: usize,
}

impl QuadEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit every quad of `model` under `transform`.
    ///
    /// Queries the unfiltered view with seed 0 and empty model data.
    pub fn emit_model(
        &mut self,
        model: &dyn BakedModel,
        state: Option<&InputBlock>,
        transform: &Transform,
        tints: &TintTable,
    ) {
        let quads = model.quads(state, None, 0, &ModelData::empty());
        self.emit_quads(&quads, transform, tints);
    }

    /// Emit raw quads under `transform`.
    pub fn emit_quads(&mut self, quads: &[Quad], transform: &Transform, tints: &TintTable) {
        for quad in quads {
            let placed = quad.transformed(transform);
            let color = tints.resolve(placed.tint_index);
            let vertices = placed
                .vertices
                .map(|v| Vertex::new(v.position, v.normal, v.uv).with_color(color));
            self.mesh.add_quad(vertices, &placed.texture);
        }
        self.quads_emitted += quads.len();
    }

    pub fn quads_emitted(&self) -> usize {
        self.quads_emitted
    }

    pub fn finish(self) -> Mesh {
        self.mesh
    }
}
