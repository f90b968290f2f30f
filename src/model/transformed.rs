//! A model paired with the transform to draw it under.

use super::quad::{transform_quads_into, Quad};
use super::{BakedModel, ModelData};
use crate::types::{FaceFilter, InputBlock, Transform};
use std::borrow::Cow;
use std::sync::Arc;

/// A model to render, combined with a transformation matrix to apply.
///
/// Upgrades hand these out for their attachment geometry. Used directly as a
/// [`BakedModel`] it is the delegating variant: quads come from the wrapped model
/// and are transformed on every query.
#[derive(Debug, Clone)]
pub struct TransformedModel {
    model: Arc<dyn BakedModel>,
    matrix: Transform,
}

impl TransformedModel {
    pub fn new(model: Arc<dyn BakedModel>, matrix: Transform) -> Self {
        Self { model, matrix }
    }

    /// The model under the identity transform.
    pub fn untransformed(model: Arc<dyn BakedModel>) -> Self {
        Self::new(model, Transform::IDENTITY)
    }

    pub fn model(&self) -> &Arc<dyn BakedModel> {
        &self.model
    }

    pub fn matrix(&self) -> &Transform {
        &self.matrix
    }
}

impl BakedModel for TransformedModel {
    fn quads(
        &self,
        state: Option<&InputBlock>,
        side: FaceFilter,
        seed: u64,
        data: &ModelData,
    ) -> Cow<'_, [Quad]> {
        let source = self.model.quads(state, side, seed, data);
        if self.matrix.is_identity() {
            return source;
        }
        let mut out = Vec::with_capacity(source.len());
        transform_quads_into(&mut out, &source, &self.matrix);
        Cow::Owned(out)
    }

    fn ambient_occlusion(&self) -> bool {
        self.model.ambient_occlusion()
    }

    fn is_gui_3d(&self) -> bool {
        self.model.is_gui_3d()
    }

    fn is_builtin_renderer(&self) -> bool {
        self.model.is_builtin_renderer()
    }

    fn particle_texture(&self) -> Option<&str> {
        self.model.particle_texture()
    }
}
