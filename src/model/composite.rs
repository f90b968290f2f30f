//! Composite models: a base model merged with an overlay and two side attachments.
//!
//! The composite is immutable once built. The merged, transformed quads for each
//! face filter are computed on first request and then served from a per-face slot.

use super::quad::{transform_quads_into, Quad};
use super::transformed::TransformedModel;
use super::{BakedModel, ModelData};
use crate::types::{face_slot, FaceFilter, InputBlock, Transform, FACE_FILTER_COUNT};
use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

/// A side attachment with its transform already composed onto the general transform.
#[derive(Debug)]
struct Attachment {
    model: Arc<dyn BakedModel>,
    transform: Transform,
}

impl Attachment {
    fn new(general: &Transform, attachment: TransformedModel) -> Self {
        Self {
            transform: general.then(attachment.matrix()),
            model: Arc::clone(attachment.model()),
        }
    }
}

/// A base model plus optional overlay and left/right attachment models.
///
/// Quads are produced in a fixed order: base, overlay, left, right, each group in
/// its source model's order. Base and overlay are drawn under the general transform;
/// an attachment is drawn under `general · attachment`, so the attachment's own
/// transform acts in its local space first.
#[derive(Debug)]
pub struct CompositeModel {
    base: Arc<dyn BakedModel>,
    overlay: Option<Arc<dyn BakedModel>>,
    general_transform: Transform,
    left: Option<Attachment>,
    right: Option<Attachment>,
    face_quads: [OnceLock<Vec<Quad>>; FACE_FILTER_COUNT],
}

impl CompositeModel {
    pub fn new(
        base: Arc<dyn BakedModel>,
        overlay: Option<Arc<dyn BakedModel>>,
        general_transform: Transform,
        left: Option<TransformedModel>,
        right: Option<TransformedModel>,
    ) -> Self {
        Self {
            base,
            overlay,
            left: left.map(|model| Attachment::new(&general_transform, model)),
            right: right.map(|model| Attachment::new(&general_transform, model)),
            general_transform,
            face_quads: Default::default(),
        }
    }

    pub fn base(&self) -> &Arc<dyn BakedModel> {
        &self.base
    }

    pub fn general_transform(&self) -> &Transform {
        &self.general_transform
    }

    /// Whether the quads for `side` have already been built.
    pub fn is_cached(&self, side: FaceFilter) -> bool {
        self.face_quads[face_slot(side)].get().is_some()
    }

    fn build_quads(
        &self,
        state: Option<&InputBlock>,
        side: FaceFilter,
        seed: u64,
        data: &ModelData,
    ) -> Vec<Quad> {
        let mut quads = Vec::new();

        let base = self.base.quads(state, side, seed, data);
        transform_quads_into(&mut quads, &base, &self.general_transform);

        if let Some(overlay) = &self.overlay {
            let overlay_quads = overlay.quads(state, side, seed, data);
            transform_quads_into(&mut quads, &overlay_quads, &self.general_transform);
        }

        for attachment in [&self.left, &self.right].into_iter().flatten() {
            let attachment_quads = attachment.model.quads(state, side, seed, data);
            transform_quads_into(&mut quads, &attachment_quads, &attachment.transform);
        }

        quads.shrink_to_fit();
        log::debug!(
            "Built {} composite quads for face {:?}",
            quads.len(),
            side
        );
        quads
    }
}

impl BakedModel for CompositeModel {
    /// The merged quads for `side`, built on the first request and reused after.
    ///
    /// `state`, `seed` and `data` only reach the source models on that first build.
    fn quads(
        &self,
        state: Option<&InputBlock>,
        side: FaceFilter,
        seed: u64,
        data: &ModelData,
    ) -> Cow<'_, [Quad]> {
        let quads = self.face_quads[face_slot(side)]
            .get_or_init(|| self.build_quads(state, side, seed, data));
        Cow::Borrowed(quads.as_slice())
    }

    fn ambient_occlusion(&self) -> bool {
        self.base.ambient_occlusion()
    }

    fn is_gui_3d(&self) -> bool {
        self.base.is_gui_3d()
    }

    fn is_builtin_renderer(&self) -> bool {
        self.base.is_builtin_renderer()
    }

    fn particle_texture(&self) -> Option<&str> {
        self.base.particle_texture()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::quad::test_support::{triangle_quad, up_quad};
    use crate::model::test_support::CountingModel;
    use crate::types::Direction;

    fn counting(quads: Vec<Quad>) -> Arc<CountingModel> {
        Arc::new(CountingModel::new(quads))
    }

    fn query(model: &CompositeModel, side: FaceFilter) -> Vec<Quad> {
        model.quads(None, side, 0, &ModelData::empty()).into_owned()
    }

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_repeat_queries_are_identical_and_cached() {
        let base = counting(vec![up_quad(1.0, -1), triangle_quad(Direction::North, [1.0, 0.0, 0.0])]);
        let left = counting(vec![up_quad(0.5, -1)]);
        let composite = CompositeModel::new(
            base.clone(),
            None,
            Transform::from_rotation_y_degrees(90.0),
            Some(TransformedModel::untransformed(left.clone())),
            None,
        );

        assert!(!composite.is_cached(Some(Direction::Up)));
        let first = query(&composite, Some(Direction::Up));
        let second = query(&composite, Some(Direction::Up));

        assert_eq!(first, second);
        assert!(composite.is_cached(Some(Direction::Up)));
        assert_eq!(base.calls(), 1);
        assert_eq!(left.calls(), 1);

        // The cached slice is the same allocation every time.
        let a = composite.quads(None, Some(Direction::Up), 0, &ModelData::empty());
        let b = composite.quads(None, Some(Direction::Up), 99, &ModelData::empty());
        assert!(std::ptr::eq(a.as_ptr(), b.as_ptr()));
    }

    #[test]
    fn test_source_order_is_base_overlay_left_right() {
        let base = counting(vec![up_quad(0.1, -1), up_quad(0.2, -1)]);
        let overlay = counting(vec![up_quad(0.3, -1)]);
        let left = counting(vec![up_quad(0.4, -1)]);
        let right = counting(vec![up_quad(0.5, -1), up_quad(0.6, -1)]);

        let composite = CompositeModel::new(
            base,
            Some(overlay),
            Transform::IDENTITY,
            Some(TransformedModel::untransformed(left)),
            Some(TransformedModel::untransformed(right)),
        );

        let heights: Vec<f32> = query(&composite, None)
            .iter()
            .map(|q| q.vertices[0].position[1])
            .collect();
        assert_eq!(heights, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn test_each_group_uses_its_own_transform() {
        let general = Transform::from_translation([0.0, 1.0, 0.0]);
        let left_matrix = Transform::from_translation([-1.0, 0.0, 0.0]);
        let right_matrix = Transform::from_translation([1.0, 0.0, 0.0]);

        let composite = CompositeModel::new(
            counting(vec![up_quad(0.0, -1)]),
            Some(counting(vec![up_quad(0.0, -1)])),
            general,
            Some(TransformedModel::new(counting(vec![up_quad(0.0, -1)]), left_matrix)),
            Some(TransformedModel::new(counting(vec![up_quad(0.0, -1)]), right_matrix)),
        );

        let quads = query(&composite, None);
        let origin = |i: usize| quads[i].vertices[0].position;
        assert_eq!(origin(0), [0.0, 1.0, 0.0]);
        assert_eq!(origin(1), [0.0, 1.0, 0.0]);
        assert_eq!(origin(2), [-1.0, 1.0, 0.0]);
        assert_eq!(origin(3), [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_absent_slots_yield_base_only() {
        let base_quads = vec![up_quad(1.0, 0), triangle_quad(Direction::West, [0.0, 0.0, 1.0])];
        let general = Transform::from_translation([2.0, 0.0, 0.0]);
        let composite = CompositeModel::new(counting(base_quads.clone()), None, general, None, None);

        let mut filters: Vec<FaceFilter> = Direction::ALL.iter().map(|d| Some(*d)).collect();
        filters.push(None);
        for filter in filters {
            let expected: Vec<Quad> = base_quads
                .iter()
                .filter(|q| filter.map_or(true, |d| q.face == d))
                .map(|q| q.transformed(&general))
                .collect();
            assert_eq!(query(&composite, filter), expected);
        }
    }

    #[test]
    fn test_attachment_vertices_are_base_times_attachment() {
        // T_b: quarter turn about Y. T_a: shift along X.
        let base_transform = Transform::from_rotation_y_degrees(90.0);
        let attachment_transform = Transform::from_translation([1.0, 0.0, 0.0]);
        let triangle = triangle_quad(Direction::South, [1.0, 0.0, 0.0]);

        let composite = CompositeModel::new(
            counting(Vec::new()),
            None,
            base_transform,
            Some(TransformedModel::new(counting(vec![triangle.clone()]), attachment_transform)),
            None,
        );

        let quads = query(&composite, Some(Direction::South));
        assert_eq!(quads.len(), 1);

        // (1,0,0) -> translate -> (2,0,0) -> rotate 90 about Y -> (0,0,-2)
        assert_close(quads[0].vertices[1].position, [0.0, 0.0, -2.0]);
        for (out, src) in quads[0].vertices.iter().zip(triangle.vertices.iter()) {
            let expected = base_transform
                .then(&attachment_transform)
                .transform_point(src.position);
            assert_close(out.position, expected);
        }
        // South normal (0,0,1) rotates to east (1,0,0); translation does not touch it.
        assert_close(quads[0].vertices[0].normal, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_left_and_right_compose_the_same_way() {
        let general = Transform::from_rotation_y_degrees(90.0);
        let matrix = Transform::from_translation([1.0, 0.0, 0.0]);
        let composite = CompositeModel::new(
            counting(Vec::new()),
            None,
            general,
            Some(TransformedModel::new(counting(vec![up_quad(0.0, -1)]), matrix)),
            Some(TransformedModel::new(counting(vec![up_quad(0.0, -1)]), matrix)),
        );

        let quads = query(&composite, None);
        assert_eq!(quads[0], quads[1]);
    }

    #[test]
    fn test_tint_index_passes_through() {
        let composite = CompositeModel::new(
            counting(vec![up_quad(1.0, 2)]),
            None,
            Transform::from_scale([1.0, -1.0, 1.0]),
            None,
            None,
        );
        let quads = query(&composite, None);
        assert_eq!(quads[0].tint_index, 2);
        assert_eq!(quads[0].tint_slot(), Some(2));
    }

    #[test]
    fn test_filters_do_not_leak_into_each_other() {
        let base_quads = vec![
            up_quad(1.0, -1),
            triangle_quad(Direction::North, [1.0, 0.0, 0.0]),
            triangle_quad(Direction::South, [1.0, 0.0, 0.0]),
        ];
        let warm = CompositeModel::new(counting(base_quads.clone()), None, Transform::IDENTITY, None, None);
        let cold = CompositeModel::new(counting(base_quads), None, Transform::IDENTITY, None, None);

        // Populate the directional slots first on one composite only.
        let north = query(&warm, Some(Direction::North));
        query(&warm, Some(Direction::South));
        query(&warm, Some(Direction::Up));

        let all_warm = query(&warm, None);
        let all_cold = query(&cold, None);
        assert_eq!(all_warm, all_cold);
        assert_eq!(north.len(), 1);
        assert!(north.iter().all(|q| all_warm.contains(q)));
        assert!(query(&warm, Some(Direction::East)).is_empty());
    }

    #[test]
    fn test_properties_delegate_to_base() {
        let base = Arc::new(CountingModel::new(Vec::new()).with_particle("computercraft:block/turtle_normal", false));
        let overlay = Arc::new(CountingModel::new(Vec::new()).with_particle("computercraft:block/elf", true));
        let composite = CompositeModel::new(base, Some(overlay), Transform::IDENTITY, None, None);

        assert_eq!(composite.particle_texture(), Some("computercraft:block/turtle_normal"));
        assert!(!composite.ambient_occlusion());
        assert!(composite.is_gui_3d());
        assert!(!composite.is_builtin_renderer());
    }

    #[test]
    fn test_concurrent_first_queries_build_once() {
        let base = counting(vec![up_quad(1.0, -1)]);
        let composite = Arc::new(CompositeModel::new(base.clone(), None, Transform::IDENTITY, None, None));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let composite = Arc::clone(&composite);
                std::thread::spawn(move || {
                    let count = composite.quads(None, None, 0, &ModelData::empty()).len();
                    count
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(base.calls(), 1);
    }
}
