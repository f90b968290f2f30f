//! Baked models.
//!
//! A [`BakedModel`] is an immutable source of [`Quad`]s queried per face. Three
//! implementations live here:
//!
//! - [`SimpleBakedModel`]: quads precomputed from model JSON.
//! - [`TransformedModel`]: another model viewed through a transform.
//! - [`CompositeModel`]: a base model merged with an overlay and two side
//!   attachments, memoised per face.
//!
//! [`ModelManager`] owns the baked models of a resource pack by location.

pub mod composite;
pub mod manager;
pub mod quad;
pub mod simple;
pub mod transformed;

pub use composite::CompositeModel;
pub use manager::ModelManager;
pub use quad::{Quad, QuadVertex};
pub use simple::SimpleBakedModel;
pub use transformed::TransformedModel;

use crate::types::{FaceFilter, InputBlock};
use std::borrow::Cow;
use std::collections::HashMap;

/// Extra per-query data, forwarded verbatim to every model in a query chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelData {
    pub properties: HashMap<String, String>,
}

impl ModelData {
    /// Data carrying nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(|s| s.as_str())
    }
}

/// A queryable, immutable provider of quads.
pub trait BakedModel: Send + Sync {
    /// Quads facing `side`, or every quad when `side` is `None`.
    ///
    /// `state`, `seed` and `data` are opaque to the caller and passed on to any
    /// models this one delegates to.
    fn quads(
        &self,
        state: Option<&InputBlock>,
        side: FaceFilter,
        seed: u64,
        data: &ModelData,
    ) -> Cow<'_, [Quad]>;

    /// Whether ambient occlusion should be applied.
    fn ambient_occlusion(&self) -> bool;

    /// `true` for a 3-D volume, `false` for a flat 2-D icon.
    fn is_gui_3d(&self) -> bool;

    /// Whether the model is drawn by a custom renderer instead of its quads.
    fn is_builtin_renderer(&self) -> bool;

    /// Texture used for particles and as the model's icon.
    fn particle_texture(&self) -> Option<&str>;
}

impl std::fmt::Debug for dyn BakedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BakedModel")
            .field("particle_texture", &self.particle_texture())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A model returning fixed quads that counts how often it is queried.
    pub struct CountingModel {
        quads: Vec<Quad>,
        pub calls: AtomicUsize,
        particle: Option<String>,
        ambient_occlusion: bool,
    }

    impl CountingModel {
        pub fn new(quads: Vec<Quad>) -> Self {
            Self {
                quads,
                calls: AtomicUsize::new(0),
                particle: None,
                ambient_occlusion: true,
            }
        }

        pub fn with_particle(mut self, particle: &str, ambient_occlusion: bool) -> Self {
            self.particle = Some(particle.to_string());
            self.ambient_occlusion = ambient_occlusion;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl BakedModel for CountingModel {
        fn quads(
            &self,
            _state: Option<&InputBlock>,
            side: FaceFilter,
            _seed: u64,
            _data: &ModelData,
        ) -> Cow<'_, [Quad]> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match side {
                None => Cow::Borrowed(&self.quads),
                Some(direction) => Cow::Owned(
                    self.quads
                        .iter()
                        .filter(|q| q.face == direction)
                        .cloned()
                        .collect(),
                ),
            }
        }

        fn ambient_occlusion(&self) -> bool {
            self.ambient_occlusion
        }

        fn is_gui_3d(&self) -> bool {
            true
        }

        fn is_builtin_renderer(&self) -> bool {
            false
        }

        fn particle_texture(&self) -> Option<&str> {
            self.particle.as_deref()
        }
    }
}
