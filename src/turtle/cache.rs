//! Composite turtle models, one per distinct look.

use super::TurtleFamily;
use crate::error::Result;
use crate::model::CompositeModel;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Everything that changes a turtle's composite model.
///
/// Two turtles with equal keys share one [`CompositeModel`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TurtleModelKey {
    pub family: TurtleFamily,
    pub coloured: bool,
    pub overlay: Option<String>,
    pub christmas: bool,
    pub left_upgrade: Option<String>,
    pub right_upgrade: Option<String>,
    pub flipped: bool,
}

/// Memoises composite models by [`TurtleModelKey`].
#[derive(Debug, Default)]
pub struct TurtleModelCache {
    models: Mutex<HashMap<TurtleModelKey, Arc<CompositeModel>>>,
}

impl TurtleModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the model for `key`, building it with `build` on a miss.
    ///
    /// A failed build is not cached.
    pub fn get_or_build<F>(&self, key: TurtleModelKey, build: F) -> Result<Arc<CompositeModel>>
    where
        F: FnOnce(&TurtleModelKey) -> Result<CompositeModel>,
    {
        let mut models = self.models.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(model) = models.get(&key) {
            return Ok(Arc::clone(model));
        }

        log::debug!("Building turtle model for {:?}", key);
        let model = Arc::new(build(&key)?);
        models.insert(key, Arc::clone(&model));
        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.models.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut models) = self.models.lock() {
            models.clear();
        }
    }
}
