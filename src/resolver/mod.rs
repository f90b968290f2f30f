//! Model inheritance resolution.
//!
//! Models reference a `parent` and `#texture` variables; this module flattens
//! both before baking.

pub mod model_resolver;

pub use model_resolver::ModelResolver;
