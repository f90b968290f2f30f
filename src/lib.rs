//! # Turtle Mesher
//!
//! Bakes Minecraft-style JSON models into quads and composites them into turtle
//! models: a body, an optional overlay and an upgrade on each side, each drawn
//! under its own transform.
//!
//! ## Quick Start
//!
//! ```ignore
//! use turtle_mesher::{load_resource_pack, ModelManager, TurtleRenderer, TurtleState, TurtleFamily};
//!
//! let pack = load_resource_pack("path/to/pack.zip")?;
//! let models = ModelManager::from_pack(&pack)?;
//!
//! let renderer = TurtleRenderer::default();
//! let state = TurtleState::new(TurtleFamily::Advanced).with_colour(0xF2B233);
//! let mesh = renderer.render(&state, &models)?;
//!
//! let (obj, mtl) = turtle_mesher::export_obj(&mesh, "turtle")?;
//! ```
//!
//! ## Composite models
//!
//! [`CompositeModel`] is usable on its own with any [`BakedModel`]: quads come
//! out base first, then overlay, then left and right attachments, and each face
//! filter is computed once.

pub mod cable;
pub mod error;
pub mod export;
pub mod mesher;
pub mod model;
pub mod printout;
pub mod resolver;
pub mod resource_pack;
pub mod turtle;
pub mod types;

// Re-export main types for convenience
pub use error::{MesherError, Result};
pub use export::{export_obj, ObjExport};
pub use mesher::{Mesh, QuadEmitter, TintTable, Vertex};
pub use model::{
    BakedModel, CompositeModel, ModelData, ModelManager, Quad, QuadVertex, SimpleBakedModel,
    TransformedModel,
};
pub use resource_pack::{BlockModel, ModelElement, ResourcePack};
pub use turtle::{
    CraftingTableUpgrade, Holiday, RendererConfig, ToolUpgrade, TurtleFamily, TurtleRenderer,
    TurtleState, TurtleUpgrade,
};
pub use types::{Axis, BlockPosition, BoundingBox, Direction, FaceFilter, InputBlock, Transform, TurtleSide};

/// Load a resource pack from a file path (ZIP or directory).
pub fn load_resource_pack<P: AsRef<std::path::Path>>(path: P) -> Result<ResourcePack> {
    resource_pack::loader::load_from_path(path)
}

/// Load a resource pack from in-memory ZIP bytes.
pub fn load_resource_pack_from_bytes(data: &[u8]) -> Result<ResourcePack> {
    resource_pack::loader::load_from_bytes(data)
}
