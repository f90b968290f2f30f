//! Mesh export formats.

pub mod obj;

pub use obj::{export_obj, ObjExport};
