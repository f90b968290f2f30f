//! Wavefront OBJ export.
//!
//! OBJ is a simple, widely-supported text-based 3D format. Vertex colours are
//! written as the non-standard `v x y z r g b` extension most importers accept;
//! every distinct texture becomes its own material.

use crate::error::{MesherError, Result};
use crate::mesher::Mesh;
use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

/// Export a mesh to OBJ format.
/// Returns (obj_content, mtl_content) as strings.
pub fn export_obj(mesh: &Mesh, name: &str) -> Result<(String, String)> {
    if mesh.textures.len() != mesh.triangle_count() {
        return Err(MesherError::Export(format!(
            "{} triangles but {} texture entries",
            mesh.triangle_count(),
            mesh.textures.len()
        )));
    }

    let obj_capacity = 256 + mesh.vertex_count() * 180 + mesh.triangle_count() * 40;
    let mut obj = String::with_capacity(obj_capacity);
    let mut mtl = String::with_capacity(512);

    writeln!(obj, "# Turtle Mesher OBJ Export")?;
    writeln!(obj, "# Vertices: {}", mesh.vertex_count())?;
    writeln!(obj, "# Triangles: {}", mesh.triangle_count())?;
    writeln!(obj)?;
    writeln!(obj, "mtllib {}.mtl", name)?;
    writeln!(obj)?;
    writeln!(obj, "o {}", name)?;
    writeln!(obj)?;

    for vertex in &mesh.vertices {
        writeln!(
            obj,
            "v {} {} {} {} {} {}",
            vertex.position[0],
            vertex.position[1],
            vertex.position[2],
            vertex.color[0],
            vertex.color[1],
            vertex.color[2]
        )?;
    }
    writeln!(obj)?;

    // OBJ puts v=0 at the bottom of the image.
    for vertex in &mesh.vertices {
        writeln!(obj, "vt {} {}", vertex.uv[0], 1.0 - vertex.uv[1])?;
    }
    writeln!(obj)?;

    for vertex in &mesh.vertices {
        writeln!(
            obj,
            "vn {} {} {}",
            vertex.normal[0], vertex.normal[1], vertex.normal[2]
        )?;
    }
    writeln!(obj)?;

    let materials = material_groups(mesh);
    for (texture, triangles) in &materials {
        writeln!(obj, "usemtl {}", material_name(texture))?;
        for &triangle in triangles {
            let base = triangle * 3;
            let [i0, i1, i2] = [0, 1, 2].map(|k| mesh.indices[base + k] as usize + 1);
            writeln!(
                obj,
                "f {}/{}/{} {}/{}/{} {}/{}/{}",
                i0, i0, i0, i1, i1, i1, i2, i2, i2
            )?;
        }
    }

    writeln!(mtl, "# Turtle Mesher Material")?;
    for (texture, _) in &materials {
        writeln!(mtl)?;
        writeln!(mtl, "newmtl {}", material_name(texture))?;
        writeln!(mtl, "Ka 1.0 1.0 1.0")?;
        writeln!(mtl, "Kd 1.0 1.0 1.0")?;
        writeln!(mtl, "Ks 0.0 0.0 0.0")?;
        writeln!(mtl, "Ns 10.0")?;
        writeln!(mtl, "d 1.0")?;
        writeln!(mtl, "illum 1")?;
        writeln!(mtl, "map_Kd {}.png", material_name(texture))?;
    }

    Ok((obj, mtl))
}

/// Triangle indices grouped by texture, in order of first use.
fn material_groups(mesh: &Mesh) -> Vec<(Arc<str>, Vec<usize>)> {
    let mut groups: Vec<(Arc<str>, Vec<usize>)> = Vec::new();
    for (triangle, texture) in mesh.textures.iter().enumerate() {
        match groups.iter_mut().find(|(t, _)| t == texture) {
            Some((_, triangles)) => triangles.push(triangle),
            None => groups.push((Arc::clone(texture), vec![triangle])),
        }
    }
    groups
}

/// Texture location as a file-safe material name.
fn material_name(texture: &str) -> String {
    texture.replace([':', '/'], "_")
}

/// OBJ and MTL text ready to write to disk.
pub struct ObjExport {
    pub name: String,
    pub obj: String,
    pub mtl: String,
}

impl ObjExport {
    pub fn from_mesh(mesh: &Mesh, name: &str) -> Result<Self> {
        let (obj, mtl) = export_obj(mesh, name)?;
        Ok(Self {
            name: name.to_string(),
            obj,
            mtl,
        })
    }

    /// Write `<name>.obj` and `<name>.mtl` into `dir`.
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(format!("{}.obj", self.name)), &self.obj)?;
        std::fs::write(dir.join(format!("{}.mtl", self.name)), &self.mtl)?;
        Ok(())
    }
}
