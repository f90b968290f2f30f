//! Output mesh geometry.

use crate::types::BoundingBox;

/// A vertex in the output mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in 3D space.
    pub position: [f32; 3],
    /// Normal vector.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
    /// Vertex color (RGBA), the resolved tint of the source quad.
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }
}

/// A triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle indices (3 per triangle).
    pub indices: Vec<u32>,
    /// Texture of each triangle, parallel to `indices.chunks(3)`.
    pub textures: Vec<std::sync::Arc<str>>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    /// Add a quad as two triangles: (0,1,2) and (0,2,3), keeping the quad's
    /// counter-clockwise winding.
    pub fn add_quad(&mut self, vertices: [Vertex; 4], texture: &std::sync::Arc<str>) {
        let i0 = self.add_vertex(vertices[0]);
        let i1 = self.add_vertex(vertices[1]);
        let i2 = self.add_vertex(vertices[2]);
        let i3 = self.add_vertex(vertices[3]);
        self.add_triangle(i0, i1, i2);
        self.add_triangle(i0, i2, i3);
        self.textures.push(texture.clone());
        self.textures.push(texture.clone());
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|index| index + offset));
        self.textures.extend(other.textures.iter().cloned());
    }

    /// Bounding box of all vertex positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().map(|v| v.position))
    }
}
