use crate::render::api::{BufferTarget, GraphicsApi};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Attribute slot of the vertex position.
pub const POSITION_ATTRIBUTE: u32 = 0;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Geometry has no vertices")]
    Empty,
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("Index count {len} is not a multiple of 3")]
    IncompleteTriangle { len: usize },
    #[error("Vertex count {len} is not a multiple of 3")]
    IncompleteVertexList { len: usize },
}

/// Built-in shapes the demo can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryPreset {
    Triangle,
    Quad,
}

/// CPU-side vertex positions with optional triangle indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    vertices: Vec<Vec3>,
    indices: Option<Vec<u32>>,
}

impl Geometry {
    pub fn new(vertices: Vec<Vec3>, indices: Option<Vec<u32>>) -> Result<Self, GeometryError> {
        if vertices.is_empty() {
            return Err(GeometryError::Empty);
        }

        match &indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(GeometryError::IncompleteTriangle { len: indices.len() });
                }
                if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
                    return Err(GeometryError::IndexOutOfRange {
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
            None if vertices.len() % 3 != 0 => {
                return Err(GeometryError::IncompleteVertexList { len: vertices.len() });
            }
            None => {}
        }

        Ok(Self { vertices, indices })
    }

    /// One triangle, drawn straight from the vertex list.
    pub fn triangle() -> Self {
        Self {
            vertices: vec![
                Vec3::new(-0.5, -0.5, 0.0),
                Vec3::new(0.5, -0.5, 0.0),
                Vec3::new(0.0, 0.5, 0.0),
            ],
            indices: None,
        }
    }

    /// Unit quad made of two indexed triangles.
    pub fn quad() -> Self {
        Self {
            vertices: vec![
                Vec3::new(-0.5, -0.5, 0.0),
                Vec3::new(0.5, -0.5, 0.0),
                Vec3::new(0.5, 0.5, 0.0),
                Vec3::new(-0.5, 0.5, 0.0),
            ],
            indices: Some(vec![0, 1, 3, 1, 2, 3]),
        }
    }

    pub fn from_preset(preset: GeometryPreset) -> Self {
        match preset {
            GeometryPreset::Triangle => Self::triangle(),
            GeometryPreset::Quad => Self::quad(),
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Number of elements a draw call submits.
    pub fn element_count(&self) -> usize {
        self.indices.as_ref().map_or(self.vertices.len(), Vec::len)
    }

    /// The vertex triples a draw of this geometry produces, in order.
    #[cfg(test)]
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        match &self.indices {
            Some(indices) => indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect(),
            None => (0..self.vertices.len() as u32)
                .collect::<Vec<_>>()
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
        }
    }
}

/// Geometry uploaded to the GPU: a vertex buffer, an optional element
/// buffer and the vertex array describing them.
pub struct GeometryBuffers<'gl, G: GraphicsApi + ?Sized> {
    gl: &'gl G,
    vao: u32,
    vbo: u32,
    ebo: Option<u32>,
    vertex_count: i32,
    index_count: Option<i32>,
    released: bool,
}

impl<'gl, G: GraphicsApi + ?Sized> GeometryBuffers<'gl, G> {
    /// Uploads `geometry` and records position attribute 0 as three tightly
    /// packed floats.
    pub fn upload(gl: &'gl G, geometry: &Geometry) -> Self {
        let vao = gl.gen_vertex_array();
        let vbo = gl.gen_buffer();

        gl.bind_vertex_array(vao);

        gl.bind_buffer(BufferTarget::Array, vbo);
        gl.buffer_vertices(BufferTarget::Array, geometry.vertices());

        gl.vertex_attrib_f32(POSITION_ATTRIBUTE, 3);
        gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);

        // Bound while the VAO is bound, so the VAO remembers it.
        let ebo = geometry.indices().map(|indices| {
            let ebo = gl.gen_buffer();
            gl.bind_buffer(BufferTarget::Element, ebo);
            gl.buffer_indices(BufferTarget::Element, indices);
            ebo
        });

        gl.bind_vertex_array(0);

        log::debug!(
            "Uploaded {} vertices{} (vao {}, vbo {})",
            geometry.vertices().len(),
            geometry
                .indices()
                .map(|i| format!(" and {} indices", i.len()))
                .unwrap_or_default(),
            vao,
            vbo
        );

        Self {
            gl,
            vao,
            vbo,
            ebo,
            vertex_count: geometry.vertices().len() as i32,
            index_count: geometry.indices().map(|i| i.len() as i32),
            released: false,
        }
    }

    pub fn bind(&self) {
        self.gl.bind_vertex_array(self.vao);
    }

    /// Binds the vertex array and draws it as triangles.
    pub fn draw(&self) {
        if self.released {
            return;
        }
        self.bind();
        match self.index_count {
            Some(count) => self.gl.draw_indexed_triangles(count),
            None => self.gl.draw_triangles(0, self.vertex_count),
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }

    /// Deletes the buffers and the vertex array. Further calls do nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.gl.delete_vertex_array(self.vao);
        self.gl.delete_buffer(self.vbo);
        if let Some(ebo) = self.ebo {
            self.gl.delete_buffer(ebo);
        }
        self.released = true;
    }
}

impl<G: GraphicsApi + ?Sized> Drop for GeometryBuffers<'_, G> {
    fn drop(&mut self) {
        self.release();
    }
}
