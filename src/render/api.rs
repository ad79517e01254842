//! The graphics API seam.
//!
//! Everything the demo asks of OpenGL goes through [`GraphicsApi`]. Handles
//! are the raw GL object names (`0` means "no object"). The real
//! implementation lives in [`crate::render::gl_backend`]; tests use a
//! recording implementation instead of a GPU.

use glam::Vec3;
use std::fmt;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Buffer binding points used by the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data.
    Array,
    /// Index data; recorded into the bound vertex array.
    Element,
}

/// RGBA clear color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl From<[f32; 4]> for ClearColor {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Minimal set of graphics calls needed to compile a program, upload
/// geometry and draw it.
///
/// All methods must be called on the thread that owns the current context.
pub trait GraphicsApi {
    // Shader objects
    fn create_shader(&self, stage: ShaderStage) -> u32;
    fn shader_source(&self, shader: u32, source: &str);
    fn compile_shader(&self, shader: u32);
    fn shader_compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    // Program objects
    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn detach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn program_link_status(&self, program: u32) -> bool;
    fn validate_program(&self, program: u32);
    fn program_validate_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn use_program(&self, program: u32);
    fn delete_program(&self, program: u32);

    // Buffers and vertex arrays
    fn gen_buffer(&self) -> u32;
    fn bind_buffer(&self, target: BufferTarget, buffer: u32);
    fn buffer_vertices(&self, target: BufferTarget, data: &[Vec3]);
    fn buffer_indices(&self, target: BufferTarget, data: &[u32]);
    fn delete_buffer(&self, buffer: u32);
    fn gen_vertex_array(&self) -> u32;
    fn bind_vertex_array(&self, vao: u32);
    /// Describes attribute `index` as `components` tightly packed floats.
    fn vertex_attrib_f32(&self, index: u32, components: i32);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn delete_vertex_array(&self, vao: u32);

    // Frame
    fn clear_color(&self, color: ClearColor);
    fn clear_color_buffer(&self);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Draws `count` vertices starting at `first` as a triangle list.
    fn draw_triangles(&self, first: i32, count: i32);
    /// Draws `count` u32 indices from the bound element buffer as a triangle list.
    fn draw_indexed_triangles(&self, count: i32);
}
