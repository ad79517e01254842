use crate::render::api::{BufferTarget, ClearColor, GraphicsApi, ShaderStage};
use gl::types::*;
use glam::Vec3;
use std::ffi::{c_void, CStr};
use std::marker::PhantomData;
use std::ptr;

/// [`GraphicsApi`] backed by the global `gl` function pointers.
///
/// Only obtainable through [`GlBackend::load`], so holding one means the
/// pointers are loaded. Not `Send`: GL calls belong to the context thread.
pub struct GlBackend {
    _not_send: PhantomData<*const ()>,
}

/// Driver identification strings.
#[derive(Debug, Clone, Default)]
pub struct ContextInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub shading_language: String,
}

impl GlBackend {
    /// Loads GL function pointers through `loader`.
    ///
    /// A context must be current on the calling thread.
    pub fn load<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        Self {
            _not_send: PhantomData,
        }
    }

    pub fn context_info(&self) -> ContextInfo {
        ContextInfo {
            vendor: get_string(gl::VENDOR),
            renderer: get_string(gl::RENDERER),
            version: get_string(gl::VERSION),
            shading_language: get_string(gl::SHADING_LANGUAGE_VERSION),
        }
    }

    /// Pops every pending GL error, logging each one. Returns how many there were.
    pub fn drain_errors(&self, during: &str) -> usize {
        let mut count = 0;
        loop {
            let error = unsafe { gl::GetError() };
            if error == gl::NO_ERROR {
                break;
            }
            log::warn!("OpenGL error 0x{:04X} during {}", error, during);
            count += 1;
        }
        count
    }
}

fn get_string(name: GLenum) -> String {
    unsafe {
        let raw = gl::GetString(name);
        if raw.is_null() {
            return String::new();
        }
        CStr::from_ptr(raw as *const GLchar)
            .to_string_lossy()
            .into_owned()
    }
}

fn buffer_target(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Array => gl::ARRAY_BUFFER,
        BufferTarget::Element => gl::ELEMENT_ARRAY_BUFFER,
    }
}

fn shader_type(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

/// Reads an info log of `len` bytes (terminator included) via `fetch`.
fn read_info_log(len: GLint, fetch: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
    if len <= 0 {
        return String::new();
    }
    let mut buffer = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    fetch(len, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}

fn upload<T>(target: BufferTarget, data: &[T]) {
    unsafe {
        gl::BufferData(
            buffer_target(target),
            std::mem::size_of_val(data) as GLsizeiptr,
            data.as_ptr() as *const c_void,
            gl::STATIC_DRAW,
        );
    }
}

impl GraphicsApi for GlBackend {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        unsafe { gl::CreateShader(shader_type(stage)) }
    }

    fn shader_source(&self, shader: u32, source: &str) {
        // Explicit length, so the source needs no NUL terminator.
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe { gl::ShaderSource(shader, 1, &ptr, &len) };
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) };
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
        read_info_log(len, |size, written, buf| unsafe {
            gl::GetShaderInfoLog(shader, size, written, buf)
        })
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::DetachShader(program, shader) };
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) };
    }

    fn program_link_status(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success != 0
    }

    fn validate_program(&self, program: u32) {
        unsafe { gl::ValidateProgram(program) };
    }

    fn program_validate_status(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
        read_info_log(len, |size, written, buf| unsafe {
            gl::GetProgramInfoLog(program, size, written, buf)
        })
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) };
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn gen_buffer(&self) -> u32 {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        buffer
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        unsafe { gl::BindBuffer(buffer_target(target), buffer) };
    }

    fn buffer_vertices(&self, target: BufferTarget, data: &[Vec3]) {
        upload(target, bytemuck::cast_slice::<Vec3, f32>(data));
    }

    fn buffer_indices(&self, target: BufferTarget, data: &[u32]) {
        upload(target, data);
    }

    fn delete_buffer(&self, buffer: u32) {
        unsafe { gl::DeleteBuffers(1, &buffer) };
    }

    fn gen_vertex_array(&self) -> u32 {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        vao
    }

    fn bind_vertex_array(&self, vao: u32) {
        unsafe { gl::BindVertexArray(vao) };
    }

    fn vertex_attrib_f32(&self, index: u32, components: i32) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                components,
                gl::FLOAT,
                gl::FALSE,
                components * std::mem::size_of::<f32>() as GLsizei,
                ptr::null(),
            );
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) };
    }

    fn delete_vertex_array(&self, vao: u32) {
        unsafe { gl::DeleteVertexArrays(1, &vao) };
    }

    fn clear_color(&self, color: ClearColor) {
        unsafe { gl::ClearColor(color.r, color.g, color.b, color.a) };
    }

    fn clear_color_buffer(&self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { gl::Viewport(x, y, width, height) };
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count) };
    }

    fn draw_indexed_triangles(&self, count: i32) {
        unsafe { gl::DrawElements(gl::TRIANGLES, count, gl::UNSIGNED_INT, ptr::null()) };
    }
}
