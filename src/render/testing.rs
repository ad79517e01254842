//! Recording [`GraphicsApi`] used by the render tests.

use crate::render::api::{BufferTarget, ClearColor, GraphicsApi, ShaderStage};
use glam::Vec3;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UseProgram(u32),
    DeleteProgram(u32),
    DeleteShader(u32),
    DetachShader(u32, u32),
    BindVertexArray(u32),
    ClearColor(ClearColor),
    Clear,
    Viewport(i32, i32, i32, i32),
    /// A draw, resolved to the vertex indices of each triangle.
    Draw(Vec<[u32; 3]>),
    VertexAttrib { index: u32, components: i32 },
    EnableAttrib(u32),
}

#[derive(Default)]
struct State {
    next_name: u32,
    shaders: HashMap<u32, (ShaderStage, String)>,
    programs: HashMap<u32, Vec<u32>>,
    buffers: HashSet<u32>,
    vertex_arrays: HashSet<u32>,
    bound_array: u32,
    bound_vao: u32,
    vao_elements: HashMap<u32, u32>,
    element_data: HashMap<u32, Vec<u32>>,
    vertex_data: HashMap<u32, Vec<Vec3>>,
    compiled: HashSet<u32>,
    linked: HashSet<u32>,
    calls: Vec<Call>,
}

/// Fake GL that tracks live objects and records the calls tests care about.
///
/// A stage fails to compile when its source contains `#error`; a program
/// fails to link when `fail_link` is set. `fail_create` names the object
/// kind (`"shader"` or `"program"`) whose creation returns 0.
#[derive(Default)]
pub struct RecordingGl {
    state: RefCell<State>,
    fail_link: bool,
    fail_validate: bool,
    fail_create: Option<&'static str>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link_failure() -> Self {
        Self {
            fail_link: true,
            ..Self::default()
        }
    }

    pub fn with_validation_failure() -> Self {
        Self {
            fail_validate: true,
            ..Self::default()
        }
    }

    pub fn with_creation_failure(kind: &'static str) -> Self {
        Self {
            fail_create: Some(kind),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Shader, program, buffer and vertex array objects still alive.
    pub fn live_objects(&self) -> usize {
        let state = self.state.borrow();
        state.shaders.len() + state.programs.len() + state.buffers.len() + state.vertex_arrays.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(*c)).count()
    }

    pub fn draws(&self) -> Vec<Vec<[u32; 3]>> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Draw(tris) => Some(tris.clone()),
                _ => None,
            })
            .collect()
    }

    /// Positions uploaded to the array buffer `buffer`.
    pub fn uploaded_vertices(&self, buffer: u32) -> Option<Vec<Vec3>> {
        self.state.borrow().vertex_data.get(&buffer).cloned()
    }

    pub fn last_viewport(&self) -> Option<(i32, i32, i32, i32)> {
        self.state.borrow().calls.iter().rev().find_map(|c| match c {
            Call::Viewport(x, y, w, h) => Some((*x, *y, *w, *h)),
            _ => None,
        })
    }

    fn name(&self, state: &mut State) -> u32 {
        state.next_name += 1;
        state.next_name
    }
}

fn triangles(indices: impl Iterator<Item = u32>) -> Vec<[u32; 3]> {
    let flat: Vec<u32> = indices.collect();
    flat.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect()
}

impl GraphicsApi for RecordingGl {
    fn create_shader(&self, stage: ShaderStage) -> u32 {
        if self.fail_create == Some("shader") {
            return 0;
        }
        let mut state = self.state.borrow_mut();
        let name = self.name(&mut state);
        state.shaders.insert(name, (stage, String::new()));
        name
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(entry) = self.state.borrow_mut().shaders.get_mut(&shader) {
            entry.1 = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        let ok = state
            .shaders
            .get(&shader)
            .map(|(_, src)| !src.contains("#error"))
            .unwrap_or(false);
        if ok {
            state.compiled.insert(shader);
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state.borrow().compiled.contains(&shader)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let state = self.state.borrow();
        match state.shaders.get(&shader) {
            Some((stage, _)) if !state.compiled.contains(&shader) => {
                format!("0:1(1): error: {} stage rejected", stage)
            }
            _ => String::new(),
        }
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.shaders.remove(&shader);
        state.compiled.remove(&shader);
        state.calls.push(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> u32 {
        if self.fail_create == Some("program") {
            return 0;
        }
        let mut state = self.state.borrow_mut();
        let name = self.name(&mut state);
        state.programs.insert(name, Vec::new());
        name
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(attached) = self.state.borrow_mut().programs.get_mut(&program) {
            attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        if let Some(attached) = state.programs.get_mut(&program) {
            attached.retain(|s| *s != shader);
        }
        state.calls.push(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        let all_compiled = state
            .programs
            .get(&program)
            .map(|attached| attached.len() == 2 && attached.iter().all(|s| state.compiled.contains(s)))
            .unwrap_or(false);
        if all_compiled && !self.fail_link {
            state.linked.insert(program);
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state.borrow().linked.contains(&program)
    }

    fn validate_program(&self, _program: u32) {}

    fn program_validate_status(&self, program: u32) -> bool {
        !self.fail_validate && self.state.borrow().linked.contains(&program)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) && !self.fail_validate {
            String::new()
        } else {
            "error: program rejected".to_string()
        }
    }

    fn use_program(&self, program: u32) {
        self.state.borrow_mut().calls.push(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        state.linked.remove(&program);
        state.calls.push(Call::DeleteProgram(program));
    }

    fn gen_buffer(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        let name = self.name(&mut state);
        state.buffers.insert(name);
        name
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        let mut state = self.state.borrow_mut();
        match target {
            BufferTarget::Array => state.bound_array = buffer,
            BufferTarget::Element => {
                let vao = state.bound_vao;
                state.vao_elements.insert(vao, buffer);
            }
        }
    }

    fn buffer_vertices(&self, target: BufferTarget, data: &[Vec3]) {
        let mut state = self.state.borrow_mut();
        if target == BufferTarget::Array {
            let buffer = state.bound_array;
            state.vertex_data.insert(buffer, data.to_vec());
        }
    }

    fn buffer_indices(&self, target: BufferTarget, data: &[u32]) {
        let mut state = self.state.borrow_mut();
        if target == BufferTarget::Element {
            let vao = state.bound_vao;
            if let Some(buffer) = state.vao_elements.get(&vao).copied() {
                state.element_data.insert(buffer, data.to_vec());
            }
        }
    }

    fn delete_buffer(&self, buffer: u32) {
        let mut state = self.state.borrow_mut();
        state.buffers.remove(&buffer);
        state.element_data.remove(&buffer);
        state.vertex_data.remove(&buffer);
    }

    fn gen_vertex_array(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        let name = self.name(&mut state);
        state.vertex_arrays.insert(name);
        name
    }

    fn bind_vertex_array(&self, vao: u32) {
        let mut state = self.state.borrow_mut();
        state.bound_vao = vao;
        state.calls.push(Call::BindVertexArray(vao));
    }

    fn vertex_attrib_f32(&self, index: u32, components: i32) {
        self.state
            .borrow_mut()
            .calls
            .push(Call::VertexAttrib { index, components });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.state.borrow_mut().calls.push(Call::EnableAttrib(index));
    }

    fn delete_vertex_array(&self, vao: u32) {
        let mut state = self.state.borrow_mut();
        state.vertex_arrays.remove(&vao);
        state.vao_elements.remove(&vao);
    }

    fn clear_color(&self, color: ClearColor) {
        self.state.borrow_mut().calls.push(Call::ClearColor(color));
    }

    fn clear_color_buffer(&self) {
        self.state.borrow_mut().calls.push(Call::Clear);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.state
            .borrow_mut()
            .calls
            .push(Call::Viewport(x, y, width, height));
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        let tris = triangles(first as u32..(first + count) as u32);
        self.state.borrow_mut().calls.push(Call::Draw(tris));
    }

    fn draw_indexed_triangles(&self, count: i32) {
        let mut state = self.state.borrow_mut();
        let vao = state.bound_vao;
        let indices = state
            .vao_elements
            .get(&vao)
            .and_then(|ebo| state.element_data.get(ebo))
            .map(|data| data.iter().copied().take(count as usize).collect::<Vec<_>>())
            .unwrap_or_default();
        state.calls.push(Call::Draw(triangles(indices.into_iter())));
    }
}
