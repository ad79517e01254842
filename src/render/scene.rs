use crate::app::{FrameTime, Lifecycle, WindowControl, WindowState};
use crate::input::InputState;
use crate::render::api::{ClearColor, GraphicsApi};
use crate::render::geometry::{Geometry, GeometryBuffers};
use crate::render::shader::ShaderProgram;
use anyhow::Result;
use std::path::PathBuf;
use winit::keyboard::KeyCode;

/// Holding this key closes the window.
pub const QUIT_KEY: KeyCode = KeyCode::Escape;

/// Everything the scene needs to load itself.
#[derive(Debug, Clone)]
pub struct SceneDesc {
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub clear_color: ClearColor,
    pub geometry: Geometry,
}

/// GPU objects alive between load and unload.
struct Loaded<'gl, G: GraphicsApi + ?Sized> {
    program: ShaderProgram<'gl, G>,
    buffers: GeometryBuffers<'gl, G>,
}

/// One shader program drawing one piece of geometry.
pub struct TriangleScene<'gl, G: GraphicsApi + ?Sized> {
    gl: &'gl G,
    desc: SceneDesc,
    loaded: Option<Loaded<'gl, G>>,
}

impl<'gl, G: GraphicsApi + ?Sized> TriangleScene<'gl, G> {
    pub fn new(gl: &'gl G, desc: SceneDesc) -> Self {
        Self {
            gl,
            desc,
            loaded: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn program_handle(&self) -> Option<u32> {
        self.loaded.as_ref().map(|l| l.program.handle())
    }
}

impl<G: GraphicsApi + ?Sized> Lifecycle for TriangleScene<'_, G> {
    fn on_load(&mut self) -> Result<()> {
        self.gl.clear_color(self.desc.clear_color);

        let buffers = GeometryBuffers::upload(self.gl, &self.desc.geometry);
        let program = ShaderProgram::from_files(
            self.gl,
            &self.desc.vertex_shader,
            &self.desc.fragment_shader,
        )?;

        // Validation depends on bound state, so only report it.
        buffers.bind();
        if let Err(e) = program.validate() {
            log::warn!("{}", e);
        }

        self.loaded = Some(Loaded { program, buffers });
        Ok(())
    }

    fn on_update(&mut self, _time: FrameTime, input: &InputState, control: &mut WindowControl) {
        if input.is_key_down(QUIT_KEY) {
            control.request_close();
        }
    }

    fn on_render(&mut self, _time: FrameTime) {
        let Some(loaded) = &self.loaded else {
            return;
        };
        self.gl.clear_color_buffer();
        loaded.program.set_used();
        loaded.buffers.draw();
    }

    fn on_resize(&mut self, window: WindowState) {
        self.gl.viewport(0, 0, window.width as i32, window.height as i32);
    }

    fn on_unload(&mut self) {
        if let Some(mut loaded) = self.loaded.take() {
            loaded.program.dispose();
            loaded.buffers.release();
        }
    }
}
