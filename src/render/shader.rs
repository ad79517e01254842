use crate::render::api::{GraphicsApi, ShaderStage};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Failed to read shader source {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("Program linking failed: {log}")]
    Link { log: String },
    #[error("Program validation failed: {log}")]
    Validation { log: String },
    #[error("Driver returned no {0} object")]
    ObjectCreation(&'static str),
    #[error("Shader program {0} was already disposed")]
    Disposed(u32),
}

/// A linked vertex + fragment program.
///
/// The program object is released exactly once: by [`ShaderProgram::dispose`]
/// or, failing that, when the value is dropped.
pub struct ShaderProgram<'gl, G: GraphicsApi + ?Sized> {
    gl: &'gl G,
    handle: u32,
    vertex_source: String,
    fragment_source: String,
    disposed: bool,
}

/// A compiled stage; deleted when it goes out of scope.
struct StageObject<'gl, G: GraphicsApi + ?Sized> {
    gl: &'gl G,
    id: u32,
}

impl<G: GraphicsApi + ?Sized> Drop for StageObject<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl<'gl, G: GraphicsApi + ?Sized> ShaderProgram<'gl, G> {
    /// Reads both stages from disk and builds the program.
    pub fn from_files(
        gl: &'gl G,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_source = read_source(vertex_path.as_ref())?;
        let fragment_source = read_source(fragment_path.as_ref())?;
        log::debug!(
            "Loaded shader sources {:?} and {:?}",
            vertex_path.as_ref(),
            fragment_path.as_ref()
        );
        Self::from_sources(gl, vertex_source, fragment_source)
    }

    /// Compiles both stages and links them. On any failure every object
    /// created along the way is deleted before the error is returned.
    pub fn from_sources(
        gl: &'gl G,
        vertex_source: String,
        fragment_source: String,
    ) -> Result<Self, ShaderError> {
        let vertex = Self::compile_stage(gl, ShaderStage::Vertex, &vertex_source)?;
        let fragment = Self::compile_stage(gl, ShaderStage::Fragment, &fragment_source)?;

        let handle = gl.create_program();
        if handle == 0 {
            return Err(ShaderError::ObjectCreation("program"));
        }

        // Owned from here on, so an early return deletes the program.
        let program = ShaderProgram {
            gl,
            handle,
            vertex_source,
            fragment_source,
            disposed: false,
        };

        gl.attach_shader(handle, vertex.id);
        gl.attach_shader(handle, fragment.id);
        gl.link_program(handle);
        let linked = gl.program_link_status(handle);

        // Stages are not needed after linking, whatever the outcome.
        gl.detach_shader(handle, vertex.id);
        gl.detach_shader(handle, fragment.id);
        drop(vertex);
        drop(fragment);

        if !linked {
            let log = gl.program_info_log(handle);
            log::error!("Program linking failed:\n{}", log);
            return Err(ShaderError::Link { log });
        }

        log::info!("Linked shader program {}", handle);
        Ok(program)
    }

    fn compile_stage(
        gl: &'gl G,
        stage: ShaderStage,
        source: &str,
    ) -> Result<StageObject<'gl, G>, ShaderError> {
        let id = gl.create_shader(stage);
        if id == 0 {
            return Err(ShaderError::ObjectCreation("shader"));
        }
        let object = StageObject { gl, id };

        gl.shader_source(id, source);
        gl.compile_shader(id);

        if !gl.shader_compile_status(id) {
            let log = gl.shader_info_log(id);
            log::error!("{} shader compilation failed:\n{}", stage, log);
            return Err(ShaderError::Compile { stage, log });
        }

        Ok(object)
    }

    /// Makes this the current program for subsequent draws. Does nothing
    /// once disposed.
    pub fn set_used(&self) {
        if self.disposed {
            return;
        }
        self.gl.use_program(self.handle);
    }

    /// Checks the program can execute against the current GL state.
    pub fn validate(&self) -> Result<(), ShaderError> {
        if self.disposed {
            return Err(ShaderError::Disposed(self.handle));
        }
        self.gl.validate_program(self.handle);
        if self.gl.program_validate_status(self.handle) {
            Ok(())
        } else {
            Err(ShaderError::Validation {
                log: self.gl.program_info_log(self.handle),
            })
        }
    }

    /// Releases the program object. Further calls do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.gl.delete_program(self.handle);
        self.disposed = true;
        log::debug!("Deleted shader program {}", self.handle);
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }
}

impl<G: GraphicsApi + ?Sized> Drop for ShaderProgram<'_, G> {
    fn drop(&mut self) {
        self.dispose();
    }
}
