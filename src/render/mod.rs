pub mod api;
pub mod geometry;
pub mod gl_backend;
pub mod scene;
pub mod shader;

#[cfg(test)]
mod testing;

pub use api::{BufferTarget, ClearColor, GraphicsApi, ShaderStage};
pub use geometry::{Geometry, GeometryBuffers, GeometryError, GeometryPreset};
pub use gl_backend::{ContextInfo, GlBackend};
pub use scene::{SceneDesc, TriangleScene, QUIT_KEY};
pub use shader::{ShaderError, ShaderProgram};
