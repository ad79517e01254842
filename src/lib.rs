pub mod app;
pub mod config;
pub mod input;
pub mod platform;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use app::{Driver, Lifecycle, Phase};
pub use config::DemoConfig;
pub use render::{GraphicsApi, ShaderError, ShaderProgram, TriangleScene};
