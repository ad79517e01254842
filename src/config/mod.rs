pub mod core;
pub mod loader;
pub mod rendering;

pub use self::core::{DemoConfig, WindowConfig, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
pub use loader::{load_or_create_at, load_or_create_config};
pub use rendering::{RenderConfig, ShaderConfig};
