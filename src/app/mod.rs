//! Window lifecycle, decoupled from the windowing library.

pub mod clock;
pub mod driver;
pub mod lifecycle;

pub use clock::{FrameClock, FrameTime};
pub use driver::{Driver, FrameOutcome, FrameSurface, Phase};
pub use lifecycle::{Lifecycle, WindowControl, WindowState};
