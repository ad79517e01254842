use crate::app::clock::FrameTime;
use crate::input::InputState;
use anyhow::Result;

/// Current drawable size of the window, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
}

impl WindowState {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Minimised windows report a zero extent.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Requests a callback can make of the window.
#[derive(Debug, Default)]
pub struct WindowControl {
    close_requested: bool,
}

impl WindowControl {
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

/// Callbacks driven by [`crate::app::Driver`].
pub trait Lifecycle {
    /// Allocates GPU resources. An error here is fatal.
    fn on_load(&mut self) -> Result<()>;

    /// Polls input once per frame, before rendering.
    fn on_update(&mut self, time: FrameTime, input: &InputState, control: &mut WindowControl);

    /// Records the frame; presentation is done by the driver.
    fn on_render(&mut self, time: FrameTime);

    fn on_resize(&mut self, window: WindowState);

    /// Releases everything `on_load` allocated.
    fn on_unload(&mut self);
}
