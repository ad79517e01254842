use crate::app::clock::FrameTime;
use crate::app::lifecycle::{Lifecycle, WindowControl, WindowState};
use crate::input::InputState;
use anyhow::{Context, Result};
use winit::event::KeyEvent;

/// Where the window is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loaded,
    Running,
    Unloaded,
}

/// What a call to [`Driver::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// The update asked to close; nothing was rendered.
    CloseRequested,
    /// Not loaded, or already unloaded.
    Skipped,
}

/// Something a finished frame can be presented to.
pub trait FrameSurface {
    fn present(&mut self) -> Result<()>;
}

/// Runs a [`Lifecycle`] through load, per-frame update/render and unload,
/// independent of the windowing library.
pub struct Driver<L: Lifecycle> {
    lifecycle: L,
    phase: Phase,
    window: WindowState,
    input: InputState,
    control: WindowControl,
}

impl<L: Lifecycle> Driver<L> {
    pub fn new(lifecycle: L, window: WindowState) -> Self {
        Self {
            lifecycle,
            phase: Phase::Uninitialized,
            window,
            input: InputState::new(),
            control: WindowControl::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn window(&self) -> WindowState {
        self.window
    }

    pub fn lifecycle(&self) -> &L {
        &self.lifecycle
    }

    pub fn close_requested(&self) -> bool {
        self.control.close_requested()
    }

    /// Loads resources and applies the current window size.
    pub fn load(&mut self) -> Result<()> {
        anyhow::ensure!(
            self.phase == Phase::Uninitialized,
            "cannot load from phase {:?}",
            self.phase
        );
        self.lifecycle.on_load().context("Failed to load scene")?;
        self.phase = Phase::Loaded;
        log::info!("Scene loaded");

        if !self.window.is_empty() {
            self.lifecycle.on_resize(self.window);
        }
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.window = WindowState::new(width, height);
        if self.window.is_empty() {
            log::debug!("Ignoring zero-sized resize");
            return;
        }
        if matches!(self.phase, Phase::Loaded | Phase::Running) {
            self.lifecycle.on_resize(self.window);
        }
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        self.input.handle_key_event(event);
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Runs one update and, unless it asked to close, one render followed
    /// by presentation.
    pub fn frame(&mut self, time: FrameTime, surface: &mut dyn FrameSurface) -> Result<FrameOutcome> {
        if !matches!(self.phase, Phase::Loaded | Phase::Running) {
            return Ok(FrameOutcome::Skipped);
        }
        self.phase = Phase::Running;

        self.lifecycle.on_update(time, &self.input, &mut self.control);
        if self.control.close_requested() {
            log::info!("Close requested");
            return Ok(FrameOutcome::CloseRequested);
        }

        self.lifecycle.on_render(time);
        surface.present().context("Failed to present frame")?;
        Ok(FrameOutcome::Presented)
    }

    /// Releases resources once; later calls do nothing.
    pub fn unload(&mut self) {
        if matches!(self.phase, Phase::Loaded | Phase::Running) {
            self.lifecycle.on_unload();
            log::info!("Scene unloaded");
        }
        self.phase = Phase::Unloaded;
    }
}
