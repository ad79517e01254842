//! The real window: winit events in, GL frames out.

mod window;

pub use window::DemoWindow;

use crate::app::{Driver, FrameClock, FrameOutcome, WindowState};
use crate::config::DemoConfig;
use crate::render::{Geometry, SceneDesc, TriangleScene};
use anyhow::{Context, Result};
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;

/// Opens the window and runs until it is closed.
pub fn run(config: &DemoConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut window = DemoWindow::new(&event_loop, &config.window, config.rendering.vsync)?;

    let gl = window.load_backend();
    let info = gl.context_info();
    log::info!("OpenGL {} on {} ({})", info.version, info.renderer, info.vendor);
    log::info!("GLSL {}", info.shading_language);

    let desc = SceneDesc {
        vertex_shader: config.shaders.vertex.clone(),
        fragment_shader: config.shaders.fragment.clone(),
        clear_color: config.rendering.clear_color.into(),
        geometry: Geometry::from_preset(config.rendering.geometry),
    };
    let size = window.inner_size();
    let mut driver = Driver::new(
        TriangleScene::new(&gl, desc),
        WindowState::new(size.width, size.height),
    );
    driver.load()?;
    gl.drain_errors("load");

    let mut clock = FrameClock::new();
    let mut failure = None;

    event_loop
        .run(|event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => {
                    window.resize(size.width, size.height);
                    driver.resize(size.width, size.height);
                }
                WindowEvent::KeyboardInput { event, .. } => driver.handle_key_event(&event),
                WindowEvent::Focused(false) => driver.input_mut().reset(),
                WindowEvent::RedrawRequested => match driver.frame(clock.tick(), &mut window) {
                    Ok(FrameOutcome::CloseRequested) => elwt.exit(),
                    Ok(_) => {}
                    Err(e) => {
                        failure = Some(e);
                        elwt.exit();
                    }
                },
                _ => {}
            },
            Event::AboutToWait => window.request_redraw(),
            Event::LoopExiting => {
                driver.unload();
                gl.drain_errors("unload");
            }
            _ => {}
        })
        .context("Event loop terminated with error")?;

    // No-op if LoopExiting already ran.
    driver.unload();

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
