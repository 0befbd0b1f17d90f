use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use map_viewer::cli::Cli;
use map_viewer::core::viewer::{INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH};
use map_viewer::core::{AtlasMapRenderer, GpuSurface, InputAdapter, InputEvent, MapViewer};
use map_viewer::ViewerConfig;

const WINDOW_TITLE: &str = "Map viewer : 3D map render tool";

// === Application ===

struct App {
    window: Option<Arc<Window>>,
    surface: Option<GpuSurface>,
    viewer: MapViewer<AtlasMapRenderer>,
    input: InputAdapter,
    show_overlay: bool,
}

impl App {
    fn new(config: &ViewerConfig) -> Self {
        let mut viewer = MapViewer::new(AtlasMapRenderer::new(), config);
        viewer.start(&config.view);

        Self {
            window: None,
            surface: None,
            viewer,
            input: InputAdapter::new(),
            show_overlay: config.show_overlay,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(surface)) = (&self.window, &mut self.surface) else {
            return;
        };
        let frame = self.viewer.draw_frame();
        match surface.render(window, &frame, self.show_overlay) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                surface.reconfigure();
                window.request_redraw();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::PhysicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let surface = match pollster::block_on(GpuSurface::new(window.clone())) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to initialize rendering: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.viewer
            .handle(InputEvent::Resize { width: size.width, height: size.height });
        window.request_redraw();

        self.window = Some(window);
        self.surface = Some(surface);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(surface), Some(window)) = (&mut self.surface, &self.window) {
            surface.on_window_event(window, &event);
        }

        if let WindowEvent::RedrawRequested = event {
            self.redraw(event_loop);
            return;
        }

        let Some(input) = self.input.translate(&event) else {
            return;
        };
        if let InputEvent::Resize { width, height } = input {
            if let Some(surface) = &mut self.surface {
                surface.resize(width, height);
            }
        }

        let response = self.viewer.handle(input);
        if response.exit {
            event_loop.exit();
        } else if response.redraw {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.viewer.take_frame_request() {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ViewerConfig::from_cli(&cli)?;
    log::info!(
        "{} style file(s), {} map data file(s), cache at '{}'",
        config.style_files.len(),
        config.obf_files.len(),
        config.cache_dir.display()
    );
    if let Some(style) = &config.style {
        log::info!("style: {}", style.display());
    }
    match &config.heights_dir {
        Some(dir) => log::info!("elevation data: {}", dir.display()),
        None => log::info!("elevation data: not configured (key e disabled)"),
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&config);

    log::info!("Controls: drag/wheel/WASD to move, arrows to rotate and tilt, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
