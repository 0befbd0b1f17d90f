use std::path::PathBuf;

use super::camera_controller::{
    Adjust, CameraController, PanDirection, FIELD_OF_VIEW_STEP, FOG_DENSITY_STEP,
    FOG_DISTANCE_STEP, FOG_ORIGIN_FACTOR_STEP, HEIGHTMAP_PATCHES_STEP, HEIGHT_SCALE_STEP,
};
use super::frame_driver::{FrameDriver, OverlayFrame};
use super::input_adapter::{InputEvent, PointerButton, SpecialKey};
use super::switchboard::TileProviderSwitchboard;
use crate::config::{InitialView, ViewerConfig};
use crate::math::{AreaI, PointI};
use crate::traits::{MapRenderer, TileLayerId};

pub const INITIAL_WINDOW_WIDTH: u32 = 800;
pub const INITIAL_WINDOW_HEIGHT: u32 = 600;

/// What the host loop should do after an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputResponse {
    pub redraw: bool,
    pub exit: bool,
}

impl InputResponse {
    pub const NONE: Self = Self { redraw: false, exit: false };
    pub const REDRAW: Self = Self { redraw: true, exit: false };
    pub const EXIT: Self = Self { redraw: false, exit: true };
}

/// Application context: renderer, viewport, drag state and overlay flags.
///
/// Input is handled strictly in delivery order on a single thread.
pub struct MapViewer<R: MapRenderer> {
    renderer: R,
    viewport: AreaI,
    controller: CameraController,
    switchboard: TileProviderSwitchboard,
    frame_driver: FrameDriver,
    heights_dir: Option<PathBuf>,
    heightmap_index_path: PathBuf,
}

impl<R: MapRenderer> MapViewer<R> {
    pub fn new(renderer: R, config: &ViewerConfig) -> Self {
        Self {
            renderer,
            viewport: AreaI::default(),
            controller: CameraController::new(),
            switchboard: TileProviderSwitchboard::new(&config.cache_dir),
            frame_driver: FrameDriver::new(),
            heights_dir: config.heights_dir.clone(),
            heightmap_index_path: config.heightmap_index_path(),
        }
    }

    /// Bind the default base layer, size the viewport and apply the start view
    pub fn start(&mut self, view: &InitialView) {
        self.switchboard
            .activate(&mut self.renderer, TileLayerId::RasterMap, 1);
        self.resize(INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT);
        self.renderer.set_fog_color(view.fog_color);
        self.renderer.set_target(view.target31());
        self.renderer.set_zoom(view.zoom);
        self.renderer.set_azimuth(view.azimuth);
        self.renderer.set_elevation_angle(view.elevation_angle);
        log::info!(
            "view: target {} {}, zoom {}, azimuth {}, pitch {}",
            view.target_x,
            view.target_y,
            view.zoom,
            view.azimuth,
            view.elevation_angle
        );
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn viewport(&self) -> AreaI {
        self.viewport
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn frame_driver(&self) -> &FrameDriver {
        &self.frame_driver
    }

    /// Viewport and renderer window state change together
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.min(i32::MAX as u32) as i32;
        let height = height.min(i32::MAX as u32) as i32;
        self.viewport.right = width;
        self.viewport.bottom = height;
        self.renderer.set_window_size(PointI::new(width, height));
        self.renderer.set_viewport(self.viewport);
    }

    /// Draw one frame and return what the surface should paint
    pub fn draw_frame(&mut self) -> OverlayFrame {
        self.frame_driver.draw(&mut self.renderer, &self.viewport)
    }

    /// Whether the renderer asked for a new frame since the last call
    pub fn take_frame_request(&mut self) -> bool {
        self.renderer.take_frame_request()
    }

    pub fn handle(&mut self, event: InputEvent) -> InputResponse {
        match event {
            InputEvent::Quit => InputResponse::EXIT,
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                InputResponse::REDRAW
            }
            InputEvent::MouseDown { button: PointerButton::Left, x, y } => {
                self.controller.begin_drag(&self.renderer, x, y);
                InputResponse::NONE
            }
            InputEvent::MouseUp { button: PointerButton::Left, .. } => {
                self.controller.end_drag();
                InputResponse::NONE
            }
            InputEvent::MouseDown { .. } | InputEvent::MouseUp { .. } => InputResponse::NONE,
            InputEvent::MouseMotion { x, y } => {
                if !self.controller.is_dragging() {
                    return InputResponse::NONE;
                }
                self.controller.update_drag(&mut self.renderer, x, y);
                InputResponse::REDRAW
            }
            InputEvent::Wheel { direction, shift } => {
                self.controller.zoom(&mut self.renderer, direction, shift);
                InputResponse::REDRAW
            }
            InputEvent::Special { key, shift } => {
                let renderer = &mut self.renderer;
                match key {
                    SpecialKey::Left => self.controller.rotate(renderer, Adjust::Increase, shift),
                    SpecialKey::Right => self.controller.rotate(renderer, Adjust::Decrease, shift),
                    SpecialKey::Up => self.controller.tilt(renderer, Adjust::Increase, shift),
                    SpecialKey::Down => self.controller.tilt(renderer, Adjust::Decrease, shift),
                }
                InputResponse::REDRAW
            }
            InputEvent::Char { ch, alt } => self.handle_char(ch, alt),
        }
    }

    fn handle_char(&mut self, ch: char, alt: bool) -> InputResponse {
        let controller = &self.controller;
        let renderer = &mut self.renderer;
        match ch {
            '\x1b' => return InputResponse::EXIT,
            'w' | 'W' => controller.pan(renderer, PanDirection::Up, ch == 'w'),
            's' | 'S' => controller.pan(renderer, PanDirection::Down, ch == 's'),
            'a' | 'A' => controller.pan(renderer, PanDirection::Left, ch == 'a'),
            'd' | 'D' => controller.pan(renderer, PanDirection::Right, ch == 'd'),
            'r' => controller.nudge_fog_distance(renderer, FOG_DISTANCE_STEP),
            'f' => controller.nudge_fog_distance(renderer, -FOG_DISTANCE_STEP),
            't' => controller.nudge_fog_density(renderer, FOG_DENSITY_STEP),
            'g' => controller.nudge_fog_density(renderer, -FOG_DENSITY_STEP),
            'u' => controller.nudge_fog_origin_factor(renderer, FOG_ORIGIN_FACTOR_STEP),
            'j' => controller.nudge_fog_origin_factor(renderer, -FOG_ORIGIN_FACTOR_STEP),
            'i' => controller.nudge_field_of_view(renderer, FIELD_OF_VIEW_STEP),
            'k' => controller.nudge_field_of_view(renderer, -FIELD_OF_VIEW_STEP),
            'o' => controller.nudge_height_scale(renderer, HEIGHT_SCALE_STEP),
            'l' => controller.nudge_height_scale(renderer, -HEIGHT_SCALE_STEP),
            'y' => controller.nudge_heightmap_tessellation(renderer, HEIGHTMAP_PATCHES_STEP),
            'h' => controller.nudge_heightmap_tessellation(renderer, -HEIGHTMAP_PATCHES_STEP),
            'z' => controller.toggle_texture_atlases(renderer),
            'x' => {
                let wireframe = self.frame_driver.toggle_wireframe();
                log::debug!("wireframe: {}", wireframe);
            }
            'e' => {
                let outcome = controller.toggle_elevation_layer(
                    renderer,
                    self.heights_dir.as_deref(),
                    &self.heightmap_index_path,
                );
                log::debug!("elevation layer: {:?}", outcome);
            }
            '0'..='3' => {
                let slot = ch as u8 - b'0';
                let layer = TileProviderSwitchboard::layer_for(alt);
                self.switchboard.activate(renderer, layer, slot);
            }
            _ => return InputResponse::NONE,
        }
        InputResponse::REDRAW
    }
}
