use std::path::Path;

use crate::core::tile_providers::HeightmapTileProvider;
use crate::math::{pan_step_31, screen_delta_to_tile_delta, PointI};
use crate::traits::{MapRenderer, TileLayerId};

/// Wheel zoom step without / with Shift
pub const ZOOM_STEP: f32 = 0.01;
pub const ZOOM_STEP_SHIFTED: f32 = 0.1;

/// Arrow-key azimuth and pitch step without / with Shift
pub const ROTATE_STEP: f32 = 0.1;
pub const ROTATE_STEP_COARSE: f32 = 1.0;

/// Pan divisors applied to one tile at the current integer zoom.
/// Lowercase keys use the larger divisor.
pub const PAN_DIVISOR_LOWERCASE: i64 = 50;
pub const PAN_DIVISOR_UPPERCASE: i64 = 10;

pub const FOG_DISTANCE_STEP: f32 = 1.0;
pub const FOG_DENSITY_STEP: f32 = 0.01;
pub const FOG_ORIGIN_FACTOR_STEP: f32 = 0.01;
pub const FIELD_OF_VIEW_STEP: f32 = 0.5;
pub const HEIGHT_SCALE_STEP: f32 = 0.1;
pub const HEIGHTMAP_PATCHES_STEP: i32 = 1;

/// Sign of a discrete adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    Increase,
    Decrease,
}

impl Adjust {
    pub const fn signed(self, step: f32) -> f32 {
        match self {
            Adjust::Increase => step,
            Adjust::Decrease => -step,
        }
    }
}

/// Keyboard pan direction in screen terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

/// In-progress mouse drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub origin_x: i32,
    pub origin_y: i32,
    pub origin_target: PointI,
}

/// Outcome of toggling the elevation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationToggle {
    Disabled,
    Enabled,
    Unavailable,
}

/// Translates discrete input into renderer configuration changes.
///
/// Holds no camera state of its own apart from the drag session: every
/// operation reads the renderer's current value and writes the new one back.
/// No clamping happens here.
#[derive(Debug, Default)]
pub struct CameraController {
    drag: Option<DragSession>,
}

impl CameraController {
    /// Controller with no drag in progress
    pub fn new() -> Self {
        Self { drag: None }
    }

    /// Active drag, if any
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Whether a drag session is active
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a drag at a screen position. Ignored while a drag is active.
    pub fn begin_drag(&mut self, renderer: &dyn MapRenderer, x: i32, y: i32) {
        if self.drag.is_some() {
            return;
        }
        self.drag = Some(DragSession {
            origin_x: x,
            origin_y: y,
            origin_target: renderer.configuration().target31,
        });
    }

    /// Move the target so the content follows the cursor. No-op without a drag.
    pub fn update_drag(&self, renderer: &mut dyn MapRenderer, x: i32, y: i32) {
        let Some(session) = self.drag else {
            return;
        };
        let config = renderer.configuration();
        let (tile_dx, tile_dy) = screen_delta_to_tile_delta(
            x.wrapping_sub(session.origin_x),
            y.wrapping_sub(session.origin_y),
            config.azimuth,
            config.zoom_base,
            renderer.scaled_tile_size_on_screen(),
        );
        renderer.set_target(session.origin_target.wrapping_sub(tile_dx, tile_dy));
    }

    /// Close the drag session. Safe to call when none is active.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Wheel zoom: 0.01 per notch, 0.1 with Shift
    pub fn zoom(&self, renderer: &mut dyn MapRenderer, direction: Adjust, shifted: bool) {
        let step = if shifted { ZOOM_STEP_SHIFTED } else { ZOOM_STEP };
        let zoom = renderer.configuration().requested_zoom + direction.signed(step);
        log::debug!("zoom -> {}", zoom);
        renderer.set_zoom(zoom);
    }

    /// Pan by a fraction of one tile at the current integer zoom
    pub fn pan(&self, renderer: &mut dyn MapRenderer, direction: PanDirection, lowercase: bool) {
        let config = renderer.configuration();
        let divisor = if lowercase {
            PAN_DIVISOR_LOWERCASE
        } else {
            PAN_DIVISOR_UPPERCASE
        };
        let step = (pan_step_31(config.requested_zoom) / divisor) as i32;
        let (dx, dy) = match direction {
            PanDirection::Up => (0, step),
            PanDirection::Down => (0, -step),
            PanDirection::Left => (step, 0),
            PanDirection::Right => (-step, 0),
        };
        let target = config.target31.wrapping_sub(dx, dy);
        log::debug!("target -> {} {}", target.x, target.y);
        renderer.set_target(target);
    }

    /// Arrow-key azimuth change: 0.1 degree, 1 degree with Shift
    pub fn rotate(&self, renderer: &mut dyn MapRenderer, direction: Adjust, coarse: bool) {
        let step = if coarse { ROTATE_STEP_COARSE } else { ROTATE_STEP };
        let azimuth = renderer.configuration().azimuth + direction.signed(step);
        log::debug!("azimuth -> {}", azimuth);
        renderer.set_azimuth(azimuth);
    }

    /// Arrow-key pitch change: 0.1 degree, 1 degree with Shift
    pub fn tilt(&self, renderer: &mut dyn MapRenderer, direction: Adjust, coarse: bool) {
        let step = if coarse { ROTATE_STEP_COARSE } else { ROTATE_STEP };
        let angle = renderer.configuration().elevation_angle + direction.signed(step);
        log::debug!("elevation angle -> {}", angle);
        renderer.set_elevation_angle(angle);
    }

    /// Add `delta` to the fog distance
    pub fn nudge_fog_distance(&self, renderer: &mut dyn MapRenderer, delta: f32) {
        let value = renderer.configuration().fog_distance + delta;
        renderer.set_distance_to_fog(value);
    }

    /// Add `delta` to the fog density
    pub fn nudge_fog_density(&self, renderer: &mut dyn MapRenderer, delta: f32) {
        let value = renderer.configuration().fog_density + delta;
        renderer.set_fog_density(value);
    }

    /// Add `delta` to the fog origin factor
    pub fn nudge_fog_origin_factor(&self, renderer: &mut dyn MapRenderer, delta: f32) {
        let value = renderer.configuration().fog_origin_factor + delta;
        renderer.set_fog_origin_factor(value);
    }

    /// Add `delta` degrees to the field of view
    pub fn nudge_field_of_view(&self, renderer: &mut dyn MapRenderer, delta: f32) {
        let value = renderer.configuration().field_of_view + delta;
        renderer.set_field_of_view(value);
    }

    /// Add `delta` to the terrain height scale
    pub fn nudge_height_scale(&self, renderer: &mut dyn MapRenderer, delta: f32) {
        let value = renderer.configuration().height_scale_factor + delta;
        renderer.set_height_scale_factor(value);
    }

    /// Add `delta` heightmap patches per side
    pub fn nudge_heightmap_tessellation(&self, renderer: &mut dyn MapRenderer, delta: i32) {
        let value = renderer.configuration().heightmap_patches_per_side + delta;
        renderer.set_heightmap_patches_per_side(value);
    }

    /// Flip the texture atlas permit
    pub fn toggle_texture_atlases(&self, renderer: &mut dyn MapRenderer) {
        let allowed = !renderer.configuration().texture_atlases_allowed;
        renderer.set_texture_atlases_usage_permit(allowed);
    }

    /// Unbind elevation data if bound, otherwise bind a heightmap provider
    /// when a heights directory was configured.
    pub fn toggle_elevation_layer(
        &self,
        renderer: &mut dyn MapRenderer,
        heights_dir: Option<&Path>,
        cache_index_path: &Path,
    ) -> ElevationToggle {
        if renderer.configuration().has_tile_provider(TileLayerId::ElevationData) {
            renderer.set_tile_provider(TileLayerId::ElevationData, None);
            return ElevationToggle::Disabled;
        }
        match heights_dir {
            Some(dir) => {
                let provider = HeightmapTileProvider::new(dir, cache_index_path);
                renderer.set_tile_provider(TileLayerId::ElevationData, Some(Box::new(provider)));
                ElevationToggle::Enabled
            }
            None => {
                log::warn!("no heights directory configured, elevation data unavailable");
                ElevationToggle::Unavailable
            }
        }
    }
}
