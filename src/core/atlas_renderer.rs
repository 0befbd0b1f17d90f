use crate::math::{AreaI, PointI, MAX_ZOOM_LEVEL};
use crate::traits::{
    FrameStats, MapRenderer, MapRendererConfiguration, MapTileProvider, TileId, TileLayerId,
};

/// Reference tile size in pixels at zoom fraction 0
pub const REFERENCE_TILE_SIZE: f32 = 256.0;

const MIN_FIELD_OF_VIEW: f32 = 1.0;
const MAX_FIELD_OF_VIEW: f32 = 179.0;
const MIN_ELEVATION_ANGLE: f32 = 0.0;
const MAX_ELEVATION_ANGLE: f32 = 90.0;
/// Low pitch stretches the footprint; never more than this
const MAX_FOOTPRINT_STRETCH: f32 = 4.0;

/// In-process map renderer
///
/// Owns the camera configuration, applies the engine-side clamping and
/// target wrapping, and keeps the visible tile set up to date. Tile fetching
/// and rasterization are not done here; the viewer paints the tile
/// footprint itself.
#[derive(Debug)]
pub struct AtlasMapRenderer {
    configuration: MapRendererConfiguration,
    window_size: PointI,
    viewport: AreaI,
    visible_tiles: Vec<TileId>,
    visibility_dirty: bool,
    frame_requested: bool,
    frames_rendered: u64,
}

impl AtlasMapRenderer {
    pub fn new() -> Self {
        let mut renderer = Self {
            configuration: MapRendererConfiguration::default(),
            window_size: PointI::default(),
            viewport: AreaI::default(),
            visible_tiles: Vec::new(),
            visibility_dirty: true,
            frame_requested: true,
            frames_rendered: 0,
        };
        renderer.set_zoom(renderer.configuration.requested_zoom);
        renderer
    }

    pub fn window_size(&self) -> PointI {
        self.window_size
    }

    pub fn viewport(&self) -> AreaI {
        self.viewport
    }

    fn invalidate(&mut self) {
        self.visibility_dirty = true;
        self.frame_requested = true;
    }

    /// Tiles at `zoom_base` whose centers fall inside the circular footprint
    /// around the target. The footprint covers the viewport diagonal and is
    /// stretched when the camera looks towards the horizon.
    fn compute_visible_tiles(&self) -> Vec<TileId> {
        let config = &self.configuration;
        let tile_size = self.scaled_tile_size_on_screen();
        let width = self.viewport.width().max(0) as f32;
        let height = self.viewport.height().max(0) as f32;
        if tile_size <= f32::EPSILON || width == 0.0 || height == 0.0 {
            return Vec::new();
        }

        let elevation = config.elevation_angle.to_radians().sin().max(1.0 / MAX_FOOTPRINT_STRETCH);
        let radius = (width.hypot(height) * 0.5 / elevation / tile_size) as f64;

        let zoom = config.zoom_base;
        let shift = MAX_ZOOM_LEVEL - zoom;
        let tiles_per_side = 1i64 << zoom;
        let center_x = f64::from(config.target31.x) / (1u64 << shift) as f64;
        let center_y = f64::from(config.target31.y) / (1u64 << shift) as f64;

        let span = radius.ceil() as i64;
        let reach = radius + std::f64::consts::FRAC_1_SQRT_2;
        let (x_range, y_range) = if 2 * span + 1 >= tiles_per_side {
            ((0, tiles_per_side - 1), (0, tiles_per_side - 1))
        } else {
            let cx = center_x.floor() as i64;
            let cy = center_y.floor() as i64;
            ((cx - span, cx + span), (cy - span, cy + span))
        };
        let whole_world = x_range == (0, tiles_per_side - 1);

        let mut tiles = Vec::new();
        for ty in y_range.0..=y_range.1 {
            for tx in x_range.0..=x_range.1 {
                let dx = tx as f64 + 0.5 - center_x;
                let dy = ty as f64 + 0.5 - center_y;
                if !whole_world && dx.hypot(dy) > reach {
                    continue;
                }
                tiles.push(TileId {
                    zoom,
                    x: tx.rem_euclid(tiles_per_side) as i32,
                    y: ty.rem_euclid(tiles_per_side) as i32,
                });
            }
        }
        tiles
    }
}

impl Default for AtlasMapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MapRenderer for AtlasMapRenderer {
    fn configuration(&self) -> &MapRendererConfiguration {
        &self.configuration
    }

    fn set_target(&mut self, target31: PointI) {
        self.configuration.target31 = target31.wrapped31();
        self.invalidate();
    }

    fn set_zoom(&mut self, zoom: f32) {
        let zoom = zoom.clamp(0.0, MAX_ZOOM_LEVEL as f32);
        let zoom_base = (zoom.floor() as u32).min(MAX_ZOOM_LEVEL);
        self.configuration.requested_zoom = zoom;
        self.configuration.zoom_base = zoom_base;
        self.configuration.zoom_fraction = zoom - zoom_base as f32;
        self.invalidate();
    }

    fn set_azimuth(&mut self, azimuth: f32) {
        self.configuration.azimuth = azimuth;
        self.invalidate();
    }

    fn set_elevation_angle(&mut self, elevation_angle: f32) {
        self.configuration.elevation_angle =
            elevation_angle.clamp(MIN_ELEVATION_ANGLE, MAX_ELEVATION_ANGLE);
        self.invalidate();
    }

    fn set_distance_to_fog(&mut self, fog_distance: f32) {
        self.configuration.fog_distance = fog_distance.max(0.0);
        self.frame_requested = true;
    }

    fn set_fog_density(&mut self, fog_density: f32) {
        self.configuration.fog_density = fog_density.max(0.0);
        self.frame_requested = true;
    }

    fn set_fog_origin_factor(&mut self, fog_origin_factor: f32) {
        self.configuration.fog_origin_factor = fog_origin_factor.max(0.0);
        self.frame_requested = true;
    }

    fn set_fog_color(&mut self, color: [f32; 3]) {
        self.configuration.fog_color = color.map(|c| c.clamp(0.0, 1.0));
        self.frame_requested = true;
    }

    fn set_field_of_view(&mut self, field_of_view: f32) {
        self.configuration.field_of_view = field_of_view.clamp(MIN_FIELD_OF_VIEW, MAX_FIELD_OF_VIEW);
        self.invalidate();
    }

    fn set_height_scale_factor(&mut self, factor: f32) {
        self.configuration.height_scale_factor = factor;
        self.frame_requested = true;
    }

    fn set_heightmap_patches_per_side(&mut self, patches: i32) {
        self.configuration.heightmap_patches_per_side = patches.max(1);
        self.frame_requested = true;
    }

    fn set_texture_atlases_usage_permit(&mut self, allowed: bool) {
        self.configuration.texture_atlases_allowed = allowed;
        self.frame_requested = true;
    }

    fn set_tile_provider(&mut self, layer: TileLayerId, provider: Option<Box<dyn MapTileProvider>>) {
        match &provider {
            Some(p) => {
                log::info!("{:?}: bound tile provider '{}'", layer, p.name());
                if let Some(data) = p.data_path() {
                    log::info!("{:?}: data from '{}'", layer, data.display());
                }
                if let Some(cache) = p.cache_path() {
                    log::info!("{:?}: cache at '{}'", layer, cache.display());
                }
            }
            None => log::info!("{:?}: tile provider removed", layer),
        }
        // Replacing the slot drops the previous provider
        self.configuration.tile_providers[layer.index()] = provider;
        self.frame_requested = true;
    }

    fn set_window_size(&mut self, size: PointI) {
        self.window_size = size;
        self.invalidate();
    }

    fn set_viewport(&mut self, viewport: AreaI) {
        self.viewport = viewport;
        self.invalidate();
    }

    fn scaled_tile_size_on_screen(&self) -> f32 {
        REFERENCE_TILE_SIZE * self.configuration.zoom_fraction.exp2()
    }

    fn visible_tiles(&self) -> &[TileId] {
        &self.visible_tiles
    }

    fn process_rendering(&mut self) {
        if self.visibility_dirty {
            self.visible_tiles = self.compute_visible_tiles();
            self.visibility_dirty = false;
            log::debug!(
                "visible tiles: {} at zoom {}",
                self.visible_tiles.len(),
                self.configuration.zoom_base
            );
        }
    }

    fn render_frame(&mut self) -> FrameStats {
        self.frames_rendered += 1;
        FrameStats {
            frame_number: self.frames_rendered,
            visible_tiles: self.visible_tiles.len(),
        }
    }

    fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tile_providers::OnlineRasterTileProvider;
    use approx::assert_relative_eq;

    fn renderer_with_viewport() -> AtlasMapRenderer {
        let mut renderer = AtlasMapRenderer::new();
        renderer.set_window_size(PointI::new(800, 600));
        renderer.set_viewport(AreaI::new(0, 0, 600, 800));
        renderer
    }

    #[test]
    fn test_zoom_split_into_base_and_fraction() {
        let mut renderer = AtlasMapRenderer::new();
        renderer.set_zoom(12.5);
        let config = renderer.configuration();
        assert_eq!(config.zoom_base, 12);
        assert_relative_eq!(config.zoom_fraction, 0.5);
        assert_relative_eq!(config.requested_zoom, 12.5);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut renderer = AtlasMapRenderer::new();
        renderer.set_zoom(40.0);
        assert_eq!(renderer.configuration().zoom_base, 31);
        assert_relative_eq!(renderer.configuration().zoom_fraction, 0.0);
        renderer.set_zoom(-3.0);
        assert_eq!(renderer.configuration().zoom_base, 0);
    }

    #[test]
    fn test_target_wraps() {
        let mut renderer = AtlasMapRenderer::new();
        renderer.set_target(PointI::new(-10, i32::MIN));
        assert_eq!(renderer.configuration().target31, PointI::new(i32::MAX - 9, 0));
    }

    #[test]
    fn test_scaled_tile_size_follows_fraction() {
        let mut renderer = AtlasMapRenderer::new();
        renderer.set_zoom(3.0);
        assert_relative_eq!(renderer.scaled_tile_size_on_screen(), 256.0);
        renderer.set_zoom(3.5);
        assert_relative_eq!(renderer.scaled_tile_size_on_screen(), 256.0 * 2f32.sqrt(), epsilon = 1e-3);
    }

    #[test]
    fn test_engine_clamps_parameters() {
        let mut renderer = AtlasMapRenderer::new();
        renderer.set_heightmap_patches_per_side(-4);
        renderer.set_distance_to_fog(-1.0);
        renderer.set_elevation_angle(120.0);
        renderer.set_field_of_view(0.0);
        let config = renderer.configuration();
        assert_eq!(config.heightmap_patches_per_side, 1);
        assert_eq!(config.fog_distance, 0.0);
        assert_eq!(config.elevation_angle, 90.0);
        assert_eq!(config.field_of_view, 1.0);
    }

    #[test]
    fn test_visible_tiles_cover_whole_world_at_low_zoom() {
        let mut renderer = renderer_with_viewport();
        renderer.set_zoom(1.0);
        renderer.process_rendering();
        assert_eq!(renderer.visible_tiles().len(), 4);
    }

    #[test]
    fn test_visible_tiles_around_target() {
        let mut renderer = renderer_with_viewport();
        renderer.set_target(PointI::new(1102430866, 704978668));
        renderer.set_zoom(12.0);
        renderer.process_rendering();

        let tiles = renderer.visible_tiles();
        assert!(!tiles.is_empty());
        let target_tile = TileId {
            zoom: 12,
            x: 1102430866 >> 19,
            y: 704978668 >> 19,
        };
        assert!(tiles.contains(&target_tile));
        assert!(tiles.iter().all(|t| t.zoom == 12));
    }

    #[test]
    fn test_low_pitch_sees_more_tiles() {
        let mut renderer = renderer_with_viewport();
        renderer.set_target(PointI::new(1102430866, 704978668));
        renderer.set_zoom(12.0);
        renderer.process_rendering();
        let top_down = renderer.visible_tiles().len();

        renderer.set_elevation_angle(20.0);
        renderer.process_rendering();
        assert!(renderer.visible_tiles().len() > top_down);
    }

    #[test]
    fn test_empty_viewport_sees_nothing() {
        let mut renderer = AtlasMapRenderer::new();
        renderer.process_rendering();
        assert!(renderer.visible_tiles().is_empty());
    }

    #[test]
    fn test_frame_request_is_consumed() {
        let mut renderer = AtlasMapRenderer::new();
        assert!(renderer.take_frame_request());
        assert!(!renderer.take_frame_request());
        renderer.set_azimuth(10.0);
        assert!(renderer.take_frame_request());
    }

    #[test]
    fn test_tile_provider_replacement() {
        let mut renderer = AtlasMapRenderer::new();
        renderer.set_tile_provider(
            TileLayerId::RasterMap,
            Some(Box::new(OnlineRasterTileProvider::cycle_map())),
        );
        renderer.set_tile_provider(
            TileLayerId::RasterMap,
            Some(Box::new(OnlineRasterTileProvider::mapnik())),
        );
        let bound = renderer.configuration().tile_provider(TileLayerId::RasterMap);
        assert_eq!(bound.map(|p| p.name()), Some("Mapnik"));
        assert!(!renderer.configuration().has_tile_provider(TileLayerId::MapOverlay0));
    }

    #[test]
    fn test_render_frame_counts() {
        let mut renderer = renderer_with_viewport();
        renderer.set_zoom(1.0);
        renderer.process_rendering();
        assert_eq!(renderer.render_frame().frame_number, 1);
        let stats = renderer.render_frame();
        assert_eq!(stats.frame_number, 2);
        assert_eq!(stats.visible_tiles, 4);
    }
}
