use super::tile_provider::MapTileProvider;
use crate::math::{AreaI, PointI};

/// Layer a tile provider can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileLayerId {
    RasterMap,
    MapOverlay0,
    ElevationData,
}

impl TileLayerId {
    pub const ALL: [TileLayerId; 3] = [
        TileLayerId::RasterMap,
        TileLayerId::MapOverlay0,
        TileLayerId::ElevationData,
    ];

    pub const fn index(self) -> usize {
        match self {
            TileLayerId::RasterMap => 0,
            TileLayerId::MapOverlay0 => 1,
            TileLayerId::ElevationData => 2,
        }
    }
}

/// Tile address at a given zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub zoom: u32,
    pub x: i32,
    pub y: i32,
}

/// Result of one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame_number: u64,
    pub visible_tiles: usize,
}

/// Live renderer configuration (the camera state)
///
/// Owned by the renderer; callers read it and request changes through the
/// setters on [`MapRenderer`].
#[derive(Debug)]
pub struct MapRendererConfiguration {
    pub target31: PointI,
    pub requested_zoom: f32,
    pub zoom_base: u32,
    pub zoom_fraction: f32,
    pub azimuth: f32,
    pub elevation_angle: f32,
    pub fog_distance: f32,
    pub fog_density: f32,
    pub fog_origin_factor: f32,
    pub fog_color: [f32; 3],
    pub field_of_view: f32,
    pub height_scale_factor: f32,
    pub heightmap_patches_per_side: i32,
    pub texture_atlases_allowed: bool,
    pub tile_providers: [Option<Box<dyn MapTileProvider>>; 3],
}

impl MapRendererConfiguration {
    pub fn tile_provider(&self, layer: TileLayerId) -> Option<&dyn MapTileProvider> {
        self.tile_providers[layer.index()].as_deref()
    }

    pub fn has_tile_provider(&self, layer: TileLayerId) -> bool {
        self.tile_providers[layer.index()].is_some()
    }
}

impl Default for MapRendererConfiguration {
    fn default() -> Self {
        Self {
            target31: PointI::default(),
            requested_zoom: 0.0,
            zoom_base: 0,
            zoom_fraction: 0.0,
            azimuth: 0.0,
            elevation_angle: 90.0,
            fog_distance: 400.0,
            fog_density: 1.9,
            fog_origin_factor: 0.36,
            fog_color: [1.0, 1.0, 1.0],
            field_of_view: 16.5,
            height_scale_factor: 1.0,
            heightmap_patches_per_side: 24,
            texture_atlases_allowed: true,
            tile_providers: [None, None, None],
        }
    }
}

/// Map rendering engine driven by the viewer
///
/// Single-threaded: every call happens on the event loop thread.
pub trait MapRenderer {
    /// Current configuration
    fn configuration(&self) -> &MapRendererConfiguration;

    fn set_target(&mut self, target31: PointI);
    fn set_zoom(&mut self, zoom: f32);
    fn set_azimuth(&mut self, azimuth: f32);
    fn set_elevation_angle(&mut self, elevation_angle: f32);
    fn set_distance_to_fog(&mut self, fog_distance: f32);
    fn set_fog_density(&mut self, fog_density: f32);
    fn set_fog_origin_factor(&mut self, fog_origin_factor: f32);
    fn set_fog_color(&mut self, color: [f32; 3]);
    fn set_field_of_view(&mut self, field_of_view: f32);
    fn set_height_scale_factor(&mut self, factor: f32);
    fn set_heightmap_patches_per_side(&mut self, patches: i32);
    fn set_texture_atlases_usage_permit(&mut self, allowed: bool);

    /// Bind `provider` to `layer`, releasing whatever was bound before.
    /// `None` leaves the layer empty.
    fn set_tile_provider(&mut self, layer: TileLayerId, provider: Option<Box<dyn MapTileProvider>>);

    fn set_window_size(&mut self, size: PointI);
    fn set_viewport(&mut self, viewport: AreaI);

    /// Pixels covered by one tile at the current zoom
    fn scaled_tile_size_on_screen(&self) -> f32;

    /// Tiles intersecting the current view
    fn visible_tiles(&self) -> &[TileId];

    /// Advance internal state (visibility, pending resources)
    fn process_rendering(&mut self);

    /// Produce one frame
    fn render_frame(&mut self) -> FrameStats;

    /// Returns true once after a configuration change asked for a new frame
    fn take_frame_request(&mut self) -> bool {
        false
    }
}
