use std::path::Path;

use map_viewer::core::{Activation, TileProviderSwitchboard};
use map_viewer::math::{AreaI, PointI};
use map_viewer::traits::{
    FrameStats, MapRenderer, MapRendererConfiguration, MapTileProvider, TileId, TileLayerId,
};

/// Mock renderer that only tracks layer bindings
#[derive(Default)]
struct MockRenderer {
    config: MapRendererConfiguration,
    bind_calls: Vec<(TileLayerId, Option<String>)>,
}

impl MockRenderer {
    fn bound_name(&self, layer: TileLayerId) -> Option<&str> {
        self.config.tile_provider(layer).map(|p| p.name())
    }
}

impl MapRenderer for MockRenderer {
    fn configuration(&self) -> &MapRendererConfiguration {
        &self.config
    }

    fn set_target(&mut self, target31: PointI) {
        self.config.target31 = target31;
    }
    fn set_zoom(&mut self, zoom: f32) {
        self.config.requested_zoom = zoom;
    }
    fn set_azimuth(&mut self, _azimuth: f32) {}
    fn set_elevation_angle(&mut self, _elevation_angle: f32) {}
    fn set_distance_to_fog(&mut self, _fog_distance: f32) {}
    fn set_fog_density(&mut self, _fog_density: f32) {}
    fn set_fog_origin_factor(&mut self, _fog_origin_factor: f32) {}
    fn set_fog_color(&mut self, _color: [f32; 3]) {}
    fn set_field_of_view(&mut self, _field_of_view: f32) {}
    fn set_height_scale_factor(&mut self, _factor: f32) {}
    fn set_heightmap_patches_per_side(&mut self, _patches: i32) {}
    fn set_texture_atlases_usage_permit(&mut self, _allowed: bool) {}

    fn set_tile_provider(&mut self, layer: TileLayerId, provider: Option<Box<dyn MapTileProvider>>) {
        self.bind_calls
            .push((layer, provider.as_ref().map(|p| p.name().to_string())));
        self.config.tile_providers[layer.index()] = provider;
    }

    fn set_window_size(&mut self, _size: PointI) {}
    fn set_viewport(&mut self, _viewport: AreaI) {}

    fn scaled_tile_size_on_screen(&self) -> f32 {
        256.0
    }

    fn visible_tiles(&self) -> &[TileId] {
        &[]
    }

    fn process_rendering(&mut self) {}

    fn render_frame(&mut self) -> FrameStats {
        FrameStats::default()
    }
}

fn switchboard() -> TileProviderSwitchboard {
    TileProviderSwitchboard::new(Path::new("/tmp/tiles"))
}

#[test]
fn test_slot_zero_clears_layer() {
    let mut renderer = MockRenderer::default();
    let board = switchboard();

    board.activate(&mut renderer, TileLayerId::RasterMap, 2);
    let outcome = board.activate(&mut renderer, TileLayerId::RasterMap, 0);

    assert_eq!(outcome, Activation::Unbound);
    assert!(!renderer.config.has_tile_provider(TileLayerId::RasterMap));
}

#[test]
fn test_slot_zero_on_empty_layer_still_clears() {
    let mut renderer = MockRenderer::default();
    let board = switchboard();

    let outcome = board.activate(&mut renderer, TileLayerId::MapOverlay0, 0);

    assert_eq!(outcome, Activation::Unbound);
    assert_eq!(renderer.bind_calls, vec![(TileLayerId::MapOverlay0, None)]);
}

#[test]
fn test_later_activation_replaces_earlier() {
    let mut renderer = MockRenderer::default();
    let board = switchboard();

    assert_eq!(
        board.activate(&mut renderer, TileLayerId::RasterMap, 1),
        Activation::Bound("CycleMap".to_string())
    );
    assert_eq!(
        board.activate(&mut renderer, TileLayerId::RasterMap, 2),
        Activation::Bound("Mapnik".to_string())
    );

    assert_eq!(renderer.bound_name(TileLayerId::RasterMap), Some("Mapnik"));
}

// Slot 3 is listed in the overlay legend but has no provider: the previous
// binding is kept as-is rather than cleared.
#[test]
fn test_unimplemented_slot_keeps_previous_binding() {
    let mut renderer = MockRenderer::default();
    let board = switchboard();

    board.activate(&mut renderer, TileLayerId::RasterMap, 1);
    let outcome = board.activate(&mut renderer, TileLayerId::RasterMap, 3);

    assert_eq!(outcome, Activation::Unimplemented);
    assert_eq!(renderer.bound_name(TileLayerId::RasterMap), Some("CycleMap"));
    assert_eq!(renderer.bind_calls.len(), 1);
}

#[test]
fn test_layers_are_independent() {
    let mut renderer = MockRenderer::default();
    let board = switchboard();

    board.activate(&mut renderer, TileProviderSwitchboard::layer_for(false), 1);
    board.activate(&mut renderer, TileProviderSwitchboard::layer_for(true), 2);

    assert_eq!(renderer.bound_name(TileLayerId::RasterMap), Some("CycleMap"));
    assert_eq!(renderer.bound_name(TileLayerId::MapOverlay0), Some("Mapnik"));
    assert!(!renderer.config.has_tile_provider(TileLayerId::ElevationData));
}
