use crate::core::switchboard::PROVIDER_LEGEND;
use crate::math::{tile_delta_to_screen_delta, tile_size_31, AreaI, MAX_ZOOM_LEVEL};
use crate::traits::{FrameStats, MapRenderer, MapRendererConfiguration, TileId, TileLayerId};

/// Vertical distance between overlay text rows, in pixels
pub const LINE_HEIGHT: f32 = 16.0;
/// Left margin of overlay text, in pixels
pub const LEFT_MARGIN: f32 = 8.0;

/// One row of overlay text; `y` is the baseline measured from the top edge
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Screen-space outline of a visible tile, corners in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileQuad {
    pub tile: TileId,
    pub corners: [[f32; 2]; 4],
}

/// Everything the surface needs to paint one frame
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub stats: FrameStats,
    pub wireframe: bool,
    pub fog_color: [f32; 3],
    pub tiles: Vec<TileQuad>,
    pub lines: Vec<OverlayLine>,
}

/// Drives the renderer once per redraw and builds the debug overlay
#[derive(Debug, Default)]
pub struct FrameDriver {
    wireframe: bool,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self { wireframe: false }
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Flip wireframe mode, returns the new value
    pub fn toggle_wireframe(&mut self) -> bool {
        self.wireframe = !self.wireframe;
        self.wireframe
    }

    /// Advance the renderer, produce a frame and lay out the overlay
    pub fn draw(&mut self, renderer: &mut dyn MapRenderer, viewport: &AreaI) -> OverlayFrame {
        renderer.process_rendering();
        let stats = renderer.render_frame();

        let tiles = tile_quads(renderer, viewport);
        let config = renderer.configuration();
        let mut lines: Vec<OverlayLine> = state_lines(config, stats.visible_tiles, self.wireframe)
            .into_iter()
            .enumerate()
            .map(|(row, text)| OverlayLine {
                text,
                x: LEFT_MARGIN,
                y: LINE_HEIGHT * (row + 1) as f32,
            })
            .collect();
        lines.extend(legend_lines(viewport));

        OverlayFrame {
            stats,
            wireframe: self.wireframe,
            fog_color: config.fog_color,
            tiles,
            lines,
        }
    }
}

/// Controller state rows, top of the screen
pub fn state_lines(config: &MapRendererConfiguration, visible_tiles: usize, wireframe: bool) -> Vec<String> {
    vec![
        format!("fov (keys i,k)         : {}", config.field_of_view),
        format!("fog distance (keys r,f): {}", config.fog_distance),
        format!("azimuth (arrows l,r)   : {}", config.azimuth),
        format!("pitch (arrows u,d)     : {}", config.elevation_angle),
        format!(
            "target (keys w,a,s,d)  : {} {}",
            config.target31.x, config.target31.y
        ),
        format!("zoom (mouse wheel)     : {}", config.requested_zoom),
        format!("zoom base              : {}", config.zoom_base),
        format!("zoom fraction          : {}", config.zoom_fraction),
        format!("visible tiles          : {}", visible_tiles),
        format!("wireframe (key x)      : {}", wireframe),
        format!(
            "elevation data (key e) : {}",
            config.has_tile_provider(TileLayerId::ElevationData)
        ),
        format!("use atlases (key z)    : {}", config.texture_atlases_allowed),
        format!("DEM-patches# (keys y,h): {}", config.heightmap_patches_per_side),
        format!("fog density (keys t,g) : {}", config.fog_density),
        format!("fog origin F (keys u,j): {}", config.fog_origin_factor),
        format!("height scale (keys o,l): {}", config.height_scale_factor),
    ]
}

/// Provider legend rows, anchored to the bottom of the viewport
fn legend_lines(viewport: &AreaI) -> Vec<OverlayLine> {
    let height = viewport.height() as f32;
    let rows = std::iter::once("Tile providers (holding alt controls overlay0):".to_string())
        .chain(PROVIDER_LEGEND.iter().map(|(slot, label)| format!("{} - {}", slot, label)));
    let count = PROVIDER_LEGEND.len() + 1;

    rows.enumerate()
        .map(|(row, text)| OverlayLine {
            text,
            x: LEFT_MARGIN,
            y: height - LINE_HEIGHT * (count - row) as f32,
        })
        .collect()
}

/// Project the visible tiles onto the viewport (top-down, rotated by azimuth)
fn tile_quads(renderer: &dyn MapRenderer, viewport: &AreaI) -> Vec<TileQuad> {
    let config = renderer.configuration();
    let zoom = config.zoom_base;
    let tile_size = renderer.scaled_tile_size_on_screen();
    let units = (1u64 << (MAX_ZOOM_LEVEL - zoom)) as f64;
    let tiles_per_side = (1u64 << zoom) as f64;
    let center_x = f64::from(config.target31.x) / units;
    let center_y = f64::from(config.target31.y) / units;
    let tile_31 = f64::from(tile_size_31(zoom));
    let (screen_cx, screen_cy) = viewport.center();

    // Shortest signed distance on the wrapped tile grid
    let wrap = |d: f64| {
        if d > tiles_per_side * 0.5 {
            d - tiles_per_side
        } else if d < -tiles_per_side * 0.5 {
            d + tiles_per_side
        } else {
            d
        }
    };

    renderer
        .visible_tiles()
        .iter()
        .map(|tile| {
            let origin_x = wrap(f64::from(tile.x) - center_x);
            let origin_y = wrap(f64::from(tile.y) - center_y);
            let corner = |ox: f64, oy: f64| {
                let (sx, sy) = tile_delta_to_screen_delta(
                    (origin_x + ox) * tile_31,
                    (origin_y + oy) * tile_31,
                    config.azimuth,
                    zoom,
                    tile_size,
                );
                [screen_cx + sx as f32, screen_cy + sy as f32]
            };
            TileQuad {
                tile: *tile,
                corners: [
                    corner(0.0, 0.0),
                    corner(1.0, 0.0),
                    corner(1.0, 1.0),
                    corner(0.0, 1.0),
                ],
            }
        })
        .collect()
}
