mod point;
mod projection;

pub use point::{AreaI, PointI, MAX_ZOOM_LEVEL, TILE_COORD_BITS};
pub use projection::{
    pan_step_31, screen_delta_to_tile_delta, tile_delta_to_screen_delta, tile_size_31,
};
