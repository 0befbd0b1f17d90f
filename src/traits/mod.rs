pub mod map_renderer;
pub mod tile_provider;

pub use map_renderer::*;
pub use tile_provider::*;
