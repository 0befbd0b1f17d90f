use std::fmt;
use std::path::Path;

/// What a provider feeds into its layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileProviderKind {
    Raster,
    Elevation,
}

/// Tile source bound to a renderer layer
///
/// Once installed, a provider is owned by the renderer. Installing another
/// provider for the same layer drops the previous one.
pub trait MapTileProvider: fmt::Debug {
    /// Human readable source name shown in logs
    fn name(&self) -> &str;

    /// Kind of data produced
    fn kind(&self) -> TileProviderKind;

    /// Edge length of a produced tile in pixels (or samples for elevation)
    fn tile_size(&self) -> u32;

    /// Local directory the provider reads its source data from
    fn data_path(&self) -> Option<&Path> {
        None
    }

    /// Local cache location (tile cache root or index file)
    fn cache_path(&self) -> Option<&Path> {
        None
    }
}
