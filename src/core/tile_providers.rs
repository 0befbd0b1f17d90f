use std::path::{Path, PathBuf};

use crate::traits::{MapTileProvider, TileId, TileProviderKind};

/// Online raster tile source description (fetching is the renderer's job)
#[derive(Debug, Clone, PartialEq)]
pub struct OnlineRasterTileProvider {
    id: String,
    url_pattern: String,
    min_zoom: u32,
    max_zoom: u32,
    tile_size: u32,
    local_cache_path: Option<PathBuf>,
}

impl OnlineRasterTileProvider {
    pub fn new(id: &str, url_pattern: &str, min_zoom: u32, max_zoom: u32, tile_size: u32) -> Self {
        Self {
            id: id.to_string(),
            url_pattern: url_pattern.to_string(),
            min_zoom,
            max_zoom,
            tile_size,
            local_cache_path: None,
        }
    }

    /// OpenStreetMap standard style
    pub fn mapnik() -> Self {
        Self::new(
            "Mapnik",
            "https://tile.openstreetmap.org/${zoom}/${x}/${y}.png",
            0,
            19,
            256,
        )
    }

    /// OpenCycleMap
    pub fn cycle_map() -> Self {
        Self::new(
            "CycleMap",
            "http://b.tile.opencyclemap.org/cycle/${zoom}/${x}/${y}.png",
            0,
            16,
            256,
        )
    }

    pub fn set_local_cache_path(&mut self, path: &Path) {
        self.local_cache_path = Some(path.to_path_buf());
    }

    /// Remote URL of `tile`, or `None` outside the supported zoom range
    pub fn tile_url(&self, tile: TileId) -> Option<String> {
        if tile.zoom < self.min_zoom || tile.zoom > self.max_zoom {
            return None;
        }
        Some(
            self.url_pattern
                .replace("${zoom}", &tile.zoom.to_string())
                .replace("${x}", &tile.x.to_string())
                .replace("${y}", &tile.y.to_string()),
        )
    }

    /// Where a fetched tile would be cached on disk
    pub fn cached_tile_path(&self, tile: TileId) -> Option<PathBuf> {
        self.local_cache_path.as_ref().map(|root| {
            root.join(&self.id)
                .join(tile.zoom.to_string())
                .join(tile.x.to_string())
                .join(format!("{}.tile", tile.y))
        })
    }
}

impl MapTileProvider for OnlineRasterTileProvider {
    fn name(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> TileProviderKind {
        TileProviderKind::Raster
    }

    fn tile_size(&self) -> u32 {
        self.tile_size
    }

    fn cache_path(&self) -> Option<&Path> {
        self.local_cache_path.as_deref()
    }
}

/// Elevation provider backed by a directory of heightmap files
#[derive(Debug, Clone, PartialEq)]
pub struct HeightmapTileProvider {
    data_path: PathBuf,
    index_path: PathBuf,
}

impl HeightmapTileProvider {
    pub const DEFAULT_INDEX_FILENAME: &'static str = "heightmap.index";
    const TILE_SIZE: u32 = 32;

    pub fn new(data_path: &Path, index_path: &Path) -> Self {
        Self {
            data_path: data_path.to_path_buf(),
            index_path: index_path.to_path_buf(),
        }
    }

}

impl MapTileProvider for HeightmapTileProvider {
    fn name(&self) -> &str {
        "Heightmap"
    }

    fn kind(&self) -> TileProviderKind {
        TileProviderKind::Elevation
    }

    fn tile_size(&self) -> u32 {
        Self::TILE_SIZE
    }

    fn data_path(&self) -> Option<&Path> {
        Some(&self.data_path)
    }

    fn cache_path(&self) -> Option<&Path> {
        Some(&self.index_path)
    }
}
