use std::path::{Path, PathBuf};

use crate::core::tile_providers::OnlineRasterTileProvider;
use crate::traits::{MapRenderer, MapTileProvider, TileLayerId};

/// Legend shown in the overlay, slot number first
pub const PROVIDER_LEGEND: [(u8, &str); 5] = [
    (0, "disable"),
    (1, "CycleMap"),
    (2, "Mapnik"),
    (3, "Vector maps"),
    (4, "Hillshade"),
];

/// What an activation did to the layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Unbound,
    Bound(String),
    /// Slot exists in the legend but has no provider behind it
    Unimplemented,
}

/// Binds tile sources to layers by slot number
#[derive(Debug, Clone)]
pub struct TileProviderSwitchboard {
    cache_dir: PathBuf,
}

impl TileProviderSwitchboard {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    /// Digit keys target the base layer, or overlay 0 while Alt is held
    pub const fn layer_for(alternate: bool) -> TileLayerId {
        if alternate {
            TileLayerId::MapOverlay0
        } else {
            TileLayerId::RasterMap
        }
    }

    fn online_provider(&self, slot: u8) -> Option<OnlineRasterTileProvider> {
        let mut provider = match slot {
            1 => OnlineRasterTileProvider::cycle_map(),
            2 => OnlineRasterTileProvider::mapnik(),
            _ => return None,
        };
        provider.set_local_cache_path(&self.cache_dir);
        Some(provider)
    }

    /// Bind the provider behind `slot` to `layer`.
    ///
    /// Slot 0 clears the layer. Slots without a provider leave the layer untouched.
    pub fn activate(&self, renderer: &mut dyn MapRenderer, layer: TileLayerId, slot: u8) -> Activation {
        if slot == 0 {
            renderer.set_tile_provider(layer, None);
            return Activation::Unbound;
        }
        match self.online_provider(slot) {
            Some(provider) => {
                let name = provider.name().to_string();
                renderer.set_tile_provider(layer, Some(Box::new(provider)));
                Activation::Bound(name)
            }
            None => {
                log::warn!("tile provider slot {} is not implemented", slot);
                Activation::Unimplemented
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_for_modifier() {
        assert_eq!(TileProviderSwitchboard::layer_for(false), TileLayerId::RasterMap);
        assert_eq!(TileProviderSwitchboard::layer_for(true), TileLayerId::MapOverlay0);
    }

    #[test]
    fn test_online_provider_gets_cache_dir() {
        let switchboard = TileProviderSwitchboard::new(Path::new("/var/cache/tiles"));
        let provider = switchboard.online_provider(2).map(|p| p.cache_path().map(Path::to_path_buf));
        assert_eq!(provider, Some(Some(PathBuf::from("/var/cache/tiles"))));
        assert!(switchboard.online_provider(3).is_none());
    }

    #[test]
    fn test_legend_matches_slots() {
        let switchboard = TileProviderSwitchboard::new(Path::new("."));
        for (slot, label) in PROVIDER_LEGEND.iter().skip(1).take(2) {
            let provider = switchboard.online_provider(*slot).map(|p| p.name().to_string());
            assert_eq!(provider.as_deref(), Some(*label));
        }
    }
}
