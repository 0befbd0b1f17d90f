use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use walkdir::WalkDir;

use crate::cli::Cli;
use crate::core::tile_providers::HeightmapTileProvider;
use crate::math::PointI;

const STYLE_SUFFIX: &str = ".render.xml";
const OBF_SUFFIX: &str = ".obf";

/// Camera view applied once at startup
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialView {
    pub target_x: i32,
    pub target_y: i32,
    pub zoom: f32,
    pub azimuth: f32,
    pub elevation_angle: f32,
    pub fog_color: [f32; 3],
}

impl InitialView {
    pub fn target31(&self) -> PointI {
        PointI::new(self.target_x, self.target_y)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read view file '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse view file '{}'", path.display()))
    }
}

impl Default for InitialView {
    /// Amsterdam, top-down
    fn default() -> Self {
        Self {
            target_x: 1102430866,
            target_y: 704978668,
            zoom: 12.5,
            azimuth: 0.0,
            elevation_angle: 90.0,
            fog_color: [1.0, 1.0, 1.0],
        }
    }
}

/// Everything resolved from the command line before the window opens
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub style_files: Vec<PathBuf>,
    pub style: Option<PathBuf>,
    pub obf_files: Vec<PathBuf>,
    pub cache_dir: PathBuf,
    pub heights_dir: Option<PathBuf>,
    pub view: InitialView,
    pub show_overlay: bool,
}

impl ViewerConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let style_files = match &cli.styles_path {
            Some(dir) => {
                if !dir.is_dir() {
                    bail!("Style directory '{}' does not exist", dir.display());
                }
                find_files(dir, STYLE_SUFFIX)
            }
            None => Vec::new(),
        };

        let style = match &cli.style {
            Some(name) => Some(resolve_style(&style_files, name)?),
            None => None,
        };

        let obf_files = match &cli.obfs_dir {
            Some(dir) => {
                if !dir.is_dir() {
                    bail!("OBF directory does not exist");
                }
                find_files(dir, OBF_SUFFIX)
            }
            None => {
                let cwd = std::env::current_dir().context("Failed to read current directory")?;
                find_files(&cwd, OBF_SUFFIX)
            }
        };

        let cache_dir = match &cli.cache_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };

        let view = match &cli.view {
            Some(path) => InitialView::load(path)?,
            None => InitialView::default(),
        };

        Ok(Self {
            style_files,
            style,
            obf_files,
            cache_dir,
            heights_dir: cli.heights_dir.clone(),
            view,
            show_overlay: !cli.no_ui,
        })
    }

    /// Where the heightmap provider keeps its index
    pub fn heightmap_index_path(&self) -> PathBuf {
        self.cache_dir.join(HeightmapTileProvider::DEFAULT_INDEX_FILENAME)
    }
}

/// Files under `root` (recursively) whose name ends with `suffix`, sorted
pub fn find_files(root: &Path, suffix: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Style name of a style file: the file name without `.render.xml`
pub fn style_name(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()?.strip_suffix(STYLE_SUFFIX)
}

fn resolve_style(style_files: &[PathBuf], name: &str) -> Result<PathBuf> {
    style_files
        .iter()
        .find(|path| style_name(path).is_some_and(|n| n.eq_ignore_ascii_case(name)))
        .cloned()
        .with_context(|| format!("Failed to resolve style '{}'", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_default_view_is_amsterdam() {
        let view = InitialView::default();
        assert_eq!(view.target31(), PointI::new(1102430866, 704978668));
        assert_eq!(view.zoom, 12.5);
        assert_eq!(view.elevation_angle, 90.0);
    }

    #[test]
    fn test_partial_view_json_uses_defaults() {
        let view: InitialView =
            serde_json::from_str(r#"{"target_x": 1254096891, "target_y": 723769130, "zoom": 8.0}"#)
                .unwrap();
        assert_eq!(view.target31(), PointI::new(1254096891, 723769130));
        assert_eq!(view.zoom, 8.0);
        assert_eq!(view.azimuth, 0.0);
    }

    #[test]
    fn test_unknown_view_field_rejected() {
        let result: std::result::Result<InitialView, _> = serde_json::from_str(r#"{"zom": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_find_files_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("europe");
        fs::create_dir(&nested).unwrap();
        File::create(dir.path().join("world.obf")).unwrap();
        File::create(nested.join("netherlands.obf")).unwrap();
        File::create(nested.join("readme.txt")).unwrap();

        let files = find_files(dir.path(), OBF_SUFFIX);
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().is_some_and(|e| e == "obf")));
    }

    #[test]
    fn test_style_name() {
        assert_eq!(style_name(Path::new("a/default.render.xml")), Some("default"));
        assert_eq!(style_name(Path::new("a/default.xml")), None);
    }

    #[test]
    fn test_missing_style_dir_is_error() {
        let cli = Cli {
            styles_path: Some(PathBuf::from("/definitely/not/here")),
            ..Cli::default()
        };
        let err = ViewerConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_style_resolution() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("nautical.render.xml")).unwrap();
        let obfs = tempfile::tempdir().unwrap();

        let cli = Cli {
            styles_path: Some(dir.path().to_path_buf()),
            style: Some("nautical".to_string()),
            obfs_dir: Some(obfs.path().to_path_buf()),
            cache_dir: Some(PathBuf::from("cache")),
            ..Cli::default()
        };
        let config = ViewerConfig::from_cli(&cli).unwrap();
        assert_eq!(config.style, Some(dir.path().join("nautical.render.xml")));
        assert!(config.obf_files.is_empty());
        assert_eq!(config.heightmap_index_path(), PathBuf::from("cache/heightmap.index"));
        assert_eq!(config.heights_dir, None);

        let cli = Cli {
            style: Some("winter".to_string()),
            ..cli
        };
        let err = ViewerConfig::from_cli(&cli).unwrap_err();
        assert_eq!(err.to_string(), "Failed to resolve style 'winter'");
    }
}
