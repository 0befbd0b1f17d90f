// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "map-viewer")]
#[command(about = "Interactive 3D map viewer for renderer debugging", long_about = None)]
pub struct Cli {
    /// Directory searched recursively for *.render.xml style files
    #[arg(long = "styles-path")]
    pub styles_path: Option<PathBuf>,

    /// Style to resolve among the discovered style files
    #[arg(long = "style")]
    pub style: Option<String>,

    /// Directory searched recursively for *.obf map data (default: current directory)
    #[arg(long = "obfs-dir")]
    pub obfs_dir: Option<PathBuf>,

    /// Tile and heightmap index cache directory
    #[arg(long = "cache-dir")]
    pub cache_dir: Option<PathBuf>,

    /// Directory with elevation data; enables the elevation layer toggle
    #[arg(long = "heights-dir")]
    pub heights_dir: Option<PathBuf>,

    /// JSON file with the initial camera view
    #[arg(long = "view")]
    pub view: Option<PathBuf>,

    /// Hide the debug overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_options() {
        let cli = Cli::parse_from([
            "map-viewer",
            "--styles-path=styles",
            "--style",
            "default",
            "--obfs-dir",
            "maps",
            "--cache-dir",
            "cache",
            "--heights-dir",
            "heights",
            "--view",
            "view.json",
            "--no-ui",
        ]);
        assert_eq!(cli.styles_path, Some(PathBuf::from("styles")));
        assert_eq!(cli.style.as_deref(), Some("default"));
        assert_eq!(cli.obfs_dir, Some(PathBuf::from("maps")));
        assert_eq!(cli.cache_dir, Some(PathBuf::from("cache")));
        assert_eq!(cli.heights_dir, Some(PathBuf::from("heights")));
        assert_eq!(cli.view, Some(PathBuf::from("view.json")));
        assert!(cli.no_ui);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["map-viewer"]);
        assert!(cli.heights_dir.is_none());
        assert!(cli.style.is_none());
        assert!(!cli.no_ui);
    }
}
