pub mod atlas_renderer;
pub mod camera_controller;
pub mod frame_driver;
pub mod input_adapter;
pub mod surface;
pub mod switchboard;
pub mod tile_providers;
pub mod viewer;

pub use atlas_renderer::AtlasMapRenderer;
pub use camera_controller::{Adjust, CameraController, DragSession, ElevationToggle, PanDirection};
pub use frame_driver::{FrameDriver, OverlayFrame, OverlayLine, TileQuad};
pub use input_adapter::{InputAdapter, InputEvent, PointerButton, SpecialKey};
pub use surface::GpuSurface;
pub use switchboard::{Activation, TileProviderSwitchboard};
pub use tile_providers::{HeightmapTileProvider, OnlineRasterTileProvider};
pub use viewer::{InputResponse, MapViewer};
