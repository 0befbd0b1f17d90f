pub mod cli;
pub mod config;
pub mod core;
pub mod math;
pub mod traits;

pub use config::{InitialView, ViewerConfig};
