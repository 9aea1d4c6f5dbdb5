#[cfg(feature = "cli")]
pub mod cli;
pub mod content_config;

pub use content_config::{BackendConfig, ContentConfig, ImageConfig, OutputConfig};
