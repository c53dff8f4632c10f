//! Parsing and validation of `hls.toml` synthesis configuration files.
//!
//! The configuration supplies the global fixed-point defaults (overflow mode,
//! sizing mode, default radix), selects the control-path builder, and tunes
//! control-word column compression.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
