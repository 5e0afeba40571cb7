pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, LogFormat};
