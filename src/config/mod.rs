//! Export settings
//!
//! Resolution order, lowest precedence first: built-in defaults, the TOML config file, then
//! command-line flags and their environment variables (applied by [`crate::cli`]).

pub mod settings;

pub use settings::{CONFIG_FILE_NAME, Settings, default_config_path};
