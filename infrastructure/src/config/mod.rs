//! Configuration file loading for collab-forum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `FORUM_*` environment variables (`FORUM_TUNING__TEMPERATURE=0.3`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./forum.toml` or `./.forum.toml`
//! 4. Global: `$XDG_CONFIG_HOME/collab-forum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileBehaviorConfig, FileConfig, FileForumConfig, FileLoggingConfig, FileModesConfig,
    FileOutputConfig, FileProviderConfig, FileProvidersConfig, FileReplConfig, FileTuningConfig,
    default_api_key_env,
};
pub use loader::ConfigLoader;
