//! Configuration file loading for codecrew
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CODECREW_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./codecrew.toml` or `./.codecrew.toml`
//! 4. Global: `$XDG_CONFIG_HOME/codecrew/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileConversationConfig, FileExecutionConfig, FileLlmConfig,
    FileOutputConfig, FileOutputFormat, FileParticipantConfig,
};
pub use loader::ConfigLoader;
