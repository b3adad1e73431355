//! Settings loading.
//!
//! Priority (highest first):
//! 1. Environment variables (`FCG__*`, double underscore for nesting)
//! 2. Config file (`~/.config/fcg/config.toml`)
//! 3. Built-in defaults

pub mod settings;

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;

pub use settings::{mask_api_key, AppSettings, PronounMode, Provider, StructureMode};

use crate::error::Result;

/// Loads settings from the default config path plus environment.
pub fn load_settings() -> Result<AppSettings> {
    let settings = build_settings(get_config_path())?;
    settings.validate()?;
    Ok(settings)
}

fn build_settings(config_path: Option<PathBuf>) -> Result<AppSettings> {
    let mut builder = Config::builder();

    if let Some(path) = config_path
        && path.exists()
    {
        builder = builder.add_source(File::from(path));
    }

    // FCG__PROVIDER=openai, FCG__TARGET_WORD_COUNT=200, ...
    builder = builder.add_source(
        Environment::with_prefix("FCG")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: AppSettings = config.try_deserialize()?;
    Ok(settings)
}

/// Platform config directory, e.g. `~/.config/fcg` on Linux.
pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fcg").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Platform data directory, used for the generation history file.
pub fn get_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fcg").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Full path of the settings file.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}
