//! Where the config file lives, and writing the commented default there.

use std::path::{Path, PathBuf};

use cardstack_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// `<platform config dir>/cardstack/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("cardstack").join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Write the commented default config to `path`, creating parent
/// directories as needed. An existing file is overwritten.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(write_error)?;
    }
    std::fs::write(path, default_config_toml()).map_err(write_error)?;

    info!("wrote default config to {}", path.display());
    Ok(())
}
