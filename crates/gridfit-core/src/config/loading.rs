//! Configuration loading and merging logic.
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults**
//! 2. **User config** - `~/.gridfit/config.toml`
//! 3. **Project config** - `./.gridfit/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{GeometryConfig, GridfitConfig, WindowConfig};
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".gridfit";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
/// Missing config files are not errors.
pub fn load_hierarchy() -> Result<GridfitConfig, ConfigError> {
    let mut config = GridfitConfig::default();

    match user_config_path() {
        Ok(path) => {
            if let Some(user) = load_optional(&path)? {
                config = merge_configs(config, user);
            }
        }
        Err(ConfigError::HomeDirUnavailable) => {
            debug!(event = "core.config.user_config_skipped", reason = "no_home_dir");
        }
        Err(e) => return Err(e),
    }

    let project_path = std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    if let Some(project) = load_optional(&project_path)? {
        config = merge_configs(config, project);
    }

    Ok(config)
}

fn user_config_path() -> Result<PathBuf, ConfigError> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
    Ok(home_dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn load_optional(path: &Path) -> Result<Option<GridfitConfig>, ConfigError> {
    match load_config_file(path) {
        Ok(config) => Ok(Some(config)),
        Err(ConfigError::ConfigNotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<GridfitConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let config = toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    debug!(
        event = "core.config.file_loaded",
        path = %path.display()
    );
    Ok(config)
}

/// Merge two configurations, with override_config taking precedence.
pub fn merge_configs(base: GridfitConfig, override_config: GridfitConfig) -> GridfitConfig {
    GridfitConfig {
        geometry: GeometryConfig {
            rounding: override_config.geometry.rounding.or(base.geometry.rounding),
        },
        window: WindowConfig {
            hide_before_resize: override_config
                .window
                .hide_before_resize
                .or(base.window.hide_before_resize),
            match_descendants: override_config
                .window
                .match_descendants
                .or(base.window.match_descendants),
        },
    }
}
