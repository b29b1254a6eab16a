//! # Configuration System
//!
//! Hierarchical TOML configuration for gridfit.
//!
//! ## Configuration Hierarchy
//!
//! Later sources override earlier ones:
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.gridfit/config.toml`
//! 3. **Project config** - `./.gridfit/config.toml`
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.gridfit/config.toml
//! [geometry]
//! rounding = "nearest"
//!
//! [window]
//! hide_before_resize = false
//! ```
//!
//! ```rust,no_run
//! use gridfit_core::config::GridfitConfig;
//!
//! fn example() -> Result<(), gridfit_core::errors::ConfigError> {
//!     let config = GridfitConfig::load_hierarchy()?;
//!     let session_config = config.session_config();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;

pub use types::{GeometryConfig, GridfitConfig, SessionConfig, WindowConfig};

impl GridfitConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }
}
