//! Configuration type definitions.
//!
//! # Example Configuration
//!
//! ```toml
//! [geometry]
//! rounding = "truncate"
//!
//! [window]
//! hide_before_resize = true
//! match_descendants = true
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::RoundingMode;

/// Configuration loaded from TOML config files.
///
/// Every field is optional so that a project file only overrides what it
/// names. Resolved values come from the accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridfitConfig {
    #[serde(default)]
    pub geometry: GeometryConfig,

    #[serde(default)]
    pub window: WindowConfig,
}

/// Pixel translation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// How scaled client lengths are rounded. Default: truncate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounding: Option<RoundingMode>,
}

/// Window handling settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Hide the located window once when the session becomes ready.
    /// Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_before_resize: Option<bool>,

    /// Treat windows of descendant processes as the target's.
    /// Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_descendants: Option<bool>,
}

/// Resolved settings a resize session runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub rounding: RoundingMode,
    pub hide_before_resize: bool,
    pub match_descendants: bool,
}

impl GridfitConfig {
    pub fn rounding(&self) -> RoundingMode {
        self.geometry.rounding.unwrap_or_default()
    }

    pub fn hide_before_resize(&self) -> bool {
        self.window
            .hide_before_resize
            .unwrap_or(super::defaults::DEFAULT_HIDE_BEFORE_RESIZE)
    }

    pub fn match_descendants(&self) -> bool {
        self.window
            .match_descendants
            .unwrap_or(super::defaults::DEFAULT_MATCH_DESCENDANTS)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            rounding: self.rounding(),
            hide_before_resize: self.hide_before_resize(),
            match_descendants: self.match_descendants(),
        }
    }
}
