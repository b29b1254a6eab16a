//! Default values for configuration types.

use crate::config::types::SessionConfig;
use crate::geometry::RoundingMode;

pub const DEFAULT_HIDE_BEFORE_RESIZE: bool = true;

pub const DEFAULT_MATCH_DESCENDANTS: bool = true;

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::default(),
            hide_before_resize: DEFAULT_HIDE_BEFORE_RESIZE,
            match_descendants: DEFAULT_MATCH_DESCENDANTS,
        }
    }
}
