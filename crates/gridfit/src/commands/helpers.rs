use clap::ArgMatches;
use tracing::{error, warn};

use gridfit_core::config::GridfitConfig;
use gridfit_core::{Pid, ResizeSession, RoundingMode, SessionConfig, WindowHandle, platform};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning() -> GridfitConfig {
    match GridfitConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.gridfit/config.toml and ./.gridfit/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            GridfitConfig::default()
        }
    }
}

/// Resolved session settings: config files first, then command-line flags.
pub fn session_config(matches: &ArgMatches) -> SessionConfig {
    let mut config = load_config_with_warning().session_config();

    if let Some(rounding) = matches.get_one::<String>("rounding") {
        match rounding.parse::<RoundingMode>() {
            Ok(mode) => config.rounding = mode,
            Err(e) => warn!(event = "cli.config.rounding_ignored", error = %e),
        }
    }
    if matches.get_flag("no-hide") {
        config.hide_before_resize = false;
    }
    if matches.get_flag("root-only") {
        config.match_descendants = false;
    }

    config
}

pub fn parse_pid(raw: &str) -> Result<Pid, Box<dyn std::error::Error>> {
    raw.parse::<Pid>().map_err(|e| {
        eprintln!("❌ {}", e);
        error!(event = "cli.pid_invalid", input = raw, error = %e);
        e.into()
    })
}

/// Start a session on the native platform, reporting failure to the user.
pub fn start_session(
    pid: Pid,
    config: SessionConfig,
) -> Result<ResizeSession, Box<dyn std::error::Error>> {
    let platform = platform::native();
    gridfit_core::create_session(platform.as_ref(), pid, config).map_err(|e| {
        eprintln!("❌ Failed to attach to process {}: {}", pid, e);
        eprintln!("   Tip: Check that the process is still running.");
        error!(event = "cli.session_start_failed", pid = pid.as_u32(), error = %e);
        gridfit_core::events::log_app_error(&e);
        e.into()
    })
}

/// One-line description of a window for human output.
pub fn describe_window(window: &dyn WindowHandle) -> String {
    match window.title() {
        Some(title) => format!("{} \"{}\"", window.id(), title),
        None => window.id().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pid() {
        assert_eq!(parse_pid("42").unwrap(), Pid::from_raw(42));
        assert!(parse_pid("0").is_err());
        assert!(parse_pid("-3").is_err());
        assert!(parse_pid("abc").is_err());
    }
}
