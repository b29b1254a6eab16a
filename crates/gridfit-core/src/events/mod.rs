use tracing::{error, info};

/// `platform` names the window backend in use, e.g. "linux".
pub fn log_app_startup(platform: &str) {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        platform = platform
    );
}

pub fn log_app_shutdown(succeeded: bool) {
    info!(event = "core.app.shutdown_started", succeeded = succeeded);
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_events() {
        log_app_startup(crate::platform::native().name());
        log_app_shutdown(true);

        let test_error = crate::resize::ResizeError::SessionClosed { pid: 42 };
        log_app_error(&test_error);
    }
}
