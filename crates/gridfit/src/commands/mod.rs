use clap::ArgMatches;
use tracing::error;

use gridfit_core::{events, platform};

pub mod helpers;
mod json_types;

mod attach;
mod locate;
mod resize;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup(platform::native().name());

    let result = match matches.subcommand() {
        Some(("attach", sub_matches)) => attach::handle_attach_command(sub_matches),
        Some(("resize", sub_matches)) => resize::handle_resize_command(sub_matches),
        Some(("locate", sub_matches)) => locate::handle_locate_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown(result.is_ok());
    result
}
