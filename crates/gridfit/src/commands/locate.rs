use clap::ArgMatches;
use tracing::info;

use gridfit_core::platform;

use super::helpers;
use super::json_types::{LocateOutput, WindowOutput};

pub(crate) fn handle_locate_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw_pid = matches
        .get_one::<String>("pid")
        .ok_or("PID argument is required")?;
    let json_output = matches.get_flag("json");

    let pid = helpers::parse_pid(raw_pid)?;
    let config = helpers::session_config(matches);

    info!(event = "cli.locate_started", pid = pid.as_u32());

    let platform = platform::native();
    let located = gridfit_core::locate_target(platform.as_ref(), pid, config.match_descendants)
        .map_err(|e| {
            eprintln!("❌ Failed to locate window for process {}: {}", pid, e);
            gridfit_core::events::log_app_error(&e);
            e
        })?;

    if json_output {
        let output = LocateOutput {
            pid,
            processes: located.tree.members(),
            owner: located.owner,
            window: located
                .window
                .as_deref()
                .map(|window| WindowOutput::from_window(window)),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let pids: Vec<String> = located.tree.members().iter().map(|p| p.to_string()).collect();
        println!("Platform: {}", platform.name());
        println!("PIDs: {}", pids.join(", "));
        match located.window.as_deref() {
            Some(window) => {
                println!("Window: {}", helpers::describe_window(window));
                if let Some(owner) = located.owner {
                    println!("   Owner: {}", owner);
                }
                if let Ok(client) = window.client_frame() {
                    println!("   Client: {}", client);
                }
                if let Ok(outer) = window.outer_size() {
                    println!("   Outer: {}", outer);
                }
            }
            None => println!("Window: none"),
        }
    }

    info!(
        event = "cli.locate_completed",
        pid = pid.as_u32(),
        found = located.window.is_some()
    );
    Ok(())
}
