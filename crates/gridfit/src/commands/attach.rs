use std::io::{self, Write};

use clap::ArgMatches;
use tracing::{error, info};

use gridfit_core::TargetOSDimensions;

use super::helpers;
use crate::input::{RequestStream, read_pid};

pub(crate) fn handle_attach_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = helpers::session_config(matches);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let pid = match matches.get_one::<String>("pid") {
        Some(raw) => helpers::parse_pid(raw)?,
        None => match read_pid(&mut input, &mut output)? {
            Some(pid) => pid,
            None => {
                eprintln!("❌ No PID given.");
                return Err("No PID given".into());
            }
        },
    };

    info!(event = "cli.attach_started", pid = pid.as_u32());

    let mut session = helpers::start_session(pid, config)?;

    let pids: Vec<String> = session.tree().members().iter().map(|p| p.to_string()).collect();
    writeln!(output, "PIDs: {}", pids.join(", "))?;
    match session.window() {
        Some(window) => writeln!(output, "window: {}", helpers::describe_window(window))?,
        None => writeln!(output, "window: none (requests will not resize anything)")?,
    }

    let mut requests = RequestStream::new(input, output);
    let mut applied = 0usize;
    let mut failed = 0usize;

    while let Some(grid) = requests.next_grid()? {
        match session.apply(grid) {
            Ok(outcome) => {
                if let Some(TargetOSDimensions::WindowedConsole { window_pixels, .. }) =
                    session.last_dimensions()
                {
                    writeln!(requests.writer(), "pixels: {}", window_pixels)?;
                }
                writeln!(requests.writer(), "{}", outcome)?;
                applied += 1;
            }
            Err(e) => {
                eprintln!("❌ Failed to resize to {}: {}", grid, e);
                error!(
                    event = "cli.attach_request_failed",
                    pid = pid.as_u32(),
                    requested = %grid,
                    error = %e
                );
                failed += 1;
            }
        }
    }

    session.close();
    info!(
        event = "cli.attach_completed",
        pid = pid.as_u32(),
        applied = applied,
        failed = failed
    );
    Ok(())
}
