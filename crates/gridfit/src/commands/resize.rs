use clap::ArgMatches;
use tracing::{error, info};

use gridfit_core::{CharacterGrid, TargetOSDimensions};

use super::helpers;
use super::json_types::{ResizeOutput, ResizeResult};

pub(crate) fn handle_resize_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw_pid = matches
        .get_one::<String>("pid")
        .ok_or("PID argument is required")?;
    let json_output = matches.get_flag("json");

    let pid = helpers::parse_pid(raw_pid)?;

    // Validate every size before touching the process
    let mut grids = Vec::new();
    for raw in matches.get_many::<String>("sizes").into_iter().flatten() {
        match raw.parse::<CharacterGrid>() {
            Ok(grid) => grids.push(grid),
            Err(e) => {
                eprintln!("❌ Invalid size: {}", e);
                eprintln!("   Tip: Sizes are COLSxROWS, e.g. 120x40.");
                error!(event = "cli.resize_invalid_size", input = raw.as_str(), error = %e);
                return Err(e.into());
            }
        }
    }

    info!(
        event = "cli.resize_started",
        pid = pid.as_u32(),
        requests = grids.len()
    );

    let config = helpers::session_config(matches);
    let mut session = helpers::start_session(pid, config)?;

    let mut results = Vec::with_capacity(grids.len());
    for grid in grids {
        let result = match session.apply(grid) {
            Ok(outcome) => ResizeResult {
                requested: grid.to_string(),
                window_pixels: match session.last_dimensions() {
                    Some(TargetOSDimensions::WindowedConsole { window_pixels, .. }) => {
                        Some(*window_pixels)
                    }
                    _ => None,
                },
                outcome: Some(outcome),
                error: None,
            },
            Err(e) => {
                error!(
                    event = "cli.resize_request_failed",
                    pid = pid.as_u32(),
                    requested = %grid,
                    error = %e
                );
                ResizeResult {
                    requested: grid.to_string(),
                    outcome: None,
                    window_pixels: None,
                    error: Some(e.to_string()),
                }
            }
        };
        results.push(result);
    }

    let window = session.window().map(|w| w.id());
    session.close();

    let failed = results.iter().filter(|r| r.error.is_some()).count();

    if json_output {
        let output = ResizeOutput {
            pid,
            window,
            results,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for result in &results {
            match (&result.outcome, &result.error) {
                (Some(outcome), _) => {
                    let icon = if outcome.is_success() { "✅" } else { "⚠️" };
                    match result.window_pixels {
                        Some(pixels) => {
                            println!("{} {}: {} ({})", icon, result.requested, outcome, pixels)
                        }
                        None => println!("{} {}: {}", icon, result.requested, outcome),
                    }
                }
                (None, Some(e)) => eprintln!("❌ {}: {}", result.requested, e),
                (None, None) => {}
            }
        }
    }

    info!(
        event = "cli.resize_completed",
        pid = pid.as_u32(),
        failed = failed
    );

    if failed > 0 {
        return Err(format!("{} resize request(s) failed", failed).into());
    }
    Ok(())
}
