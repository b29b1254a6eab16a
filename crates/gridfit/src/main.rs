use gridfit_core::init_logging;

mod app;
mod commands;
mod input;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Quiet unless -v/--verbose is given, before or after the subcommand
    let verbose = matches.get_flag("verbose")
        || matches
            .subcommand()
            .is_some_and(|(_, sub_matches)| sub_matches.get_flag("verbose"));
    init_logging(!verbose);

    commands::run_command(&matches)?;

    Ok(())
}
