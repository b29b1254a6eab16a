use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("gridfit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resize another process's terminal window to a column/row count")
        .long_about("gridfit finds the top-level window owned by a process (or one of its children), then resizes that window and its terminal to requested character grids. On Windows the console buffer and window are resized in a safe order; on Unix the pseudo-terminal size is set.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("rounding")
                .long("rounding")
                .help("Pixel rounding for windowed consoles (overrides config)")
                .value_parser(["truncate", "nearest"])
                .global(true),
        )
        .arg(
            Arg::new("no-hide")
                .long("no-hide")
                .help("Do not hide the window before resizing (overrides config)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("root-only")
                .long("root-only")
                .help("Only match windows owned by the given PID, not its children (overrides config)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("attach")
                .about("Attach to a process and resize it from sizes read on stdin")
                .long_about(
                    "Attaches to a process and reads one COLSxROWS size per line from stdin, \
                    applying each in turn. Prompts for the PID when it is not given. \
                    Malformed lines are reported and skipped; end of input closes the session.",
                )
                .arg(
                    Arg::new("pid")
                        .help("Target process ID (prompted for when omitted)")
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("resize")
                .about("Resize a process's terminal to one or more sizes in order")
                .arg(
                    Arg::new("pid")
                        .help("Target process ID")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("sizes")
                        .help("Sizes as COLSxROWS, e.g. 120x40")
                        .required(true)
                        .num_args(1..)
                        .index(2),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("locate")
                .about("Show the process tree and the window that would be resized")
                .arg(
                    Arg::new("pid")
                        .help("Target process ID")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "gridfit");
    }

    #[test]
    fn test_cli_resize_command() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["gridfit", "resize", "1234", "120x40", "80x24", "--json"])
            .unwrap();

        let resize_matches = matches.subcommand_matches("resize").unwrap();
        assert_eq!(resize_matches.get_one::<String>("pid").unwrap(), "1234");
        let sizes: Vec<&String> = resize_matches.get_many::<String>("sizes").unwrap().collect();
        assert_eq!(sizes, vec!["120x40", "80x24"]);
        assert!(resize_matches.get_flag("json"));
    }

    #[test]
    fn test_cli_resize_requires_size() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["gridfit", "resize", "1234"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_attach_pid_is_optional() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["gridfit", "attach"]).unwrap();
        let attach_matches = matches.subcommand_matches("attach").unwrap();
        assert!(attach_matches.get_one::<String>("pid").is_none());
    }

    #[test]
    fn test_cli_global_overrides_after_subcommand() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec![
                "gridfit",
                "locate",
                "42",
                "--rounding",
                "nearest",
                "--no-hide",
                "--root-only",
                "-v",
            ])
            .unwrap();

        let locate_matches = matches.subcommand_matches("locate").unwrap();
        assert_eq!(
            locate_matches.get_one::<String>("rounding").unwrap(),
            "nearest"
        );
        assert!(locate_matches.get_flag("no-hide"));
        assert!(locate_matches.get_flag("root-only"));
        assert!(locate_matches.get_flag("verbose"));
    }

    #[test]
    fn test_cli_rejects_unknown_rounding() {
        let app = build_cli();
        let matches =
            app.try_get_matches_from(vec!["gridfit", "--rounding", "banker", "locate", "42"]);
        assert!(matches.is_err());
    }
}
