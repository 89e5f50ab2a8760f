//! Tests for CLI argument parsing and error exit codes

use clap::Parser;
use rstest::rstest;

use menutree::application::{ApplicationError, InputFormat};
use menutree::cli::args::{Cli, Commands, ConfigCommands};
use menutree::cli::CliError;
use menutree::exitcode;
use menutree::infrastructure::InfraError;

#[test]
fn given_build_args_when_parsing_then_fields_set() {
    let cli = Cli::try_parse_from([
        "menutree", "-dd", "build", "grid.csv", "-f", "csv", "-o", "out.json", "--pretty",
        "--envelope", "menu",
    ])
    .unwrap();

    assert_eq!(cli.debug, 2);
    match cli.command {
        Some(Commands::Build {
            file,
            format,
            output,
            pretty,
            compact,
            envelope,
            raw,
        }) => {
            assert_eq!(file.unwrap().to_str(), Some("grid.csv"));
            assert_eq!(format, Some(InputFormat::Csv));
            assert_eq!(output.unwrap().to_str(), Some("out.json"));
            assert!(pretty);
            assert!(!compact);
            assert_eq!(envelope.as_deref(), Some("menu"));
            assert!(!raw);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn given_build_without_file_when_parsing_then_reads_stdin() {
    let cli = Cli::try_parse_from(["menutree", "build"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Build { file: None, .. })));
}

#[rstest]
#[case::pretty_and_compact(&["menutree", "build", "--pretty", "--compact"])]
#[case::envelope_and_raw(&["menutree", "build", "--envelope", "x", "--raw"])]
#[case::unknown_format(&["menutree", "tree", "-f", "xlsx"])]
fn given_conflicting_args_when_parsing_then_error(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn given_config_path_when_parsing_then_subcommand() {
    let cli = Cli::try_parse_from(["menutree", "-C", "/tmp", "config", "path"]).unwrap();
    assert_eq!(cli.config_dir.unwrap().to_str(), Some("/tmp"));
    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Path
        })
    ));
}

#[rstest]
#[case::empty_grid(
    ApplicationError::EmptyGrid { source_name: "grid.json".into() },
    exitcode::UNAVAILABLE
)]
#[case::bad_grid(
    ApplicationError::GridFormat { format: "json".into(), source_name: "grid.json".into(), message: "eof".into() },
    exitcode::DATAERR
)]
#[case::config(ApplicationError::Config { message: "bad".into() }, exitcode::CONFIG)]
#[case::missing_input(
    ApplicationError::OperationFailed {
        context: "read grid grid.json".into(),
        source: Box::new(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
    },
    exitcode::NOINPUT
)]
#[case::unreadable_input(
    ApplicationError::OperationFailed {
        context: "read grid grid.json".into(),
        source: Box::new(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")),
    },
    exitcode::IOERR
)]
fn given_application_error_when_mapping_then_exit_code(
    #[case] error: ApplicationError,
    #[case] expected: i32,
) {
    assert_eq!(CliError::from(error).exit_code(), expected);
}

#[test]
fn given_empty_grid_error_when_displayed_then_reports_fetch_failure() {
    let err = CliError::from(ApplicationError::EmptyGrid {
        source_name: "<stdin>".into(),
    });
    assert_eq!(err.to_string(), "failed to fetch data: no outline rows in <stdin>");
}

#[test]
fn given_io_and_usage_errors_when_mapping_then_exit_code() {
    let io = CliError::from(InfraError::io(
        "read stdin",
        std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe"),
    ));
    assert_eq!(io.exit_code(), exitcode::IOERR);
    assert_eq!(CliError::InvalidArgs("x".into()).exit_code(), exitcode::USAGE);
}
