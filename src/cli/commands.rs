//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{MenuService, RenderOptions};
use crate::application::{InputFormat, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::Grid;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

const STDIN_NAME: &str = "<stdin>";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let config_dir = resolve_config_dir(cli)?;
    let settings = Settings::load(Some(&config_dir))?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Build {
            file,
            format,
            output,
            pretty,
            compact,
            envelope,
            raw,
        } => {
            let options = render_options(*pretty, *compact, envelope.as_deref(), *raw)?;
            cmd_build(&container, file.as_deref(), *format, output.as_deref(), &options)
        }
        Commands::Tree { file, format } => cmd_tree(&container, file.as_deref(), *format),
        Commands::Config { command } => cmd_config(&container, &config_dir, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn resolve_config_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.config_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("resolve current directory", e))),
    }
}

fn render_options(
    pretty: bool,
    compact: bool,
    envelope: Option<&str>,
    raw: bool,
) -> CliResult<RenderOptions> {
    if envelope.is_some_and(str::is_empty) {
        return Err(CliError::InvalidArgs("--envelope must not be empty".into()));
    }
    let pretty = match (pretty, compact) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    Ok(RenderOptions {
        pretty,
        envelope_key: envelope.map(str::to_string),
        raw,
    })
}

/// Load the grid from a file, or from stdin for `None` / `-`.
fn read_grid(
    service: &MenuService,
    settings: &Settings,
    file: Option<&Path>,
    format: Option<InputFormat>,
) -> CliResult<(Grid, String)> {
    match file.filter(|path| path.as_os_str() != "-") {
        Some(path) => {
            let grid = service.load_grid(path, format)?;
            Ok((grid, path.display().to_string()))
        }
        None => {
            let text = io::read_to_string(io::stdin()).with_source_context("read grid", STDIN_NAME)?;
            let format = format.unwrap_or(settings.input_format);
            let grid = service.parse_grid(&text, format, STDIN_NAME)?;
            Ok((grid, STDIN_NAME.to_string()))
        }
    }
}

#[instrument(skip(container, options))]
fn cmd_build(
    container: &ServiceContainer,
    file: Option<&Path>,
    format: Option<InputFormat>,
    output_path: Option<&Path>,
    options: &RenderOptions,
) -> CliResult<()> {
    let service = container.menu_service();
    let (grid, source_name) = read_grid(&service, &container.settings, file, format)?;
    let text = service.render_document(&grid, &source_name, options)?;

    match output_path {
        Some(path) => {
            container
                .fs
                .ensure_parent(path)
                .with_source_context("create parent directory of", path.display())?;
            container
                .fs
                .write(path, &format!("{}\n", text))
                .with_source_context("write menu", path.display())?;
            output::success(&format!("wrote {}", path.display()));
        }
        None => output::info(&text),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(
    container: &ServiceContainer,
    file: Option<&Path>,
    format: Option<InputFormat>,
) -> CliResult<()> {
    let service = container.menu_service();
    let (grid, source_name) = read_grid(&service, &container.settings, file, format)?;
    let outline = service.build_outline(&grid, &source_name)?;

    output::info(outline.to_string().trim_end());
    output::detail(&format!(
        "{} nodes, {} leaves, height {}",
        outline.node_count(),
        outline.leaves().len(),
        outline.height()
    ));
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    config_dir: &Path,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => {
            output::header("Config files");
            let global = global_config_path();
            match global {
                Some(path) => output::detail(&describe_path("global", &path, container)),
                None => output::detail("global: <no config directory>"),
            }
            let local = local_config_path(config_dir);
            output::detail(&describe_path("local", &local, container));
        }
    }
    Ok(())
}

fn describe_path(label: &str, path: &Path, container: &ServiceContainer) -> String {
    let state = if container.fs.exists(path) {
        "found"
    } else {
        "missing"
    };
    format!("{}: {} ({})", label, path.display(), state)
}
