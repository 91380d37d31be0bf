//! CLI entry point for autoless.
//!
//! Compiles LESS projects on demand or whenever a `.less` file is saved,
//! driven by a `.lessconfig` file at each project root.
//!
//! # Usage
//!
//! ```bash
//! autoless [OPTIONS] <COMMAND>
//!
//! # Compile the project that owns a file
//! autoless --root ~/site compile ~/site/less/style.less
//!
//! # Write a default .lessconfig for a project
//! autoless --root ~/site new-config ~/site/index.html
//!
//! # Compile on every save until Ctrl-C
//! autoless --root ~/site --root ~/blog watch --jump
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod notifier;
mod workspace;

use std::process::ExitCode;

use al_core::{Config, Trigger};
use al_runtime::{CompileOrchestrator, Session, SystemRunner, Workspace};
use al_watcher::{FileEvent, FileEventKind, FileWatcher, LessFilter};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::notifier::TerminalNotifier;
use crate::workspace::CliWorkspace;

type CliSession = Session<CliWorkspace, TerminalNotifier, SystemRunner>;

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Compile-on-save for LESS projects.
///
/// Each project root may carry a `.lessconfig` naming the source and target
/// files; projects without one are left alone.
#[derive(Parser)]
#[command(name = "autoless", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Project root directory. May be repeated.
    ///
    /// Defaults to the current directory if not specified.
    #[arg(short, long = "root", global = true, env = "AUTOLESS_ROOTS", value_delimiter = ',')]
    roots: Vec<Utf8PathBuf>,

    /// Path to a JSON settings file.
    #[arg(long, global = true, env = "AUTOLESS_SETTINGS")]
    settings: Option<Utf8PathBuf>,

    /// LESS compiler executable (overrides settings).
    #[arg(long, global = true)]
    lessc: Option<String>,

    /// Editor to use for opening files (overrides $EDITOR).
    #[arg(long, global = true, env = "AUTOLESS_EDITOR")]
    editor: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Compile the project that contains FILE.
    Compile {
        /// Any file inside the project; must be a `.less` file to compile.
        file: Utf8PathBuf,

        /// Treat this as a save, honouring `AUTO_COMPILE`.
        #[arg(long)]
        on_save: bool,

        /// Open the editor at the error location if compilation fails.
        #[arg(long)]
        jump: bool,
    },

    /// Create a default `.lessconfig` for the project that contains FILE.
    NewConfig {
        /// Any file inside the project.
        file: Utf8PathBuf,
    },

    /// Open the `.lessconfig` of the project that contains FILE.
    OpenConfig {
        /// Any file inside the project.
        file: Utf8PathBuf,
    },

    /// Watch every root and compile on save.
    Watch {
        /// Open the editor at the error location whenever compilation fails.
        #[arg(long)]
        jump: bool,
    },
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
/// `notify` is filtered to `warn` level.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},notify=warn"))
    });

    let use_ansi = use_color(no_color);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Colors are off with `--no-color` or when `NO_COLOR` is set.
fn use_color(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none()
}

/// Builds a [`Config`] from the settings file and CLI overrides.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or parsed.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.settings {
        Some(path) => Config::load(path).wrap_err_with(|| format!("Failed to load settings from {path}"))?,
        None => Config::default(),
    };

    if let Some(program) = &cli.lessc {
        config.compiler.program.clone_from(program);
    }
    if cli.editor.is_some() {
        config.editor.editor.clone_from(&cli.editor);
    }

    Ok(config)
}

fn current_dir() -> color_eyre::Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().wrap_err("Failed to read current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|path| eyre!("Current directory is not valid UTF-8: {}", path.display()))
}

/// Builds the workspace over the requested roots.
///
/// # Errors
///
/// Returns an error if a root doesn't exist or isn't a directory.
fn build_workspace(cli: &Cli, config: &Config, cwd: &Utf8Path) -> color_eyre::Result<CliWorkspace> {
    let roots = if cli.roots.is_empty() {
        vec![cwd.to_path_buf()]
    } else {
        cli.roots.clone()
    };

    let workspace = CliWorkspace::new(&roots, cwd, config.editor.clone());
    for root in workspace.roots() {
        validate_dir(root)?;
    }

    Ok(workspace)
}

fn validate_dir(path: &Utf8Path) -> color_eyre::Result<()> {
    if !path.exists() {
        return Err(eyre!("Root does not exist: {path}"));
    }

    if !path.is_dir() {
        return Err(eyre!("Root is not a directory: {path}"));
    }

    Ok(())
}

fn orchestrator(
    workspace: CliWorkspace,
    cli: &Cli,
    config: &Config,
) -> CompileOrchestrator<CliWorkspace, TerminalNotifier, SystemRunner> {
    let notifier = TerminalNotifier::new(use_color(cli.no_color), cli.verbose);
    CompileOrchestrator::new(workspace, notifier, SystemRunner, config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs one compile for the project that contains `file`.
///
/// Fails when the config was invalid or the compiler reported an error.
fn run_compile(
    cli: &Cli,
    config: &Config,
    file: &Utf8Path,
    on_save: bool,
    jump: bool,
) -> color_eyre::Result<ExitCode> {
    let cwd = current_dir()?;
    let workspace = build_workspace(cli, config, &cwd)?.with_active(file, &cwd);

    let trigger = match workspace.active_file() {
        Some(path) if on_save => Trigger::save(path),
        _ => Trigger::Manual,
    };

    let orchestrator = orchestrator(workspace, cli, config);
    let attempt = orchestrator.compile(&trigger);
    debug!(outcome = ?attempt.outcome, "Compile finished");

    if jump {
        if let Some(reference) = attempt.outcome.reference() {
            orchestrator.jump_to(reference);
        }
    }

    Ok(if attempt.outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Creates a default `.lessconfig`, or opens the existing one.
fn run_new_config(cli: &Cli, config: &Config, file: &Utf8Path) -> color_eyre::Result<ExitCode> {
    let cwd = current_dir()?;
    let workspace = build_workspace(cli, config, &cwd)?.with_active(file, &cwd);

    Ok(match orchestrator(workspace, cli, config).create_config() {
        Some(_) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    })
}

/// Opens the existing `.lessconfig`.
fn run_open_config(cli: &Cli, config: &Config, file: &Utf8Path) -> color_eyre::Result<ExitCode> {
    let cwd = current_dir()?;
    let workspace = build_workspace(cli, config, &cwd)?.with_active(file, &cwd);

    Ok(match orchestrator(workspace, cli, config).open_config() {
        Some(_) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    })
}

/// Watches every root and compiles on save until interrupted.
///
/// # Errors
///
/// Returns an error if the watcher cannot be started or stopped.
async fn run_watch(cli: &Cli, config: &Config, jump: bool) -> color_eyre::Result<ExitCode> {
    let cwd = current_dir()?;
    let workspace = build_workspace(cli, config, &cwd)?;

    let mut watcher = FileWatcher::new(workspace.roots(), &config.watch, LessFilter::default())
        .await
        .wrap_err("Failed to start file watcher")?;
    info!(roots = ?watcher.watch_paths(), "Watching for changes");

    let mut session = Session::start(orchestrator(workspace, cli, config));

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = watcher.recv() => {
                let Some(event) = event else {
                    warn!("File watcher stopped unexpectedly");
                    break;
                };
                tokio::task::block_in_place(|| handle_event(&mut session, &event, jump));
            }
            result = &mut shutdown => {
                result?;
                info!("Received shutdown signal");
                break;
            }
        }
    }

    session.stop();
    watcher.shutdown().await?;
    Ok(ExitCode::SUCCESS)
}

/// Maps a filesystem event onto the session's open/save/close events.
fn handle_event(session: &mut CliSession, event: &FileEvent, jump: bool) {
    match event.kind {
        FileEventKind::Written => {
            session.editor_opened(&event.path);
            let Some(attempt) = session.editor_saved(&event.path) else {
                return;
            };
            if jump {
                if let Some(reference) = attempt.outcome.reference() {
                    session.orchestrator().jump_to(reference);
                }
            }
        }
        FileEventKind::Removed => {
            session.editor_closed(&event.path);
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = sigterm.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Load settings
    let config = build_config(&cli)?;

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Compile {
            file,
            on_save,
            jump,
        } => run_compile(&cli, &config, file, *on_save, *jump),
        Commands::NewConfig { file } => run_new_config(&cli, &config, file),
        Commands::OpenConfig { file } => run_open_config(&cli, &config, file),
        Commands::Watch { jump } => run_watch(&cli, &config, *jump).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_repeated_roots() {
        let cli = Cli::try_parse_from([
            "autoless", "--root", "/a", "-r", "/b", "compile", "x.less", "--on-save",
        ])
        .unwrap();

        assert_eq!(cli.roots, [Utf8PathBuf::from("/a"), Utf8PathBuf::from("/b")]);
        assert!(matches!(
            cli.command,
            Commands::Compile {
                on_save: true,
                jump: false,
                ..
            }
        ));
    }

    #[test]
    fn test_build_config_applies_overrides() {
        let cli = Cli::try_parse_from([
            "autoless", "--lessc", "/opt/lessc", "--editor", "nvim", "watch",
        ])
        .unwrap();

        let config = build_config(&cli).unwrap();
        assert_eq!(config.compiler.program, "/opt/lessc");
        assert_eq!(config.editor.editor.as_deref(), Some("nvim"));
        assert_eq!(config.compiler.minify_flag, "--clean-css");
    }

    #[test]
    fn test_build_config_reads_settings_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("settings.json")).unwrap();
        std::fs::write(&path, r#"{"compiler": {"program": "node-lessc"}}"#).unwrap();

        let cli = Cli::try_parse_from(["autoless", "--settings", path.as_str(), "watch"]).unwrap();
        assert_eq!(build_config(&cli).unwrap().compiler.program, "node-lessc");
    }

    #[test]
    fn test_validate_dir_rejects_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = Utf8PathBuf::from_path_buf(dir.path().join("f.txt")).unwrap();
        std::fs::write(&file, "").unwrap();

        assert!(validate_dir(&file).is_err());
        assert!(validate_dir(&file.join("missing")).is_err());
        assert!(validate_dir(file.parent().unwrap()).is_ok());
    }
}
