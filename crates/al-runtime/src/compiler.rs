//! Compiler invocation.
//!
//! [`CompileCommand`] describes one `lessc` run, a [`CommandRunner`] executes
//! it, and [`CompilerInvoker`] turns the result into success or a sanitized
//! [`Diagnostic`].
//!
//! ```text
//! lessc {root}/{SOURCE_FILE} {root}/{TARGET_FILE} [--clean-css]
//! ```

use std::fmt;
use std::io;
use std::process::Stdio;
use std::rc::Rc;
use std::sync::Arc;

use al_core::{CompilerConfig, Diagnostic, ProjectConfig};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::toolchain;

/// One compiler invocation: program, arguments, working directory.
///
/// # Examples
///
/// ```
/// use al_core::{CompilerConfig, ConfigDefaults};
/// use al_runtime::CompileCommand;
/// use camino::Utf8Path;
///
/// let mut config = ConfigDefaults::default().to_project_config();
/// config.minify = true;
///
/// let command = CompileCommand::new(Utf8Path::new("/site"), &config, &CompilerConfig::default());
/// assert_eq!(
///     command.to_string(),
///     "lessc /site/less/style.less /site/css/style.css --clean-css"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    program: String,
    args: Vec<String>,
    working_dir: Utf8PathBuf,
}

impl CompileCommand {
    /// Builds the command compiling `config.source_file` into
    /// `config.target_file` under `root`.
    #[must_use]
    pub fn new(root: &Utf8Path, config: &ProjectConfig, compiler: &CompilerConfig) -> Self {
        let mut args = vec![
            config.source_path(root).into_string(),
            config.target_path(root).into_string(),
        ];
        if config.minify && !compiler.minify_flag.is_empty() {
            args.push(compiler.minify_flag.clone());
        }

        Self {
            program: compiler.program.clone(),
            args,
            working_dir: root.to_owned(),
        }
    }

    /// The executable.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments, in order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The directory the compiler runs in (the project root).
    #[must_use]
    pub fn working_dir(&self) -> &Utf8Path {
        &self.working_dir
    }
}

impl fmt::Display for CompileCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` if the process was killed by a signal.
    pub code: Option<i32>,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Returns `true` if the process exited with status 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Runs a [`CompileCommand`] to completion.
///
/// Implementations block until the process exits.
pub trait CommandRunner {
    /// Runs `command`, returning its output.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the process cannot be started.
    fn run(&self, command: &CompileCommand) -> io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &CompileCommand) -> io::Result<CommandOutput> {
        (**self).run(command)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(&self, command: &CompileCommand) -> io::Result<CommandOutput> {
        (**self).run(command)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Rc<R> {
    fn run(&self, command: &CompileCommand) -> io::Result<CommandOutput> {
        (**self).run(command)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Arc<R> {
    fn run(&self, command: &CompileCommand) -> io::Result<CommandOutput> {
        (**self).run(command)
    }
}

/// Runs commands as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CompileCommand) -> io::Result<CommandOutput> {
        let output = toolchain::command(command.program(), command.working_dir())
            .args(command.args())
            .stdin(Stdio::null())
            .output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// A successful compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileSuccess {
    /// Source file as written in the config.
    pub source_file: String,

    /// Absolute path of the written CSS.
    pub target_path: Utf8PathBuf,
}

/// Builds compile commands from settings and runs them.
#[derive(Debug, Clone)]
pub struct CompilerInvoker<R> {
    runner: R,
    settings: CompilerConfig,
}

impl<R: CommandRunner> CompilerInvoker<R> {
    /// Creates an invoker using `runner` and the compiler `settings`.
    pub const fn new(runner: R, settings: CompilerConfig) -> Self {
        Self { runner, settings }
    }

    /// Returns the compiler settings.
    pub const fn settings(&self) -> &CompilerConfig {
        &self.settings
    }

    /// Returns the command runner.
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Builds the command for `config` under `root` without running it.
    pub fn command(&self, root: &Utf8Path, config: &ProjectConfig) -> CompileCommand {
        CompileCommand::new(root, config, &self.settings)
    }

    /// Compiles the project's source file into its target file.
    ///
    /// On failure the diagnostic message is `Command failed: <command>`
    /// followed by the compiler's stderr, so the compiler's first line is
    /// line 2 of the message.
    ///
    /// # Errors
    ///
    /// Returns a [`Diagnostic`] if the compiler cannot be started or exits
    /// unsuccessfully.
    pub fn compile(&self, root: &Utf8Path, config: &ProjectConfig) -> Result<CompileSuccess, Diagnostic> {
        let command = self.command(root, config);
        debug!(command = %command, "Running compiler");

        let output = match self.runner.run(&command) {
            Ok(output) => output,
            Err(error) => {
                let message = format!("Command failed: {command}\n{}: {error}", command.program());
                let stack = format!("{message}\n{error:?}");
                return Err(Diagnostic::new(message, stack));
            }
        };

        if !output.success() {
            let message = format!("Command failed: {command}\n{}", output.stderr.trim_end());
            let status = output
                .code
                .map_or_else(|| "terminated by signal".to_owned(), |code| format!("exit code {code}"));
            let mut stack = format!("{message}\n    at {command} ({status})");
            if !output.stdout.trim().is_empty() {
                stack.push_str("\nstdout:\n");
                stack.push_str(output.stdout.trim_end());
            }
            return Err(Diagnostic::new(message, stack));
        }

        info!(source = %config.source_file, target = %config.target_file, "Compiled");
        Ok(CompileSuccess {
            source_file: config.source_file.clone(),
            target_path: config.target_path(root),
        })
    }
}
