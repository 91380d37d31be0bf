//! External editor integration for opening configs and jumping to errors.

use std::env;
use std::path::Path;

use al_core::EditorConfig;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::RuntimeError;
use crate::toolchain;

/// Tried in order when no editor is configured.
const FALLBACK_EDITORS: [&str; 5] = ["cursor", "code", "nvim", "vim", "nano"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorKind {
    Cursor,
    VsCode,
    Nvim,
    Vim,
    Nano,
    Other,
}

impl EditorKind {
    fn from_program(program: &str) -> Self {
        let file_name = Path::new(program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(program)
            .to_lowercase();

        match file_name.as_str() {
            "cursor" | "cursor.exe" => Self::Cursor,
            "code" | "code-insiders" | "code.exe" => Self::VsCode,
            "nvim" | "nvim.exe" => Self::Nvim,
            "vim" | "vim.exe" => Self::Vim,
            "nano" | "nano.exe" => Self::Nano,
            _ => Self::Other,
        }
    }

    /// GUI editors hand the file to a running window and return immediately.
    const fn is_gui(self) -> bool {
        matches!(self, Self::Cursor | Self::VsCode)
    }
}

/// A program and arguments ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorInvocation {
    /// Editor executable.
    pub program: String,

    /// Arguments, including the file and any position flags.
    pub args: Vec<String>,
}

/// Opens files in the user's editor.
///
/// The editor is chosen from, in order: the configured command, `$VISUAL`,
/// `$EDITOR`, then the first of `cursor`, `code`, `nvim`, `vim`, `nano`.
/// Positions are 0-based and converted to each editor's 1-based syntax.
///
/// # Examples
///
/// ```
/// use al_runtime::EditorLauncher;
/// use camino::Utf8Path;
///
/// let launcher = EditorLauncher::from_command("nvim").unwrap();
/// let invocation = launcher.invocation(Utf8Path::new("/site/less/style.less"), Some((4, 2)));
/// assert_eq!(invocation.program, "nvim");
/// assert_eq!(invocation.args, ["+call cursor(5,3)", "/site/less/style.less"]);
/// ```
#[derive(Debug, Clone)]
pub struct EditorLauncher {
    program: String,
    args: Vec<String>,
    kind: EditorKind,
}

impl EditorLauncher {
    /// Parses an editor command line such as `"code -n"`.
    ///
    /// Returns `None` for a blank command.
    #[must_use]
    pub fn from_command(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next()?.to_owned();
        let args = parts.map(str::to_owned).collect::<Vec<_>>();
        let kind = EditorKind::from_program(&program);

        Some(Self {
            program,
            args,
            kind,
        })
    }

    /// Picks the editor from `config` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::NoEditor`] if no candidate is usable.
    pub fn resolve(config: &EditorConfig) -> Result<Self, RuntimeError> {
        Self::resolve_with(config, |name| env::var(name).ok(), toolchain::is_installed)
    }

    /// Like [`resolve`](Self::resolve) with a custom environment lookup and
    /// installation check.
    ///
    /// An explicitly chosen editor (config, `$VISUAL`, `$EDITOR`) is used
    /// as given. The built-in fallbacks are skipped unless `installed`
    /// reports their program as available.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::NoEditor`] if no candidate is usable.
    pub fn resolve_with(
        config: &EditorConfig,
        lookup: impl Fn(&str) -> Option<String>,
        installed: impl Fn(&str) -> bool,
    ) -> Result<Self, RuntimeError> {
        let chosen = config
            .editor
            .clone()
            .or_else(|| lookup("VISUAL"))
            .or_else(|| lookup("EDITOR"));
        if let Some(command) = chosen {
            return Self::from_command(&command).ok_or(RuntimeError::NoEditor);
        }

        FALLBACK_EDITORS
            .iter()
            .filter(|program| {
                let available = installed(program);
                if !available {
                    debug!(program = %program, "Fallback editor not installed");
                }
                available
            })
            .find_map(|program| Self::from_command(program))
            .ok_or(RuntimeError::NoEditor)
    }

    /// The editor executable.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds the command line that opens `path` at a 0-based position.
    #[must_use]
    pub fn invocation(&self, path: &Utf8Path, position: Option<(u32, u32)>) -> EditorInvocation {
        let mut args = self.args.clone();
        if self.kind.is_gui() {
            // Reuse the existing window so the file opens in its workspace
            args.push("--reuse-window".to_owned());
            if position.is_some() {
                args.push("--goto".to_owned());
            }
        }
        args.extend(location_args(self.kind, path, position));

        EditorInvocation {
            program: self.program.clone(),
            args,
        }
    }

    /// Opens `path` (at `position`, if given) with `working_dir` as cwd.
    ///
    /// GUI editors are started in the background and reaped on a detached
    /// thread; terminal editors run in the foreground until they exit.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Spawn`] if the editor cannot be started and
    /// [`RuntimeError::EditorStatus`] if a terminal editor exits unsuccessfully.
    pub fn open(
        &self,
        path: &Utf8Path,
        working_dir: &Utf8Path,
        position: Option<(u32, u32)>,
    ) -> Result<(), RuntimeError> {
        let invocation = self.invocation(path, position);
        debug!(program = %invocation.program, args = ?invocation.args, "Launching editor");

        let mut command = toolchain::command(&invocation.program, working_dir);
        command.args(&invocation.args);

        if self.kind.is_gui() {
            let child = command
                .spawn()
                .map_err(|e| RuntimeError::spawn(&invocation.program, e))?;
            toolchain::reap(child, &invocation.program);
            return Ok(());
        }

        let status = command
            .status()
            .map_err(|e| RuntimeError::spawn(&invocation.program, e))?;
        if status.success() {
            Ok(())
        } else {
            Err(RuntimeError::EditorStatus(status))
        }
    }
}

fn location_args(kind: EditorKind, path: &Utf8Path, position: Option<(u32, u32)>) -> Vec<String> {
    let Some((line, column)) = position else {
        return vec![path.to_string()];
    };

    let line = line.saturating_add(1);
    let column = column.saturating_add(1);

    match kind {
        EditorKind::Cursor | EditorKind::VsCode => vec![format!("{path}:{line}:{column}")],
        EditorKind::Nvim | EditorKind::Vim => {
            vec![format!("+call cursor({line},{column})"), path.to_string()]
        }
        EditorKind::Nano => vec![format!("+{line},{column}"), path.to_string()],
        EditorKind::Other => vec![path.to_string()],
    }
}

/// Resolves `path` against `root` when it is relative.
#[must_use]
pub fn absolute_path(path: &Utf8Path, root: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn everything(_: &str) -> bool {
        true
    }

    #[test]
    fn test_from_command_parses_args() {
        let launcher = EditorLauncher::from_command("code -n").unwrap();
        assert_eq!(launcher.program(), "code");
        assert_eq!(launcher.kind, EditorKind::VsCode);
        assert_eq!(launcher.args, ["-n"]);
        assert!(EditorLauncher::from_command("   ").is_none());
    }

    #[test]
    fn test_kind_from_program_path() {
        assert_eq!(EditorKind::from_program("/usr/bin/nvim"), EditorKind::Nvim);
        assert_eq!(EditorKind::from_program("Code.exe"), EditorKind::VsCode);
        assert_eq!(EditorKind::from_program("emacs"), EditorKind::Other);
    }

    #[test]
    fn test_resolve_prefers_config() {
        let config = EditorConfig {
            editor: Some("nano".to_owned()),
        };
        let launcher = EditorLauncher::resolve_with(&config, |_| Some("vim".to_owned()), everything).unwrap();
        assert_eq!(launcher.program(), "nano");
    }

    #[test]
    fn test_resolve_env_order() {
        let launcher = EditorLauncher::resolve_with(&EditorConfig::default(), |name| match name {
            "VISUAL" => Some("code".to_owned()),
            "EDITOR" => Some("vim".to_owned()),
            _ => None,
        }, everything)
        .unwrap();
        assert_eq!(launcher.program(), "code");

        let launcher = EditorLauncher::resolve_with(&EditorConfig::default(), |name| {
            (name == "EDITOR").then(|| "vim".to_owned())
        }, everything)
        .unwrap();
        assert_eq!(launcher.program(), "vim");
    }

    #[test]
    fn test_resolve_falls_back_to_known_editors() {
        let launcher = EditorLauncher::resolve_with(&EditorConfig::default(), no_env, everything).unwrap();
        assert_eq!(launcher.program(), "cursor");
    }

    #[test]
    fn test_resolve_skips_uninstalled_fallbacks() {
        let launcher =
            EditorLauncher::resolve_with(&EditorConfig::default(), no_env, |program| program != "cursor")
                .unwrap();
        assert_eq!(launcher.program(), "code");

        let launcher = EditorLauncher::resolve_with(&EditorConfig::default(), no_env, |program| {
            program == "nano"
        })
        .unwrap();
        assert_eq!(launcher.program(), "nano");
    }

    #[test]
    fn test_resolve_without_any_installed_editor() {
        let err = EditorLauncher::resolve_with(&EditorConfig::default(), no_env, |_| false).unwrap_err();
        assert!(matches!(err, RuntimeError::NoEditor));
    }

    #[test]
    fn test_resolve_trusts_explicit_choice() {
        let launcher = EditorLauncher::resolve_with(
            &EditorConfig::default(),
            |name| (name == "EDITOR").then(|| "hx".to_owned()),
            |_| false,
        )
        .unwrap();
        assert_eq!(launcher.program(), "hx");
    }

    #[test]
    fn test_resolve_blank_config_is_error() {
        let config = EditorConfig {
            editor: Some("  ".to_owned()),
        };
        let err = EditorLauncher::resolve_with(&config, no_env, everything).unwrap_err();
        assert!(matches!(err, RuntimeError::NoEditor));
    }

    #[test]
    fn test_invocation_vscode_goto() {
        let launcher = EditorLauncher::from_command("code").unwrap();
        let invocation = launcher.invocation(Utf8Path::new("/p/a.less"), Some((4, 2)));
        assert_eq!(invocation.args, ["--reuse-window", "--goto", "/p/a.less:5:3"]);

        let invocation = launcher.invocation(Utf8Path::new("/p/.lessconfig"), None);
        assert_eq!(invocation.args, ["--reuse-window", "/p/.lessconfig"]);
    }

    #[test]
    fn test_invocation_terminal_editors() {
        let nano = EditorLauncher::from_command("nano").unwrap();
        assert_eq!(
            nano.invocation(Utf8Path::new("/p/a.less"), Some((0, 0))).args,
            ["+1,1", "/p/a.less"]
        );

        let other = EditorLauncher::from_command("emacs -nw").unwrap();
        assert_eq!(
            other.invocation(Utf8Path::new("/p/a.less"), Some((9, 9))).args,
            ["-nw", "/p/a.less"]
        );
    }

    #[test]
    fn test_absolute_path() {
        let root = Utf8Path::new("/p");
        assert_eq!(absolute_path(Utf8Path::new("a.less"), root).as_str(), "/p/a.less");
        assert_eq!(absolute_path(Utf8Path::new("/q/b.less"), root).as_str(), "/q/b.less");
    }
}
