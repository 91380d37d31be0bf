//! Helpers for executing external commands.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use std::thread::{self, JoinHandle};

use camino::Utf8Path;
use tracing::debug;

/// Creates a command rooted to a specific working directory.
///
/// Arguments are passed to the program directly; no shell is involved.
#[allow(clippy::disallowed_methods)]
pub fn command(program: &str, working_dir: &Utf8Path) -> Command {
    let mut cmd = Command::new(program);
    cmd.current_dir(working_dir.as_std_path());
    cmd
}

/// Returns `true` if `program` can be started: an existing file when it
/// contains a path separator, otherwise a file in one of the `PATH` dirs.
#[must_use]
pub fn is_installed(program: &str) -> bool {
    let path = env::var_os("PATH").unwrap_or_default();
    find_program(program, env::split_paths(&path))
}

/// Like [`is_installed`] with an explicit list of search directories.
pub fn find_program(program: &str, dirs: impl IntoIterator<Item = PathBuf>) -> bool {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file();
    }

    dirs.into_iter().any(|dir| {
        let full = dir.join(program);
        full.is_file() || (cfg!(windows) && full.extension().is_none() && full.with_extension("exe").is_file())
    })
}

/// Waits for `child` on a detached thread so it is reaped once it exits.
pub fn reap(mut child: Child, program: &str) -> JoinHandle<io::Result<ExitStatus>> {
    let program = program.to_owned();
    thread::spawn(move || {
        let status = child.wait();
        match &status {
            Ok(status) => debug!(program = %program, %status, "Detached process exited"),
            Err(error) => debug!(program = %program, %error, "Failed to wait for detached process"),
        }
        status
    })
}
