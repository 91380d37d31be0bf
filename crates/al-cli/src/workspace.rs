//! The CLI as a [`Workspace`]: roots from flags, files opened in an editor.

use al_core::{EditorConfig, resolve};
use al_runtime::{EditorLauncher, RuntimeError, Workspace, absolute_path};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Project roots and the file named on the command line.
#[derive(Debug, Clone)]
pub struct CliWorkspace {
    roots: Vec<Utf8PathBuf>,
    active: Option<Utf8PathBuf>,
    editor: EditorConfig,
}

impl CliWorkspace {
    /// Creates a workspace over `roots`, resolved against `cwd`.
    pub fn new(roots: &[Utf8PathBuf], cwd: &Utf8Path, editor: EditorConfig) -> Self {
        let roots = roots.iter().map(|root| normalize(root, cwd)).collect();
        Self {
            roots,
            active: None,
            editor,
        }
    }

    /// Sets the active file, resolved against `cwd`.
    #[must_use]
    pub fn with_active(mut self, file: &Utf8Path, cwd: &Utf8Path) -> Self {
        self.active = Some(normalize(file, cwd));
        self
    }

    /// The normalized project roots.
    pub fn roots(&self) -> &[Utf8PathBuf] {
        &self.roots
    }
}

impl Workspace for CliWorkspace {
    fn active_file(&self) -> Option<Utf8PathBuf> {
        self.active.clone()
    }

    fn project_roots(&self) -> Vec<Utf8PathBuf> {
        self.roots.clone()
    }

    fn open(&self, path: &Utf8Path, position: Option<(u32, u32)>) -> Result<(), RuntimeError> {
        if !path.exists() {
            return Err(RuntimeError::open(path, "file does not exist"));
        }
        let launcher = EditorLauncher::resolve(&self.editor)?;
        let working_dir = resolve(path, &self.roots)
            .map(|project| project.root)
            .or_else(|| path.parent().map(Utf8Path::to_path_buf))
            .unwrap_or_else(|| Utf8PathBuf::from("."));
        launcher.open(path, &working_dir, position)
    }
}

/// Makes `path` absolute and canonical where the filesystem allows.
///
/// Files that do not exist yet keep their absolute, uncanonicalized form.
fn normalize(path: &Utf8Path, cwd: &Utf8Path) -> Utf8PathBuf {
    let absolute = absolute_path(path, cwd);
    match absolute.canonicalize_utf8() {
        Ok(canonical) => canonical,
        Err(error) => {
            debug!(%error, path = %absolute, "Failed to canonicalize path");
            absolute
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().canonicalize().unwrap()).unwrap();
        (dir, root)
    }

    #[test]
    fn test_relative_paths_resolve_against_cwd() {
        let (_dir, root) = temp_root();
        fs::create_dir_all(root.join("less")).unwrap();
        fs::write(root.join("less/style.less"), "").unwrap();

        let workspace = CliWorkspace::new(&[Utf8PathBuf::from(".")], &root, EditorConfig::default())
            .with_active(Utf8Path::new("less/style.less"), &root);

        assert_eq!(workspace.roots(), [root.clone()]);
        assert_eq!(workspace.active_file(), Some(root.join("less/style.less")));
    }

    #[test]
    fn test_missing_file_stays_absolute() {
        let (_dir, root) = temp_root();
        let workspace = CliWorkspace::new(&[root.clone()], &root, EditorConfig::default())
            .with_active(Utf8Path::new("new.less"), &root);

        assert_eq!(workspace.active_file(), Some(root.join("new.less")));
    }

    #[test]
    fn test_open_missing_file_fails_before_launching() {
        let (_dir, root) = temp_root();
        let workspace = CliWorkspace::new(&[root.clone()], &root, EditorConfig::default());

        let err = workspace.open(&root.join("gone.less"), Some((0, 0))).unwrap_err();
        assert!(matches!(err, RuntimeError::Open { .. }));
        assert!(err.is_user_actionable());
    }

    #[test]
    fn test_no_active_file_by_default() {
        let (_dir, root) = temp_root();
        let workspace = CliWorkspace::new(&[root.clone()], &root, EditorConfig::default());
        assert!(workspace.active_file().is_none());
        assert_eq!(workspace.project_roots(), [root]);
    }
}
