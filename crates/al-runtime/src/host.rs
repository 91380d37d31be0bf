//! The host seam: what the runtime needs from the environment it runs in.
//!
//! An editor plugin, the CLI, and the tests each provide a [`Workspace`].

use std::rc::Rc;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::RuntimeError;

/// Access to the open files and project roots of the host.
///
/// # Examples
///
/// ```
/// use al_runtime::{RuntimeError, Workspace};
/// use camino::{Utf8Path, Utf8PathBuf};
///
/// struct SingleFile(Utf8PathBuf);
///
/// impl Workspace for SingleFile {
///     fn active_file(&self) -> Option<Utf8PathBuf> {
///         Some(self.0.clone())
///     }
///
///     fn project_roots(&self) -> Vec<Utf8PathBuf> {
///         self.0.parent().map(Utf8Path::to_path_buf).into_iter().collect()
///     }
///
///     fn open(&self, _path: &Utf8Path, _position: Option<(u32, u32)>) -> Result<(), RuntimeError> {
///         Ok(())
///     }
/// }
/// ```
pub trait Workspace {
    /// Absolute path of the file the user is working on, if any.
    fn active_file(&self) -> Option<Utf8PathBuf>;

    /// Absolute paths of the known project roots.
    fn project_roots(&self) -> Vec<Utf8PathBuf>;

    /// Opens `path` for the user, at a 0-based `(line, column)` if given.
    fn open(&self, path: &Utf8Path, position: Option<(u32, u32)>) -> Result<(), RuntimeError>;
}

impl<W: Workspace + ?Sized> Workspace for &W {
    fn active_file(&self) -> Option<Utf8PathBuf> {
        (**self).active_file()
    }

    fn project_roots(&self) -> Vec<Utf8PathBuf> {
        (**self).project_roots()
    }

    fn open(&self, path: &Utf8Path, position: Option<(u32, u32)>) -> Result<(), RuntimeError> {
        (**self).open(path, position)
    }
}

impl<W: Workspace + ?Sized> Workspace for Rc<W> {
    fn active_file(&self) -> Option<Utf8PathBuf> {
        (**self).active_file()
    }

    fn project_roots(&self) -> Vec<Utf8PathBuf> {
        (**self).project_roots()
    }

    fn open(&self, path: &Utf8Path, position: Option<(u32, u32)>) -> Result<(), RuntimeError> {
        (**self).open(path, position)
    }
}

impl<W: Workspace + ?Sized> Workspace for Arc<W> {
    fn active_file(&self) -> Option<Utf8PathBuf> {
        (**self).active_file()
    }

    fn project_roots(&self) -> Vec<Utf8PathBuf> {
        (**self).project_roots()
    }

    fn open(&self, path: &Utf8Path, position: Option<(u32, u32)>) -> Result<(), RuntimeError> {
        (**self).open(path, position)
    }
}
