//! Project-level types: where a file lives and how its project compiles.
//!
//! - [`ProjectPath`] - a project root paired with a file path relative to it
//! - [`ProjectConfig`] - the validated, typed contents of a `.lessconfig`

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lessconfig::RawConfig;
use crate::validate::{ConfigField, validate};

/// A file located inside a known project root.
///
/// Produced by [`resolve`](crate::resolve::resolve). The root is absolute; the
/// file path is relative to the root.
///
/// # Examples
///
/// ```
/// use al_core::ProjectPath;
///
/// let path = ProjectPath::new("/work/site", "less/style.less");
/// assert_eq!(path.absolute_file().as_str(), "/work/site/less/style.less");
/// assert!(path.is_less());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectPath {
    /// Absolute project root.
    pub root: Utf8PathBuf,

    /// File path relative to [`root`](Self::root).
    pub file: Utf8PathBuf,
}

impl ProjectPath {
    /// Creates a new project path.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>, file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            file: file.into(),
        }
    }

    /// Returns the project root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the absolute path of the file.
    #[must_use]
    pub fn absolute_file(&self) -> Utf8PathBuf {
        project_join(&self.root, self.file.as_str())
    }

    /// Returns `true` if the file name ends in `.less`.
    #[inline]
    #[must_use]
    pub fn is_less(&self) -> bool {
        self.file.as_str().ends_with(".less")
    }
}

/// The validated configuration of one project.
///
/// A `ProjectConfig` only exists once every field of the `.lessconfig` is
/// present and correctly typed; see [`ProjectConfig::from_raw`]. It is built
/// fresh for each compile attempt and never cached.
///
/// # Examples
///
/// ```
/// use al_core::{ProjectConfig, parse_config_text};
///
/// let raw = parse_config_text(
///     "MINIFY=false\nAUTO_COMPILE=true\nSOURCE_FILE=less/style.less\nTARGET_FILE=css/style.css",
/// );
/// let config = ProjectConfig::from_raw(&raw).unwrap();
/// assert!(config.auto_compile);
/// assert_eq!(config.target_file, "css/style.css");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Pass the minify flag to the compiler.
    pub minify: bool,

    /// Compile when a `.less` file is saved.
    pub auto_compile: bool,

    /// Entry `.less` file, relative to the project root.
    pub source_file: String,

    /// Output `.css` file, relative to the project root.
    pub target_file: String,
}

impl ProjectConfig {
    /// Builds a typed config from parsed `.lessconfig` contents.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every missing or mistyped
    /// field.
    pub fn from_raw(raw: &RawConfig) -> Result<Self, ConfigError> {
        let minify = raw.get(ConfigField::Minify.name()).and_then(|v| v.as_bool());
        let auto_compile = raw
            .get(ConfigField::AutoCompile.name())
            .and_then(|v| v.as_bool());
        let source_file = raw.get(ConfigField::SourceFile.name()).and_then(|v| v.as_str());
        let target_file = raw.get(ConfigField::TargetFile.name()).and_then(|v| v.as_str());

        match (minify, auto_compile, source_file, target_file) {
            (Some(minify), Some(auto_compile), Some(source_file), Some(target_file)) => Ok(Self {
                minify,
                auto_compile,
                source_file: source_file.to_owned(),
                target_file: target_file.to_owned(),
            }),
            _ => Err(ConfigError::Invalid {
                fields: validate(raw),
            }),
        }
    }

    /// Absolute path of the source file under `root`.
    #[must_use]
    pub fn source_path(&self, root: &Utf8Path) -> Utf8PathBuf {
        project_join(root, &self.source_file)
    }

    /// Absolute path of the target file under `root`.
    #[must_use]
    pub fn target_path(&self, root: &Utf8Path) -> Utf8PathBuf {
        project_join(root, &self.target_file)
    }

    /// Serializes the four recognized fields as `.lessconfig` text.
    ///
    /// Lines are joined with `\n` without a trailing newline.
    #[must_use]
    pub fn to_config_text(&self) -> String {
        format!(
            "{}={}\n{}={}\n{}={}\n{}={}",
            ConfigField::Minify.key(),
            self.minify,
            ConfigField::AutoCompile.key(),
            self.auto_compile,
            ConfigField::SourceFile.key(),
            self.source_file,
            ConfigField::TargetFile.key(),
            self.target_file,
        )
    }
}

/// Joins a project-relative path onto a root as `{root}/{relative}`.
///
/// Plain concatenation: an absolute `relative` does not replace the root.
fn project_join(root: &Utf8Path, relative: &str) -> Utf8PathBuf {
    let root = root.as_str().trim_end_matches('/');
    Utf8PathBuf::from(format!("{root}/{relative}"))
}
