//! Core types, configuration, and pure logic for autoless.
//!
//! This crate provides everything in the compile-on-save pipeline that does
//! not spawn processes or talk to an editor:
//!
//! - `.lessconfig` parsing, validation and storage ([`lessconfig`], [`validate`])
//! - Project resolution from known roots ([`resolve`])
//! - Compiler diagnostic sanitizing and error-reference scraping ([`diagnostic`])
//! - Application settings ([`config`])
//! - Notification values and the [`Notifier`] sink
//! - Domain types (`ProjectPath`, `ProjectConfig`, `CompileAttempt`, ...)
//!
//! # Crate Dependencies
//!
//! ```text
//! al-cli ──► al-runtime ──► al-core
//!        └─► al-watcher ──►
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod lessconfig;
pub mod notification;
pub mod resolve;
pub mod types;
pub mod validate;

pub use config::{CompilerConfig, Config, ConfigDefaults, EditorConfig, WatchConfig};
pub use diagnostic::{Diagnostic, extract_error_reference, strip_ansi};
pub use error::ConfigError;
pub use lessconfig::{CONFIG_FILE_NAME, ConfigStore, CreateOutcome, RawConfig, parse_config_text};
pub use notification::{Level, Notification, NotificationAction, Notifier};
pub use resolve::resolve;
pub use types::{
    AbortReason, CompileAttempt, CompileOutcome, ConfigValue, ErrorReference, ProjectConfig,
    ProjectPath, SkipReason, Trigger,
};
pub use validate::{ConfigField, format_field_list, validate};
