//! Domain types for autoless.
//!
//! # Module Organization
//!
//! - [`value`] - typed `.lessconfig` values
//! - [`project`] - project paths and validated project configs
//! - [`reference`] - error references for jump-to-error
//! - [`attempt`] - triggers and outcomes of compile attempts
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use al_core::{CompileOutcome, ConfigValue, ProjectConfig, ProjectPath, Trigger};
//! ```

mod attempt;
mod project;
mod reference;
mod value;

pub use attempt::{AbortReason, CompileAttempt, CompileOutcome, SkipReason, Trigger};
pub use project::{ProjectConfig, ProjectPath};
pub use reference::ErrorReference;
pub use value::ConfigValue;
