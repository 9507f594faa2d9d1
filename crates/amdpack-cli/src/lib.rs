//! amdpack CLI - compile, link and inspect AMD bundles.
//!
//! The binary reads bundle declarations from `amdpack.toml` (or the
//! `amdpack` field of `package.json`) through `amdpack-config` and drives
//! `amdpack-bundler` with them.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - one module per subcommand
//! - [`config`] - turns a loaded project config into bundles
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines on stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use amdpack_cli::cli::GlobalArgs;
//! use amdpack_cli::config::Project;
//!
//! # fn main() -> amdpack_cli::Result<()> {
//! let project = Project::load(&GlobalArgs::default())?;
//! for bundle in project.select(None)? {
//!     let report = project.bundle(bundle)?.ensure_compiled()?;
//!     println!("{}", report.path.display());
//! }
//! # Ok(()) }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
