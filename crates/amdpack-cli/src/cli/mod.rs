//! Command-line interface definition for amdpack.
//!
//! # Command Structure
//!
//! - `amdpack build` - compile configured bundles into the artifact cache
//! - `amdpack link` - print the `<script>` tags embedding one bundle
//! - `amdpack scan` - list definition files under a directory
//! - `amdpack check` - validate the configuration and its sources
//! - `amdpack cat` - write a compiled bundle to stdout

mod commands;
mod tests;
mod validation;

use clap::{Args, Parser};
use std::path::PathBuf;

pub use commands::{BuildArgs, CatArgs, CheckArgs, Command, LinkArgs, ScanArgs};
pub use validation::{parse_bundle_handle, parse_extension};

/// amdpack - AMD bundle builder for modular web applications
#[derive(Parser, Debug)]
#[command(
    name = "amdpack",
    version,
    about = "Concatenate and cache AMD bundles",
    long_about = "amdpack collects the scripts, definition files and templates declared by\n\
                  application modules into named, versioned bundles. Bundles are compiled once\n\
                  into a shared cache (and rebuilt in watch mode when a source changes) or\n\
                  linked script by script while debugging."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging (debug level)
    ///
    /// Shows scan results, staleness checks and transform invocations.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the config file
    ///
    /// Defaults to amdpack.toml, or the "amdpack" field of package.json, in
    /// the working directory.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Config profile to apply (e.g. development)
    #[arg(short, long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Working directory to discover the config in
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}
