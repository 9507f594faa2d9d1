use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::{parse_bundle_handle, parse_extension};

/// Available amdpack subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile bundles into the artifact cache
    ///
    /// Builds every configured bundle (or the one named with --bundle) in
    /// production mode. Artifacts that already exist are kept unless watch
    /// mode finds a newer source.
    Build(BuildArgs),

    /// Print the HTML that embeds a bundle
    ///
    /// In debug mode every source is linked individually and templates are
    /// inlined; otherwise the bundle is compiled and its artifact linked.
    Link(LinkArgs),

    /// List definition files under a directory
    Scan(ScanArgs),

    /// Validate configuration and sources
    ///
    /// Loads the config, checks bundle identities and verifies that every
    /// declared script and directory exists.
    Check(CheckArgs),

    /// Write a compiled bundle to stdout
    Cat(CatArgs),
}

/// Arguments for the build command
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Only build this bundle ("name" or "module/name")
    #[arg(short, long, value_name = "BUNDLE", value_parser = parse_bundle_handle)]
    pub bundle: Option<String>,

    /// Rebuild artifacts older than their newest source
    ///
    /// Overrides the per-bundle watch setting for this run.
    #[arg(short, long)]
    pub watch: bool,
}

/// Arguments for the link command
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Bundle to link ("name" or "module/name")
    #[arg(short, long, value_name = "BUNDLE", value_parser = parse_bundle_handle)]
    pub bundle: String,

    /// Link sources individually regardless of the config
    #[arg(short, long)]
    pub debug: bool,

    /// Print the embedding as JSON instead of HTML
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Text a file must contain to match
    #[arg(short, long, default_value = "define(", value_name = "TEXT")]
    pub marker: String,

    /// File extension to match
    #[arg(short, long, default_value = ".js", value_name = "EXT", value_parser = parse_extension)]
    pub extension: String,

    /// Print absolute paths instead of paths relative to DIR
    #[arg(long)]
    pub absolute: bool,
}

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Only check the schema, skip filesystem checks
    #[arg(long)]
    pub schema_only: bool,
}

/// Arguments for the cat command
#[derive(Args, Debug)]
pub struct CatArgs {
    /// Bundle to print ("name" or "module/name")
    #[arg(short, long, value_name = "BUNDLE", value_parser = parse_bundle_handle)]
    pub bundle: String,
}
