//! Command implementations for the amdpack CLI.
//!
//! - [`build`] - compile bundles into the artifact cache
//! - [`link`] - print the HTML embedding a bundle
//! - [`scan`] - list definition files under a directory
//! - [`check`] - validate configuration and sources
//! - [`cat`] - write a compiled bundle to stdout
//!
//! Each module exposes an `execute` function taking the parsed arguments.

pub mod build;
pub mod cat;
pub mod check;
pub mod link;
pub mod scan;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use cat::execute as cat_execute;
pub use check::execute as check_execute;
pub use link::execute as link_execute;
pub use scan::execute as scan_execute;
