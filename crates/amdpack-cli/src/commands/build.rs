//! Build command implementation.
//!
//! Compiles configured bundles in production mode, so each ends up as one
//! artifact in the cache directory.

use std::fs;
use std::time::Instant;

use crate::cli::{BuildArgs, GlobalArgs};
use crate::commands::utils;
use crate::config::Project;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the build command.
///
/// # Errors
///
/// Stops at the first bundle that cannot be compiled, e.g. because a script
/// is missing. A failing minifier is reported as a warning and does not stop
/// the build.
pub fn execute(args: BuildArgs, global: &GlobalArgs) -> Result<()> {
    let project = Project::load(global)?;
    let selected = project.select(args.bundle.as_deref())?;

    if selected.is_empty() {
        ui::warning("No bundles configured");
        return Ok(());
    }

    let mut rebuilt = 0;
    for declaration in &selected {
        let bundle = project.bundle_with(declaration, |options| {
            let watch = options.watch || args.watch;
            options.debug(false).watch(watch)
        })?;

        let start = Instant::now();
        let report = bundle.ensure_compiled()?;
        let elapsed = start.elapsed();

        for warning in &report.warnings {
            ui::warning(&format!("{}: {}", declaration.id(), warning));
        }

        let size = fs::metadata(&report.path).with_path(&report.path)?.len();
        let verb = if report.rebuilt { "built" } else { "up to date" };
        ui::success(&format!(
            "{} {} ({}) -> {} [{}, {}]",
            declaration.id(),
            verb,
            report.state,
            utils::display_path(&report.path, project.root()),
            ui::format_size(size),
            ui::format_duration(elapsed)
        ));

        if report.rebuilt {
            rebuilt += 1;
        }
    }

    tracing::info!(bundles = selected.len(), rebuilt, "build finished");
    Ok(())
}
