//! Check command implementation.
//!
//! Validates configuration and sources without compiling anything.

use crate::cli::{CheckArgs, GlobalArgs};
use crate::config::Project;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load the config and apply the profile
/// 2. Validate the schema (identities, duplicates, minifier)
/// 3. Check that every script and directory exists (unless `--schema-only`)
/// 4. Resolve every bundle against the module layout
pub fn execute(args: CheckArgs, global: &GlobalArgs) -> Result<()> {
    let project = Project::load(global)?;
    ui::success(&format!(
        "Configuration is valid: {}",
        project.config_path().display()
    ));

    if args.schema_only {
        return Ok(());
    }

    project.validate_sources()?;

    for declaration in &project.config().bundles {
        let bundle = project.bundle(declaration)?;
        // Resolving every source also catches owners the layout does not know.
        let newest = bundle.last_source_modified()?;
        ui::success(&format!(
            "{} -> {} (newest source: {})",
            declaration.id(),
            bundle.compiled_file_name(),
            ui::format_time(newest)
        ));
    }

    if project.config().bundles.is_empty() {
        ui::warning("No bundles configured");
    }

    ui::success("All checks passed!");
    Ok(())
}
