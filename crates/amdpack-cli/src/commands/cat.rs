//! Cat command implementation.

use std::io::Write;

use crate::cli::{CatArgs, GlobalArgs};
use crate::config::Project;
use crate::error::{Result, ResultExt};

/// Compile one bundle if needed and write the artifact to stdout.
pub fn execute(args: CatArgs, global: &GlobalArgs) -> Result<()> {
    let project = Project::load(global)?;
    let declaration = project.select_one(&args.bundle)?;
    let bundle = project.bundle_with(declaration, |options| options.debug(false))?;

    let bytes = bundle.serve()?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&bytes)
        .and_then(|()| stdout.flush())
        .context("Failed to write bundle to stdout")?;
    Ok(())
}
