//! Scan command implementation.

use std::fs;

use amdpack_bundler::{DefinitionMarker, scan};

use crate::cli::ScanArgs;
use crate::commands::utils;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// List the files under `DIR` with the extension that contain the marker,
/// one per line on stdout, and report the newest modification time.
pub fn execute(args: ScanArgs) -> Result<()> {
    if args.marker.is_empty() {
        return Err(CliError::InvalidArgument(
            "--marker must not be empty".to_string(),
        ));
    }

    let root = utils::resolve_path(&args.dir, &utils::get_cwd()?);
    let meta = fs::metadata(&root)
        .with_path(&root)
        .with_hint("DIR is resolved against the working directory")?;
    if !meta.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let predicate = DefinitionMarker::new(args.extension.as_str(), args.marker.as_str());
    let result = scan(&root, &predicate)?;

    if args.absolute {
        for file in &result.files {
            println!("{}", file.display());
        }
    } else {
        for file in result.relative_to(&root) {
            println!("{}", file);
        }
    }

    ui::info(&format!(
        "{} file(s) with '{}', newest: {}",
        result.files.len(),
        args.marker,
        ui::format_time(result.last_modified)
    ));
    Ok(())
}
