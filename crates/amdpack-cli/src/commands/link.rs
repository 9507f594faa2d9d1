//! Link command implementation.

use crate::cli::{GlobalArgs, LinkArgs};
use crate::config::Project;
use crate::error::Result;

/// Print the HTML (or JSON) that embeds one bundle.
///
/// Without `--debug` the bundle's configured mode applies; production mode
/// compiles the artifact first if needed.
pub fn execute(args: LinkArgs, global: &GlobalArgs) -> Result<()> {
    let project = Project::load(global)?;
    let declaration = project.select_one(&args.bundle)?;
    let bundle = project.bundle_with(declaration, |options| {
        let debug = options.debug || args.debug;
        options.debug(debug)
    })?;

    let spec = bundle.resolve_for_embedding()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&spec)?);
    } else {
        println!("{}", spec.to_html());
    }
    Ok(())
}
