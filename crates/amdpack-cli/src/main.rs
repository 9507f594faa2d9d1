//! amdpack CLI entry point.
//!
//! Parses arguments, installs logging and dispatches to the command
//! implementations.

use amdpack_cli::{cli, commands, config, error, logger, ui};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Settings from the config file only tune logging; load errors surface
    // again from the command itself.
    let settings = config::peek_settings(&args.global);
    let no_color = args.global.no_color || settings.no_color;
    logger::init_logger(&logger::LoggerOptions {
        verbose: args.global.verbose,
        quiet: args.global.quiet,
        no_color,
        level: settings.log_level.as_deref(),
    });
    ui::init_colors(no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args, &args.global),
        cli::Command::Link(link_args) => commands::link_execute(link_args, &args.global),
        cli::Command::Scan(scan_args) => commands::scan_execute(scan_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args, &args.global),
        cli::Command::Cat(cat_args) => commands::cat_execute(cat_args, &args.global),
    };

    result.map_err(error::cli_error_to_miette)
}
