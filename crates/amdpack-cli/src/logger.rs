//! Logging setup for the amdpack CLI.
//!
//! Log lines go to stderr so `amdpack cat` and `amdpack link` can be piped.
//!
//! # Verbosity Levels
//!
//! 1. `--verbose`: debug for the amdpack crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`: custom filter
//! 4. `[settings] log_level` from the config file
//! 5. Default: info for the amdpack crates

use amdpack_bundler::LogLevel;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 3] = ["amdpack_bundler", "amdpack_config", "amdpack_cli"];

/// Options for [`init_logger`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerOptions<'a> {
    pub verbose: bool,
    pub quiet: bool,
    pub no_color: bool,
    /// Level name from the config file, e.g. `"debug"`.
    pub level: Option<&'a str>,
}

/// Install the global tracing subscriber.
///
/// Only the first call in a process has an effect.
pub fn init_logger(options: &LoggerOptions<'_>) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!options.no_color)
        .without_time()
        .compact();

    let _ = tracing_subscriber::registry()
        .with(build_filter(options))
        .with(fmt_layer)
        .try_init();
}

fn build_filter(options: &LoggerOptions<'_>) -> EnvFilter {
    if options.verbose {
        return EnvFilter::new(crate_directives(LogLevel::Debug));
    }
    if options.quiet {
        return EnvFilter::new("error");
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = options.level.map(parse_level).unwrap_or_default();
    EnvFilter::new(crate_directives(level))
}

/// Parse a configured level, falling back to info for unknown names.
pub fn parse_level(name: &str) -> LogLevel {
    name.parse().unwrap_or_else(|err| {
        eprintln!("warning: {}; using info", err);
        LogLevel::Info
    })
}

/// `warn` plus `<crate>=<level>` for every amdpack crate.
pub fn crate_directives(level: LogLevel) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|name| format!("{}={}", name, level)));
    directives.join(",")
}
