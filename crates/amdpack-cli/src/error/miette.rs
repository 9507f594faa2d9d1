//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use amdpack_config::ConfigError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        // The bundler error carries its own code and help text
        CliError::Bundle(e) => Report::new(e),
        CliError::Config(e) => config_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert ConfigError to miette Report
pub fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::NotFound => miette::miette!(
            code = "CONFIG_NOT_FOUND",
            help = "Create amdpack.toml, add an \"amdpack\" field to package.json or pass --config <path>",
            "No amdpack config found"
        ),
        ConfigError::ProfileNotFound(profile) => miette::miette!(
            code = "PROFILE_NOT_FOUND",
            help = "Declare it as [profiles.<name>] in the config",
            "Profile '{}' is not defined",
            profile
        ),
        ConfigError::SourceNotFound { bundle, kind, path } => miette::miette!(
            code = "SOURCE_NOT_FOUND",
            help = "Paths are relative to the owning module's directory",
            "{} not found for bundle '{}': {}",
            kind,
            bundle,
            path.display()
        ),
        other => miette::miette!(code = "CONFIG_ERROR", "Configuration error: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_bundler_error_keeps_diagnostic_code() {
        let report = cli_error_to_miette(CliError::Bundle(amdpack_bundler::Error::MissingSource {
            module: "shop".to_string(),
            path: PathBuf::from("modules/shop/htdocs/a.js"),
        }));
        assert_eq!(
            report.code().map(|c| c.to_string()).as_deref(),
            Some("MISSING_SOURCE")
        );
    }

    #[test]
    fn test_config_not_found_has_help() {
        let report = cli_error_to_miette(CliError::Config(ConfigError::NotFound));
        assert!(report.help().is_some());
        assert_eq!(report.to_string(), "No amdpack config found");
    }

    #[test]
    fn test_other_errors_keep_message() {
        let report = cli_error_to_miette(CliError::InvalidArgument("bad".to_string()));
        assert_eq!(report.to_string(), "Invalid argument: bad");
    }
}
