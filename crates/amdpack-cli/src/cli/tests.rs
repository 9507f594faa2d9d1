#[cfg(test)]
mod tests {
    use crate::cli::validation::{parse_bundle_handle, parse_extension};
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_extension_adds_dot() {
        assert_eq!(parse_extension("js"), Ok(".js".to_string()));
        assert_eq!(parse_extension(".js"), Ok(".js".to_string()));
        assert_eq!(parse_extension("tpl.html"), Ok(".tpl.html".to_string()));
    }

    #[test]
    fn test_parse_extension_invalid() {
        assert_eq!(
            parse_extension(""),
            Err("Extension cannot be empty".to_string())
        );
        assert!(parse_extension(".").is_err());
        assert!(parse_extension("a/b").is_err());
        assert!(parse_extension("a\\b").is_err());
    }

    #[test]
    fn test_parse_bundle_handle() {
        assert_eq!(parse_bundle_handle("main"), Ok("main".to_string()));
        assert_eq!(parse_bundle_handle("app/main"), Ok("app/main".to_string()));

        assert!(parse_bundle_handle("").is_err());
        assert!(parse_bundle_handle("/main").is_err());
        assert!(parse_bundle_handle("app/").is_err());
        assert!(parse_bundle_handle("a/b/c").is_err());
    }

    #[test]
    fn test_build_defaults() {
        let cli = Cli::try_parse_from(["amdpack", "build"]).unwrap();
        match cli.command {
            Command::Build(args) => {
                assert!(args.bundle.is_none());
                assert!(!args.watch);
            }
            _ => panic!("Expected Build command"),
        }
        assert!(!cli.global.verbose);
        assert!(cli.global.config.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "amdpack",
            "build",
            "--bundle",
            "app/main",
            "--profile",
            "development",
            "--config",
            "conf/amdpack.toml",
            "-v",
        ])
        .unwrap();

        assert!(cli.global.verbose);
        assert_eq!(cli.global.profile.as_deref(), Some("development"));
        assert_eq!(
            cli.global.config,
            Some(PathBuf::from("conf/amdpack.toml"))
        );
        match cli.command {
            Command::Build(args) => assert_eq!(args.bundle.as_deref(), Some("app/main")),
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["amdpack", "-v", "-q", "build"]).is_err());
    }

    #[test]
    fn test_scan_defaults() {
        let cli = Cli::try_parse_from(["amdpack", "scan", "htdocs/js"]).unwrap();
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.dir, PathBuf::from("htdocs/js"));
                assert_eq!(args.marker, "define(");
                assert_eq!(args.extension, ".js");
                assert!(!args.absolute);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_scan_extension_normalized() {
        let cli = Cli::try_parse_from(["amdpack", "scan", ".", "-e", "html", "-m", "<template"])
            .unwrap();
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.extension, ".html");
                assert_eq!(args.marker, "<template");
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_link_requires_bundle() {
        assert!(Cli::try_parse_from(["amdpack", "link"]).is_err());

        let cli = Cli::try_parse_from(["amdpack", "link", "-b", "main", "--debug"]).unwrap();
        match cli.command {
            Command::Link(args) => {
                assert_eq!(args.bundle, "main");
                assert!(args.debug);
                assert!(!args.json);
            }
            _ => panic!("Expected Link command"),
        }
    }

    #[test]
    fn test_cat_rejects_bad_handle() {
        assert!(Cli::try_parse_from(["amdpack", "cat", "--bundle", "a/b/c"]).is_err());
    }
}
