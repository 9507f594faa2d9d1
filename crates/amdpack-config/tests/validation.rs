//! Filesystem validation against a project tree.

use amdpack_config::{ConfigDiscovery, ConfigError, ConfigValidator, FsValidator, validate_fs};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const CONFIG: &str = r#"
[[bundles]]
module = "app"
name = "main"
version = "1.0"

[[bundles.sources]]
kind = "plain"
module = "app"
paths = ["lib/a.js"]

[[bundles.sources]]
kind = "var"
module = "app"
paths = ["runtime.js"]

[[bundles.sources]]
kind = "directory"
module = "app"
paths = ["js"]
"#;

#[test]
fn accepts_complete_tree() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("amdpack.toml"), CONFIG);
    write(&dir.path().join("modules/app/htdocs/lib/a.js"), "var a;");
    write(&dir.path().join("var/htdocs/modulesVar/app/runtime.js"), "var r;");
    fs::create_dir_all(dir.path().join("modules/app/htdocs/js")).unwrap();

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    FsValidator::new(dir.path()).validate(&config).unwrap();
}

#[test]
fn reports_missing_script() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("amdpack.toml"), CONFIG);
    write(&dir.path().join("var/htdocs/modulesVar/app/runtime.js"), "var r;");
    fs::create_dir_all(dir.path().join("modules/app/htdocs/js")).unwrap();

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    let err = validate_fs(&config, dir.path()).unwrap_err();
    match err {
        ConfigError::SourceNotFound { bundle, kind, path } => {
            assert_eq!(bundle, "app/main");
            assert_eq!(kind, "script");
            assert!(path.ends_with("lib/a.js"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn directory_source_must_be_a_directory() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("amdpack.toml"), CONFIG);
    write(&dir.path().join("modules/app/htdocs/lib/a.js"), "var a;");
    write(&dir.path().join("var/htdocs/modulesVar/app/runtime.js"), "var r;");
    write(&dir.path().join("modules/app/htdocs/js"), "not a dir");

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    let err = validate_fs(&config, dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::SourceNotFound { kind: "directory", .. }));
}
