#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

#[test]
fn CliConfig___from_str___parses_all_keys() {
    let toml = r#"
schema = "schema/app.yml"
output = "build"
log_level = "debug"
"#;

    let config = CliConfig::from_str(toml).unwrap();

    assert_eq!(config.schema, Some(PathBuf::from("schema/app.yml")));
    assert_eq!(config.output, Some(PathBuf::from("build")));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn CliConfig___from_str___empty_uses_defaults() {
    let config = CliConfig::from_str("").unwrap();

    assert_eq!(config, CliConfig::default());
    assert_eq!(config.log_level, "warn");
}

#[test]
fn CliConfig___from_str___rejects_unknown_keys() {
    let result = CliConfig::from_str("scheme = \"typo.yml\"\n");

    assert!(result.is_err());
}

#[test]
fn CliConfig___discover___reads_default_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "schema = \"app.yml\"\n").unwrap();

    let config = CliConfig::discover(None, dir.path()).unwrap();

    assert_eq!(config.schema, Some(PathBuf::from("app.yml")));
}

#[test]
fn CliConfig___discover___without_file___uses_defaults() {
    let dir = TempDir::new().unwrap();

    let config = CliConfig::discover(None, dir.path()).unwrap();

    assert_eq!(config, CliConfig::default());
}

#[test]
fn CliConfig___discover___missing_explicit_file___fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("other.toml");

    let result = CliConfig::discover(Some(&path), dir.path());

    assert!(result.is_err());
}

#[test]
fn CliConfig___schema_path___argument_wins() {
    let config = CliConfig {
        schema: Some(PathBuf::from("from-config.yml")),
        ..CliConfig::default()
    };

    assert_eq!(
        config.schema_path(Some(PathBuf::from("from-arg.yml"))).unwrap(),
        PathBuf::from("from-arg.yml")
    );
    assert_eq!(config.schema_path(None).unwrap(), PathBuf::from("from-config.yml"));
    assert!(CliConfig::default().schema_path(None).is_err());
}

#[test]
fn CliConfig___output_dir___falls_back_to_config() {
    let config = CliConfig {
        output: Some(PathBuf::from("out")),
        ..CliConfig::default()
    };

    assert_eq!(config.output_dir(None), Some(PathBuf::from("out")));
    assert_eq!(CliConfig::default().output_dir(None), None);
}
