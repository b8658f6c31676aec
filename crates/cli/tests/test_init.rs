use tempfile::TempDir;
use typegate_cli::commands::{init, resolve_format};
use typegate_cli::logging::default_directives;
use typegate_cli::OutputFormat;
use typegate_core::TypegateConfig;

#[test]
fn test_init_writes_default_config() {
    let tmp = TempDir::new().unwrap();
    init::run(Some(tmp.path())).unwrap();

    let path = tmp.path().join(".typegate.toml");
    let config = TypegateConfig::from_file(&path).unwrap();
    assert_eq!(config.engine.command, "typegate-engine");
}

#[test]
fn test_init_does_not_overwrite() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".typegate.toml");
    std::fs::write(&path, "[engine]\ncommand = \"mine\"\n").unwrap();

    init::run(Some(tmp.path())).unwrap();
    let config = TypegateConfig::from_file(&path).unwrap();
    assert_eq!(config.engine.command, "mine");
}

#[test]
fn test_format_flag_overrides_config() {
    let mut config = TypegateConfig::default();
    config.output.format = "json".to_string();

    assert_eq!(resolve_format(None, &config).unwrap(), OutputFormat::Json);
    assert_eq!(
        resolve_format(Some(OutputFormat::Short), &config).unwrap(),
        OutputFormat::Short
    );
}

#[test]
fn test_unknown_config_format_is_an_error() {
    let mut config = TypegateConfig::default();
    config.output.format = "sarif".to_string();
    assert!(resolve_format(None, &config).is_err());
}

#[test]
fn test_verbosity_directives() {
    assert_eq!(default_directives(0), "error");
    assert!(default_directives(1).contains("typegate_core=debug"));
    assert!(default_directives(5).contains("typegate_core=trace"));
}
