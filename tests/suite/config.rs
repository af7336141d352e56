//! Settings loaded from a config file

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use pidigits_config::{ConfigError, ENV_MAX_POSITION, PiConfig};
use pidigits_engine::PiService;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn file_values_drive_the_service() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[engine]
profile = "production"
max_position = 120
refill_batch = 8
max_request_length = 40
"#,
    );

    let config = PiConfig::load_from(&path).unwrap().unwrap();
    let settings = config.resolve_with(|_| None).unwrap();
    assert_eq!(settings.cache_ttl(), Duration::from_secs(86_400));
    assert_eq!(settings.max_position(), 120);

    let service = PiService::new(settings);
    assert_eq!(service.get_sequence(80, 40).unwrap().len(), 40);
    assert!(service.get_sequence(0, 41).is_err());
    assert!(service.get_sequence(100, 21).is_err());
}

#[test]
fn environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[engine]\nmax_position = 500\n");
    let config = PiConfig::load_from(&path).unwrap().unwrap();

    let settings = config
        .resolve_with(|name| (name == ENV_MAX_POSITION).then(|| "900".to_string()))
        .unwrap();
    assert_eq!(settings.max_position(), 900);
}

#[test]
fn missing_file_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let loaded = PiConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn malformed_file_names_its_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[engine\nmax_position = ");
    let err = PiConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn inconsistent_limits_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "[engine]\nmax_position = 10\nmax_request_length = 20\n",
    );
    let config = PiConfig::load_from(&path).unwrap().unwrap();
    assert!(matches!(
        config.resolve_with(|_| None),
        Err(ConfigError::Invalid(_))
    ));
}
