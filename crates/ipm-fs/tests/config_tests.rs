use ipm_fs::{ConfigStore, Error, NormalizedPath};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");
    fs::write(&file_path, "name = \"test\"\ncount = 42").unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();

    assert_eq!(config, TestConfig { name: "test".into(), count: 42 });
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.json");
    fs::write(&file_path, r#"{"name": "test", "count": 42}"#).unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();

    assert_eq!(config.count, 42);
}

#[test]
fn test_load_yaml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.yml");
    fs::write(&file_path, "name: test\ncount: 42").unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();

    assert_eq!(config.name, "test");
}

#[test]
fn test_save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("nested/out.toml"));
    let value = TestConfig { name: "saved".into(), count: 7 };

    let store = ConfigStore::new();
    store.save(&path, &value).unwrap();
    let loaded: TestConfig = store.load(&path).unwrap();

    assert_eq!(loaded, value);
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.ini");
    fs::write(&file_path, "name=x").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&NormalizedPath::new(&file_path));
    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_parse_error_names_format() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("broken.toml");
    fs::write(&file_path, "name = ").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&NormalizedPath::new(&file_path));
    match result {
        Err(Error::ConfigParse { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_unreadable() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("absent.toml"));

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);
    assert!(result.unwrap_err().is_unreadable());
}
