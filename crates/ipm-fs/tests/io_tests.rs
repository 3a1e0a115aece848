use ipm_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("test.txt"));

    io::write_atomic(&path, b"hello world").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("test.txt");
    fs::write(&file_path, "original").unwrap();

    io::write_atomic(&NormalizedPath::new(&file_path), b"updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("target.txt"));

    io::write_atomic(&path, b"content").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {:?}", leftovers);
}

#[test]
fn test_write_atomic_keeps_lock_sidecar() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("objects.json"));

    io::write_atomic(&path, b"{}").unwrap();
    io::write_atomic(&path, b"[]").unwrap();

    assert!(temp.path().join(".objects.json.lock").exists());
    assert_eq!(io::read_text(&path).unwrap(), "[]");
}

#[test]
fn test_write_atomic_creates_parent_dirs() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("state/session.toml"));

    io::write_atomic(&path, b"profile = \"a.toml\"").unwrap();

    assert!(path.is_file());
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.txt");
    let err = io::read_text(&path).unwrap_err();
    assert!(err.is_unreadable());
}
