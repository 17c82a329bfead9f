//! Tests for paths module.

use super::*;
use serial_test::serial;
use tempfile::tempdir;

#[test]
fn test_fingerprint_consistency() {
    let a = fingerprint("token-abc");
    let b = fingerprint("token-abc");
    assert_eq!(a, b, "Fingerprint should be consistent across calls");
    assert_eq!(a.len(), 12, "Fingerprint should be 12 hex characters");
    assert_ne!(a, fingerprint("token-abd"));
}

#[test]
fn test_hex_encode() {
    assert_eq!(hex_encode(&[0x00, 0xff, 0x10]), "00ff10");
    assert_eq!(hex_encode(&[0xab, 0xcd, 0xef]), "abcdef");
}

#[test]
#[serial]
fn test_home_override_layout() {
    let dir = tempdir().unwrap();
    let _guard = set_home_for_test(dir.path());

    assert_eq!(collab_home_dir().unwrap(), dir.path());
    assert_eq!(config_path().unwrap(), dir.path().join("config.yaml"));

    let session = session_file_path("brand").unwrap();
    assert_eq!(session, dir.path().join("sessions").join("brand.json"));
    assert!(dir.path().join("sessions").is_dir());

    let logs = session_logs_dir("abc").unwrap();
    assert!(logs.ends_with("logs/abc"));
    assert!(logs.is_dir());
}

#[test]
#[serial]
fn test_collab_home_env() {
    let dir = tempdir().unwrap();
    std::env::set_var(COLLAB_HOME_ENV, dir.path());

    let home = collab_home_dir();
    std::env::remove_var(COLLAB_HOME_ENV);

    assert_eq!(home.unwrap(), dir.path());
}
