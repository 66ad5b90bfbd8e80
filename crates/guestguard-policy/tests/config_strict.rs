#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use guestguard_core::GuestGuardError;
use guestguard_policy::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
controller:
  tls: { insecure_skip_verfy: true } # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, GuestGuardError::Config(_)));
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.controller.request_timeout_ms, 5000);
    assert!(!cfg.controller.tls.insecure_skip_verify);
    assert!(cfg.accounts.is_empty());
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
controller:
  request_timeout_ms: 2500
accounts:
  - extension: "100"
    domain: "pbx-a.example.com"
  - extension: "200"
    domain: "pbx-b.example.com"
    default: true
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.controller.request_timeout_ms, 2500);
    assert_eq!(cfg.accounts.len(), 2);
    assert!(cfg.accounts[1].default);
}

#[test]
fn rejects_wrong_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert!(matches!(err, GuestGuardError::UnsupportedVersion));
}

#[test]
fn rejects_two_defaults() {
    let bad = r#"
version: 1
accounts:
  - { extension: "100", domain: "a.example", default: true }
  - { extension: "200", domain: "b.example", default: true }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("default"));
}

#[test]
fn rejects_duplicate_extension() {
    let bad = r#"
version: 1
accounts:
  - { extension: "100", domain: "a.example" }
  - { extension: "100", domain: "b.example" }
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_out_of_range_timeout() {
    let bad = "version: 1\ncontroller:\n  request_timeout_ms: 10\n";
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn missing_file_is_config_error() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert!(matches!(err, GuestGuardError::Config(_)));
}
