// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_config() {
    let config = StoreConfig::default();
    assert_eq!(config.path, PathBuf::from(".offshore"));
    assert!(!config.autosave);
    assert!(!config.autoload);
    assert_eq!(config.lock_timeout, Duration::from_secs(60));
}

#[test]
fn builder_sets_fields() {
    let config = StoreConfig::new("/tmp/state")
        .with_autosave(true)
        .with_autoload(true)
        .with_lock_timeout(Duration::from_secs(5))
        .with_poll_interval(Duration::from_millis(1));

    assert_eq!(config.path, PathBuf::from("/tmp/state"));
    assert!(config.autosave);
    assert!(config.autoload);
    assert_eq!(config.lock_timeout, Duration::from_secs(5));
    assert_eq!(config.poll_interval, Duration::from_millis(1));
}

#[test]
fn in_current_dir_is_absolute() {
    let config = StoreConfig::in_current_dir(DEFAULT_FILENAME).unwrap();
    assert!(config.path.is_absolute());
    assert!(config.path.ends_with(".offshore"));
}

#[test]
fn resolved_path_keeps_absolute_paths() {
    let config = StoreConfig::new("/var/tmp/store");
    assert_eq!(config.resolved_path().unwrap(), PathBuf::from("/var/tmp/store"));
}

#[test]
fn resolved_path_anchors_relative_paths() {
    let resolved = StoreConfig::default().resolved_path().unwrap();
    assert_eq!(resolved, std::env::current_dir().unwrap().join(".offshore"));
}

#[test]
fn parse_toml_with_humantime_timeout() {
    let toml = r#"
        path = "/srv/app/.offshore"
        autosave = true
        lock_timeout = "5s"
    "#;
    let config = StoreConfig::from_toml_str(toml).unwrap();

    assert_eq!(config.path, PathBuf::from("/srv/app/.offshore"));
    assert!(config.autosave);
    assert!(!config.autoload);
    assert_eq!(config.lock_timeout, Duration::from_secs(5));
    assert_eq!(config.poll_interval, Duration::from_millis(10));
}

#[test]
fn parse_empty_toml_gives_defaults() {
    let config = StoreConfig::from_toml_str("").unwrap();
    assert_eq!(config, StoreConfig::default());
}

#[test]
fn parse_rejects_bad_duration() {
    let result = StoreConfig::from_toml_str(r#"lock_timeout = "soon""#);
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}
