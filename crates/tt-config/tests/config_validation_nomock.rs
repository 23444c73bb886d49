//! No-mock configuration validation + resolution tests.
//!
//! Covers:
//! - model.json validation against real files on disk
//! - Resolution order (CLI > TT_CONFIG > TT_CONFIG_DIR)
//! - Default fallback and snapshot provenance

use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;
use tt_config::resolve::{ENV_CONFIG_DIR, ENV_CONFIG_PATH};
use tt_config::{load_model_config, resolve_config, ConfigSource, ValidationError};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const VALID_MODEL: &str = r#"{
    "schema_version": "1.0.0",
    "day_span": 3,
    "samples": 25,
    "seed": 7,
    "split": {"train": 0.6, "test": 0.2, "validate": 0.2}
}"#;

const BAD_SPLIT_MODEL: &str = r#"{
    "schema_version": "1.0.0",
    "split": {"train": 0.6, "test": 0.3, "validate": 0.3}
}"#;

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for key in keys {
            saved.push(env::var(key).ok());
        }
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env lock poisoned");
    f()
}

fn write_model(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    fs::create_dir_all(dir).expect("create config dir");
    let path = dir.join(name);
    fs::write(&path, content).expect("write model.json");
    path
}

fn isolate_env(tmp: &TempDir) {
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_CONFIG_DIR);
    env::set_var("XDG_CONFIG_HOME", tmp.path().join("xdg-empty"));
}

#[test]
fn test_load_valid_model_from_cli_path() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_model(tmp.path(), "model.json", VALID_MODEL);

    let loaded = load_model_config(Some(&path)).expect("valid model should load");
    assert_eq!(loaded.path.source, ConfigSource::CliArgument);
    assert_eq!(loaded.config.day_span, 3);
    assert_eq!(loaded.config.samples, 25);
    assert_eq!(loaded.config.seed, Some(7));
    assert!(loaded.snapshot.config_hash.is_some());
}

#[test]
fn test_load_rejects_bad_split() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_model(tmp.path(), "model.json", BAD_SPLIT_MODEL);

    let err = load_model_config(Some(&path)).expect_err("bad split should fail");
    assert!(matches!(err, ValidationError::InvalidSplit { .. }));
    let common: tt_common::Error = err.into();
    assert_eq!(common.code(), 11);
}

#[test]
fn test_load_missing_cli_path_is_io_error() {
    let tmp = TempDir::new().expect("tempdir");
    let err = load_model_config(Some(&tmp.path().join("absent.json")))
        .expect_err("missing explicit config should fail");
    assert!(matches!(err, ValidationError::IoError(_)));
}

#[test]
fn test_resolve_env_path_over_config_dir() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_CONFIG_PATH, ENV_CONFIG_DIR, "XDG_CONFIG_HOME"]);
        let tmp = TempDir::new().expect("tempdir");
        isolate_env(&tmp);

        let direct = write_model(&tmp.path().join("direct"), "custom.json", VALID_MODEL);
        let dir = tmp.path().join("dir");
        write_model(&dir, "model.json", VALID_MODEL);

        env::set_var(ENV_CONFIG_PATH, &direct);
        env::set_var(ENV_CONFIG_DIR, &dir);

        let resolved = resolve_config(None);
        assert_eq!(resolved.source, ConfigSource::Environment);
        assert_eq!(resolved.path.as_deref(), Some(direct.as_path()));
    });
}

#[test]
fn test_resolve_config_dir_when_env_path_missing() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_CONFIG_PATH, ENV_CONFIG_DIR, "XDG_CONFIG_HOME"]);
        let tmp = TempDir::new().expect("tempdir");
        isolate_env(&tmp);

        let dir = tmp.path().join("dir");
        let model = write_model(&dir, "model.json", VALID_MODEL);
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.json"));
        env::set_var(ENV_CONFIG_DIR, &dir);

        let resolved = resolve_config(None);
        assert_eq!(resolved.source, ConfigSource::Environment);
        assert_eq!(resolved.path.as_deref(), Some(model.as_path()));
    });
}

#[test]
fn test_cli_over_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_CONFIG_PATH, ENV_CONFIG_DIR, "XDG_CONFIG_HOME"]);
        let tmp = TempDir::new().expect("tempdir");
        isolate_env(&tmp);

        let env_model = write_model(&tmp.path().join("env"), "model.json", VALID_MODEL);
        let cli_model = write_model(&tmp.path().join("cli"), "model.json", VALID_MODEL);
        env::set_var(ENV_CONFIG_PATH, &env_model);

        let resolved = resolve_config(Some(&cli_model));
        assert_eq!(resolved.source, ConfigSource::CliArgument);
        assert_eq!(resolved.path.as_deref(), Some(cli_model.as_path()));
    });
}
