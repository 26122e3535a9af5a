// Configuration loading tests
// Author: kelexine (https://github.com/kelexine)

use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;
use visionary_insights::config::{AppConfig, API_KEY_ENV};
use visionary_insights::models::gemini::{HarmBlockThreshold, HarmCategory};

const KEY_OVERRIDE_ENV: &str = "VISIONARY_GEMINI__API_KEY";
const PORT_OVERRIDE_ENV: &str = "VISIONARY_SERVER__PORT";

// Loading reads the process environment, so tests that load take this lock
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the environment lock and clears the variables it set on drop.
struct EnvGuard {
    vars: Vec<&'static str>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    fn acquire() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for var in [API_KEY_ENV, KEY_OVERRIDE_ENV, PORT_OVERRIDE_ENV] {
            std::env::remove_var(var);
        }
        Self {
            vars: Vec::new(),
            _lock: lock,
        }
    }

    fn set(&mut self, var: &'static str, value: &str) {
        std::env::set_var(var, value);
        self.vars.push(var);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in &self.vars {
            std::env::remove_var(var);
        }
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.gemini.model, "gemini-2.5-pro");
    assert_eq!(config.generation.top_k, 32);
    assert_eq!(config.generation.max_output_tokens, 4096);
    assert!((config.generation.temperature - 0.4).abs() < f32::EPSILON);
    assert!((config.generation.top_p - 1.0).abs() < f32::EPSILON);
    assert_eq!(config.safety.settings.len(), 4);
    assert!(config
        .safety
        .settings
        .iter()
        .all(|s| s.threshold == HarmBlockThreshold::BlockMediumAndAbove));
    assert!(config.gemini.api_key.is_none());
}

#[test]
fn test_config_file_overrides_defaults() {
    let _env = EnvGuard::acquire();
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
[server]
port = 9100

[gemini]
api_key = "file-key"
model = "gemini-2.5-flash"

[generation]
temperature = 0.2

[[safety.settings]]
category = "HARM_CATEGORY_HARASSMENT"
threshold = "BLOCK_ONLY_HIGH"
"#
    )
    .unwrap();

    let config = AppConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.gemini.api_key.as_deref(), Some("file-key"));
    assert_eq!(config.gemini.model, "gemini-2.5-flash");
    assert!((config.generation.temperature - 0.2).abs() < 1e-6);
    assert_eq!(config.generation.top_k, 32);
    assert_eq!(config.safety.settings[0].category, HarmCategory::Harassment);
    assert_eq!(config.safety.settings[0].threshold, HarmBlockThreshold::BlockOnlyHigh);
}

#[test]
fn test_explicit_config_path_must_exist() {
    let _env = EnvGuard::acquire();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(AppConfig::load(Some(missing.as_path())).is_err());
}

#[test]
fn test_env_overrides_file_values() {
    let mut env = EnvGuard::acquire();
    env.set(KEY_OVERRIDE_ENV, "env-key");
    env.set(PORT_OVERRIDE_ENV, "9200");
    let file = config_file("[gemini]\napi_key = \"file-key\"\n\n[server]\nport = 9100\n");

    let config = AppConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.gemini.api_key.as_deref(), Some("env-key"));
    assert_eq!(config.server.port, 9200);
}

#[test]
fn test_api_key_falls_back_to_conventional_variable() {
    let mut env = EnvGuard::acquire();
    env.set(API_KEY_ENV, "fallback-key");
    let file = config_file("[server]\nport = 9100\n");

    let config = AppConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.gemini.api_key.as_deref(), Some("fallback-key"));
}

#[test]
fn test_configured_key_wins_over_fallback_variable() {
    let mut env = EnvGuard::acquire();
    env.set(API_KEY_ENV, "fallback-key");
    let file = config_file("[gemini]\napi_key = \"file-key\"\n");

    let config = AppConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.gemini.api_key.as_deref(), Some("file-key"));
}

#[test]
fn test_blank_fallback_variable_means_no_key() {
    let mut env = EnvGuard::acquire();
    env.set(API_KEY_ENV, "   ");
    let file = config_file("");

    let config = AppConfig::load(Some(file.path())).unwrap();

    assert!(config.gemini.api_key.is_none());
}

#[test]
fn test_printed_config_round_trips_without_key() {
    let mut config = AppConfig::default();
    config.gemini.api_key = Some("AIzaSecret".to_string());

    let printed = config.to_toml().unwrap();
    assert!(!printed.contains("AIzaSecret"));

    let parsed: AppConfig = toml::from_str(&printed).unwrap();
    assert_eq!(parsed.generation, config.generation);
    assert_eq!(parsed.safety, config.safety);
}
