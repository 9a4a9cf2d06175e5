use std::ffi::OsString;
use std::path::Path;
use std::sync::Mutex;

use jot_config::{
    discover_config_path, load_for_dir, ConfigError, HookConfig, JotConfig, LoggingConfig,
    JOT_CONFIG_ENV_VAR,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct EnvVarGuard {
    key: &'static str,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: &Path) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value);
        Self { key, prev }
    }

    fn unset(key: &'static str) -> Self {
        let prev = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn parses_every_section() {
    let config = JotConfig::load_from_str(
        r#"
[logging]
level = "debug"
json = true
file = "jot.log"

[navigator]
tap = "Animal"
package = "com.zoo"
classpath = ["rt.jar", "build/classes"]

[[hooks]]
type = "com.zoo.Dog"
operations = ["dump", "watch"]

[[hooks]]
type = "Keeper"
"#,
    )
    .unwrap();

    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    assert!(config.logging.stderr);
    assert_eq!(config.logging.file.as_deref(), Some(Path::new("jot.log")));
    assert_eq!(config.navigator.tap.as_deref(), Some("Animal"));
    assert_eq!(config.navigator.package.as_deref(), Some("com.zoo"));
    assert_eq!(config.navigator.classpath.len(), 2);
    assert_eq!(
        config.hooks,
        vec![
            HookConfig {
                type_name: "com.zoo.Dog".to_string(),
                operations: vec!["dump".to_string(), "watch".to_string()],
            },
            HookConfig {
                type_name: "Keeper".to_string(),
                operations: Vec::new(),
            },
        ]
    );
}

#[test]
fn empty_config_is_default() {
    let config = JotConfig::load_from_str("").unwrap();
    assert_eq!(config, JotConfig::default());
    assert_eq!(config.logging, LoggingConfig::default());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = JotConfig::load_from_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "{err}");
}

#[test]
fn discovers_jot_toml_before_dot_file() {
    let _lock = ENV_LOCK.lock().unwrap();
    let _env = EnvVarGuard::unset(JOT_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    assert_eq!(discover_config_path(dir.path()), None);
    let (config, path) = load_for_dir(dir.path()).unwrap();
    assert_eq!(config, JotConfig::default());
    assert_eq!(path, None);

    let hidden = dir.path().join(".jot.toml");
    std::fs::write(&hidden, "[navigator]\ntap = \"Dog\"\n").unwrap();
    assert_eq!(
        discover_config_path(dir.path()),
        Some(hidden.canonicalize().unwrap())
    );

    let visible = dir.path().join("jot.toml");
    std::fs::write(&visible, "[navigator]\ntap = \"Cat\"\n").unwrap();
    let (config, path) = load_for_dir(dir.path()).unwrap();
    assert_eq!(path, Some(visible.canonicalize().unwrap()));
    assert_eq!(config.navigator.tap.as_deref(), Some("Cat"));
}

#[test]
fn env_override_wins() {
    let _lock = ENV_LOCK.lock().unwrap();

    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("jot.toml"), "").unwrap();
    let override_path = dir.path().join("override.toml");
    std::fs::write(&override_path, "[logging]\nlevel = \"trace\"\n").unwrap();
    let _env = EnvVarGuard::set(JOT_CONFIG_ENV_VAR, &override_path);

    let (config, path) = load_for_dir(dir.path()).unwrap();
    assert_eq!(path, Some(override_path.canonicalize().unwrap()));
    assert_eq!(config.logging.level, "trace");
}
