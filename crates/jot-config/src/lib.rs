//! `jot.toml` configuration and logging setup.

use std::borrow::Cow;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Environment variable naming an explicit config file.
pub const JOT_CONFIG_ENV_VAR: &str = "JOT_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JotConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub navigator: NavigatorConfig,

    /// Operations offered on specific types.
    #[serde(default)]
    pub hooks: Vec<HookConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// A level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,

    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,

    /// Append logs to this file as well. A file that cannot be opened is
    /// skipped.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    /// Effective filter: the configured level, with `RUST_LOG` merged on top
    /// when set.
    pub fn env_filter(&self) -> EnvFilter {
        let configured = level_directive(&self.level);
        let from_env = std::env::var("RUST_LOG")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let attempts = match &from_env {
            Some(env) => vec![format!("{configured},{}", env.trim()), env.trim().to_owned()],
            None => Vec::new(),
        };
        attempts
            .into_iter()
            .chain(std::iter::once(configured.into_owned()))
            .find_map(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }
}

/// Accepts level aliases (`WARNING`, `none`) as well as full directive strings.
fn level_directive(raw: &str) -> Cow<'_, str> {
    let raw = raw.trim();
    let alias = match raw.to_ascii_lowercase().as_str() {
        "" => "info",
        "warning" => "warn",
        "none" => "off",
        level @ ("trace" | "debug" | "info" | "warn" | "error" | "off") => {
            return Cow::Owned(level.to_owned())
        }
        _ => return Cow::Borrowed(raw),
    };
    Cow::Borrowed(alias)
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
            file: None,
        }
    }
}

/// Defaults for the navigator. Command line arguments take precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Tap type name (any unambiguous suffix).
    #[serde(default)]
    pub tap: Option<String>,

    #[serde(default)]
    pub package: Option<String>,

    /// Extra JARs or class directories used to resolve super types. They
    /// never join the navigation scope.
    #[serde(default)]
    pub classpath: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Type the operations apply to, by unambiguous suffix.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub operations: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid jot config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err.message().to_owned())
    }
}

impl JotConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Find the config file for `dir`.
///
/// Search order:
/// 1) `JOT_CONFIG_PATH` (absolute or relative to `dir`)
/// 2) `jot.toml` in `dir`
/// 3) `.jot.toml` in `dir`
pub fn discover_config_path(dir: &Path) -> Option<PathBuf> {
    if let Some(value) = std::env::var_os(JOT_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            dir.join(candidate)
        };
        return Some(path.canonicalize().unwrap_or(path));
    }

    ["jot.toml", ".jot.toml"]
        .into_iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .map(|path| path.canonicalize().unwrap_or(path))
}

/// Load the config for `dir`, or the defaults when there is none.
pub fn load_for_dir(dir: &Path) -> Result<(JotConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(dir) else {
        return Ok((JotConfig::default(), None));
    };

    let config = JotConfig::load_from_path(&path)?;
    Ok((config, Some(path)))
}

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Only the first call has an effect.
pub fn init_tracing(logging: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = logging.env_filter();

        let file = logging.file.as_deref().and_then(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map(Arc::new)
                .ok()
        });
        let file_open_failed = logging.file.is_some() && file.is_none();

        let console = if logging.stderr {
            BoxMakeWriter::new(io::stderr)
        } else {
            BoxMakeWriter::new(io::sink)
        };
        let writer = match file {
            Some(file) => BoxMakeWriter::new(console.and(file)),
            None => console,
        };

        let fmt = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if logging.json {
            fmt.json().boxed()
        } else {
            fmt.boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        if tracing::subscriber::set_global_default(subscriber).is_ok() && file_open_failed {
            if let Some(path) = logging.file.as_ref() {
                tracing::warn!(
                    target: "jot.config",
                    path = %path.display(),
                    "failed to open log file; file logging disabled"
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn level_directives_are_forgiving() {
        assert_eq!(level_directive(" WARNING "), "warn");
        assert_eq!(level_directive("Debug"), "debug");
        assert_eq!(level_directive(""), "info");
        assert_eq!(level_directive("jot.scope=debug,info"), "jot.scope=debug,info");
    }

    #[test]
    fn toml_errors_carry_the_message_only() {
        let err = JotConfig::load_from_str("[logging]\njson = \"yes\"\n").unwrap_err();
        match err {
            ConfigError::Toml(message) => assert!(message.contains("invalid type"), "{message}"),
            other => panic!("expected a toml error, got {other:?}"),
        }
    }
}
