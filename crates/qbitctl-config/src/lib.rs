//! Settings store for qbitctl.
//!
//! One TOML record at the XDG config path: daemon connection parameters
//! plus default options for new torrents. The record is read on every
//! invocation and replaced wholesale on every save -- there is no
//! partial-field merge. A missing file means "unconfigured", never an
//! error; credential resolution follows the env -> keyring -> plaintext
//! chain.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Keyring service name for the stored WebUI password.
pub const KEYRING_SERVICE: &str = "qbitctl";
/// Keyring entry name for the stored WebUI password.
pub const KEYRING_ENTRY: &str = "daemon/password";
/// Environment variable consulted before the keyring.
pub const PASSWORD_ENV: &str = "QBIT_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// How to reach the daemon.
    pub connection: ConnectionSettings,

    /// Defaults applied to new torrents when no flag overrides them.
    pub add: AddDefaults,
}

/// Daemon connection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// WebUI hostname, e.g. "localhost" or "nas.lan". Empty means the
    /// tool has not been configured yet.
    pub hostname: String,

    /// WebUI port. The type keeps it in 1-65535; 0 is rejected by
    /// [`validate`](Self::validate).
    pub port: u16,

    /// WebUI username. Empty means no authentication is attempted.
    pub username: String,

    /// WebUI password (plaintext -- prefer the keyring or QBIT_PASSWORD).
    pub password: Option<String>,

    /// Use https:// instead of http://.
    pub use_https: bool,

    /// Request timeout in seconds. Always explicit; never inherited
    /// from platform defaults.
    pub timeout_secs: u64,

    /// Accept self-signed WebUI certificates.
    pub accept_invalid_certs: bool,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            port: 8080,
            username: String::new(),
            password: None,
            use_https: false,
            timeout_secs: 30,
            accept_invalid_certs: false,
        }
    }
}

impl ConnectionSettings {
    /// Fail fast on parameters that would make every request fail.
    /// No network call is attempted past a validation error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hostname.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "hostname".into(),
                reason: "hostname is required; run `qbitctl config init`".into(),
            });
        }
        if self.port == 0 {
            return Err(ConfigError::Validation {
                field: "port".into(),
                reason: "port must be in 1-65535".into(),
            });
        }
        Ok(())
    }

    /// Build the daemon base URL: `scheme://hostname:port/`.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        self.validate()?;
        let scheme = if self.use_https { "https" } else { "http" };
        let raw = format!("{scheme}://{}:{}/", self.hostname, self.port);
        raw.parse().map_err(|e| ConfigError::Validation {
            field: "hostname".into(),
            reason: format!("cannot build URL from '{raw}': {e}"),
        })
    }
}

/// Defaults for new torrents, applied when CLI flags are absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AddDefaults {
    /// Category to assign, empty for none.
    pub category: String,

    /// Download location override, empty for the daemon's default.
    pub save_path: String,

    /// Add torrents in the paused state.
    pub paused: bool,
}

impl AddDefaults {
    pub fn category(&self) -> Option<&str> {
        (!self.category.is_empty()).then_some(self.category.as_str())
    }

    pub fn save_path(&self) -> Option<&str> {
        (!self.save_path.is_empty()).then_some(self.save_path.as_str())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "qbitctl", "qbitctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("qbitctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the record from an explicit path, merged over defaults, with
/// `QBIT_*` environment overrides on top.
///
/// Environment keys use `__` as the section separator, e.g.
/// `QBIT_CONNECTION__HOSTNAME`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("QBIT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load the record from the canonical path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the record, falling back to defaults when the file is missing
/// or unreadable. This is what callers use on the hot path: an absent
/// store means "unconfigured", not an error.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize the whole record to TOML and write it to an explicit path.
/// One whole-file write; the previous record is replaced entirely.
pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Save the record to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the WebUI password: `QBIT_PASSWORD` env var, then the system
/// keyring, then the plaintext config field. `None` when nothing is
/// configured anywhere -- the client then skips the login handshake.
pub fn resolve_password(settings: &ConnectionSettings) -> Option<SecretString> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Some(SecretString::from(pw));
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_ENTRY) {
        if let Ok(pw) = entry.get_password() {
            return Some(SecretString::from(pw));
        }
    }

    settings
        .password
        .clone()
        .filter(|pw| !pw.is_empty())
        .map(SecretString::from)
}

/// Store the WebUI password in the system keyring.
pub fn store_password_in_keyring(password: &str) -> Result<(), ConfigError> {
    let entry =
        keyring::Entry::new(KEYRING_SERVICE, KEYRING_ENTRY).map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })?;
    entry
        .set_password(password)
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_config() -> Config {
        Config {
            connection: ConnectionSettings {
                hostname: "nas.lan".into(),
                port: 8081,
                username: "admin".into(),
                password: Some("hunter2".into()),
                use_https: true,
                timeout_secs: 10,
                accept_invalid_certs: true,
            },
            add: AddDefaults {
                category: "linux".into(),
                save_path: "/downloads/linux".into(),
                paused: true,
            },
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = sample_config();
        save_config_to(&path, &cfg).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded, cfg);
    }

    #[test]
    fn save_replaces_the_whole_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        save_config_to(&path, &sample_config()).unwrap();
        save_config_to(&path, &Config::default()).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[connection]\nhostname = \"localhost\"\n").unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.connection.hostname, "localhost");
        assert_eq!(loaded.connection.port, 8080);
        assert_eq!(loaded.connection.timeout_secs, 30);
    }

    #[test]
    fn validate_requires_hostname() {
        let settings = ConnectionSettings::default();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "hostname"
        ));
    }

    #[test]
    fn base_url_uses_the_protocol_flag() {
        let mut settings = ConnectionSettings {
            hostname: "localhost".into(),
            ..ConnectionSettings::default()
        };
        assert_eq!(
            settings.base_url().unwrap().as_str(),
            "http://localhost:8080/"
        );

        settings.use_https = true;
        settings.port = 8443;
        assert_eq!(
            settings.base_url().unwrap().as_str(),
            "https://localhost:8443/"
        );
    }

    #[test]
    fn add_defaults_empty_means_none() {
        let defaults = AddDefaults::default();
        assert_eq!(defaults.category(), None);
        assert_eq!(defaults.save_path(), None);

        let defaults = AddDefaults {
            category: "linux".into(),
            save_path: "/dl".into(),
            paused: false,
        };
        assert_eq!(defaults.category(), Some("linux"));
        assert_eq!(defaults.save_path(), Some("/dl"));
    }
}
