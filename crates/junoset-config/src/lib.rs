//! Profile configuration for junoset.
//!
//! TOML profiles with environment overrides, and translation of a profile
//! into the device target it names: a NETCONF host reached through the
//! local ssh client, or an offline snapshot file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use junoset_api::{NETCONF_PORT, NetconfConfig};

/// Prefix for environment overrides. Nested keys use `__`
/// (`JUNOSET_DEFAULTS__OUTPUT=json`).
pub const ENV_PREFIX: &str = "JUNOSET_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("profile '{profile}' names no target: set either 'host' or 'snapshot'")]
    NoTarget { profile: String },

    #[error("profile '{profile}' sets both 'host' and 'snapshot'")]
    AmbiguousTarget { profile: String },

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

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Seconds to wait for each device reply.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named device profile. Exactly one of `host` and `snapshot` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Device host name or address for NETCONF.
    pub host: Option<String>,

    /// NETCONF port (830 when unset).
    pub port: Option<u16>,

    /// Login user; unset leaves it to ssh config.
    pub username: Option<String>,

    /// ssh executable (default `ssh`).
    pub ssh_program: Option<PathBuf>,

    /// Extra ssh arguments, placed before the host.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_options: Vec<String>,

    /// Display-set snapshot file standing in for a device.
    pub snapshot: Option<PathBuf>,

    /// Commit comment used for both create and update.
    pub commit_comment: Option<String>,

    /// Override the default reply timeout.
    pub timeout: Option<u64>,
}

/// Where a profile's configuration lives.
#[derive(Debug, Clone)]
pub enum Target {
    Netconf(NetconfConfig),
    Snapshot(PathBuf),
}

impl Profile {
    /// Resolve the device target. `default_timeout` applies when the
    /// profile does not set its own.
    pub fn target(&self, profile_name: &str, default_timeout: u64) -> Result<Target, ConfigError> {
        match (&self.host, &self.snapshot) {
            (Some(_), Some(_)) => Err(ConfigError::AmbiguousTarget {
                profile: profile_name.into(),
            }),
            (None, Some(path)) => Ok(Target::Snapshot(path.clone())),
            (Some(_), None) => self
                .to_netconf_config(profile_name, default_timeout)
                .map(Target::Netconf),
            (None, None) => Err(ConfigError::NoTarget {
                profile: profile_name.into(),
            }),
        }
    }

    /// Build the NETCONF settings for this profile.
    pub fn to_netconf_config(
        &self,
        profile_name: &str,
        default_timeout: u64,
    ) -> Result<NetconfConfig, ConfigError> {
        let host = self
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ConfigError::NoTarget {
                profile: profile_name.into(),
            })?;
        if host.contains(char::is_whitespace) || host.starts_with('-') {
            return Err(ConfigError::Validation {
                field: "host".into(),
                reason: format!("not a host name: '{host}'"),
            });
        }

        let timeout = self.timeout.unwrap_or(default_timeout);
        if timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let mut config = NetconfConfig::new(host).with_timeout(Duration::from_secs(timeout));
        config.port = self.port.unwrap_or(NETCONF_PORT);
        config.username.clone_from(&self.username);
        if let Some(ref program) = self.ssh_program {
            config.ssh_program.clone_from(program);
        }
        config.ssh_options.clone_from(&self.ssh_options);
        Ok(config)
    }
}

impl Config {
    /// Look up `name`, or the default profile when `name` is `None`.
    /// Returns the resolved name with the profile.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get(name)
            .map(|profile| (name.to_owned(), profile))
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("net", "junoset", "junoset").map_or_else(
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
    p.push("junoset");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path` (if it exists), then `JUNOSET_*` variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
default_profile = "lab"

[defaults]
output = "json"

[profiles.lab]
host = "192.0.2.10"
port = 2830
username = "netops"
ssh_options = ["-o", "StrictHostKeyChecking=accept-new"]
commit_comment = "managed by junoset"

[profiles.offline]
snapshot = "system.conf"
timeout = 5
"#;

    fn sample() -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        load_config_from(&path).unwrap()
    }

    #[test]
    fn file_values_merge_over_defaults() {
        let config = sample();
        assert_eq!(config.default_profile.as_deref(), Some("lab"));
        assert_eq!(config.defaults.output, "json");
        assert_eq!(config.defaults.color, "auto");
        assert_eq!(config.defaults.timeout, 30);
        assert_eq!(config.profiles.len(), 2);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.defaults, Defaults::default());
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn netconf_profile_resolves_to_ssh_settings() {
        let config = sample();
        let (name, profile) = config.profile(None).unwrap();
        assert_eq!(name, "lab");

        let Target::Netconf(netconf) = profile.target(&name, 30).unwrap() else {
            panic!("expected a NETCONF target");
        };
        assert_eq!(
            netconf.ssh_args(),
            [
                "-p",
                "2830",
                "-l",
                "netops",
                "-o",
                "StrictHostKeyChecking=accept-new",
                "192.0.2.10",
                "-s",
                "netconf"
            ]
        );
        assert_eq!(netconf.timeout, Duration::from_secs(30));
    }

    #[test]
    fn snapshot_profile_resolves_to_path() {
        let config = sample();
        let (name, profile) = config.profile(Some("offline")).unwrap();
        let Target::Snapshot(path) = profile.target(&name, 30).unwrap() else {
            panic!("expected a snapshot target");
        };
        assert_eq!(path, PathBuf::from("system.conf"));
    }

    #[test]
    fn profile_must_name_exactly_one_target() {
        let both = Profile {
            host: Some("edge1".into()),
            snapshot: Some("system.conf".into()),
            ..Profile::default()
        };
        assert!(matches!(
            both.target("x", 30),
            Err(ConfigError::AmbiguousTarget { .. })
        ));
        assert!(matches!(
            Profile::default().target("x", 30),
            Err(ConfigError::NoTarget { .. })
        ));
    }

    #[test]
    fn bad_host_and_zero_timeout_are_rejected() {
        let profile = Profile {
            host: Some("-oProxyCommand=x".into()),
            ..Profile::default()
        };
        let err = profile.to_netconf_config("x", 30).unwrap_err();
        assert!(err.to_string().starts_with("invalid host"));

        let profile = Profile {
            host: Some("edge1".into()),
            timeout: Some(0),
            ..Profile::default()
        };
        let err = profile.to_netconf_config("x", 30).unwrap_err();
        assert!(err.to_string().starts_with("invalid timeout"));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let err = sample().profile(Some("nope")).unwrap_err();
        assert_eq!(err.to_string(), "profile 'nope' not found");
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = sample();
        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }
}
