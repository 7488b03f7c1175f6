//! CLI-side target resolution: config file profile + flag overrides.

pub use junoset_config::{
    Config, Profile, Target, config_path, load_config, load_config_or_default, save_config,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Where to read from and write to, plus the commit comment to use.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub target: Target,
    pub commit_comment: Option<String>,
}

/// Name of the active profile: `--profile`, else the config default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve the device target. Flags win over the profile; an explicit
/// `--profile` that does not exist is an error, a missing default
/// profile is not.
pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, cfg);
    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
            available.sort();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None => Profile::default(),
    };

    if let Some(ref path) = global.snapshot {
        profile.snapshot = Some(path.clone());
        profile.host = None;
    } else if let Some(ref host) = global.host {
        profile.host = Some(host.clone());
        profile.snapshot = None;
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }

    if profile.host.is_none() && profile.snapshot.is_none() {
        return Err(CliError::NoTarget {
            path: config_path().display().to_string(),
        });
    }

    let target = profile.target(&profile_name, cfg.defaults.timeout)?;
    tracing::debug!(profile = %profile_name, ?target, "resolved target");
    Ok(Resolved {
        target,
        commit_comment: profile.commit_comment,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["junoset"];
        argv.extend_from_slice(args);
        argv.push("read");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config() -> Config {
        let mut cfg = Config {
            default_profile: Some("lab".into()),
            ..Config::default()
        };
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                host: Some("192.0.2.10".into()),
                commit_comment: Some("managed".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn snapshot_flag_overrides_profile_host() {
        let resolved = resolve(&global(&["--snapshot", "system.conf"]), &config()).unwrap();
        let Target::Snapshot(path) = resolved.target else {
            panic!("expected snapshot target");
        };
        assert_eq!(path, PathBuf::from("system.conf"));
        assert_eq!(resolved.commit_comment.as_deref(), Some("managed"));
    }

    #[test]
    fn host_and_timeout_flags_override_profile() {
        let resolved = resolve(&global(&["--host", "edge2", "--timeout", "5"]), &config()).unwrap();
        let Target::Netconf(netconf) = resolved.target else {
            panic!("expected NETCONF target");
        };
        assert_eq!(netconf.host, "edge2");
        assert_eq!(netconf.timeout, std::time::Duration::from_secs(5));
    }

    #[test]
    fn missing_target_is_reported() {
        let err = resolve(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoTarget { .. }));

        let err = resolve(&global(&["-p", "nope"]), &config()).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { .. }));
    }
}
