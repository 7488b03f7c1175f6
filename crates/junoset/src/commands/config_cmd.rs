//! Config subcommand handlers.

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::value(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|_| format!("{c:#?}")),
                |c| c.default_profile.clone().unwrap_or_default(),
            );
            output::emit(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::emit(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init => init(),
    }
}

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("junoset configuration");
    eprintln!("   Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let kinds = &["NETCONF over ssh", "Snapshot file (offline)"];
    let kind = Select::new()
        .with_prompt("Target")
        .items(kinds)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let mut profile = Profile::default();
    if kind == 0 {
        let host: String = Input::new()
            .with_prompt("Device host")
            .interact_text()
            .map_err(prompt_err)?;
        let port: u16 = Input::new()
            .with_prompt("NETCONF port")
            .default(junoset_api::NETCONF_PORT)
            .interact_text()
            .map_err(prompt_err)?;
        let username: String = Input::new()
            .with_prompt("Username (empty for ssh config)")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err)?;

        profile.host = Some(host);
        profile.port = (port != junoset_api::NETCONF_PORT).then_some(port);
        profile.username = (!username.is_empty()).then_some(username);
    } else {
        let path: String = Input::new()
            .with_prompt("Snapshot file")
            .default("system.conf".into())
            .interact_text()
            .map_err(prompt_err)?;
        profile.snapshot = Some(path.into());
    }

    let comment: String = Input::new()
        .with_prompt("Commit comment (empty for default)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    profile.commit_comment = (!comment.is_empty()).then_some(comment);

    // Validate before writing anything.
    profile.target(&profile_name, junoset_config::Defaults::default().timeout)?;

    let mut cfg = config::load_config().unwrap_or_else(|_| Config::default());
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    config::save_config(&cfg)?;

    eprintln!("\nConfiguration written to {}", config_path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: junoset read");
    Ok(())
}
