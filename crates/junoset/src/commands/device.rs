//! Device commands: `read` and `apply`.
//!
//! A target is either a NETCONF host or a snapshot file. Snapshot files
//! are loaded into an in-memory device, and `apply` writes the committed
//! result back to the same file.

use std::path::Path;

use junoset_api::{MemoryDevice, NetconfTransport, Transport};
use junoset_core::{Strategy, SystemConfig, SystemResource, plan as plan_commands, schema};

use crate::cli::{GlobalOpts, WriteArgs};
use crate::config::{self, Target};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::model::strategy;
use super::util;

fn describe(target: &Target) -> String {
    match target {
        Target::Netconf(netconf) => format!("{}:{}", netconf.host, netconf.port),
        Target::Snapshot(path) => format!("snapshot {}", path.display()),
    }
}

/// Load a snapshot file into an in-memory device. A missing file is an
/// empty device only when `allow_missing` is set.
fn load_snapshot(path: &Path, allow_missing: bool) -> Result<MemoryDevice, CliError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if allow_missing && err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "snapshot does not exist yet, starting empty");
            String::new()
        }
        Err(err) => return Err(err.into()),
    };
    MemoryDevice::from_snapshot(&text)
        .map(|device| device.with_leaves(schema::value_leaves()))
        .map_err(|e| CliError::Validation {
            field: "snapshot".into(),
            reason: e.to_string(),
        })
}

fn with_comment<T: Transport>(transport: T, commit_comment: Option<&str>) -> SystemResource<T> {
    let resource = SystemResource::new(transport);
    match commit_comment {
        Some(comment) => resource.with_commit_comment(comment),
        None => resource,
    }
}

async fn write<T: Transport>(
    resource: &SystemResource<T>,
    config: &SystemConfig,
    strategy: Strategy,
) -> Result<SystemConfig, CliError> {
    let cycle = resource.begin().await;
    let state = match strategy {
        Strategy::Create => cycle.create(config).await?,
        Strategy::Replace => cycle.update(config).await?,
    };
    Ok(state)
}

// ── Read ────────────────────────────────────────────────────────────

pub async fn read(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let resolved = config::resolve(global, &cfg)?;
    tracing::debug!(device = %describe(&resolved.target), "reading");

    let state = match resolved.target {
        Target::Netconf(netconf) => {
            SystemResource::new(NetconfTransport::new(netconf))
                .read()
                .await?
        }
        Target::Snapshot(path) => {
            SystemResource::new(load_snapshot(&path, false)?)
                .read()
                .await?
        }
    };

    output::emit(&output::model(&global.output, &state), global.quiet);
    Ok(())
}

// ── Apply ───────────────────────────────────────────────────────────

pub async fn apply(args: &WriteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config = util::read_model(&args.model)?;
    let strategy = strategy(args.create);
    // Rejected models stop here, before any prompt or session.
    let commands = plan_commands(&config, strategy)?;

    let cfg = config::load_config_or_default();
    let resolved = config::resolve(global, &cfg)?;
    let device_name = describe(&resolved.target);

    if !global.quiet {
        let painter = Painter::new(&global.color);
        for command in &commands {
            eprintln!("  {}", painter.command(command));
        }
    }
    let prompt = format!("Load {} commands into {device_name} and commit?", commands.len());
    if !util::confirm(&prompt, global.yes)? {
        return Ok(());
    }

    let comment = resolved.commit_comment.as_deref();
    let state = match resolved.target {
        Target::Netconf(netconf) => {
            let resource = with_comment(NetconfTransport::new(netconf), comment);
            write(&resource, &config, strategy).await?
        }
        Target::Snapshot(path) => {
            let device = load_snapshot(&path, true)?;
            let resource = with_comment(device.clone(), comment);
            let state = write(&resource, &config, strategy).await?;
            std::fs::write(&path, device.snapshot().await)?;
            state
        }
    };

    tracing::info!(device = %device_name, %strategy, "applied");
    if !global.quiet {
        eprintln!("Committed to {device_name}");
    }
    output::emit(&output::model(&global.output, &state), global.quiet);
    Ok(())
}
