//! Offline model commands: render, check, plan.

use serde::Serialize;

use junoset_core::{Strategy, build, plan as plan_commands, validate};

use crate::cli::{GlobalOpts, ModelArgs, WriteArgs};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Render ──────────────────────────────────────────────────────────

pub fn render(args: &ModelArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config = util::read_model(&args.model)?;
    let statements = build(&config)?;
    output::emit(&output::statements(&global.output, &statements), global.quiet);
    Ok(())
}

// ── Check ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CheckReport {
    valid: bool,
    statements: usize,
}

pub fn check(args: &ModelArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config = util::read_model(&args.model)?;
    validate(&config)?;
    let report = CheckReport {
        valid: true,
        statements: build(&config)?.len(),
    };
    let out = output::value(
        &global.output,
        &report,
        |r| format!("Model is valid ({} statements)", r.statements),
        |r| r.statements.to_string(),
    );
    output::emit(&out, global.quiet);
    Ok(())
}

// ── Plan ────────────────────────────────────────────────────────────

pub fn plan(args: &WriteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config = util::read_model(&args.model)?;
    let strategy = strategy(args.create);
    let commands = plan_commands(&config, strategy)?;
    tracing::debug!(%strategy, commands = commands.len(), "planned transaction");

    let painter = Painter::new(&global.color);
    output::emit(&output::plan(&global.output, &commands, painter), global.quiet);
    Ok(())
}

pub(crate) fn strategy(create: bool) -> Strategy {
    if create {
        Strategy::Create
    } else {
        Strategy::Replace
    }
}
