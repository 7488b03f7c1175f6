//! Output formatting for models, statement sets, and load plans.
//!
//! The structured formats (`json`, `json-compact`, `yaml`) always serialize
//! the value itself. `table` and `plain` are shaped per kind of output: a
//! model shows as YAML or display-set text, statements and plans as rows
//! or bare commands.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use junoset_core::{StatementSet, SystemConfig, build};

use crate::cli::{ColorMode, OutputFormat};

// ── Color ────────────────────────────────────────────────────────────

/// Paints load commands by verb when color is on: deletes red, sets green.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(mode: &ColorMode) -> Self {
        let color = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
        };
        Self { color }
    }

    pub fn command(self, command: &str) -> String {
        match (self.color, command.starts_with("delete ")) {
            (false, _) => command.to_owned(),
            (true, true) => command.red().to_string(),
            (true, false) => command.green().to_string(),
        }
    }
}

// ── Shared pieces ────────────────────────────────────────────────────

/// Serialized text for the structured formats, `None` for table and plain.
fn structured<T: Serialize + ?Sized>(format: &OutputFormat, data: &T) -> Option<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(data).map_err(|e| e.to_string()),
        OutputFormat::JsonCompact => serde_json::to_string(data).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(|e| e.to_string()),
        OutputFormat::Table | OutputFormat::Plain => return None,
    };
    Some(rendered.unwrap_or_else(|e| format!("serialization failed: {e}")))
}

fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn yaml<T: Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("# serialization failed: {e}"))
}

// ── Renderers ────────────────────────────────────────────────────────

/// Catalog-style listing: `Tabled` rows for `table`, one line per item
/// for `plain`.
pub fn rows<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    line: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
    R: Tabled,
{
    structured(format, data).unwrap_or_else(|| match format {
        OutputFormat::Table => table(data.iter().map(to_row)),
        _ => data.iter().map(line).collect::<Vec<_>>().join("\n"),
    })
}

/// A value with no row shape; the caller supplies the human text.
pub fn value<T: Serialize>(
    format: &OutputFormat,
    data: &T,
    table_text: impl FnOnce(&T) -> String,
    plain_text: impl FnOnce(&T) -> String,
) -> String {
    structured(format, data).unwrap_or_else(|| match format {
        OutputFormat::Table => table_text(data),
        _ => plain_text(data),
    })
}

/// A model: YAML for `table`, display-set text for `plain`.
pub fn model(format: &OutputFormat, config: &SystemConfig) -> String {
    structured(format, config).unwrap_or_else(|| match format {
        OutputFormat::Table if config.is_empty() => "(nothing configured)".into(),
        OutputFormat::Table => yaml(config),
        _ => match build(config) {
            Ok(statements) => statements.to_display_set(),
            Err(err) => {
                tracing::warn!(error = %err, "model does not render, showing YAML");
                yaml(config)
            }
        },
    })
}

#[derive(Tabled)]
struct StatementRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Statement")]
    statement: String,
}

/// Built statements, as full `set` commands.
pub fn statements(format: &OutputFormat, set: &StatementSet) -> String {
    structured(format, set).unwrap_or_else(|| match format {
        OutputFormat::Table => table(set.iter().map(|s| StatementRow {
            field: s.field.into(),
            statement: s.set_command(),
        })),
        _ => set.set_commands().join("\n"),
    })
}

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "#")]
    step: usize,
    #[tabled(rename = "Command")]
    command: String,
}

/// A load plan. Commands are numbered in `table` and painted in both
/// human formats.
pub fn plan(format: &OutputFormat, commands: &[String], painter: Painter) -> String {
    structured(format, commands).unwrap_or_else(|| match format {
        OutputFormat::Table => table(commands.iter().enumerate().map(|(index, command)| {
            PlanRow {
                step: index + 1,
                command: painter.command(command),
            }
        })),
        _ => commands
            .iter()
            .map(|command| painter.command(command))
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

/// Write rendered output to stdout unless quiet.
pub fn emit(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end_matches('\n'));
}
