//! Clap derive structures for the `junoset` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// junoset -- manage the Junos `system` subtree from a typed model
#[derive(Debug, Parser)]
#[command(
    name = "junoset",
    version,
    about = "Render, parse, and apply Junos system configuration",
    long_about = "Maps the Junos `system` configuration subtree to a typed model and back.\n\n\
        Models are YAML, JSON, or TOML files. Devices are reached over NETCONF\n\
        through the local ssh client, or replaced by a display-set snapshot file.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Device profile to use
    #[arg(long, short = 'p', env = "JUNOSET_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device host for NETCONF (overrides profile)
    #[arg(long, env = "JUNOSET_HOST", global = true, conflicts_with = "snapshot")]
    pub host: Option<String>,

    /// Display-set snapshot file standing in for a device (overrides profile)
    #[arg(long, env = "JUNOSET_SNAPSHOT", global = true)]
    pub snapshot: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "JUNOSET_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Seconds to wait for each device reply
    #[arg(long, env = "JUNOSET_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one statement or path per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the set statements a model file produces
    Render(ModelArgs),

    /// Validate a model file without rendering it
    Check(ModelArgs),

    /// Print every command a transaction would load (deletes, then sets)
    Plan(WriteArgs),

    /// Parse display-set text into a model
    Parse(ParseArgs),

    /// List the field catalog
    Fields,

    /// List the statement paths cleared before every update
    Paths,

    /// Read the model from the device
    Read,

    /// Write a model to the device and print the committed result
    Apply(WriteArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Model commands ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ModelArgs {
    /// Model file (.yaml, .yml, .json, .toml; `-` reads YAML/JSON from stdin)
    pub model: PathBuf,
}

#[derive(Debug, Args)]
pub struct WriteArgs {
    /// Model file (.yaml, .yml, .json, .toml; `-` reads YAML/JSON from stdin)
    pub model: PathBuf,

    /// Only set statements; keep managed statements already on the device
    #[arg(long)]
    pub create: bool,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// display-set text file (`-` or omitted reads stdin)
    pub input: Option<PathBuf>,

    /// Report undecodable values and keep going
    #[arg(long)]
    pub lenient: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Create a profile interactively
    Init,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
