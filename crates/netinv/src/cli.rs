//! Clap derive structures for the `netinv` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// netinv -- one inventory across every network controller
#[derive(Debug, Parser)]
#[command(
    name = "netinv",
    version,
    about = "Collect device inventory from multiple network controllers",
    long_about = "Fetches devices from every configured fabric, cloud-access, assurance,\n\
        and WAN-overlay controller site concurrently, normalizes them into one\n\
        record shape, and reports them as a single inventory.",
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
    /// Site registry file (defaults to the platform config directory)
    #[arg(long, short = 'r', env = "NETINV_REGISTRY", global = true)]
    pub registry: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NETINV_OUTPUT",
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

    /// Per-request timeout in seconds (overrides the registry default)
    #[arg(long, env = "NETINV_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// List every device from every configured site
    #[command(alias = "ls")]
    All(AllArgs),

    /// List devices of one domain (fabric, aci, cloud, meraki, assurance, catalyst, wan, overlay)
    #[command(alias = "d")]
    Domain(DomainArgs),

    /// Find devices by name, serial, IP, or id (case-insensitive substring)
    #[command(alias = "find")]
    Search(SearchArgs),

    /// List devices with health issues and failed sites
    Unhealthy,

    /// Show device totals per domain and health issue count
    Summary(SummaryArgs),

    /// Show configured controller sites and whether they are usable
    Sites,

    /// Write a starter registry file
    Init,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct AllArgs {
    /// Ignore any cached result and fetch again
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Debug, Args)]
pub struct DomainArgs {
    /// Free-text domain keyword
    pub keyword: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Substring to look for; empty matches every device
    #[arg(default_value = "")]
    pub query: String,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Break device counts down per controller site
    #[arg(long)]
    pub by_controller: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
