//! Clap derive structures for the `qbitctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! This module must only depend on clap + clap_complete -- build.rs
//! includes it directly to generate man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// qbitctl -- qBittorrent WebUI client for the command line
#[derive(Debug, Parser)]
#[command(
    name = "qbitctl",
    version,
    about = "Send magnet links to a qBittorrent daemon and manage its queue",
    long_about = "A command-line client for the qBittorrent Web API.\n\n\
        Validates magnet links locally, forwards them to the daemon's\n\
        torrents/add endpoint, and reports the per-link outcome\n\
        (added / already queued / rejected).",
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
    /// Daemon hostname (overrides the stored setting)
    #[arg(long, short = 'H', env = "QBIT_HOST", global = true)]
    pub host: Option<String>,

    /// Daemon WebUI port
    #[arg(long, short = 'P', env = "QBIT_PORT", global = true)]
    pub port: Option<u16>,

    /// Connect over HTTPS
    #[arg(long, env = "QBIT_HTTPS", global = true)]
    pub https: bool,

    /// WebUI username
    #[arg(long, short = 'u', env = "QBIT_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "QBIT_OUTPUT",
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "QBIT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "QBIT_TIMEOUT", global = true)]
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
    /// Plain text, one value per line (scripting)
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
    /// Test the connection and print the daemon version
    #[command(alias = "test")]
    Probe,

    /// Send magnet links to the daemon
    #[command(alias = "a")]
    Add(AddArgs),

    /// List the transfer queue
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show queue totals by state
    #[command(alias = "st")]
    Status,

    /// List configured categories
    #[command(alias = "cat")]
    Categories,

    /// Pause every torrent in the queue
    PauseAll,

    /// Manage the stored configuration
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Command Args ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Magnet URIs (magnet:?xt=urn:btih:...)
    #[arg(required = true, value_name = "MAGNET")]
    pub magnets: Vec<String>,

    /// Category to assign (overrides the configured default)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Download location (overrides the configured default)
    #[arg(long)]
    pub save_path: Option<String>,

    /// Add in the paused state
    #[arg(long)]
    pub paused: bool,

    /// Skip magnets that repeat an info hash given earlier on the
    /// same command line
    #[arg(long)]
    pub skip_repeats: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show torrents in this state class
    #[arg(long, short = 's', value_name = "CLASS")]
    pub state: Option<StateClass>,

    /// Only show torrents in this category
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

/// Coarse torrent-state classes for filtering and totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateClass {
    Downloading,
    Seeding,
    Paused,
    Completed,
    Errored,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Print the stored configuration (password redacted)
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
