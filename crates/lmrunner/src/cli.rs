//! Clap derive structures for the `lmrunner` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lmrunner -- run Groovy scripts on LogicMonitor collectors
#[derive(Debug, Parser)]
#[command(
    name = "lmrunner",
    version,
    about = "Run Groovy scripts against LogicMonitor devices from the command line",
    long_about = "Search a LogicMonitor portal for a device, submit a Groovy script to \
        the device's collector through a debug session, and print the output.\n\n\
        Credentials live in the system keyring; settings in config.toml.",
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

#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// Portal account name (overrides the keyring)
    #[arg(long, short = 'a', env = "LMRUNNER_ACCOUNT", global = true)]
    pub account: Option<String>,

    /// API bearer token (overrides the keyring)
    #[arg(long, env = "LMRUNNER_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Path to an alternate config file
    #[arg(long, env = "LMRUNNER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
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
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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
    /// Find, show and forget the target device
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Run a Groovy script on a device's collector
    #[command(alias = "r")]
    Run(RunArgs),

    /// Manage the account name and API token in the keyring
    #[command(alias = "creds")]
    Credentials(CredentialsArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Start an interactive session that keeps the selected device
    Shell,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// Search the portal and pick the device scripts run on
    Select,

    /// Show the selected device
    Show {
        /// Also write an HTML details page to this file
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },

    /// Forget the selected device
    Clear,
}

// ── Run ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Groovy script file, or `-` to read from stdin
    #[arg(value_name = "FILE")]
    pub script: PathBuf,

    /// Search for a device first instead of reusing the selected one
    #[arg(long, short = 'n')]
    pub new_device: bool,

    /// Also write an HTML output page to this file
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,
}

// ── Credentials ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub command: CredentialsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CredentialsCommand {
    /// Prompt for the account name and API token
    Configure,

    /// Replace the stored account name
    SetAccount,

    /// Replace the stored API token
    SetToken,

    /// Delete both the account name and the API token
    Clear,

    /// Delete the stored account name
    ClearAccount,

    /// Delete the stored API token
    ClearToken,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the resolved settings and which credentials are stored
    Show,

    /// Print the config and state file locations
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ── Shell line ───────────────────────────────────────────────────────

/// One line typed at the `shell` prompt, parsed with the same command tree.
#[derive(Debug, Parser)]
#[command(
    name = "lmrunner",
    no_binary_name = true,
    disable_version_flag = true,
    subcommand_required = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}
