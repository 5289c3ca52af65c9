// autolink/src/cli.rs
//! This file defines the command-line interface (CLI) for the autolink application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "autolink",
    author = "Autolink Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Turn ticket IDs and other patterns in chat messages into titled markdown links",
    long_about = "Autolink rewrites chat messages according to a configurable set of rules: each rule is a regular expression whose matches become markdown links, optionally titled with the <title> of a page fetched from a lookup URL, or masked text such as redacted card numbers.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Path to the autolink configuration file (YAML).
    #[arg(
        long = "config",
        short = 'c',
        value_name = "FILE",
        env = "AUTOLINK_CONFIG",
        global = true,
        help = "Path to the autolink configuration file (YAML)."
    )]
    pub config: Option<PathBuf>,

    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `autolink` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrites an input file or stdin, linking every configured pattern.
    #[command(about = "Rewrites an input file or stdin, linking every configured pattern.")]
    Link(LinkCommand),

    /// Lists the configured autolinks as markdown.
    #[command(about = "Lists the configured autolinks as markdown.")]
    List(ListCommand),

    /// Exports the configuration as JSON.
    #[command(about = "Exports the configuration as a JSON document.")]
    Export(ExportCommand),

    /// Runs a single autolink against a piece of text.
    #[command(about = "Runs a single autolink against a piece of text.")]
    Test(TestCommand),
}

/// Arguments for the `link` command.
#[derive(Parser, Debug)]
pub struct LinkCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write linked output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Channel context used to filter scoped autolinks.
    #[arg(long, short = 's', value_name = "TEAM[/CHANNEL]", help = "Only apply autolinks scoped to this team or team/channel (unscoped autolinks always apply).")]
    pub scope: Option<String>,

    /// Process input line by line (useful for streaming data from pipes).
    #[arg(long = "line-buffered", help = "Process input line by line (useful for streaming data from pipes).")]
    pub line_buffered: bool,

    /// Suppress the link summary.
    #[arg(long = "no-summary", help = "Suppress the link summary.")]
    pub no_summary: bool,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListCommand {
    /// Sort autolinks by name.
    #[arg(long, help = "Sort autolinks by name instead of configuration order.")]
    pub sorted: bool,

    /// Include the built-in masking rules.
    #[arg(long = "builtin", help = "Include the built-in card number and SSN masking rules.")]
    pub builtin: bool,
}

/// Arguments for the `export` command.
#[derive(Parser, Debug)]
pub struct ExportCommand {
    /// Write the JSON to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write the JSON document to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `test` command.
#[derive(Parser, Debug)]
pub struct TestCommand {
    /// Name of the autolink to run.
    #[arg(value_name = "NAME", help = "Name of the autolink to run (built-in names included).")]
    pub name: String,

    /// Text to run it against.
    #[arg(value_name = "TEXT", help = "Text to run the autolink against.")]
    pub text: String,
}
