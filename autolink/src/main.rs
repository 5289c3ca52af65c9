// autolink/src/main.rs
//! Autolink entry point.
//!
//! Resolves the configuration, builds the link engine and dispatches to the
//! selected subcommand. Failures are reported on stderr with the error theme.

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use log::LevelFilter;
use std::io;
use std::process::ExitCode;

use autolink::cli::{Cli, Commands};
use autolink::commands::link::{run_line_buffered, run_link_opts, LinkOptions};
use autolink::commands::rules::{run_export, run_list, run_test};
use autolink::logger;
use autolink::ui::output_format::{error_msg, warn_msg};
use autolink::ui::theme::{build_theme_map, ThemeMap, ThemeStyle};
use autolink::utils::config_discovery::load_config;
use autolink_core::RegexEngine;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug {
        Some(LevelFilter::Debug)
    } else if cli.quiet {
        Some(LevelFilter::Off)
    } else {
        None
    };
    logger::init_logger(level);

    let theme_map = match build_theme_map(cli.theme.as_ref()).context("Theme error") {
        Ok(theme_map) => theme_map,
        Err(e) => {
            error_msg(format!("{:#}", e), &ThemeStyle::default_theme_map());
            return ExitCode::FAILURE;
        }
    };

    match run(cli, &theme_map) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error_msg(format!("{:#}", e), &theme_map);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, theme_map: &ThemeMap) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Link(cmd) => {
            let engine = RegexEngine::new(config).context("Failed to initialize the link engine")?;
            if cmd.line_buffered {
                if (cmd.input_file.is_some() || cmd.output.is_some()) && !cli.quiet {
                    warn_msg(
                        "--line-buffered reads stdin and writes stdout; --input-file and --output are ignored.",
                        theme_map,
                    );
                }
                let stdin = io::stdin();
                let stdout = io::stdout();
                run_line_buffered(&engine, stdin.lock(), stdout.lock(), cmd.scope.as_deref())?;
            } else {
                let input = match &cmd.input_file {
                    Some(path) => std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read input file {}", path.display()))?,
                    None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
                };
                let opts = LinkOptions {
                    input,
                    output_path: cmd.output,
                    scope: cmd.scope,
                    no_summary: cmd.no_summary,
                    quiet: cli.quiet,
                };
                run_link_opts(&engine, opts, theme_map)?;
            }
        }
        Commands::List(cmd) => {
            let stdout = io::stdout();
            run_list(&config, &cmd, &mut stdout.lock())?;
        }
        Commands::Export(cmd) => {
            run_export(&config, cmd.output.as_deref(), &mut io::stdout().lock(), theme_map, cli.quiet)?;
        }
        Commands::Test(cmd) => {
            let supports_color = io::stdout().is_terminal();
            run_test(&config, &cmd.name, &cmd.text, &mut io::stdout().lock(), theme_map, supports_color)?;
        }
    }

    Ok(())
}
