//! `list`, `export` and `test` command implementations.

use anyhow::{anyhow, Context, Result};
use log::info;
use std::fs;
use std::io::Write;
use std::path::Path;

use autolink_core::{compile_rule, default_resolver, Config, MatchOutcome};

use crate::cli::ListCommand;
use crate::ui::output_format::{styled, success_msg};
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Prints the configured autolinks as a markdown list.
pub fn run_list<W: Write>(config: &Config, cmd: &ListCommand, writer: &mut W) -> Result<()> {
    let mut links = if cmd.builtin {
        config.with_preconfigured_links()
    } else {
        config.links.clone()
    };
    if cmd.sorted {
        links.sort_by(|a, b| a.display_name().cmp(b.display_name()));
    }

    if links.is_empty() {
        writeln!(writer, "No autolinks configured.")?;
        return Ok(());
    }
    for (i, link) in links.iter().enumerate() {
        write!(writer, "{}", link.to_markdown(i + 1))?;
    }
    Ok(())
}

/// Writes the configuration as pretty-printed JSON to `output` or `writer`.
/// Writing to a file is confirmed on stderr unless `quiet`.
pub fn run_export<W: Write>(
    config: &Config,
    output: Option<&Path>,
    writer: &mut W,
    theme_map: &ThemeMap,
    quiet: bool,
) -> Result<()> {
    let json = serde_json::to_string_pretty(&config.to_config()).context("Failed to serialize configuration")?;
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write export file: {}", path.display()))?;
            info!("Exported {} autolinks to {}.", config.links.len(), path.display());
            if !quiet {
                success_msg(format!("Exported {} autolinks to {}", config.links.len(), path.display()), theme_map);
            }
        }
        None => writeln!(writer, "{}", json)?,
    }
    Ok(())
}

/// Runs the autolink named `name` (built-ins included) over `text` and
/// prints the result. Fails if there is no such autolink or it cannot be used.
pub fn run_test<W: Write>(
    config: &Config,
    name: &str,
    text: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    let links = config.with_preconfigured_links();
    let link = links
        .iter()
        .find(|l| l.display_name() == name)
        .ok_or_else(|| anyhow!("No autolink named '{}'", name))?;
    let compiled = compile_rule(link).with_context(|| format!("Autolink '{}' cannot be used", name))?;
    if !compiled.is_functional() {
        return Err(anyhow!("Autolink '{}' is disabled or has no pattern or template", name));
    }

    let resolver = default_resolver(config)?;
    let replacement = compiled.replace(text, resolver.as_ref(), &config.lookup);

    let entry = if replacement.text == text {
        ThemeEntry::Info
    } else {
        ThemeEntry::LinkedText
    };
    writeln!(writer, "{}", styled(&replacement.text, entry, theme_map, enable_colors))?;
    for m in &replacement.matches {
        if let MatchOutcome::LookupFailed(reason) = &m.outcome {
            writeln!(
                writer,
                "{}",
                styled(&format!("lookup failed for '{}': {}", m.original_string, reason), ThemeEntry::Warn, theme_map, enable_colors)
            )?;
        }
    }
    Ok(())
}
