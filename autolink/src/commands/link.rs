//! `link` command implementation: rewrites text with every applicable autolink.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use autolink_core::{LinkEngine, LinkSummaryItem};

use crate::ui::link_summary;
use crate::ui::output_format::info_msg;
use crate::ui::theme::ThemeMap;

/// Options for the `link` command.
pub struct LinkOptions {
    pub input: String,
    pub output_path: Option<PathBuf>,
    pub scope: Option<String>,
    pub no_summary: bool,
    pub quiet: bool,
}

/// Links the whole input at once and writes it to the output file or stdout,
/// followed by the summary on stderr.
pub fn run_link_opts(engine: &dyn LinkEngine, opts: LinkOptions, theme_map: &ThemeMap) -> Result<()> {
    info!("Starting autolink operation.");

    let (linked, summary) = engine.link(&opts.input, opts.scope.as_deref());
    debug!(
        "Content linked. Original length: {}, linked length: {}",
        opts.input.len(),
        linked.len()
    );

    match &opts.output_path {
        Some(path) => {
            if !opts.quiet {
                info_msg(format!("Writing linked content to file: {}", path.display()), theme_map);
            }
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_linked(&mut file, &linked)?;
        }
        None => {
            let stdout = io::stdout();
            write_linked(&mut stdout.lock(), &linked)?;
        }
    }

    handle_link_summary(&summary, &opts, theme_map)?;
    info!("Autolink operation completed.");
    Ok(())
}

/// Writes `text`, terminating it with a newline if it does not already end with one.
fn write_linked<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        writeln!(writer)?;
    }
    writer.flush()
}

fn handle_link_summary(summary: &[LinkSummaryItem], opts: &LinkOptions, theme_map: &ThemeMap) -> Result<()> {
    if !opts.no_summary && !opts.quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        link_summary::print_summary(summary, &mut io::stderr(), theme_map, stderr_supports_color)?;
    }
    Ok(())
}

/// Links `reader` one line at a time, flushing after every line so output
/// keeps pace with a live pipe. Returns the number of lines processed.
pub fn run_line_buffered<R: BufRead, W: Write>(
    engine: &dyn LinkEngine,
    reader: R,
    mut writer: W,
    scope: Option<&str>,
) -> Result<usize> {
    let mut count = 0;
    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        writeln!(writer, "{}", link_single_line(&line, engine, scope))?;
        writer.flush()?;
        count += 1;
    }
    debug!("Line-buffered mode processed {} lines.", count);
    Ok(count)
}

pub fn link_single_line(line: &str, engine: &dyn LinkEngine, scope: Option<&str>) -> String {
    engine.link(line, scope).0
}
