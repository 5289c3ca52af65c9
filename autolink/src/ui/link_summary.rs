//! Renders the per-rule link summary printed after a `link` run.

use anyhow::Result;
use autolink_core::LinkSummaryItem;
use std::io::Write;

use super::output_format::styled;
use super::theme::{ThemeEntry, ThemeMap};

pub fn print_summary<W: Write>(
    summary: &[LinkSummaryItem],
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    if summary.is_empty() {
        writeln!(writer, "{}", styled("No autolinks matched.", ThemeEntry::Info, theme, enable_colors))?;
        return Ok(());
    }

    writeln!(writer, "{}", styled("Autolink Summary:", ThemeEntry::Header, theme, enable_colors))?;
    for item in summary {
        let plural = if item.occurrences == 1 { "" } else { "s" };
        write!(
            writer,
            "  {} ({})",
            styled(&item.rule_name, ThemeEntry::SummaryRuleName, theme, enable_colors),
            styled(&format!("{} occurrence{}", item.occurrences, plural), ThemeEntry::SummaryOccurrences, theme, enable_colors),
        )?;
        if item.failed_lookups > 0 {
            write!(
                writer,
                " {}",
                styled(&format!("[{} failed lookups]", item.failed_lookups), ThemeEntry::SummaryFailures, theme, enable_colors)
            )?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
