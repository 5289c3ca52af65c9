//! Styled message helpers shared by the commands.
//!
//! Color is applied only when the caller says the destination supports it;
//! otherwise text is written verbatim.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::{self, Write};

use super::theme::{ThemeEntry, ThemeMap};

/// Returns `text` colored per the theme entry, or unchanged when color is disabled.
pub fn styled(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    if !enable_colors {
        return text.to_string();
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}

fn print_prefixed<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", styled(&format!("{}{}", prefix, msg), entry, theme, enable_colors))
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "", msg, ThemeEntry::Info, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "Warning: ", msg, ThemeEntry::Warn, theme, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "Error: ", msg, ThemeEntry::Error, theme, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "", msg, ThemeEntry::Success, theme, enable_colors)
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = print_success_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn plain_output_when_colors_disabled() {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_warn_message(&mut out, "careful", &theme, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Warning: careful\n");
    }

    #[test]
    fn error_and_success_prefixes() {
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        print_error_message(&mut out, "no such rule", &theme, false).unwrap();
        print_success_message(&mut out, "exported", &theme, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Error: no such rule\nexported\n");
    }

    #[test]
    fn success_uses_its_own_color() {
        let theme = ThemeStyle::default_theme_map();
        assert_ne!(
            styled("done", ThemeEntry::Success, &theme, true),
            styled("done", ThemeEntry::Info, &theme, true)
        );
    }

    #[test]
    fn colored_output_wraps_text_in_escapes() {
        let theme = ThemeStyle::default_theme_map();
        let colored = styled("boom", ThemeEntry::Error, &theme, true);
        assert!(colored.contains("boom"));
        assert!(colored.starts_with('\u{1b}'));
    }
}
