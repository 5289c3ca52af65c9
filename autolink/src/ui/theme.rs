//! Module for managing the application's command-line interface (CLI) theme.
//!
//! Users may override the foreground color of each output element with a
//! YAML file mapping entry names to `{ fg: <color> }`. Only the 16 named ANSI
//! colors are accepted; entries missing from the file keep their defaults.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Section titles such as the summary header.
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// Output of the `test` command when the text was changed.
    LinkedText,
    SummaryRuleName,
    SummaryOccurrences,
    /// Failed lookup counts in the summary.
    SummaryFailures,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 9] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::LinkedText,
        ThemeEntry::SummaryRuleName,
        ThemeEntry::SummaryOccurrences,
        ThemeEntry::SummaryFailures,
    ];
}

/// Represents an ANSI color that can be used in the theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// A named ANSI color (e.g., "red", "brightgreen").
    Named(String),
}

/// Error type for parsing an invalid `ThemeColor` string.
#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white" |
            "brightblack" | "brightred" | "brightgreen" | "brightyellow" | "brightblue" |
            "brightmagenta" | "brightcyan" | "brightwhite" => Ok(ThemeColor::Named(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    /// Converts the color into its `owo_colors::AnsiColors` counterpart.
    /// Unknown names (only possible through deserialization) fall back to white.
    pub fn to_ansi_color(&self) -> AnsiColors {
        let ThemeColor::Named(name) = self;
        match name.to_lowercase().as_str() {
            "black" => AnsiColors::Black,
            "red" => AnsiColors::Red,
            "green" => AnsiColors::Green,
            "yellow" => AnsiColors::Yellow,
            "blue" => AnsiColors::Blue,
            "magenta" => AnsiColors::Magenta,
            "cyan" => AnsiColors::Cyan,
            "brightblack" => AnsiColors::BrightBlack,
            "brightred" => AnsiColors::BrightRed,
            "brightgreen" => AnsiColors::BrightGreen,
            "brightyellow" => AnsiColors::BrightYellow,
            "brightblue" => AnsiColors::BrightBlue,
            "brightmagenta" => AnsiColors::BrightMagenta,
            "brightcyan" => AnsiColors::BrightCyan,
            "brightwhite" => AnsiColors::BrightWhite,
            _ => AnsiColors::White,
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    /// An optional `ThemeColor` to apply as the foreground color.
    pub fg: Option<ThemeColor>,
}

/// Loads a theme configuration from a YAML file or returns the default theme.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    if let Some(path) = theme_path {
        ThemeStyle::load_from_file(path)
    } else {
        Ok(ThemeStyle::default_theme_map())
    }
}

impl ThemeStyle {
    fn named(color: &str) -> Self {
        ThemeStyle { fg: Some(ThemeColor::Named(color.into())) }
    }

    /// Loads a theme from a YAML file on disk and fills the gaps with default styles.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let mut custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        for (entry, style) in Self::default_theme_map() {
            custom.entry(entry).or_insert(style);
        }
        Ok(custom)
    }

    /// Returns a default theme map with predefined color mappings.
    pub fn default_theme_map() -> ThemeMap {
        let mut default_theme = HashMap::new();
        default_theme.insert(ThemeEntry::Header, Self::named("cyan"));
        default_theme.insert(ThemeEntry::Success, Self::named("green"));
        default_theme.insert(ThemeEntry::Warn, Self::named("yellow"));
        default_theme.insert(ThemeEntry::Error, Self::named("red"));
        default_theme.insert(ThemeEntry::LinkedText, Self::named("brightblue"));
        default_theme.insert(ThemeEntry::SummaryFailures, Self::named("brightred"));

        for entry in ThemeEntry::ALL {
            default_theme.entry(entry).or_insert_with(|| Self::named("white"));
        }
        default_theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_named_colors() {
        assert!("red".parse::<ThemeColor>().is_ok());
        assert!("BrightGreen".parse::<ThemeColor>().is_ok());
        assert!("unknown".parse::<ThemeColor>().is_err());
    }

    #[test]
    fn to_ansi_color_roundtrip() {
        let tc: ThemeColor = "blue".parse().unwrap();
        assert_eq!(tc.to_ansi_color(), AnsiColors::Blue);
        let tc: ThemeColor = "brightmagenta".parse().unwrap();
        assert_eq!(tc.to_ansi_color(), AnsiColors::BrightMagenta);
    }

    #[test]
    fn default_theme_covers_every_entry() {
        let theme = ThemeStyle::default_theme_map();
        for entry in ThemeEntry::ALL {
            assert!(theme.contains_key(&entry), "{:?} missing", entry);
        }
    }

    #[test]
    fn custom_theme_overrides_and_keeps_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"header:\n  fg: magenta\n")?;
        let theme = ThemeStyle::load_from_file(file.path())?;
        assert_eq!(theme[&ThemeEntry::Header].fg, Some(ThemeColor::Named("magenta".into())));
        assert_eq!(theme[&ThemeEntry::Error].fg, Some(ThemeColor::Named("red".into())));
        Ok(())
    }
}
