//! The declarative, user-authored autolink rule.
//!
//! An [`Autolink`] is pure data: it is what configuration files contain and
//! what gets persisted back to the host. Compiled matcher state lives in
//! [`crate::linkers::compiler::CompiledAutolink`] and never leaks into
//! equality, display or export.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Write as _;

use crate::errors::AutolinkError;

/// A single pattern-to-link rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Autolink {
    /// Display label. Falls back to the raw pattern when empty.
    pub name: String,
    pub disabled: bool,
    /// Regex source, usually with named capture groups.
    pub pattern: String,
    /// Mask/substitution template referencing named groups (`$name`).
    pub template: String,
    /// Template producing the URL whose page title labels the link.
    pub lookup_url_template: String,
    /// Contexts (`team` or `team/channel`) the rule applies to. Empty means everywhere.
    pub scope: Vec<String>,
    pub word_match: bool,
    pub disable_non_word_prefix: bool,
    pub disable_non_word_suffix: bool,
}

impl Autolink {
    /// Returns the label used in listings and logs.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else {
            &self.pattern
        }
    }

    /// Whether the rule applies to the given context.
    ///
    /// A scope entry `team` covers every channel of that team, `team/channel`
    /// covers exactly one channel.
    pub fn in_scope(&self, context: &str) -> bool {
        if self.scope.is_empty() {
            return true;
        }
        self.scope.iter().any(|entry| {
            context == entry
                || context
                    .strip_prefix(entry.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Renders the rule as a markdown list element. `i > 0` prefixes an index.
    pub fn to_markdown(&self, i: usize) -> String {
        let mut text = String::from("- ");
        if i > 0 {
            let _ = write!(text, "{}: ", i);
        }
        if !self.name.is_empty() {
            if self.disabled {
                let _ = write!(text, "~~{}~~", self.name);
            } else {
                text.push_str(&self.name);
            }
        }
        if self.disabled {
            text.push_str(" **Disabled**");
        }
        text.push('\n');

        let _ = writeln!(text, "  - Pattern: `{}`", self.pattern);
        let _ = writeln!(text, "  - Template: `{}`", self.template);
        if !self.lookup_url_template.is_empty() {
            let _ = writeln!(text, "  - LookupUrlTemplate: `{}`", self.lookup_url_template);
        }
        if self.disable_non_word_prefix {
            let _ = writeln!(text, "  - DisableNonWordPrefix: `{}`", self.disable_non_word_prefix);
        }
        if self.disable_non_word_suffix {
            let _ = writeln!(text, "  - DisableNonWordSuffix: `{}`", self.disable_non_word_suffix);
        }
        if !self.scope.is_empty() {
            let _ = writeln!(text, "  - Scope: `[{}]`", self.scope.join(" "));
        }
        if self.word_match {
            let _ = writeln!(text, "  - WordMatch: `{}`", self.word_match);
        }
        text
    }

    /// Exports the rule as a flat string-keyed map of primitives and string
    /// lists, suitable for host-side persistence.
    pub fn to_config(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("Name".into(), Value::from(self.name.clone()));
        map.insert("Disabled".into(), Value::from(self.disabled));
        map.insert("Pattern".into(), Value::from(self.pattern.clone()));
        map.insert("Template".into(), Value::from(self.template.clone()));
        map.insert("LookupUrlTemplate".into(), Value::from(self.lookup_url_template.clone()));
        map.insert("Scope".into(), Value::from(self.scope.clone()));
        map.insert("WordMatch".into(), Value::from(self.word_match));
        map.insert("DisableNonWordPrefix".into(), Value::from(self.disable_non_word_prefix));
        map.insert("DisableNonWordSuffix".into(), Value::from(self.disable_non_word_suffix));
        map
    }

    /// Rebuilds a rule from the map produced by [`Autolink::to_config`].
    /// Missing keys take their default values.
    pub fn from_config(map: &Map<String, Value>) -> Result<Self, AutolinkError> {
        serde_json::from_value(Value::Object(map.clone()))
            .map_err(|e| AutolinkError::ConfigError(format!("invalid autolink map: {}", e)))
    }
}
