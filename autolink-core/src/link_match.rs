// autolink-core/src/link_match.rs
//! Records of individual autolink matches and the PII-aware debug logging
//! used while producing them.
//!
//! Built-in rules mask card numbers and social security numbers, so matched
//! text is treated as sensitive: it only reaches debug logs in full when
//! `AUTOLINK_ALLOW_DEBUG_PII=true`.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

lazy_static! {
    /// Initialized once: whether matched text may appear verbatim in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("AUTOLINK_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// What happened to a single match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Expanded through the rule's template.
    Masked,
    /// Replaced by a `[title](url)` link.
    Linked,
    /// The title lookup failed; carries the error message.
    LookupFailed(String),
    /// Found by a scan that performs no substitution.
    Detected,
}

/// One match of one rule in one message.
///
/// Offsets are byte positions in the text the rule was applied to, which for
/// the second and later rules of a configuration is the previous rule's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMatch {
    pub rule_name: String,
    /// The matched text with surrounding whitespace trimmed.
    pub original_string: String,
    /// What was emitted in place of the match.
    pub replacement: String,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub lookup_url: Option<String>,
    pub outcome: MatchOutcome,
}

/// Per-rule totals for a processed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
    pub failed_lookups: usize,
    pub original_texts: Vec<String>,
    pub replacements: Vec<String>,
}

/// Groups matches by rule, keeping rules in first-seen order.
pub fn summarize(matches: &[LinkMatch]) -> Vec<LinkSummaryItem> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_rule: BTreeMap<&str, LinkSummaryItem> = BTreeMap::new();
    for m in matches {
        let item = by_rule.entry(m.rule_name.as_str()).or_insert_with(|| {
            order.push(m.rule_name.as_str());
            LinkSummaryItem {
                rule_name: m.rule_name.clone(),
                occurrences: 0,
                failed_lookups: 0,
                original_texts: Vec::new(),
                replacements: Vec::new(),
            }
        });
        item.occurrences += 1;
        if matches!(m.outcome, MatchOutcome::LookupFailed(_)) {
            item.failed_lookups += 1;
        }
        item.original_texts.push(m.original_string.clone());
        item.replacements.push(m.replacement.clone());
    }
    order.into_iter().filter_map(|name| by_rule.remove(name)).collect()
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_link_match_debug(module_path: &str, m: &LinkMatch) {
    debug!(
        "{} Autolink '{}' matched '{}' at {}..{} -> {:?}",
        module_path,
        m.rule_name,
        get_loggable_content(&m.original_string),
        m.start,
        m.end,
        m.outcome
    );
}
