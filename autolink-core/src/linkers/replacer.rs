//! replacer.rs - Applies one compiled autolink to one message.
//!
//! Word-match rules are replaced in a single `replace_all` pass. Rules with
//! consuming boundaries are walked match by match: each search starts where
//! the previous match ended, on the remaining text, so a boundary character
//! consumed as one match's suffix is never reused as the next match's prefix,
//! while `^` still anchors at the start of whatever text is left.
//!
//! Title lookups happen inline. A failed lookup only affects its own match.

use log::warn;
use regex::{Captures, Regex};

use crate::config::{LookupFailurePolicy, LookupSettings};
use crate::link_match::{log_link_match_debug, LinkMatch, MatchOutcome};
use crate::linkers::compiler::{CompiledAutolink, Matcher, NON_WORD_PREFIX_GROUP, NON_WORD_SUFFIX_GROUP};
use crate::lookup::TitleResolver;

/// Link text shown when a lookup failed and the policy asks for a placeholder.
pub const LOOKUP_FAILED_TEXT: &str = "lookup failed";

/// The rewritten message and what was matched in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub text: String,
    pub matches: Vec<LinkMatch>,
}

impl Replacement {
    fn unchanged(message: &str) -> Self {
        Self {
            text: message.to_string(),
            matches: Vec::new(),
        }
    }
}

/// Successive matches, each searched for in the text after the previous one.
///
/// Yields the absolute offset of the searched slice with the captures found in it.
struct SequentialMatches<'r, 'h> {
    regex: &'r Regex,
    haystack: &'h str,
    cursor: usize,
}

impl<'r, 'h> SequentialMatches<'r, 'h> {
    fn new(regex: &'r Regex, haystack: &'h str) -> Self {
        Self { regex, haystack, cursor: 0 }
    }
}

impl<'r, 'h> Iterator for SequentialMatches<'r, 'h> {
    type Item = (usize, Captures<'h>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.haystack.len() {
            return None;
        }
        let base = self.cursor;
        let rest = &self.haystack[base..];
        let caps = self.regex.captures(rest)?;
        let whole = caps.get(0)?;

        let mut next = base + whole.end();
        if whole.start() == whole.end() {
            // Step over one character so an empty match cannot repeat forever.
            next += self.haystack[next..].chars().next().map_or(1, char::len_utf8);
        }
        self.cursor = next;
        Some((base, caps))
    }
}

/// Builds the lookup URL from the trimmed match, re-matched on its own so
/// `$0` never includes consumed whitespace.
fn lookup_url(matcher: &Matcher, caps: &Captures<'_>) -> String {
    let trimmed = caps.get(0).map_or("", |m| m.as_str()).trim();
    let mut url = String::new();
    match matcher.regex.captures(trimmed) {
        Some(own) => own.expand(&matcher.lookup_url_template, &mut url),
        None => caps.expand(&matcher.lookup_url_template, &mut url),
    }
    url
}

struct Substitution<'a> {
    rule_name: &'a str,
    matcher: &'a Matcher,
    resolver: &'a dyn TitleResolver,
    settings: &'a LookupSettings,
}

impl<'a> Substitution<'a> {
    fn is_link(&self) -> bool {
        !self.matcher.lookup_url_template.is_empty()
    }

    fn substitute(&self, caps: &Captures<'_>, start: usize, end: usize) -> LinkMatch {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let original_string = whole.trim().to_string();

        let m = if !self.is_link() {
            let mut replacement = String::new();
            caps.expand(&self.matcher.template, &mut replacement);
            LinkMatch {
                rule_name: self.rule_name.to_string(),
                original_string,
                replacement,
                start,
                end,
                lookup_url: None,
                outcome: MatchOutcome::Masked,
            }
        } else {
            let url = lookup_url(self.matcher, caps);
            let prefix = caps.name(NON_WORD_PREFIX_GROUP).map_or("", |g| g.as_str());
            let suffix = caps.name(NON_WORD_SUFFIX_GROUP).map_or("", |g| g.as_str());
            let (replacement, outcome) = match self.resolver.resolve(&url) {
                Ok(title) => (
                    format!("{}[{}]({}){}", prefix, escape_link_text(&title), url, suffix),
                    MatchOutcome::Linked,
                ),
                Err(e) => {
                    warn!("Autolink '{}': lookup failed, leaving match unlinked: {}", self.rule_name, e);
                    let replacement = match self.settings.on_failure {
                        LookupFailurePolicy::Keep => whole.to_string(),
                        LookupFailurePolicy::Placeholder => {
                            format!("{}[{}]({}){}", prefix, LOOKUP_FAILED_TEXT, url, suffix)
                        }
                    };
                    (replacement, MatchOutcome::LookupFailed(e.to_string()))
                }
            };
            LinkMatch {
                rule_name: self.rule_name.to_string(),
                original_string,
                replacement,
                start,
                end,
                lookup_url: Some(url),
                outcome,
            }
        };
        log_link_match_debug(module_path!(), &m);
        m
    }

    fn replace_batch(&self, message: &str) -> Replacement {
        let mut matches = Vec::new();
        let text = self
            .matcher
            .regex
            .replace_all(message, |caps: &Captures<'_>| {
                let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
                let m = self.substitute(caps, start, end);
                let replacement = m.replacement.clone();
                matches.push(m);
                replacement
            })
            .into_owned();
        Replacement { text, matches }
    }

    /// Every match is substituted into the lookup template in place, and the
    /// whole resulting message becomes the URL of a single link.
    fn replace_collapsed(&self, message: &str) -> Replacement {
        if !self.matcher.regex.is_match(message) {
            return Replacement::unchanged(message);
        }
        let url = self
            .matcher
            .regex
            .replace_all(message, self.matcher.lookup_url_template.as_str())
            .into_owned();
        let (text, outcome) = match self.resolver.resolve(&url) {
            Ok(title) => (format!("[{}]({})", escape_link_text(&title), url), MatchOutcome::Linked),
            Err(e) => {
                warn!("Autolink '{}': lookup failed, leaving message unlinked: {}", self.rule_name, e);
                let text = match self.settings.on_failure {
                    LookupFailurePolicy::Keep => message.to_string(),
                    LookupFailurePolicy::Placeholder => format!("[{}]({})", LOOKUP_FAILED_TEXT, url),
                };
                (text, MatchOutcome::LookupFailed(e.to_string()))
            }
        };
        let m = LinkMatch {
            rule_name: self.rule_name.to_string(),
            original_string: message.trim().to_string(),
            replacement: text.clone(),
            start: 0,
            end: message.len(),
            lookup_url: Some(url),
            outcome,
        };
        log_link_match_debug(module_path!(), &m);
        Replacement { text, matches: vec![m] }
    }

    fn replace_sequential(&self, message: &str) -> Replacement {
        let mut text = String::with_capacity(message.len());
        let mut matches = Vec::new();
        let mut emitted = 0;

        for (base, caps) in SequentialMatches::new(&self.matcher.regex, message) {
            let Some(whole) = caps.get(0) else { continue };
            let (start, end) = (base + whole.start(), base + whole.end());
            text.push_str(&message[emitted..start]);
            let m = self.substitute(&caps, start, end);
            text.push_str(&m.replacement);
            matches.push(m);
            emitted = end;
        }
        text.push_str(&message[emitted..]);
        Replacement { text, matches }
    }
}

/// Keeps a title from closing the markdown link text early.
fn escape_link_text(title: &str) -> String {
    title.replace('[', "\\[").replace(']', "\\]")
}

impl CompiledAutolink {
    /// Rewrites `message` with this rule. The rule itself is never modified;
    /// a rule without a matcher returns the message unchanged.
    pub fn replace(&self, message: &str, resolver: &dyn TitleResolver, settings: &LookupSettings) -> Replacement {
        let Some(matcher) = &self.matcher else {
            return Replacement::unchanged(message);
        };
        let substitution = Substitution {
            rule_name: self.name(),
            matcher,
            resolver,
            settings,
        };

        if matcher.can_replace_all {
            if substitution.is_link() && settings.collapse_batch_matches {
                substitution.replace_collapsed(message)
            } else {
                substitution.replace_batch(message)
            }
        } else {
            substitution.replace_sequential(message)
        }
    }

    /// Lists the matches `replace` would act on, without substituting or
    /// performing any lookup.
    pub fn scan(&self, message: &str) -> Vec<LinkMatch> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };
        let detected = |caps: &Captures<'_>, start: usize, end: usize| {
            let url = (!matcher.lookup_url_template.is_empty()).then(|| lookup_url(matcher, caps));
            LinkMatch {
                rule_name: self.name().to_string(),
                original_string: caps.get(0).map_or("", |m| m.as_str()).trim().to_string(),
                replacement: String::new(),
                start,
                end,
                lookup_url: url,
                outcome: MatchOutcome::Detected,
            }
        };

        if matcher.can_replace_all {
            matcher
                .regex
                .captures_iter(message)
                .filter_map(|caps| {
                    let whole = caps.get(0)?;
                    Some(detected(&caps, whole.start(), whole.end()))
                })
                .collect()
        } else {
            SequentialMatches::new(&matcher.regex, message)
                .filter_map(|(base, caps)| {
                    let whole = caps.get(0)?;
                    Some(detected(&caps, base + whole.start(), base + whole.end()))
                })
                .collect()
        }
    }
}
