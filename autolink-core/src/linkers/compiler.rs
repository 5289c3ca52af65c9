//! compiler.rs - Compiles autolink rules into executable matchers.
//!
//! Boundary handling comes in two flavours. Word-match rules get zero-width
//! `\b` assertions, which never consume input, so every match in a message can
//! be substituted in one global pass. All other rules capture the surrounding
//! whitespace or punctuation into reserved groups and re-emit it through the
//! template; those captured characters could be shared by two adjacent
//! matches, so such rules are replaced one match at a time.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, error};
use regex::{Regex, RegexBuilder};

use crate::config::MAX_PATTERN_LENGTH;
use crate::errors::AutolinkError;
use crate::rule::Autolink;

/// Capture group holding the start-of-text or whitespace consumed before a match.
pub const NON_WORD_PREFIX_GROUP: &str = "AutolinkNonWordPrefix";
/// Capture group holding the end-of-text, whitespace or punctuation consumed after a match.
pub const NON_WORD_SUFFIX_GROUP: &str = "AutolinkNonWordSuffix";

const NON_WORD_PREFIX_PATTERN: &str = r"(?P<AutolinkNonWordPrefix>(^|\s))";
const NON_WORD_SUFFIX_PATTERN: &str = r"(?P<AutolinkNonWordSuffix>$|[\s\.\!\?\,\)])";
const NON_WORD_PREFIX_REF: &str = "${AutolinkNonWordPrefix}";
const NON_WORD_SUFFIX_REF: &str = "${AutolinkNonWordSuffix}";

/// The executable form of a rule.
#[derive(Debug, Clone)]
pub struct Matcher {
    /// The pattern with boundary handling woven in.
    pub regex: Regex,
    /// The template with boundary-group references added.
    pub template: String,
    pub lookup_url_template: String,
    /// True when both applied boundaries are zero-width, so one global pass is safe.
    pub can_replace_all: bool,
}

/// A rule paired with its matcher. A rule that is disabled, incomplete or
/// failed to compile has no matcher and leaves every message untouched.
#[derive(Debug, Clone)]
pub struct CompiledAutolink {
    pub rule: Autolink,
    pub matcher: Option<Matcher>,
}

impl CompiledAutolink {
    /// A compiled rule that never matches.
    pub fn inert(rule: Autolink) -> Self {
        Self { rule, matcher: None }
    }

    pub fn name(&self) -> &str {
        self.rule.display_name()
    }

    pub fn is_functional(&self) -> bool {
        self.matcher.is_some()
    }
}

/// Every rule of a configuration, compiled, together with the per-rule
/// errors encountered along the way.
#[derive(Debug, Default)]
pub struct CompiledRules {
    /// One entry per input rule, in input order. Failed rules are kept inert.
    pub rules: Vec<CompiledAutolink>,
    pub errors: Vec<AutolinkError>,
}

impl CompiledRules {
    /// Rules that will actually match something.
    pub fn functional(&self) -> impl Iterator<Item = &CompiledAutolink> {
        self.rules.iter().filter(|r| r.is_functional())
    }

    pub fn find(&self, name: &str) -> Option<&CompiledAutolink> {
        self.rules.iter().find(|r| r.name() == name)
    }
}

/// Compiles a single rule.
///
/// Disabled rules and rules with an empty pattern or template compile
/// successfully into an inert [`CompiledAutolink`].
pub fn compile_rule(rule: &Autolink) -> Result<CompiledAutolink, AutolinkError> {
    if rule.disabled || rule.pattern.is_empty() || rule.template.is_empty() {
        debug!("Autolink '{}' is disabled or incomplete; leaving it inert.", rule.display_name());
        return Ok(CompiledAutolink::inert(rule.clone()));
    }

    if rule.pattern.len() > MAX_PATTERN_LENGTH {
        return Err(AutolinkError::PatternLengthExceeded(
            rule.display_name().to_string(),
            rule.pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    for reserved in [NON_WORD_PREFIX_GROUP, NON_WORD_SUFFIX_GROUP] {
        if rule.pattern.contains(&format!("<{}>", reserved)) {
            return Err(AutolinkError::ReservedGroupName(rule.display_name().to_string(), reserved));
        }
    }

    let mut can_replace_all = false;
    let mut pattern = rule.pattern.clone();
    let mut template = rule.template.clone();

    if !rule.disable_non_word_prefix {
        if rule.word_match {
            pattern.insert_str(0, r"\b");
            can_replace_all = true;
        } else {
            pattern.insert_str(0, NON_WORD_PREFIX_PATTERN);
            template.insert_str(0, NON_WORD_PREFIX_REF);
        }
    }
    if !rule.disable_non_word_suffix {
        if rule.word_match {
            pattern.push_str(r"\b");
            can_replace_all = true;
        } else {
            pattern.push_str(NON_WORD_SUFFIX_PATTERN);
            template.push_str(NON_WORD_SUFFIX_REF);
        }
    }
    debug!(
        "Compiling autolink '{}' with effective pattern '{}'",
        rule.display_name(),
        pattern
    );

    let regex = RegexBuilder::new(&pattern)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| AutolinkError::RuleCompilationError(rule.display_name().to_string(), pattern.clone(), e))?;

    debug!(
        target: "autolink_core::compiler",
        "Autolink '{}' compiled successfully (replace-all: {}).",
        rule.display_name(),
        can_replace_all
    );

    Ok(CompiledAutolink {
        rule: rule.clone(),
        matcher: Some(Matcher {
            regex,
            template,
            lookup_url_template: rule.lookup_url_template.clone(),
            can_replace_all,
        }),
    })
}

/// Compiles a whole rule set. A rule that fails is logged, kept inert and
/// recorded in [`CompiledRules::errors`]; it never stops the remaining rules
/// from compiling.
pub fn compile_rules(rules: &[Autolink]) -> CompiledRules {
    debug!("Starting compilation of {} autolinks.", rules.len());

    let mut compiled = CompiledRules::default();
    for rule in rules {
        match compile_rule(rule) {
            Ok(c) => compiled.rules.push(c),
            Err(e) => {
                error!("Error creating autolinker: {}", e);
                compiled.rules.push(CompiledAutolink::inert(rule.clone()));
                compiled.errors.push(e);
            }
        }
    }

    debug!(
        "Finished compiling autolinks. Functional: {}, failed: {}.",
        compiled.functional().count(),
        compiled.errors.len()
    );
    compiled
}
