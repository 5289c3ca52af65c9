//! Configuration management for `autolink-core`.
//!
//! Defines the top-level [`Config`] (the configured links, the built-in
//! masking switches and the lookup settings), YAML loading, the built-in
//! rule set and the generic map export used for host-side persistence.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

use crate::rule::Autolink;

/// Maximum allowed length for a raw pattern string.
pub const MAX_PATTERN_LENGTH: usize = 1000;

/// What to emit when a match's title lookup fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupFailurePolicy {
    /// Leave the matched text exactly as it was.
    #[default]
    Keep,
    /// Emit a `[lookup failed](url)` link so the failure is visible.
    Placeholder,
}

/// Settings for link-title lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LookupSettings {
    /// Total time allowed for one request, body included.
    pub timeout_secs: u64,
    /// Response bytes read before title extraction; the rest is discarded.
    pub max_body_bytes: u64,
    pub user_agent: String,
    /// Titles remembered across messages. 0 disables the cache.
    pub cache_entries: usize,
    pub cache_ttl_secs: u64,
    pub on_failure: LookupFailurePolicy,
    /// Word-match rules collapse every match of a message into one link
    /// whose URL is the whole substituted message. Off by default.
    pub collapse_batch_matches: bool,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_body_bytes: 1024 * 1024,
            user_agent: format!("autolink/{}", env!("CARGO_PKG_VERSION")),
            cache_entries: 256,
            cache_ttl_secs: 600,
            on_failure: LookupFailurePolicy::Keep,
            collapse_batch_matches: false,
        }
    }
}

/// The complete autolink configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Config {
    pub links: Vec<Autolink>,
    pub enable_visa_card: bool,
    pub enable_master_card: bool,
    #[serde(rename = "EnableSSN")]
    pub enable_ssn: bool,
    pub lookup: LookupSettings,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LinkList {
    links: Vec<Autolink>,
}

static PRECONFIGURED_LINKS: Lazy<Vec<Autolink>> = Lazy::new(|| {
    let yaml = include_str!("../config/preconfigured_links.yaml");
    match serde_yml::from_str::<LinkList>(yaml) {
        Ok(list) => list.links,
        Err(e) => {
            warn!("Failed to parse built-in autolinks: {}", e);
            Vec::new()
        }
    }
});

/// The built-in masking rules, all enabled.
pub fn preconfigured_links() -> &'static [Autolink] {
    &PRECONFIGURED_LINKS
}

impl Config {
    /// Loads a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading autolink configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded {} autolinks from file {}.", config.links.len(), path.display());
        Ok(config)
    }

    /// Parses and validates a YAML configuration.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Config = serde_yml::from_str(text).context("Invalid YAML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the configured links followed by the built-in masking rules,
    /// each built-in disabled unless its switch is on. A configured link that
    /// already uses a built-in's name takes precedence over it.
    pub fn with_preconfigured_links(&self) -> Vec<Autolink> {
        let mut links = self.links.clone();
        for builtin in preconfigured_links() {
            if links.iter().any(|l| l.name == builtin.name) {
                debug!("Autolink '{}' overrides the built-in rule of the same name.", builtin.name);
                continue;
            }
            let enabled = match builtin.name.as_str() {
                "VisaCard" => self.enable_visa_card,
                "MasterCard" => self.enable_master_card,
                "SSN" => self.enable_ssn,
                _ => false,
            };
            links.push(Autolink {
                disabled: !enabled,
                ..builtin.clone()
            });
        }
        links
    }

    /// Exports the configuration as a tree of plain maps, lists and
    /// primitives for host-side persistence.
    pub fn to_config(&self) -> Map<String, Value> {
        let links: Vec<Value> = self.links.iter().map(|l| Value::Object(l.to_config())).collect();
        let mut map = Map::new();
        map.insert("Links".into(), Value::Array(links));
        map.insert("EnableVisaCard".into(), Value::from(self.enable_visa_card));
        map.insert("EnableMasterCard".into(), Value::from(self.enable_master_card));
        map.insert("EnableSSN".into(), Value::from(self.enable_ssn));
        map.insert(
            "Lookup".into(),
            serde_json::to_value(&self.lookup).unwrap_or(Value::Null),
        );
        map
    }

    /// Returns a clone with links sorted by display name.
    pub fn sorted(&self) -> Config {
        let mut sorted = self.clone();
        sorted.links.sort_by(|a, b| a.display_name().cmp(b.display_name()));
        sorted
    }

    /// Rejects unusable lookup settings and warns about suspicious links.
    ///
    /// Invalid patterns are not rejected here: they are reported per rule at
    /// compile time so the remaining links keep working.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.lookup.timeout_secs == 0 {
            errors.push("Lookup.TimeoutSecs must be greater than zero.".to_string());
        }
        if self.lookup.max_body_bytes == 0 {
            errors.push("Lookup.MaxBodyBytes must be greater than zero.".to_string());
        }
        if !errors.is_empty() {
            return Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")));
        }

        let mut names = HashSet::new();
        for link in &self.links {
            if !link.name.is_empty() && !names.insert(link.name.as_str()) {
                warn!("Duplicate autolink name found: '{}'.", link.name);
            }
            warn_unknown_group_refs(link);
        }
        Ok(())
    }
}

/// Warns when a template references a named group the pattern does not declare.
fn warn_unknown_group_refs(link: &Autolink) {
    static GROUP_REF: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))").unwrap());

    let Ok(raw) = Regex::new(&link.pattern) else {
        return;
    };
    let declared: HashSet<&str> = raw.capture_names().flatten().collect();
    for template in [&link.template, &link.lookup_url_template] {
        for caps in GROUP_REF.captures_iter(template) {
            if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
                if !declared.contains(name.as_str()) {
                    warn!(
                        "Autolink '{}': template references unknown capture group '${}'.",
                        link.display_name(),
                        name.as_str()
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preconfigured_links_parse_and_compile() {
        let links = preconfigured_links();
        assert_eq!(links.len(), 3);
        for link in links {
            assert!(Regex::new(&link.pattern).is_ok(), "{} should compile", link.name);
        }
    }

    #[test]
    fn test_preconfigured_links_follow_switches() {
        let config = Config { enable_ssn: true, ..Default::default() };
        let links = config.with_preconfigured_links();
        let ssn = links.iter().find(|l| l.name == "SSN").unwrap();
        let visa = links.iter().find(|l| l.name == "VisaCard").unwrap();
        assert!(!ssn.disabled);
        assert!(visa.disabled);
    }

    #[test]
    fn test_configured_link_overrides_builtin() {
        let config = Config {
            links: vec![Autolink { name: "SSN".to_string(), pattern: "x".to_string(), ..Default::default() }],
            enable_ssn: true,
            ..Default::default()
        };
        let links = config.with_preconfigured_links();
        assert_eq!(links.iter().filter(|l| l.name == "SSN").count(), 1);
        assert_eq!(links[0].pattern, "x");
    }

    #[test]
    fn test_sorted_does_not_touch_original() {
        let config = Config {
            links: vec![
                Autolink { name: "b".to_string(), ..Default::default() },
                Autolink { name: "a".to_string(), ..Default::default() },
            ],
            ..Default::default()
        };
        let sorted = config.sorted();
        assert_eq!(sorted.links[0].name, "a");
        assert_eq!(config.links[0].name, "b");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = Config::from_yaml_str("Lookup:\n  TimeoutSecs: 0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("TimeoutSecs"));
    }
}
