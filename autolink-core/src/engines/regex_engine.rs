// autolink-core/src/engines/regex_engine.rs
//! The standard `LinkEngine`: every compiled rule, applied in configuration
//! order, each to the output of the previous one.
//! License: MIT OR APACHE 2.0

use log::debug;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::engine::LinkEngine;
use crate::errors::AutolinkError;
use crate::link_match::{summarize, LinkMatch, LinkSummaryItem};
use crate::linkers::compiler::{CompiledAutolink, CompiledRules};
use crate::lookup::{CachingResolver, FetchTitleResolver, HttpFetcher, TitleResolver};
use crate::store::{ConfigSnapshot, ConfigStore};

/// Builds the production resolver stack for `config`: HTTP fetch with the
/// configured timeout and body cap, behind a title cache.
pub fn default_resolver(config: &Config) -> Result<Arc<dyn TitleResolver>, AutolinkError> {
    let settings = &config.lookup;
    let fetcher = HttpFetcher::new(settings)?;
    Ok(Arc::new(CachingResolver::new(
        FetchTitleResolver::new(fetcher),
        settings.cache_entries,
        Duration::from_secs(settings.cache_ttl_secs),
    )))
}

pub struct RegexEngine {
    snapshot: Arc<ConfigSnapshot>,
    resolver: Arc<dyn TitleResolver>,
}

impl std::fmt::Debug for RegexEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegexEngine").field("snapshot", &self.snapshot).finish_non_exhaustive()
    }
}

impl RegexEngine {
    /// Compiles `config` and wires up the default HTTP resolver.
    pub fn new(config: Config) -> Result<Self, AutolinkError> {
        let resolver = default_resolver(&config)?;
        Ok(Self::with_resolver(config, resolver))
    }

    pub fn with_resolver(config: Config, resolver: Arc<dyn TitleResolver>) -> Self {
        Self::from_snapshot(Arc::new(ConfigSnapshot::build(config)), resolver)
    }

    pub fn from_snapshot(snapshot: Arc<ConfigSnapshot>, resolver: Arc<dyn TitleResolver>) -> Self {
        Self { snapshot, resolver }
    }

    /// An engine over whatever configuration `store` holds right now. Later
    /// swaps in the store do not affect it.
    pub fn from_store(store: &ConfigStore, resolver: Arc<dyn TitleResolver>) -> Self {
        Self::from_snapshot(store.snapshot(), resolver)
    }

    fn applicable<'a>(&'a self, scope: Option<&'a str>) -> impl Iterator<Item = &'a CompiledAutolink> + 'a {
        self.snapshot
            .compiled
            .functional()
            .filter(move |rule| scope.map_or(true, |s| rule.rule.in_scope(s)))
    }
}

impl LinkEngine for RegexEngine {
    fn link(&self, message: &str, scope: Option<&str>) -> (String, Vec<LinkSummaryItem>) {
        let settings = &self.snapshot.config.lookup;
        let mut text = message.to_string();
        let mut all_matches = Vec::new();

        for rule in self.applicable(scope) {
            let replaced = rule.replace(&text, self.resolver.as_ref(), settings);
            if !replaced.matches.is_empty() {
                debug!("Autolink '{}' replaced {} match(es).", rule.name(), replaced.matches.len());
            }
            text = replaced.text;
            all_matches.extend(replaced.matches);
        }

        debug!(
            "Message linked. Original length: {}, linked length: {}",
            message.len(),
            text.len()
        );
        (text, summarize(&all_matches))
    }

    fn find_matches(&self, message: &str, scope: Option<&str>) -> Vec<LinkMatch> {
        self.applicable(scope).flat_map(|rule| rule.scan(message)).collect()
    }

    fn compiled_rules(&self) -> &CompiledRules {
        &self.snapshot.compiled
    }

    fn get_config(&self) -> &Config {
        &self.snapshot.config
    }
}
