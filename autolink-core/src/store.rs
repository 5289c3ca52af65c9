//! store.rs - Immutable configuration snapshots behind a swappable reference.
//!
//! Readers grab an `Arc<ConfigSnapshot>` and keep using it for as long as they
//! like. A configuration change compiles a complete new snapshot first and only
//! then takes the write lock, for the duration of a pointer swap.
//!
//! License: MIT OR APACHE 2.0

use log::{error, info};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::Config;
use crate::linkers::compiler::{compile_rules, CompiledRules};

/// A configuration together with its compiled rules. Never mutated after construction.
#[derive(Debug)]
pub struct ConfigSnapshot {
    pub config: Config,
    pub compiled: Arc<CompiledRules>,
}

impl ConfigSnapshot {
    /// Compiles the configured links plus the built-in rules.
    pub fn build(config: Config) -> Self {
        let links = config.with_preconfigured_links();
        let compiled = compile_rules(&links);
        for e in &compiled.errors {
            error!("Autolink configuration error: {}", e);
        }
        Self {
            config,
            compiled: Arc::new(compiled),
        }
    }
}

/// Holder of the live configuration.
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<ConfigSnapshot>>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ConfigStore {
    pub fn new(config: Config) -> Self {
        Self {
            current: RwLock::new(Arc::new(ConfigSnapshot::build(config))),
        }
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Compiles `config` and installs it as the new snapshot, returning it.
    /// Rules that fail to compile are logged and left inert.
    pub fn apply(&self, config: Config) -> Arc<ConfigSnapshot> {
        let snapshot = Arc::new(ConfigSnapshot::build(config));
        info!(
            "Installing autolink configuration: {} rules, {} functional, {} errors.",
            snapshot.compiled.rules.len(),
            snapshot.compiled.functional().count(),
            snapshot.compiled.errors.len()
        );
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Autolink;

    fn link(name: &str, pattern: &str) -> Autolink {
        Autolink {
            name: name.to_string(),
            pattern: pattern.to_string(),
            template: "[$0](https://t.test/$0)".to_string(),
            word_match: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_swaps_without_disturbing_held_snapshots() {
        let store = ConfigStore::new(Config {
            links: vec![link("first", r"T\d+")],
            ..Default::default()
        });
        let held = store.snapshot();

        store.apply(Config {
            links: vec![link("second", r"MM-\d+"), link("broken", "(")],
            ..Default::default()
        });

        assert_eq!(held.config.links[0].name, "first");
        let now = store.snapshot();
        assert_eq!(now.config.links[0].name, "second");
        assert_eq!(now.compiled.errors.len(), 1);
        assert!(now.compiled.find("second").unwrap().is_functional());
        assert!(!Arc::ptr_eq(&held, &now));
    }

    #[test]
    fn test_builtins_are_always_compiled_in() {
        let store = ConfigStore::default();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.compiled.rules.len(), 3);
        assert_eq!(snapshot.compiled.functional().count(), 0);
    }
}
