// autolink-core/src/engine.rs
//! Defines the `LinkEngine` trait.
//!
//! The trait decouples callers (the CLI, a chat-server hook) from the way
//! rules are applied and titles are resolved, so tests and hosts can swap in
//! their own resolver or engine.
//!
//! License: MIT OR APACHE 2.0

use crate::config::Config;
use crate::link_match::{LinkMatch, LinkSummaryItem};
use crate::linkers::compiler::CompiledRules;

/// Core functionality of an autolink engine.
pub trait LinkEngine: Send + Sync {
    /// Applies every rule to `message` and returns the rewritten text with a
    /// per-rule summary.
    ///
    /// # Arguments
    /// * `message` - The message text.
    /// * `scope` - The context the message was posted in (`team/channel`).
    ///   `None` applies every rule regardless of its scope.
    fn link(&self, message: &str, scope: Option<&str>) -> (String, Vec<LinkSummaryItem>);

    /// Lists what each rule would match in `message`, without rewriting it
    /// and without any lookups.
    fn find_matches(&self, message: &str, scope: Option<&str>) -> Vec<LinkMatch>;

    /// Returns the compiled rules used by the engine.
    fn compiled_rules(&self) -> &CompiledRules;

    /// Returns the configuration the rules were compiled from.
    fn get_config(&self) -> &Config;
}
