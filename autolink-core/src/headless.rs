// autolink-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot, non-interactive use of the engine.

use anyhow::Result;

use crate::config::Config;
use crate::engine::LinkEngine;
use crate::engines::regex_engine::RegexEngine;

/// Links a single message with a freshly built engine and the default HTTP
/// title resolver.
///
/// # Arguments
///
/// * `config` - The autolink configuration.
/// * `message` - The message to rewrite.
/// * `scope` - Optional `team/channel` context used to filter scoped rules.
pub fn headless_link_string(config: Config, message: &str, scope: Option<&str>) -> Result<String> {
    let engine = RegexEngine::new(config)?;
    let (linked, _) = engine.link(message, scope);
    Ok(linked)
}
