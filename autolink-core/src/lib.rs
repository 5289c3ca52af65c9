// autolink-core/src/lib.rs
//! # Autolink Core Library
//!
//! `autolink-core` rewrites chat messages: textual patterns such as ticket IDs,
//! card numbers or custom tokens are turned into markdown links or masked
//! text, optionally titled with the `<title>` of a page fetched per match.
//!
//! ## Modules
//!
//! * `rule`: The declarative [`Autolink`] rule, its markdown rendering and map export.
//! * `config`: [`Config`], lookup settings, YAML loading and the built-in masking rules.
//! * `store`: [`ConfigStore`], immutable configuration snapshots behind a swappable reference.
//! * `linkers`: The rule compiler and the per-rule replacement algorithm.
//! * `lookup`: HTTP fetch, title extraction and the lookup cache.
//! * `engine`: The [`LinkEngine`] trait.
//! * `engines`: [`RegexEngine`], the standard implementation.
//! * `link_match`: Per-match records and summaries.
//! * `headless`: One-shot convenience wrapper.
//!
//! ## Usage Example
//!
//! ```rust
//! use autolink_core::{Autolink, Config, RegexEngine, LinkEngine, TitleResolver, AutolinkError};
//! use std::sync::Arc;
//!
//! let config = Config {
//!     links: vec![Autolink {
//!         name: "Phabricator".to_string(),
//!         pattern: r"T\d+".to_string(),
//!         template: "$0".to_string(),
//!         lookup_url_template: "https://phabricator.example.test/$0".to_string(),
//!         word_match: true,
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! // Any `Fn(&str) -> Result<String, AutolinkError>` can stand in for the HTTP lookup.
//! let resolver: Arc<dyn TitleResolver> = Arc::new(|_: &str| Ok::<_, AutolinkError>("Task 1".to_string()));
//! let engine = RegexEngine::with_resolver(config, resolver);
//!
//! let (linked, _summary) = engine.link("I found T298595 today", None);
//! assert_eq!(linked, "I found [Task 1](https://phabricator.example.test/T298595) today");
//! ```
//!
//! ## Error Handling
//!
//! [`AutolinkError`] covers compile and lookup failures. Neither aborts more
//! than its own rule or match: a bad pattern leaves that rule inert, a failed
//! lookup leaves that match as it was.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod link_match;
pub mod linkers;
pub mod lookup;
pub mod rule;
pub mod store;

pub use config::{preconfigured_links, Config, LookupFailurePolicy, LookupSettings, MAX_PATTERN_LENGTH};
pub use engine::LinkEngine;
pub use engines::regex_engine::{default_resolver, RegexEngine};
pub use errors::AutolinkError;
pub use headless::headless_link_string;
pub use link_match::{redact_sensitive, LinkMatch, LinkSummaryItem, MatchOutcome};
pub use linkers::compiler::{compile_rule, compile_rules, CompiledAutolink, CompiledRules, Matcher};
pub use linkers::replacer::Replacement;
pub use lookup::{extract_title, CachingResolver, FetchTitleResolver, Fetcher, HttpFetcher, TitleResolver};
pub use rule::Autolink;
pub use store::{ConfigSnapshot, ConfigStore};
