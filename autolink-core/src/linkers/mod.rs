//! Turning rules into matchers and matchers into rewritten messages.
//!
//! `compiler` weaves boundary handling into each rule's pattern and template
//! and decides whether its matches may be substituted in a single pass.
//! `replacer` applies one compiled rule to one message, resolving link
//! titles through a [`crate::lookup::TitleResolver`] when the rule asks for it.

pub mod compiler;
pub mod replacer;
