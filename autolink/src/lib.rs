// autolink/src/lib.rs
//! # Autolink CLI Application
//!
//! Command-line front end for `autolink-core`: rewrites text from files or
//! pipes, and lists, exports and tries out the configured autolinks.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
