// autolink-core/src/engines/mod.rs
//! Concrete `LinkEngine` implementations.

pub mod regex_engine;
