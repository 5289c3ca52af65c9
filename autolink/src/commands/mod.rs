pub mod link;
pub mod rules;
