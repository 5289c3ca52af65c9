pub mod link_summary;
pub mod output_format;
pub mod theme;
