//! Output formatting for CLI results

pub mod json;
pub mod table;

pub use json::to_json_pretty;
pub use table::format_table;
