//! Output formatting for CLI.

mod json;
mod text;

pub use json::{JsonFormatter, UsageReport};
pub use text::TextFormatter;
