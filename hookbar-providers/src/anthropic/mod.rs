//! Anthropic provider.
//!
//! Usage comes from the local `ccusage` report for today's sessions:
//!
//! ```text
//! ccusage session --json --today
//! ```
//!
//! The command is configurable so other report tools that print the same
//! array shape can be used instead.

mod adapter;
pub(crate) mod parser;

pub use adapter::{AnthropicAdapter, DEFAULT_USAGE_COMMAND};
pub use parser::{SessionEntry, parse_session_report};
