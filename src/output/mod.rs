//! CI output channel
//!
//! Results are handed to later workflow steps as `KEY=value` lines appended to
//! the file named by `GITHUB_OUTPUT`. Values spanning several lines use the
//! heredoc form:
//!
//! ```text
//! KEY<<EOF
//! first line
//! second line
//! EOF
//! ```
//!
//! Code should depend on the [OutputChannel] trait so tests can capture
//! outputs with [MemoryOutput].

pub mod file;
pub mod memory;

pub use file::{FileOutput, StdoutOutput};
pub use memory::MemoryOutput;

use crate::error::Result;

/// Sink for `KEY=value` outputs consumed by later CI steps
pub trait OutputChannel {
    /// Record `value` under `key`
    fn export(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Render one output in the line format expected by GitHub Actions
pub fn format_output(key: &str, value: &str) -> String {
    if value.contains('\n') || value.contains('\r') {
        format!("{}<<EOF\n{}\nEOF\n", key, value)
    } else {
        format!("{}={}\n", key, value)
    }
}
