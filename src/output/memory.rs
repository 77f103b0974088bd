use crate::error::Result;
use crate::output::{format_output, OutputChannel};

/// In-memory output channel for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    pairs: Vec<(String, String)>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value exported under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Everything exported so far, rendered as it would appear in the output file
    pub fn rendered(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format_output(k, v))
            .collect()
    }
}

impl OutputChannel for MemoryOutput {
    fn export(&mut self, key: &str, value: &str) -> Result<()> {
        self.pairs.push((key.to_string(), value.to_string()));
        Ok(())
    }
}
