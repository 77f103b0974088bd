use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::output::{format_output, OutputChannel};

/// Appends outputs to a file, never truncating it
#[derive(Debug, Clone)]
pub struct FileOutput {
    path: PathBuf,
}

impl FileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileOutput { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputChannel for FileOutput {
    fn export(&mut self, key: &str, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_output(key, value).as_bytes())?;
        Ok(())
    }
}

/// Prints outputs to stdout when no output file is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutOutput;

impl OutputChannel for StdoutOutput {
    fn export(&mut self, key: &str, value: &str) -> Result<()> {
        print!("{}", format_output(key, value));
        std::io::stdout().flush()?;
        Ok(())
    }
}
