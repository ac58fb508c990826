// Kill log persistence

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::core::capabilities::KillLog;
use crate::error::Result;

/// Appends kill records to a plain text file, creating it on first use
#[derive(Debug, Default, Clone, Copy)]
pub struct FileKillLog;

impl KillLog for FileKillLog {
    fn append(&self, path: &Path, text: &str) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
