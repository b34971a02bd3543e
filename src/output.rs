//! Append-only text log of rendered reports

use crate::Result;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Text file that rendered report blocks are appended to
#[derive(Debug)]
pub struct ReportLog {
    path: PathBuf,
    writer: BufWriter<File>,
    blocks_written: usize,
}

impl ReportLog {
    /// Open `path` for appending, creating it and its parent directory if needed
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!("Appending rendered reports to {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            blocks_written: 0,
        })
    }

    /// Write one report block followed by a blank separator line
    pub fn append_block<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        for line in lines {
            writeln!(self.writer, "{}", line.as_ref())?;
        }
        writeln!(self.writer)?;
        self.blocks_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn blocks_written(&self) -> usize {
        self.blocks_written
    }
}
