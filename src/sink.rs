use log::debug;
use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Default destination for lines with no IP address.
pub const DEFAULT_UNMATCHED_LOG: &str = "unmatchedIPs.log";

/// Somewhere to put lines that had no IP address in them.
pub trait UnmatchedSink {
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Keeps unmatched lines in memory.
impl UnmatchedSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_owned());
        Ok(())
    }
}

/// Appends unmatched lines to a file, one per line. The file is created on the first write.
#[derive(Debug)]
pub struct UnmatchedLog {
    path: PathBuf,
    file: Option<File>,
}

impl UnmatchedLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), file: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                debug!("opening {} for append", self.path.display());
                OpenOptions::new().create(true).append(true).open(&self.path)?
            }
        };
        Ok(self.file.insert(file))
    }
}

impl Default for UnmatchedLog {
    fn default() -> Self {
        Self::new(DEFAULT_UNMATCHED_LOG)
    }
}

impl UnmatchedSink for UnmatchedLog {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let file = self.file()?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()
    }
}
