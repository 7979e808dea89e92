use crate::ParseError;
use log::info;
use std::{
    io::{self, BufRead, ErrorKind, Write},
    path::{Path, PathBuf},
};

/// Extensions accepted as access logs.
pub const VALID_EXTENSIONS: &[&str] = &[".log"];

/// Used when the prompt gets an empty answer.
pub const DEFAULT_FILE: &str = "file.log";

const PROMPT: &str = "Please enter a file path: ";

/// Everything from the last `.` in the path onward, lower-cased. Empty if there is no `.`.
pub fn file_extension(path: &Path) -> String {
    let path = path.to_string_lossy();
    path.rfind('.').map(|dot| path[dot..].to_lowercase()).unwrap_or_default()
}

pub fn is_valid_extension(extension: &str) -> bool {
    VALID_EXTENSIONS.contains(&extension)
}

/// Reject paths whose extension is not on the allow-list.
pub fn check_extension(path: &Path) -> Result<(), ParseError> {
    let extension = file_extension(path);
    if is_valid_extension(&extension) {
        Ok(())
    } else {
        Err(ParseError::InvalidExtension(extension))
    }
}

/// The path that will be processed, wherever it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    path: PathBuf,
}

impl ResolvedInput {
    /// A path given on the command line.
    pub fn from_argument(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("Using file: {}", path.display());
        Self { path }
    }

    /// Ask for a path on `output` and read the answer from `input`.
    pub fn from_prompt<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<Self> {
        output.write_all(PROMPT.as_bytes())?;
        output.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        let answer = answer.trim_end_matches(&['\r', '\n'][..]);
        let path = if answer.is_empty() {
            info!("Using default file: {}", DEFAULT_FILE);
            PathBuf::from(DEFAULT_FILE)
        } else {
            info!("Using file: {}", answer);
            PathBuf::from(answer)
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// Make sure the file exists and can be looked at before it is read.
    pub async fn check_access(&self) -> Result<(), ParseError> {
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Err(ParseError::NotFound(self.path.clone())),
            Err(source) => Err(ParseError::Access { path: self.path.clone(), source }),
        }
    }
}
