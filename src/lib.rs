use log::{debug, error};
use std::{
    borrow::Cow,
    fmt, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader},
};

pub mod extract;
pub mod frequency;
pub mod input;
pub mod sink;

pub use extract::{extract_ip_addresses, extract_url};
pub use frequency::{top_k, unique_count, FrequencyTable};
pub use input::ResolvedInput;
pub use sink::{UnmatchedLog, UnmatchedSink};

/// How many IPs and urls make it into the summary.
pub const TOP_COUNT: usize = 3;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid file extension: {0}")]
    InvalidExtension(String),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Error accessing file: {}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error occurred while reading the file: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Everything pulled out of the lines read so far.
///
/// `urls` has exactly one slot per line, `None` where the line had no url.
/// `ips` has every address found, so a line can contribute zero or several.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub ips: Vec<String>,
    pub urls: Vec<Option<String>>,
}

impl Collected {
    /// Fold one line in. Lines with no IP address go to `sink` instead; a failed write
    /// is logged and does not stop the fold.
    pub fn absorb(mut self, line: &str, sink: &mut impl UnmatchedSink) -> Self {
        self.urls.push(extract_url(line));
        let ips = extract_ip_addresses(line);
        if ips.is_empty() {
            debug!("no IP address in line {}", self.urls.len());
            if let Err(error) = sink.write_line(line) {
                error!("Error writing unmatched IP address to file: {}", error);
            }
        } else {
            self.ips.extend(ips);
        }
        self
    }

    pub fn line_count(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Urls of the lines that had one. Lines without a url are left out of the ranking.
    pub fn present_urls(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().flatten().map(String::as_str)
    }

    pub fn summarize(&self) -> Summary {
        Summary {
            unique_ips: unique_count(&self.ips),
            top_ips: top_k(self.ips.iter().cloned(), TOP_COUNT),
            top_urls: top_k(self.present_urls().map(str::to_owned), TOP_COUNT),
        }
    }
}

/// Fold a whole sequence of lines.
pub fn collect_lines<I, S>(lines: I, sink: &mut impl UnmatchedSink) -> Collected
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().fold(Collected::default(), |collected, line| collected.absorb(line.as_ref(), sink))
}

/// Turn one raw line, without its `\n`, into text. A trailing `\r` is dropped and bytes
/// that are not UTF-8 become U+FFFD.
pub fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

/// Report for one log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub unique_ips: usize,
    pub top_ips: Vec<String>,
    pub top_urls: Vec<String>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of unique IP addresses: {}", self.unique_ips)?;
        writeln!(f, "Top three IP addresses: {}", self.top_ips.join(", "))?;
        write!(f, "Top three most visited URLs: {}", self.top_urls.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file had no lines, so nothing was aggregated.
    Empty,
    Summary(Summary),
}

/// Read an access log line by line and summarize it.
///
/// The extension is checked before the file is opened. Lines with no IP address are
/// written to `sink`.
pub async fn parse_file(path: &Path, sink: &mut impl UnmatchedSink) -> Result<Outcome, ParseError> {
    input::check_extension(path)?;
    let read_error = |source| ParseError::Read { path: path.to_owned(), source };
    let file = File::open(path).await.map_err(read_error)?;
    let mut lines = BufReader::new(file).split(b'\n');
    let mut collected = Collected::default();
    while let Some(raw) = lines.next_segment().await.map_err(read_error)? {
        collected = collected.absorb(&decode_line(&raw), sink);
    }
    debug!("read {} lines from {}", collected.line_count(), path.display());
    if collected.is_empty() {
        Ok(Outcome::Empty)
    } else {
        Ok(Outcome::Summary(collected.summarize()))
    }
}
