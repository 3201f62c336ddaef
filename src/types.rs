use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One page's bates identity: series prefix, page number, and the
/// zero-padded print width when the source filename declared one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatesPage {
    pub prefix: String,
    pub number: u64,
    pub width: Option<usize>,
}

impl BatesPage {
    pub fn new(prefix: impl Into<String>, number: u64, width: Option<usize>) -> Self {
        Self {
            prefix: prefix.into(),
            number,
            width,
        }
    }

    /// Long form zero-pads to the declared width with no separator
    /// ("COB0002421"); short form (or no width) is "COB 2421".
    pub fn format(&self, short: bool) -> String {
        match self.width {
            Some(width) if !short => format!("{}{:0width$}", self.prefix, self.number),
            _ => format!("{} {}", self.prefix, self.number),
        }
    }

    pub fn increment(&self, delta: u64) -> BatesPage {
        BatesPage {
            prefix: self.prefix.clone(),
            number: self.number + delta,
            width: self.width,
        }
    }
}

/// The page span one physical file covers. Start and end share the same
/// prefix and width, and `start.number <= end.number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatesRange {
    pub start: BatesPage,
    pub end: BatesPage,
}

impl BatesRange {
    /// Number of pages the range claims, per its endpoints.
    pub fn page_count(&self) -> u64 {
        self.end.number.saturating_sub(self.start.number) + 1
    }
}

/// One produced PDF within a series: its bare filename, the directory it
/// was discovered in, and the range its name encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesFile {
    pub filename: String,
    pub directory: PathBuf,
    pub range: BatesRange,
}

impl SeriesFile {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Per-series collections, keyed by bates prefix. Files are sorted by
/// starting number once merged.
pub type SeriesMap = HashMap<String, Vec<SeriesFile>>;

/// One united file the planner decided to regenerate. Computed fresh on
/// every planning pass, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RegenerationTarget {
    pub series_prefix: String,
    pub output_path: PathBuf,
    pub source_files: Vec<PathBuf>,
    pub planned_at: String,
}

/// JSON report row for one series, produced by the scan command.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub prefix: String,
    pub file_count: usize,
    pub first_number: u64,
    pub last_number: u64,
    pub contiguous: bool,
    pub gap: Option<String>,
    pub united_filename: String,
    pub files: Vec<SeriesFile>,
}

/// Top-level scan report written by `scan --json-output`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub created_at: String,
    pub series: Vec<SeriesReport>,
}
