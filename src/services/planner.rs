use crate::error::{BatesError, Result};
use crate::types::{RegenerationTarget, SeriesFile, SeriesMap};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

pub struct RegenerationPlanner;

impl RegenerationPlanner {
    /// Checks that a merged, sorted series covers its span without gaps:
    /// every file must start exactly one page after its predecessor ends.
    /// A single-file series trivially passes.
    pub fn validate_coverage(prefix: &str, files: &[SeriesFile]) -> Result<()> {
        for pair in files.windows(2) {
            let expected = pair[0].range.end.number + 1;
            if pair[1].range.start.number != expected {
                return Err(BatesError::Gap {
                    prefix: prefix.to_string(),
                    expected,
                    after: pair[0].filename.clone(),
                    before: pair[1].filename.clone(),
                });
            }
        }
        Ok(())
    }

    /// Canonical united artifact name, numbers printed without padding.
    /// Callers pass a non-empty, coverage-validated list.
    pub fn united_filename(prefix: &str, files: &[SeriesFile]) -> String {
        debug_assert!(!files.is_empty(), "united_filename needs at least one file");
        let first = files.first().map(|f| f.range.start.number).unwrap_or(0);
        let last = files.last().map(|f| f.range.end.number).unwrap_or(0);
        format!("united {} {}-{}.pdf", prefix, first, last)
    }

    /// A united file is stale when any source is strictly newer than it.
    /// An absent output counts as infinitely old.
    pub async fn is_stale(output: &Path, sources: &[PathBuf]) -> Result<bool> {
        let output_mtime = match fs::metadata(output).await {
            Ok(meta) => meta.modified()?,
            Err(_) => return Ok(true),
        };

        for source in sources {
            let source_mtime = fs::metadata(source).await?.modified()?;
            if source_mtime > output_mtime {
                debug!("{} is newer than {}", source.display(), output.display());
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Decides which united files need regenerating. Every series is
    /// coverage-validated first; a gap anywhere aborts the whole pass.
    /// Targets come back in prefix order so runs are deterministic.
    pub async fn plan(
        series: &SeriesMap,
        output_dir: &Path,
        force: bool,
    ) -> Result<Vec<RegenerationTarget>> {
        let mut prefixes: Vec<&String> = series.keys().collect();
        prefixes.sort();

        let mut targets = Vec::new();

        for prefix in prefixes {
            let files = &series[prefix];
            if files.is_empty() {
                continue;
            }

            Self::validate_coverage(prefix, files)?;

            let output_path = output_dir.join(Self::united_filename(prefix, files));
            let source_files: Vec<PathBuf> = files.iter().map(|f| f.path()).collect();

            if force || Self::is_stale(&output_path, &source_files).await? {
                info!(
                    "series {} needs regeneration: {}",
                    prefix,
                    output_path.display()
                );
                targets.push(RegenerationTarget {
                    series_prefix: prefix.clone(),
                    output_path,
                    source_files,
                    planned_at: chrono::Utc::now().to_rfc3339(),
                });
            } else {
                debug!("series {} is up to date", prefix);
            }
        }

        Ok(targets)
    }
}
