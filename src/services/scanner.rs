use crate::error::{BatesError, Result};
use crate::services::{ProductionGrouper, RangeParser, SeriesMerger};
use crate::types::SeriesMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Top-level discovery folders that never hold productions.
const IGNORED_DIRS: &[&str] = &["united", "what is this"];

pub struct DiscoveryScanner;

impl DiscoveryScanner {
    /// Builds the authoritative per-series file map for one discovery root.
    ///
    /// Each immediate subdirectory (minus the ignore set) is resolved to
    /// its effective production directory, grouped, and folded into the
    /// running map. Merge order does not matter, so the fold is a plain
    /// sequential reduction over the listing.
    pub async fn discover(root: &Path) -> Result<SeriesMap> {
        match fs::metadata(root).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(BatesError::DiscoveryRootNotFound {
                    path: root.display().to_string(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BatesError::DiscoveryRootNotFound {
                    path: root.display().to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        }

        info!("Scanning discovery root: {}", root.display());

        let parser = RangeParser::new();
        let mut series = SeriesMap::new();
        let mut entries = fs::read_dir(root).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if IGNORED_DIRS.iter().any(|d| name.eq_ignore_ascii_case(d)) {
                debug!("ignoring directory: {}", name);
                continue;
            }

            let production_dir = Self::resolve_production_dir(&entry.path()).await?;
            let filenames = Self::list_filenames(&production_dir).await?;
            debug!(
                "grouping {} entries from {}",
                filenames.len(),
                production_dir.display()
            );

            let grouped = ProductionGrouper::group(&parser, &production_dir, &filenames);
            series = SeriesMerger::merge(series, grouped);
        }

        info!("Found {} series", series.len());
        Ok(series)
    }

    /// One production folder may stage its deliverables under a "produced"
    /// child; when that child exists it is the effective directory.
    async fn resolve_production_dir(dir: &Path) -> Result<PathBuf> {
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.eq_ignore_ascii_case("produced") && entry.file_type().await?.is_dir() {
                return Ok(entry.path());
            }
        }

        Ok(dir.to_path_buf())
    }

    async fn list_filenames(dir: &Path) -> Result<Vec<String>> {
        let mut filenames = Vec::new();
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                filenames.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(filenames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std_fs::write(path, b"%PDF-1.4").unwrap();
    }

    fn build_tree(root: &Path) {
        // Two production folders, one staging under "Produced", plus
        // directories the scanner must skip.
        let box1 = root.join("city production");
        std_fs::create_dir_all(&box1).unwrap();
        touch(&box1.join("OCA 1-50.pdf"));
        touch(&box1.join("OCA 51-562.pdf"));
        touch(&box1.join("cover letter.pdf"));

        let box2 = root.join("county production").join("Produced");
        std_fs::create_dir_all(&box2).unwrap();
        touch(&box2.join("OCA 563-894.pdf"));
        touch(&box2.join("PITCHESS 1-50.pdf"));
        // Sibling of "Produced" that must not be scanned.
        touch(&box2.parent().unwrap().join("OCA 900-950.pdf"));

        std_fs::create_dir_all(root.join("United")).unwrap();
        touch(&root.join("United").join("OCA 1-894.pdf"));
        std_fs::create_dir_all(root.join("what is this")).unwrap();
        touch(&root.join("what is this").join("OCA 999-1000.pdf"));
    }

    #[tokio::test]
    async fn discovers_and_merges_across_folders() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path());

        let series = DiscoveryScanner::discover(tmp.path()).await.unwrap();

        assert_eq!(series.len(), 2);
        let starts: Vec<u64> = series["OCA"].iter().map(|f| f.range.start.number).collect();
        assert_eq!(starts, vec![1, 51, 563]);
        assert_eq!(series["PITCHESS"].len(), 1);
    }

    #[tokio::test]
    async fn produced_child_shadows_its_parent() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path());

        let series = DiscoveryScanner::discover(tmp.path()).await.unwrap();

        // "OCA 900-950.pdf" sits next to the Produced child and is skipped.
        assert!(series["OCA"]
            .iter()
            .all(|f| f.range.start.number != 900));
    }

    #[tokio::test]
    async fn ignored_directories_are_skipped() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path());

        let series = DiscoveryScanner::discover(tmp.path()).await.unwrap();

        assert!(series["OCA"].iter().all(|f| f.range.start.number != 999));
        assert!(series["OCA"]
            .iter()
            .all(|f| !f.directory.ends_with("United")));
    }

    #[tokio::test]
    async fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = DiscoveryScanner::discover(&tmp.path().join("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, BatesError::DiscoveryRootNotFound { .. }));
    }

    #[tokio::test]
    async fn root_that_is_a_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("discovery");
        std_fs::write(&file, b"not a directory").unwrap();

        let err = DiscoveryScanner::discover(&file).await.unwrap_err();
        assert!(matches!(err, BatesError::DiscoveryRootNotFound { .. }));
    }
}
