//! # Bates Manager Library
//!
//! A library for reconciling bates-numbered legal document productions:
//! parsing bates ranges out of filenames, merging produced file sets from
//! multiple discovery folders into gap-checked series, and deciding which
//! derived "united" PDFs are stale and must be regenerated.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bates_manager::{DiscoveryScanner, RegenerationPlanner};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let root = Path::new("./discovery");
//!
//!     // Build the authoritative per-series file map
//!     let series = DiscoveryScanner::discover(root).await?;
//!
//!     // Decide which united files need regenerating
//!     let targets = RegenerationPlanner::plan(&series, &root.join("united"), false).await?;
//!
//!     for target in &targets {
//!         println!("{} <- {} sources", target.output_path.display(), target.source_files.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod services;
pub mod types;

// Re-export main types and services for easier usage
pub use error::{BatesError, Result};
pub use services::{
    verify_page_count, DiscoveryScanner, PageCounter, PdfInfoPageCounter, PdfUniteUniter,
    ProductionGrouper, RangeParser, ReferenceRing, RegenerationPlanner, SeriesMerger, Uniter,
};
pub use types::{
    BatesPage, BatesRange, RegenerationTarget, ScanReport, SeriesFile, SeriesMap, SeriesReport,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_scan_and_plan_workflow() {
        let tmp = TempDir::new().unwrap();
        let production = tmp.path().join("first production");
        fs::create_dir_all(&production).unwrap();
        for name in ["OCA 1-50.pdf", "OCA 51-562.pdf", "OCA 563-894.pdf"] {
            fs::write(production.join(name), b"%PDF-1.4").unwrap();
        }

        let series = DiscoveryScanner::discover(tmp.path()).await.unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series["OCA"].len(), 3);

        let united = tmp.path().join("united");
        let targets = RegenerationPlanner::plan(&series, &united, false)
            .await
            .unwrap();

        assert_eq!(targets.len(), 1);
        assert_eq!(
            targets[0].output_path,
            united.join("united OCA 1-894.pdf")
        );
        assert_eq!(targets[0].source_files.len(), 3);
    }

    #[test]
    fn test_copy_paste_ring_workflow() {
        // Copy two positions from a source document, paste the range, then
        // walk forward one page.
        let parser = RangeParser::new();
        let range = parser.parse_range("COB0002421-COB0003964").unwrap();

        let mut ring = ReferenceRing::new();
        ring.set_max_number(range.end.number);
        ring.push(range.start.increment(2));
        ring.push(range.start.clone());

        assert_eq!(ring.paste_text().unwrap(), "COB 2421 - COB 2423");

        let next = ring.advance().unwrap().unwrap();
        assert_eq!(next.format(false), "COB0002424");
        assert_eq!(ring.paste_text().unwrap(), "COB 2424");
    }

    #[test]
    fn test_version_is_exposed() {
        assert!(!VERSION.is_empty());
    }
}
