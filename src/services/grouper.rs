use crate::services::RangeParser;
use crate::types::{SeriesFile, SeriesMap};
use std::path::Path;
use tracing::debug;

pub struct ProductionGrouper;

impl ProductionGrouper {
    /// Buckets one directory listing by series prefix.
    ///
    /// Only `.pdf` files (extension compared case-insensitively) whose
    /// stems parse as bates ranges are kept; everything else in the
    /// directory is skipped, not rejected. Bucket order is insignificant
    /// until the merger sorts it.
    pub fn group(parser: &RangeParser, directory: &Path, filenames: &[String]) -> SeriesMap {
        let mut series = SeriesMap::new();

        for filename in filenames {
            let path = Path::new(filename);
            let is_pdf = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false);
            if !is_pdf {
                debug!("skipping non-pdf entry: {}", filename);
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match parser.parse_range(stem) {
                Ok(range) => {
                    series
                        .entry(range.start.prefix.clone())
                        .or_default()
                        .push(SeriesFile {
                            filename: filename.clone(),
                            directory: directory.to_path_buf(),
                            range,
                        });
                }
                Err(_) => {
                    debug!("skipping unparsable pdf name: {}", filename);
                }
            }
        }

        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn group(filenames: &[&str]) -> SeriesMap {
        let parser = RangeParser::new();
        let names: Vec<String> = filenames.iter().map(|s| s.to_string()).collect();
        ProductionGrouper::group(&parser, &PathBuf::from("prod"), &names)
    }

    #[test]
    fn buckets_by_series_prefix() {
        let series = group(&[
            "OCA 563-894.pdf",
            "PITCHESS 1-50.pdf",
            "PITCHESS 51-51.pdf",
            "OCA 1-50.pdf",
            "OCA 51-562.pdf",
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series["OCA"].len(), 3);
        assert_eq!(series["PITCHESS"].len(), 2);
        assert!(series["PITCHESS"]
            .iter()
            .all(|f| f.range.start.prefix == "PITCHESS"));
    }

    #[test]
    fn drops_non_pdfs_and_unparsable_names() {
        let series = group(&[
            "OCA 1-50.pdf",
            "OCA 51-100.txt",
            "privilege log.pdf",
            "united OCA 1-894.pdf",
            "readme",
        ]);

        assert_eq!(series.len(), 1);
        assert_eq!(series["OCA"].len(), 1);
        assert_eq!(series["OCA"][0].filename, "OCA 1-50.pdf");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let series = group(&["OCA 1-50.PDF"]);
        assert_eq!(series["OCA"].len(), 1);
    }

    #[test]
    fn records_the_source_directory() {
        let series = group(&["OCA 1-50.pdf"]);
        assert_eq!(series["OCA"][0].path(), PathBuf::from("prod/OCA 1-50.pdf"));
    }
}
