use crate::types::SeriesMap;

pub struct SeriesMerger;

impl SeriesMerger {
    /// Combines two per-series maps: union of prefixes, each bucket
    /// concatenated and re-sorted ascending by starting number.
    ///
    /// Merging never checks coverage. Folder-by-folder folds are
    /// legitimately incomplete until every folder is combined, so gap
    /// validation is the planner's job, at the point a series is about to
    /// be named or regenerated.
    pub fn merge(a: SeriesMap, b: SeriesMap) -> SeriesMap {
        let mut merged = a;

        for (prefix, files) in b {
            merged.entry(prefix).or_default().extend(files);
        }

        for files in merged.values_mut() {
            files.sort_by_key(|f| f.range.start.number);
        }

        merged
    }
}
