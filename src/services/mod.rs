pub mod external;
pub mod grouper;
pub mod merger;
pub mod parser;
pub mod planner;
pub mod ring;
pub mod scanner;

pub use external::{verify_page_count, PageCounter, PdfInfoPageCounter, PdfUniteUniter, Uniter};
pub use grouper::ProductionGrouper;
pub use merger::SeriesMerger;
pub use parser::RangeParser;
pub use planner::RegenerationPlanner;
pub use ring::ReferenceRing;
pub use scanner::DiscoveryScanner;
