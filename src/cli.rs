use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bates")]
#[command(about = "A CLI tool for reconciling bates-numbered document productions")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a discovery root and report each bates series
    Scan(ScanArgs),

    /// Regenerate stale united files for every series
    Unite(UniteArgs),

    /// Validate bates range strings or filenames
    Check(CheckArgs),
}

#[derive(Args)]
pub struct ScanArgs {
    /// Discovery root directory
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Output scan report to JSON file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    /// Show every file in each series
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Args)]
pub struct UniteArgs {
    /// Discovery root directory
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Directory for united files (defaults to ROOT/united)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print the plan without running the external uniter
    #[arg(long)]
    pub dry_run: bool,

    /// Regenerate every series regardless of staleness
    #[arg(long)]
    pub force: bool,

    /// Cross-check each source's page count before uniting
    #[arg(long)]
    pub check_pages: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Range strings or filenames (e.g. "COB0002421-COB0003964")
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,

    /// Treat names as files and cross-check real page counts
    #[arg(long)]
    pub pages: bool,
}
