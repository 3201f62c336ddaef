mod cli;
mod error;
mod services;
mod types;

use anyhow::Context;
use clap::Parser;
use cli::{CheckArgs, Cli, Commands, ScanArgs, UniteArgs};
use error::Result;
use services::{
    verify_page_count, DiscoveryScanner, PdfInfoPageCounter, PdfUniteUniter, RangeParser,
    RegenerationPlanner, Uniter,
};
use std::path::Path;
use tracing::{error, info, Level};
use types::{ScanReport, SeriesMap, SeriesReport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Commands::Scan(args) => handle_scan_command(args).await,
        Commands::Unite(args) => handle_unite_command(args).await,
        Commands::Check(args) => handle_check_command(args).await,
    };

    if let Err(e) = result {
        error!("Operation failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn build_series_reports(series: &SeriesMap) -> Vec<SeriesReport> {
    let mut prefixes: Vec<&String> = series.keys().collect();
    prefixes.sort();

    prefixes
        .into_iter()
        .filter(|prefix| !series[*prefix].is_empty())
        .map(|prefix| {
            let files = &series[prefix];
            let gap = RegenerationPlanner::validate_coverage(prefix, files)
                .err()
                .map(|e| e.to_string());
            SeriesReport {
                prefix: prefix.clone(),
                file_count: files.len(),
                first_number: files[0].range.start.number,
                last_number: files[files.len() - 1].range.end.number,
                contiguous: gap.is_none(),
                gap,
                united_filename: RegenerationPlanner::united_filename(prefix, files),
                files: files.clone(),
            }
        })
        .collect()
}

async fn handle_scan_command(args: &ScanArgs) -> Result<()> {
    info!("Scanning discovery root: {}", args.root.display());

    let series = DiscoveryScanner::discover(&args.root).await?;
    let reports = build_series_reports(&series);

    println!("\n=== Scan of '{}' ===", args.root.display());
    println!("Series found: {}", reports.len());

    for report in &reports {
        println!(
            "\nSeries {}: {} files, pages {}-{}",
            report.prefix, report.file_count, report.first_number, report.last_number
        );
        match &report.gap {
            None => println!("  Contiguous, united name: {}", report.united_filename),
            Some(gap) => println!("  NOT contiguous: {}", gap),
        }

        if args.detailed {
            for file in &report.files {
                println!(
                    "  {} ({}-{}) in {}",
                    file.filename,
                    file.range.start.number,
                    file.range.end.number,
                    file.directory.display()
                );
            }
        }
    }

    if let Some(json_path) = &args.json_output {
        let report = ScanReport {
            root: args.root.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            series: reports,
        };
        let json_content =
            serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?;

        tokio::fs::write(json_path, json_content)
            .await
            .context("Failed to write JSON scan report")?;

        info!("Scan report written to: {}", json_path.display());
    }

    Ok(())
}

async fn handle_unite_command(args: &UniteArgs) -> Result<()> {
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| args.root.join("united"));

    info!(
        "Planning united files for {} into {}",
        args.root.display(),
        output_dir.display()
    );

    let series = DiscoveryScanner::discover(&args.root).await?;

    if args.check_pages {
        check_series_page_counts(&series).await?;
    }

    let targets = RegenerationPlanner::plan(&series, &output_dir, args.force).await?;

    if targets.is_empty() {
        info!("All united files are up to date");
        return Ok(());
    }

    for target in &targets {
        info!(
            "Series {}: {} sources -> {}",
            target.series_prefix,
            target.source_files.len(),
            target.output_path.display()
        );
        for source in &target.source_files {
            info!("  - {}", source.display());
        }
    }

    if args.dry_run {
        info!("Dry run, {} united files not regenerated", targets.len());
        return Ok(());
    }

    if !output_dir.exists() {
        tokio::fs::create_dir_all(&output_dir).await?;
        info!("Created output directory: {}", output_dir.display());
    }

    let uniter = PdfUniteUniter;
    for target in &targets {
        uniter.unite(&target.output_path, &target.source_files).await?;
        info!("Regenerated {}", target.output_path.display());
    }

    info!("Unite operation completed successfully!");
    Ok(())
}

async fn check_series_page_counts(series: &SeriesMap) -> Result<()> {
    let counter = PdfInfoPageCounter;

    for files in series.values() {
        for file in files {
            verify_page_count(&counter, &file.path(), &file.range).await?;
        }
    }

    Ok(())
}

async fn handle_check_command(args: &CheckArgs) -> Result<()> {
    info!("Checking {} names", args.names.len());

    let parser = RangeParser::new();
    let counter = PdfInfoPageCounter;
    let mut invalid = Vec::new();

    for name in &args.names {
        let path = Path::new(name);
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        let stem = if is_pdf {
            path.file_stem().and_then(|s| s.to_str()).unwrap_or(name)
        } else {
            name.as_str()
        };

        match parser.parse_range(stem) {
            Ok(range) => {
                info!(
                    "✓ Valid: {} ({} pages {}-{})",
                    name,
                    range.start.prefix,
                    range.start.number,
                    range.end.number
                );

                if args.pages {
                    match verify_page_count(&counter, path, &range).await {
                        Ok(()) => info!("  Page count matches ({})", range.page_count()),
                        Err(e) => {
                            error!("  {}", e);
                            invalid.push((name, e.to_string()));
                        }
                    }
                }
            }
            Err(e) => {
                error!("✗ Invalid: {} - {}", name, e);
                invalid.push((name, e.to_string()));
            }
        }
    }

    println!("\n=== Check Summary ===");
    println!(
        "Valid names: {}/{}",
        args.names.len() - invalid.len(),
        args.names.len()
    );

    if !invalid.is_empty() {
        println!("Invalid names:");
        let invalid_count = invalid.len();
        for (name, reason) in invalid {
            println!("  - {}: {}", name, reason);
        }
        return Err(anyhow::anyhow!("{} names failed validation", invalid_count).into());
    }

    println!("All names are valid!");
    Ok(())
}
