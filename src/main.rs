// Tue Jan 20 2026 - Alex

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use sigscan::{
    config::ScanConfig,
    matcher::Matcher,
    offset::FileLayout,
    sigdb,
    target::{ExeLayout, FlatLayout, MappedFile},
};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Boyer-Moore signature scanner", long_about = None)]
struct Args {
    /// Signature database (one Name:Offset:HexBytes per line)
    #[arg(short, long)]
    database: PathBuf,

    /// Files to scan
    files: Vec<PathBuf>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    no_progress: bool,

    /// Scan every position instead of precomputing per-file offsets
    #[arg(long)]
    no_offset_index: bool,

    /// Write a JSON report
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct FileResult {
    path: String,
    detection: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct ScanReport {
    signatures: usize,
    scanned: usize,
    detected: usize,
    errors: usize,
    results: Vec<FileResult>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let config = ScanConfig::new()
        .with_database(args.database.clone())
        .with_offset_index(!args.no_offset_index)
        .with_verbose(args.verbose)
        .with_progress_bars(!args.no_progress);

    let start_time = Instant::now();

    let entries = sigdb::load_signatures(&args.database)?;
    let mut matcher = Matcher::new()?;
    let mut loaded = 0usize;
    for entry in &entries {
        match matcher.add_pattern(&entry.bytes, &entry.name, &entry.offset) {
            Ok(()) => loaded += 1,
            Err(e) => log::warn!("Skipping signature {}: {}", entry.name, e),
        }
    }
    println!(
        "{} Loaded {} signatures from {}",
        "[*]".blue(),
        loaded,
        args.database.display()
    );

    let bar = if config.enable_progress_bars && args.files.len() > 1 {
        let bar = ProgressBar::new(args.files.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{bar:40}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(bar)
    } else {
        None
    };

    let emit = |line: String| match &bar {
        Some(bar) => bar.println(line),
        None => println!("{}", line),
    };

    let mut results = Vec::new();
    let mut detected = 0usize;
    let mut errors = 0usize;

    for path in &args.files {
        let mut result = FileResult {
            path: path.display().to_string(),
            detection: None,
            error: None,
        };

        match scan_file(&matcher, path, &config) {
            Ok(Some(name)) => {
                emit(format!("{}: {} {}", path.display(), name.red().bold(), "FOUND".red()));
                result.detection = Some(name);
                detected += 1;
            }
            Ok(None) => {
                emit(format!("{}: {}", path.display(), "OK".green()));
            }
            Err(e) => {
                emit(format!("{}: {} ({})", path.display(), "ERROR".yellow(), e));
                result.error = Some(e.to_string());
                errors += 1;
            }
        }
        results.push(result);

        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }

    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    println!();
    println!(
        "{} Scanned {} files, {} detected, {} errors in {:.2}s",
        "[*]".blue(),
        args.files.len(),
        detected,
        errors,
        start_time.elapsed().as_secs_f64()
    );

    if let Some(output) = &args.output {
        let report = ScanReport {
            signatures: loaded,
            scanned: args.files.len(),
            detected,
            errors,
            results,
        };
        let mut file = File::create(output)?;
        file.write_all(serde_json::to_string_pretty(&report)?.as_bytes())?;
        println!("{} Report written to {}", "[*]".blue(), output.display());
    }

    Ok(())
}

fn scan_file(matcher: &Matcher, path: &Path, config: &ScanConfig) -> anyhow::Result<Option<String>> {
    let mapped = MappedFile::open(path)?;
    log::debug!("Scanning {} ({} bytes)", path.display(), mapped.len());

    let exe_layout;
    let flat_layout;
    let layout: &dyn FileLayout = if config.parse_executables {
        exe_layout = ExeLayout::parse(mapped.data());
        &exe_layout
    } else {
        flat_layout = FlatLayout::new(mapped.len() as u64);
        &flat_layout
    };

    let hit = if config.use_offset_index && matcher.wants_offset_index() {
        let mut index = matcher.build_offset_index(layout)?;
        log::debug!("Offset index: {} candidate positions", index.candidate_count());
        matcher.scan_buffer(mapped.data(), 0, Some(layout), Some(&mut index))?
    } else {
        matcher.scan_buffer(mapped.data(), 0, Some(layout), None)?
    };

    Ok(hit.map(|name| name.to_string()))
}
