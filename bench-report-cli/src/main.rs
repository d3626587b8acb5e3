//! Benchmark Report CLI Application
//!
//! Command-line front end of the bench-report library. Run with no arguments it
//! reads `results.csv` from the directory of the executable and writes
//! `plot_time.png` and `plot_memory.png` next to it.

use anyhow::{Context, Result};
use bench_report::{ChartKind, ReportConfig, ReportGenerator};
use clap::Parser;
use std::path::{Path, PathBuf};

mod config;

/// Benchmark Report - Chart linked-list benchmark results
#[derive(Parser, Debug)]
#[command(name = "bench-report")]
#[command(about = "Plot smart vs. raw pointer linked-list benchmark results", long_about = None)]
#[command(version)]
struct Args {
    /// Report directory holding results.csv (default: directory of this executable)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Path to configuration file (report.toml) with chart overrides
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Benchmark Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using report library v{}", bench_report::VERSION);

    let generator = build_generator(&args)?;
    log::info!("Report directory: {:?}", generator.dir());

    generator.generate(|kind, path| print_saved(kind, path))?;

    println!("\n📊 Both charts generated successfully!");
    Ok(())
}

/// Resolve the report directory and configuration from the arguments
fn build_generator(args: &Args) -> Result<ReportGenerator> {
    let mut report_config = ReportConfig::default();
    if let Some(config_path) = &args.config {
        log::info!("Loading configuration from: {:?}", config_path);
        report_config = config::load_config(config_path)?.apply(report_config);
        log::debug!("Configuration loaded successfully");
    }

    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => ReportGenerator::beside_executable()
            .context("Failed to locate the executable directory")?
            .dir()
            .to_path_buf(),
    };

    let generator = ReportGenerator::with_config(dir, report_config)?;
    Ok(generator)
}

fn print_saved(kind: ChartKind, path: &Path) {
    match kind {
        ChartKind::Time => println!("✓ Time chart saved: {}", path.display()),
        ChartKind::Memory => println!("✓ Memory chart saved: {}", path.display()),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["bench-report"]).unwrap();
        assert!(args.dir.is_none());
        assert!(args.config.is_none());
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_flags() {
        let args =
            Args::try_parse_from(["bench-report", "-vv", "--dir", "report", "-c", "report.toml"])
                .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.dir, Some(PathBuf::from("report")));
        assert_eq!(args.config, Some(PathBuf::from("report.toml")));
    }

    #[test]
    fn test_build_generator_with_dir() {
        let args = Args::try_parse_from(["bench-report", "--dir", "/tmp/bench"]).unwrap();
        let generator = build_generator(&args).unwrap();
        assert_eq!(generator.input_path(), PathBuf::from("/tmp/bench/results.csv"));
    }

    #[test]
    fn test_build_generator_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("report.toml");
        std::fs::write(&config_path, "[output]\ndpi = 0\n").unwrap();

        let args = Args::try_parse_from([
            "bench-report",
            "--dir",
            dir.path().to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();
        assert!(build_generator(&args).is_err());
    }
}
