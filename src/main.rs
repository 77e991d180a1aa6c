mod config;
mod engine;
mod ingest;
mod models;
mod output;
mod pipeline;
mod types;

use std::fs::{self, File, OpenOptions};
use std::io::{stderr, stdout, BufWriter, Write};
use std::path::Path;
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::{load_mapping, Settings};
use crate::engine::{BatchEngine, RunOutput};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 3 {
        eprintln!("Usage: transaction-categoriser [settings].json:optional [log_level:optional]");
        eprintln!("Use '-' as settings path to run with the built-in defaults.");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: info)");
        exit(1);
    }

    let settings = match args.get(1).map(String::as_str) {
        None | Some("-") => Settings::default(),
        Some(path) => Settings::load(Path::new(path))?
    };

    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::INFO);

    setup_logging(log_level, &settings)?;

    let result = run(settings);

    if let Err(error) = &result {
        error!("{error:#}");
    }

    result
}

fn run(settings: Settings) -> Result<()> {
    let contractor_mapping = load_mapping(&settings.contractor_mapping)?;
    let title_mapping = load_mapping(&settings.title_mapping)?;
    let engine = BatchEngine::new(settings, contractor_mapping, title_mapping);

    let timer = Instant::now();
    let result = engine.run()?;
    let duration = timer.elapsed();

    info!("Processed transactions in: {duration:?}");

    write_results(engine.settings(), &result)
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter, settings: &Settings) -> Result<()> {
    fs::create_dir_all(&settings.logs_folder)
        .with_context(|| format!("Could not create logs folder '{}'", settings.logs_folder.display()))?;

    //NOTE: stdout carries the run summary, so the terminal log goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    let info_log = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(open_log_file(&settings.log_file())?))
        .with_filter(LevelFilter::INFO);

    let debug_log = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(open_log_file(&settings.debug_log_file())?))
        .with_filter(LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(terminal_log)
        .with(info_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Could not open log file '{}'", path.display()))
}

fn write_results(settings: &Settings, result: &RunOutput) -> Result<()> {
    let separator = settings.read_options()?.separator;
    let categorised = output::write_categorised(&settings.output_folder, &result.source, &result.categorised, separator)?;
    let contractors = output::write_uncategorised(&settings.uncategorised_folder, "contractor", &result.uncategorised_contractors)?;
    let titles = output::write_uncategorised(&settings.uncategorised_folder, "title", &result.uncategorised_titles)?;

    let mut summary = BufWriter::new(stdout().lock());

    writeln!(summary, "source,{}", result.source.display())?;
    writeln!(summary, "rows_read,{}", result.rows_read)?;
    writeln!(summary, "rows_kept,{}", result.categorised.len())?;
    writeln!(summary, "rows_uncategorised,{}", result.uncategorised_rows())?;
    writeln!(summary, "categorised,{}", categorised.display())?;
    writeln!(summary, "uncategorised_contractors,{}", contractors.display())?;
    writeln!(summary, "uncategorised_titles,{}", titles.display())?;

    summary.flush()?;

    Ok(())
}
