use anyhow::{Context, Result};
use clap::Parser;
use pronounce_acquire::{BrowserOptions, ChromeBrowser, HttpClient, Pipeline, PipelineSettings};
use std::path::PathBuf;
use std::time::Duration;

mod input;

#[derive(Parser)]
#[command(name = "pronounce")]
#[command(about = "Download pronunciation audio from Wiktionary pages")]
#[command(version)]
struct Cli {
    /// Wiktionary URLs with a language anchor (e.g., https://en.wiktionary.org/wiki/dinde#French)
    urls: Vec<String>,

    /// File with one URL per line (blank lines and lines starting with '#' are skipped)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory the audio files are written to
    #[arg(short = 'O', long, default_value = ".")]
    output_dir: PathBuf,

    /// WebDriver endpoint (chromedriver)
    #[arg(long, default_value = "http://localhost:9515")]
    webdriver: String,

    /// Seconds to wait for the language section and playback controls to appear
    #[arg(long, default_value_t = 10)]
    wait_timeout_secs: u64,

    /// Overall timeout for each plain HTTP request, in seconds (none by default)
    #[arg(long)]
    http_timeout_secs: Option<u64>,

    /// Write a JSON report of every URL's outcome to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn init_logging(level: &LogLevel, utc: bool) {
    // Keep HTML parsing and HTTP internals quiet at debug/trace
    let level = match level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn,hyper=warn,hyper_util=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn,hyper=warn,hyper_util=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.utc);

    let urls = input::collect_urls(&cli.urls, cli.input.as_deref())?;
    tracing::info!(count = urls.len(), "Starting Wiktionary pronunciation downloader");

    let browser = ChromeBrowser::new(BrowserOptions {
        webdriver_url: cli.webdriver,
        ..BrowserOptions::default()
    });
    let http = HttpClient::new(cli.http_timeout_secs.map(Duration::from_secs))
        .context("Failed to build HTTP client")?;
    let settings = PipelineSettings {
        output_dir: cli.output_dir,
        wait_timeout: Duration::from_secs(cli.wait_timeout_secs),
        ..PipelineSettings::default()
    };

    let pipeline = Pipeline::new(browser, http, settings);
    let report = pipeline.run_batch(&urls).await;

    println!("\n{}", report.summary());

    if let Some(path) = cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, &json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), records = report.total(), "Wrote JSON report");
    }

    Ok(())
}
