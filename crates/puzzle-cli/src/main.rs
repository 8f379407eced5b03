use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use puzzle_acquire::FailureKind;
use puzzle_model::PuzzleSource;
use std::path::PathBuf;

mod report;

#[derive(Parser)]
#[command(name = "puzzle")]
#[command(about = "Download today's word puzzle and save its starting words to a JSON file")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,

    /// Puzzle source to fetch from
    #[arg(short, long, default_value = "nytimes", value_enum)]
    source: SourceChoice,

    /// Output file for the word list
    #[arg(short, long, default_value = "puzzle.json")]
    output: PathBuf,

    /// Puzzle date for dated sources (YYYY-MM-DD); defaults to today's local date
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Source endpoint, required for mirror and auto; "{date}" is filled with the puzzle date
    #[arg(long)]
    url: Option<String>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, clap::ValueEnum)]
enum SourceChoice {
    /// nytimes.com (one document per day)
    Nytimes,
    /// Fallback mirror ("latest" endpoint given with --url)
    Mirror,
    /// Try nytimes first, then the mirror given with --url
    Auto,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    tracing::debug!(date = %date, output = %cli.output.display(), "Starting puzzle fetch");

    let result = match cli.source {
        SourceChoice::Auto => {
            let sources = puzzle_model::builtin_sources(mirror_url(&cli)?);
            puzzle_acquire::fetch_with_fallback(&sources, &cli.output, date).await
        }
        SourceChoice::Mirror => {
            let source = PuzzleSource::mirror(mirror_url(&cli)?);
            puzzle_acquire::fetch_and_save_on(&source, &cli.output, date).await
        }
        SourceChoice::Nytimes => {
            let mut source = PuzzleSource::nytimes();
            if let Some(url) = &cli.url {
                source = source.with_url(url);
            }
            puzzle_acquire::fetch_and_save_on(&source, &cli.output, date).await
        }
    };

    match result {
        Err(e) if !e.is_expected() => {
            Err(anyhow::Error::new(e).context(FailureKind::Unexpected.to_string()))
        }
        result => {
            println!("{}", report::status_line(&result));
            Ok(())
        }
    }
}

/// The mirror has no default host; its endpoint must come from `--url`.
fn mirror_url(cli: &Cli) -> Result<&str> {
    match cli.url.as_deref() {
        Some(url) => Ok(url),
        None => anyhow::bail!("the mirror source has no default endpoint; pass it with --url"),
    }
}

fn init_logging(cli: &Cli) {
    // Keep connection-pool and TLS chatter out of debug output
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,hyper_util=warn,rustls=warn",
        LogLevel::Trace => "trace,hyper_util=warn,rustls=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // Logs go to stderr; stdout carries only the status line.
    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}
