mod cli;
mod config;
mod error;
mod models;
mod output;
mod scrapers;
mod validation;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cli::CliArgs;
use config::ScrapeConfig;
use error::ValidationError;
use models::{ExtractionReport, SearchQuery};
use scrapers::{BookingBrowserScraper, HtmlFileScraper, ScraperTrait};
use validation::{validate, Clock, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = CliArgs::parse();

    info!("🏨 Hotel Scout");
    info!("==============");

    let config = args.scrape_config();
    let scraper: Box<dyn ScraperTrait> = match &args.from_html {
        Some(path) => Box::new(HtmlFileScraper::new(path.clone(), config.price_wait)),
        None => Box::new(BookingBrowserScraper::new(config.clone())),
    };

    let stdin = io::stdin();
    let outcome = search(
        &args,
        &mut stdin.lock(),
        &mut io::stdout(),
        &mut io::stderr(),
        &SystemClock,
        scraper.as_ref(),
        &config,
    )
    .await?;

    match outcome {
        Outcome::Completed { hotels } => {
            info!("✅ Done, {} hotels written", hotels);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Cancelled => {
            info!("No search entered, nothing to do");
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Rejected(err) => {
            warn!("Search rejected: {}", err);
            Ok(ExitCode::from(2))
        }
    }
}

/// How one invocation ended
#[derive(Debug)]
enum Outcome {
    Completed { hotels: usize },
    /// Input ended before all five fields were collected
    Cancelled,
    /// Flag-supplied input failed validation; nothing was scraped
    Rejected(ValidationError),
}

/// Search input after validation
#[derive(Debug)]
enum QueryInput {
    Ready(SearchQuery),
    Cancelled,
    Rejected(ValidationError),
}

/// Validate input, then scrape and write. The scraper is only reached with a
/// validated query.
async fn search<R: BufRead, W: Write, E: Write>(
    args: &CliArgs,
    input: &mut R,
    output: &mut W,
    errors: &mut E,
    clock: &impl Clock,
    scraper: &dyn ScraperTrait,
    config: &ScrapeConfig,
) -> anyhow::Result<Outcome> {
    let query = match read_query(args, input, output, errors, clock)? {
        QueryInput::Ready(query) => query,
        QueryInput::Cancelled => return Ok(Outcome::Cancelled),
        QueryInput::Rejected(err) => return Ok(Outcome::Rejected(err)),
    };

    let report = run(scraper, &query, config).await?;

    writeln!(
        output,
        "There are: {} hotels in {} from {} to {}.",
        report.cards_found,
        query.city(),
        query.checkin(),
        query.checkout()
    )?;

    Ok(Outcome::Completed {
        hotels: report.records.len(),
    })
}

/// Collect input until it validates. Flag-driven runs get one attempt; the
/// interactive prompt asks again.
fn read_query<R: BufRead, W: Write, E: Write>(
    args: &CliArgs,
    input: &mut R,
    output: &mut W,
    errors: &mut E,
    clock: &impl Clock,
) -> io::Result<QueryInput> {
    loop {
        let Some(raw) = args.collect_input(input, output)? else {
            return Ok(QueryInput::Cancelled);
        };

        match validate(&raw, clock) {
            Ok(query) => return Ok(QueryInput::Ready(query)),
            Err(err) => {
                writeln!(errors, "Error: {err}")?;
                if !args.is_interactive() {
                    return Ok(QueryInput::Rejected(err));
                }
            }
        }
    }
}

/// Scrape the results for `query` and write them out. Nothing is written when
/// the scrape itself fails.
async fn run(
    scraper: &dyn ScraperTrait,
    query: &SearchQuery,
    config: &ScrapeConfig,
) -> anyhow::Result<ExtractionReport> {
    info!(
        "Searching {} for hotels in {} from {} to {} ({} adults, {} children)",
        scraper.source_name(),
        query.city(),
        query.checkin(),
        query.checkout(),
        query.adults(),
        query.children()
    );

    let report = match scraper.scrape(query).await {
        Ok(report) => report,
        Err(err) => {
            error!("Scrape failed: {}", err);
            return Err(err).context("Scrape failed, no output written");
        }
    };

    if !report.skipped.is_empty() {
        let positions: Vec<String> = report
            .skipped
            .iter()
            .map(|skipped| format!("#{} ({})", skipped.index + 1, skipped.error))
            .collect();
        warn!(
            "{} of {} cards were skipped: {}",
            report.skipped.len(),
            report.cards_found,
            positions.join(", ")
        );
    }

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    output::write_csv(&output::csv_path(&config.output_dir, query), &report.records)?;
    if config.write_json {
        output::write_json(&output::json_path(&config.output_dir, query), &report.records).await?;
    }

    Ok(report)
}
