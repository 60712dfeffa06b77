use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{ScrapeConfig, DEFAULT_BASE_URL};
use crate::models::RawSearchInput;

#[derive(Parser, Debug, Default)]
#[command(
    name = "hotel-scout",
    about = "Scrape hotel listings for a city and stay dates into a CSV file"
)]
pub struct CliArgs {
    /// City to search (prompted for when omitted)
    #[arg(long)]
    pub city: Option<String>,

    /// Check-in date, YYYY-MM-DD (prompted for when omitted)
    #[arg(long)]
    pub checkin: Option<String>,

    /// Check-out date, YYYY-MM-DD (prompted for when omitted)
    #[arg(long)]
    pub checkout: Option<String>,

    /// Number of adults, 1-2 (prompted for when omitted)
    #[arg(long)]
    pub adults: Option<String>,

    /// Number of children, 0-2 (prompted for when omitted)
    #[arg(long)]
    pub children: Option<String>,

    /// Search results page the query is sent to
    #[arg(long, env = "HOTEL_SCOUT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Page load timeout in seconds (default: 60)
    #[arg(long, env = "HOTEL_SCOUT_PAGE_TIMEOUT", default_value_t = 60)]
    pub page_timeout: u64,

    /// Seconds to wait for each price to render (default: 5)
    #[arg(long, env = "HOTEL_SCOUT_PRICE_WAIT", default_value_t = 5)]
    pub price_wait: u64,

    /// Seconds to let the page settle after navigation (default: 2)
    #[arg(long, env = "HOTEL_SCOUT_SETTLE", default_value_t = 2)]
    pub settle: u64,

    /// Show the Chrome window instead of running headless
    #[arg(long)]
    pub show_browser: bool,

    /// Directory the output files are written to (default: ".")
    #[arg(short, long, env = "HOTEL_SCOUT_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Save the rendered results page and a screenshot to this directory
    #[arg(long, env = "HOTEL_SCOUT_DEBUG_DIR")]
    pub debug_dir: Option<PathBuf>,

    /// Also write the records as JSON next to the CSV
    #[arg(long)]
    pub json: bool,

    /// Extract from a saved results page instead of launching a browser
    #[arg(long, value_name = "FILE")]
    pub from_html: Option<PathBuf>,
}

impl CliArgs {
    pub fn scrape_config(&self) -> ScrapeConfig {
        ScrapeConfig {
            base_url: self.base_url.clone(),
            page_load_timeout: Duration::from_secs(self.page_timeout),
            price_wait: Duration::from_secs(self.price_wait),
            settle: Duration::from_secs(self.settle),
            headless: !self.show_browser,
            output_dir: self.output_dir.clone(),
            debug_dir: self.debug_dir.clone(),
            write_json: self.json,
        }
    }

    /// True when no search field was given as a flag, so every field is prompted for
    pub fn is_interactive(&self) -> bool {
        [&self.city, &self.checkin, &self.checkout, &self.adults, &self.children]
            .iter()
            .all(|field| field.is_none())
    }

    /// Collect the five search fields, prompting on `output` and reading
    /// `input` for those not given as flags. `None` when input ends early.
    pub fn collect_input<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<Option<RawSearchInput>> {
        let mut ask = |preset: &Option<String>, prompt: &str| -> io::Result<Option<String>> {
            if let Some(value) = preset {
                return Ok(Some(value.trim().to_string()));
            }

            write!(output, "{prompt}")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            Ok(Some(line.trim().to_string()))
        };

        let Some(city) = ask(&self.city, "Enter the name of the city: ")? else {
            return Ok(None);
        };
        let Some(checkin) = ask(&self.checkin, "Enter the check-in date (YYYY-MM-DD): ")? else {
            return Ok(None);
        };
        let Some(checkout) = ask(&self.checkout, "Enter the check-out date (YYYY-MM-DD): ")? else {
            return Ok(None);
        };
        let Some(adults) = ask(&self.adults, "Enter the number of adults (1-2): ")? else {
            return Ok(None);
        };
        let Some(children) = ask(&self.children, "Enter the number of children (0-2): ")? else {
            return Ok(None);
        };

        Ok(Some(RawSearchInput {
            city,
            checkin,
            checkout,
            adults,
            children,
        }))
    }
}
