use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use matchcenter::display::display_lines;
use matchcenter::output::{self, DEFAULT_CSV_PATH};
use matchcenter::scraper::WebScraper;
use matchcenter::types::{DATE_FORMAT, MatchDate, MatchRecord};
use matchcenter::utils::MatchStats;

#[derive(Parser)]
#[command(name = "matchcenter")]
#[command(about = "A yallakora.com match center scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape finished matches for a date, save them as CSV and print them
    Scrape {
        #[arg(value_name = "MM/DD/YYYY", help = "Date of the matches to scrape")]
        date: Option<String>,

        #[arg(
            long,
            value_name = "PATH",
            default_value = DEFAULT_CSV_PATH,
            help = "CSV file to write the matches to"
        )]
        csv: PathBuf,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,

        #[arg(
            long,
            help = "Skip malformed championships and matches instead of failing"
        )]
        skip_malformed: bool,

        #[arg(long, help = "Print lines without right-to-left shaping")]
        raw: bool,

        #[arg(long, value_name = "URL", help = "Override the match center site root")]
        base_url: Option<String>,
    },
    /// Print matches from a previously saved CSV file
    Show {
        #[arg(value_name = "PATH", default_value = DEFAULT_CSV_PATH)]
        path: PathBuf,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,

        #[arg(long, help = "Print lines without right-to-left shaping")]
        raw: bool,
    },
}

const MISSING_DATE_MESSAGE: &str = "Please enter a date.";

fn read_date(date: Option<String>) -> Option<MatchDate> {
    date.and_then(|d| d.parse().ok())
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

fn print_matches(matches: &[MatchRecord], format: &OutputFormat, raw: bool) {
    match format {
        OutputFormat::Json => serialize_json(&matches),
        OutputFormat::Text => {
            for (i, line) in display_lines(matches, !raw).iter().enumerate() {
                println!("{:>3}. {}", i + 1, line);
            }
            let stats = MatchStats::from_matches(matches);
            if raw {
                print!("{}", stats);
            } else {
                print!("{}", stats.to_shaped_string());
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    match cli.command {
        Commands::Scrape {
            date,
            csv,
            format,
            skip_malformed,
            raw,
            base_url,
        } => {
            let date = read_date(date).unwrap_or_else(|| {
                eprintln!("{}", MISSING_DATE_MESSAGE);
                process::exit(1);
            });

            if !date.is_well_formed() {
                log::warn!(
                    "Date '{}' does not look like {}; sending it as is",
                    date,
                    DATE_FORMAT
                );
            }

            let mut scraper = WebScraper::new().unwrap_or_else(|e| {
                log::error!("Error creating scraper: {}", e);
                process::exit(1);
            });
            if let Some(base_url) = base_url {
                scraper = scraper.with_base_url(base_url);
            }

            let matches = if skip_malformed {
                let page = scraper.fetch_matches_lenient(&date).await.unwrap_or_else(|e| {
                    log::error!("Error fetching matches: {}", e);
                    process::exit(1);
                });
                if !page.failures.is_empty() {
                    log::warn!("Skipped {} malformed entries", page.failures.len());
                }
                page.matches
            } else {
                scraper.fetch_matches(&date).await.unwrap_or_else(|e| {
                    log::error!("Error fetching matches: {}", e);
                    process::exit(1);
                })
            };

            if matches.is_empty() {
                println!("No matches found for the given date.");
                return;
            }

            output::save_csv(&csv, &matches).unwrap_or_else(|e| {
                log::error!("Error writing {}: {}", csv.display(), e);
                process::exit(1);
            });

            print_matches(&matches, &format, raw);
            println!("Matches scraped and saved to {}.", csv.display());
        }

        Commands::Show { path, format, raw } => {
            let matches = output::load_csv(&path).unwrap_or_else(|e| {
                log::error!("Error reading {}: {}", path.display(), e);
                process::exit(1);
            });

            if matches.is_empty() {
                println!("No entries to display.");
            } else {
                print_matches(&matches, &format, raw);
            }
        }
    }
}
