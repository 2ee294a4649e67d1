pub mod display;
pub mod output;
mod parser;
pub mod scraper;
pub mod types;
pub mod utils;

pub use parser::{
    ExtractionFailure, MatchCenterPage, ParseError, parse_match_center,
    parse_match_center_lenient,
};
pub use scraper::{ScraperError, WebScraper};

pub(crate) const BASE_URL: &str = "https://www.yallakora.com";
