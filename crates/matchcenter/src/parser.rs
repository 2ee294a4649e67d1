use std::fmt::Display;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::types::MatchRecord;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// A championship or match that could not be read during lenient extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    /// `None` when the championship title itself could not be read.
    pub tournament: Option<String>,
    /// Position of the match among the championship's finished matches.
    pub match_index: Option<usize>,
    pub error: ParseError,
}

impl Display for ExtractionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.tournament, self.match_index) {
            (Some(tournament), Some(index)) => {
                write!(f, "{} (match #{}): {}", tournament, index + 1, self.error)
            }
            (Some(tournament), None) => write!(f, "{}: {}", tournament, self.error),
            (None, _) => write!(f, "championship skipped: {}", self.error),
        }
    }
}

/// Everything the lenient extraction managed to read from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchCenterPage {
    pub matches: Vec<MatchRecord>,
    pub failures: Vec<ExtractionFailure>,
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector '{css}': {e}"))
}

static MATCH_CARD_SEL: LazyLock<Selector> = LazyLock::new(|| selector("div.matchCard"));
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("div.title h2"));
static FINISHED_MATCH_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector("div.ul div.item.finish.liItem"));
static TEAM_A_SEL: LazyLock<Selector> = LazyLock::new(|| selector("div.teamA"));
static TEAM_B_SEL: LazyLock<Selector> = LazyLock::new(|| selector("div.teamB"));
static RESULT_SEL: LazyLock<Selector> = LazyLock::new(|| selector("div.MResult"));
static SCORE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("span.score"));
static TIME_SEL: LazyLock<Selector> = LazyLock::new(|| selector("span.time"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_match<'a>(
    element: ElementRef<'a>,
    sel: &Selector,
    field: &str,
) -> Result<ElementRef<'a>, ParseError> {
    element
        .select(sel)
        .next()
        .ok_or_else(|| ParseError::MissingField(field.to_string()))
}

fn parse_championship_title(card: ElementRef) -> Result<String, ParseError> {
    first_match(card, &TITLE_SEL, "championship title").map(elem_text)
}

fn parse_match_item(item: ElementRef, tournament: &str) -> Result<MatchRecord, ParseError> {
    let team_a = first_match(item, &TEAM_A_SEL, "team A").map(elem_text)?;
    let team_b = first_match(item, &TEAM_B_SEL, "team B").map(elem_text)?;

    let result = first_match(item, &RESULT_SEL, "match result")?;
    let mut scores = result.select(&SCORE_SEL).map(elem_text);
    let score_a = scores
        .next()
        .ok_or_else(|| ParseError::MissingField("team A score".to_string()))?;
    let score_b = scores
        .next()
        .ok_or_else(|| ParseError::MissingField("team B score".to_string()))?;
    let time = first_match(result, &TIME_SEL, "match time").map(elem_text)?;

    Ok(MatchRecord {
        tournament: tournament.to_string(),
        team_a,
        team_b,
        time,
        score: format!("{} - {}", score_a, score_b),
    })
}

/// Extracts every finished match on a match center page, in page order.
///
/// The first championship or match that does not have the expected shape
/// aborts the whole extraction. A page without any match cards yields an
/// empty list.
pub fn parse_match_center(html: &str) -> Result<Vec<MatchRecord>, ParseError> {
    let document = Html::parse_document(html);
    let mut matches = Vec::new();

    for card in document.select(&MATCH_CARD_SEL) {
        let tournament = parse_championship_title(card)?;
        for item in card.select(&FINISHED_MATCH_SEL) {
            matches.push(parse_match_item(item, &tournament)?);
        }
    }

    log::debug!("Extracted {} finished matches", matches.len());
    Ok(matches)
}

/// Like [`parse_match_center`], but a malformed championship or match is
/// recorded in [`MatchCenterPage::failures`] and the rest of the page is
/// still read.
pub fn parse_match_center_lenient(html: &str) -> MatchCenterPage {
    let document = Html::parse_document(html);
    let mut page = MatchCenterPage::default();

    for card in document.select(&MATCH_CARD_SEL) {
        let tournament = match parse_championship_title(card) {
            Ok(title) => title,
            Err(error) => {
                log::warn!("Skipping championship: {}", error);
                page.failures.push(ExtractionFailure {
                    tournament: None,
                    match_index: None,
                    error,
                });
                continue;
            }
        };

        for (index, item) in card.select(&FINISHED_MATCH_SEL).enumerate() {
            match parse_match_item(item, &tournament) {
                Ok(record) => page.matches.push(record),
                Err(error) => {
                    let failure = ExtractionFailure {
                        tournament: Some(tournament.clone()),
                        match_index: Some(index),
                        error,
                    };
                    log::warn!("Skipping match: {}", failure);
                    page.failures.push(failure);
                }
            }
        }
    }

    log::debug!(
        "Extracted {} finished matches, skipped {}",
        page.matches.len(),
        page.failures.len()
    );
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MISSING_TIME: &str = r#"
        <div class="matchCard">
          <div class="title"><h2>كأس مصر</h2></div>
          <div class="ul">
            <div class="item finish liItem">
              <div class="teams teamA"><p>Pyramids</p></div>
              <div class="MResult">
                <span class="score">3</span><span>-</span><span class="score">0</span>
                <span class="time">19:00</span>
              </div>
              <div class="teams teamB"><p>Enppi</p></div>
            </div>
            <div class="item finish liItem">
              <div class="teams teamA"><p>Ismaily</p></div>
              <div class="MResult">
                <span class="score">1</span><span>-</span><span class="score">1</span>
              </div>
              <div class="teams teamB"><p>Masry</p></div>
            </div>
          </div>
        </div>
        <div class="matchCard">
          <div class="title"><h2>الدوري السعودي</h2></div>
          <div class="ul">
            <div class="item finish liItem">
              <div class="teams teamA"><p>Al Hilal</p></div>
              <div class="MResult">
                <span class="score">2</span><span>-</span><span class="score">2</span>
                <span class="time">21:00</span>
              </div>
              <div class="teams teamB"><p>Al Nassr</p></div>
            </div>
          </div>
        </div>
    "#;

    const MISSING_SCORE: &str = r#"
        <div class="matchCard">
          <div class="title"><h2>League</h2></div>
          <div class="ul">
            <div class="item finish liItem">
              <div class="teams teamA"><p>A</p></div>
              <div class="MResult">
                <span class="score">1</span>
                <span class="time">18:00</span>
              </div>
              <div class="teams teamB"><p>B</p></div>
            </div>
          </div>
        </div>
    "#;

    const MISSING_TITLE: &str = r#"
        <div class="matchCard">
          <div class="title"><a href="/league">League</a></div>
          <div class="ul">
            <div class="item finish liItem">
              <div class="teams teamA"><p>A</p></div>
              <div class="MResult">
                <span class="score">1</span><span class="score">0</span>
                <span class="time">18:00</span>
              </div>
              <div class="teams teamB"><p>B</p></div>
            </div>
          </div>
        </div>
        <div class="matchCard">
          <div class="title"><h2>Cup</h2></div>
          <div class="ul">
            <div class="item finish liItem">
              <div class="teams teamA"><p>C</p></div>
              <div class="MResult">
                <span class="score">0</span><span class="score">2</span>
                <span class="time">16:00</span>
              </div>
              <div class="teams teamB"><p>D</p></div>
            </div>
          </div>
        </div>
    "#;

    #[test]
    fn test_parse_two_matches_one_championship() {
        let html = fs::read_to_string("fixtures/two_matches_one_championship.html")
            .expect("Failed to read fixture");

        let matches = parse_match_center(&html).expect("Should parse matches");

        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.tournament == "الدوري المصري"));

        assert_eq!(matches[0].team_a, "Al Ahly");
        assert_eq!(matches[0].team_b, "Zamalek");
        assert_eq!(matches[0].score, "2 - 1");
        assert_eq!(matches[0].time, "20:00");

        assert_eq!(matches[1].team_a, "X");
        assert_eq!(matches[1].team_b, "Y");
        assert_eq!(matches[1].score, "0 - 0");
        assert_eq!(matches[1].time, "18:00");
    }

    #[test]
    fn test_parse_full_page_in_document_order() {
        let html =
            fs::read_to_string("fixtures/match_center.html").expect("Failed to read fixture");

        let matches = parse_match_center(&html).expect("Should parse matches");

        assert_eq!(matches.len(), 4, "Only finished matches should be extracted");
        let tournaments: Vec<&str> = matches.iter().map(|m| m.tournament.as_str()).collect();
        assert_eq!(
            tournaments,
            vec![
                "الدوري المصري",
                "الدوري المصري",
                "دوري أبطال أوروبا",
                "دوري أبطال أوروبا"
            ]
        );

        assert_eq!(matches[0].team_a, "الأهلي");
        assert_eq!(matches[0].team_b, "الزمالك");
        assert_eq!(matches[2].team_a, "ريال مدريد");
        assert_eq!(matches[2].score, "3 - 1");
        assert_eq!(matches[3].time, "22:00");

        for m in &matches {
            assert!(!m.tournament.is_empty());
            assert!(!m.team_a.is_empty());
            assert!(!m.team_b.is_empty());
            assert!(!m.time.is_empty());
            assert!(!m.score.is_empty());
        }
    }

    #[test]
    fn test_championship_without_finished_matches_is_omitted() {
        let html =
            fs::read_to_string("fixtures/match_center.html").expect("Failed to read fixture");

        let matches = parse_match_center(&html).expect("Should parse matches");

        assert!(
            matches.iter().all(|m| m.tournament != "الدوري الإنجليزي"),
            "A championship with only upcoming matches should produce no records"
        );
    }

    #[test]
    fn test_parse_empty_page() {
        let html = fs::read_to_string("fixtures/empty.html").expect("Failed to read fixture");

        let matches = parse_match_center(&html).expect("An empty page is not an error");
        assert!(matches.is_empty());

        let page = parse_match_center_lenient(&html);
        assert_eq!(page, MatchCenterPage::default());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let html =
            fs::read_to_string("fixtures/match_center.html").expect("Failed to read fixture");

        let first = parse_match_center(&html).expect("Should parse matches");
        let second = parse_match_center(&html).expect("Should parse matches");
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_time_fails_strict_extraction() {
        let err = parse_match_center(MISSING_TIME).expect_err("Should fail on missing time");
        assert_eq!(err, ParseError::MissingField("match time".to_string()));
    }

    #[test]
    fn test_missing_score_fails_strict_extraction() {
        let err = parse_match_center(MISSING_SCORE).expect_err("Should fail on missing score");
        assert_eq!(err, ParseError::MissingField("team B score".to_string()));
    }

    #[test]
    fn test_missing_title_fails_strict_extraction() {
        let err = parse_match_center(MISSING_TITLE).expect_err("Should fail on missing title");
        assert_eq!(
            err,
            ParseError::MissingField("championship title".to_string())
        );
    }

    #[test]
    fn test_title_is_not_taken_from_match_item() {
        let html = r#"
            <div class="matchCard">
              <div class="title"><a href="/league">League</a></div>
              <div class="ul">
                <div class="item finish liItem">
                  <h2>Match report</h2>
                  <div class="teams teamA"><p>A</p></div>
                  <div class="MResult">
                    <span class="score">1</span><span class="score">0</span>
                    <span class="time">18:00</span>
                  </div>
                  <div class="teams teamB"><p>B</p></div>
                </div>
              </div>
            </div>
        "#;

        let err = parse_match_center(html).expect_err("Title block has no heading");
        assert_eq!(
            err,
            ParseError::MissingField("championship title".to_string())
        );
    }

    #[test]
    fn test_finished_items_outside_match_list_are_ignored() {
        let html = r#"
            <div class="matchCard">
              <div class="title"><h2>League</h2></div>
              <div class="related">
                <div class="item finish liItem">
                  <div class="teams teamA"><p>Old</p></div>
                </div>
              </div>
              <div class="ul">
                <div class="item finish liItem">
                  <div class="teams teamA"><p>A</p></div>
                  <div class="MResult">
                    <span class="score">1</span><span class="score">0</span>
                    <span class="time">18:00</span>
                  </div>
                  <div class="teams teamB"><p>B</p></div>
                </div>
              </div>
            </div>
        "#;

        let matches = parse_match_center(html).expect("Should parse matches");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].team_a, "A");
    }

    #[test]
    fn test_lenient_skips_only_the_malformed_match() {
        let page = parse_match_center_lenient(MISSING_TIME);

        assert_eq!(page.matches.len(), 2);
        assert_eq!(page.matches[0].team_a, "Pyramids");
        assert_eq!(page.matches[1].team_a, "Al Hilal");

        assert_eq!(page.failures.len(), 1);
        let failure = &page.failures[0];
        assert_eq!(failure.tournament.as_deref(), Some("كأس مصر"));
        assert_eq!(failure.match_index, Some(1));
        assert_eq!(
            failure.error,
            ParseError::MissingField("match time".to_string())
        );
    }

    #[test]
    fn test_lenient_skips_championship_without_title() {
        let page = parse_match_center_lenient(MISSING_TITLE);

        assert_eq!(page.matches.len(), 1);
        assert_eq!(page.matches[0].tournament, "Cup");
        assert_eq!(page.matches[0].score, "0 - 2");

        assert_eq!(page.failures.len(), 1);
        assert_eq!(page.failures[0].tournament, None);
        assert_eq!(page.failures[0].match_index, None);
    }

    #[test]
    fn test_lenient_matches_strict_on_well_formed_page() {
        let html =
            fs::read_to_string("fixtures/match_center.html").expect("Failed to read fixture");

        let strict = parse_match_center(&html).expect("Should parse matches");
        let page = parse_match_center_lenient(&html);

        assert_eq!(page.matches, strict);
        assert!(page.failures.is_empty());
    }

    #[test]
    fn test_extraction_failure_display() {
        let failure = ExtractionFailure {
            tournament: Some("Cup".to_string()),
            match_index: Some(0),
            error: ParseError::MissingField("team A".to_string()),
        };
        assert_eq!(
            failure.to_string(),
            "Cup (match #1): Missing required field: team A"
        );
    }
}
