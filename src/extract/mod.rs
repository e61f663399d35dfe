//! HTML → display lines for the two record kinds.
//!
//! Every extractor returns at least one line: when nothing usable is found a
//! fixed sentinel line takes the place of the records.

pub mod matches;
pub mod roster;

use scraper::{ElementRef, Html, Selector};

use crate::core::{DataKind, Game};

pub use matches::{parse_match_result, MatchExtractor, Outcome};
pub use roster::RosterExtractor;

/// Sentinel for a game code the bot has no match parser for
pub const PARSER_NOT_IMPLEMENTED: &str = "Parser não implementado para este jogo";

/// Trait for per-record-kind extractors
pub trait Extractor: Send + Sync {
    /// Ordered display lines, never empty
    fn extract(&self, document: &Html) -> Vec<String>;

    /// Get extractor name for logging
    fn name(&self) -> &str;
}

/// Extractor for `kind` pages of `game`
pub fn extractor_for(game: Game, kind: DataKind, organization: &str) -> Box<dyn Extractor> {
    match kind {
        DataKind::Players => Box::new(RosterExtractor),
        DataKind::Matches => Box::new(MatchExtractor::new(game, organization)),
    }
}

/// Parse `html` and run the matching extractor
pub fn extract_page(game: Game, kind: DataKind, html: &str, organization: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let extractor = extractor_for(game, kind, organization);
    let lines = extractor.extract(&document);
    tracing::debug!(%game, %kind, extractor = extractor.name(), "extracted {} lines", lines.len());
    lines
}

/// Match extraction routed by raw game code
pub fn extract_matches_by_code(code: &str, html: &str, organization: &str) -> Vec<String> {
    match Game::from_code(code) {
        Some(game) => extract_page(game, DataKind::Matches, html, organization),
        None => {
            tracing::warn!(code, "no match parser for game");
            vec![PARSER_NOT_IMPLEMENTED.to_string()]
        }
    }
}

/// Compile a selector literal
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector must parse")
}

/// Text of an element with every fragment trimmed and concatenated
pub(crate) fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}
