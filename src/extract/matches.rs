use scraper::{ElementRef, Html, Selector};
use std::cmp::Ordering;
use std::sync::LazyLock;

use crate::core::{Game, MatchLayout, ResultRule};
use crate::extract::{selector, stripped_text, Extractor};

static WIKITABLE: LazyLock<Selector> = LazyLock::new(|| selector("table.wikitable"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));

/// Outcome of a match from the organization's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
    Draw,
    Unknown,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Victory => "✅ Vitória",
            Outcome::Defeat => "❌ Derrota",
            Outcome::Draw => "⚡ Empate",
            Outcome::Unknown => "🔶 Sem resultado",
        }
    }

    /// Compare both sides of an `x:y` score; `None` when it is not one
    pub fn from_score(score: &str) -> Option<Outcome> {
        let (x, y) = score.split_once(':')?;
        if y.contains(':') {
            return None;
        }
        let x: i64 = x.trim().parse().ok()?;
        let y: i64 = y.trim().parse().ok()?;

        Some(match x.cmp(&y) {
            Ordering::Greater => Outcome::Victory,
            Ordering::Less => Outcome::Defeat,
            Ordering::Equal => Outcome::Draw,
        })
    }
}

/// Annotate a score cell: `"16:10"` → `"16:10 | ✅ Vitória"`.
///
/// Anything that is not two integers around a `:` comes back unchanged.
pub fn parse_match_result(score: &str) -> String {
    match Outcome::from_score(score) {
        Some(outcome) => format!("{} | {}", score, outcome.label()),
        None => score.to_string(),
    }
}

/// First `wikitable` on a team's matches page, read with the game's layout
pub struct MatchExtractor {
    game: Game,
    layout: MatchLayout,
    organization: String,
}

impl MatchExtractor {
    pub fn new(game: Game, organization: impl Into<String>) -> Self {
        Self {
            game,
            layout: game.match_layout(),
            organization: organization.into(),
        }
    }

    /// One display line, or `None` when the row is missing a needed cell
    fn format_row(&self, row: ElementRef<'_>) -> Option<String> {
        let layout = &self.layout;
        let cols: Vec<String> = row.select(&CELL).map(stripped_text).collect();
        if cols.len() < layout.min_columns {
            return None;
        }

        let date = cols.get(layout.date)?;
        let event = cols.get(layout.event)?;
        let home = match layout.home {
            Some(idx) => cols.get(idx)?.as_str(),
            None => self.organization.as_str(),
        };
        let opponent = match (cols.get(layout.opponent), layout.opponent_fallback) {
            (Some(name), _) => name.as_str(),
            (None, Some(fallback)) => fallback,
            (None, None) => return None,
        };
        let opponent: String = match layout.opponent_max_chars {
            Some(max) => opponent.chars().take(max).collect(),
            None => opponent.to_string(),
        };

        let result = match layout.result {
            ResultRule::Score { column } => parse_match_result(cols.get(column)?),
            ResultRule::RowClass { win, lose } => row_outcome(row, win, lose).label().to_string(),
        };

        let matchup = format!("{} vs {}", home, opponent);
        Some(if layout.event_first {
            format!("{} | {} - {} | {}", date, event, matchup, result)
        } else {
            format!("{} | {} - {} | {}", date, matchup, event, result)
        })
    }
}

fn row_outcome(row: ElementRef<'_>, win: &str, lose: &str) -> Outcome {
    let has_class = |class: &str| row.value().classes().any(|c| c == class);
    if has_class(win) {
        Outcome::Victory
    } else if has_class(lose) {
        Outcome::Defeat
    } else {
        Outcome::Unknown
    }
}

impl Extractor for MatchExtractor {
    fn extract(&self, document: &Html) -> Vec<String> {
        let layout = &self.layout;

        let Some(table) = document.select(&WIKITABLE).next() else {
            let sentinel = layout.missing_table_sentinel.unwrap_or(layout.empty_sentinel);
            return vec![sentinel.to_string()];
        };

        let matches: Vec<String> = table
            .select(&ROW)
            .skip(1)
            .take(layout.rows)
            .enumerate()
            .filter_map(|(idx, row)| {
                let line = self.format_row(row);
                if line.is_none() {
                    tracing::debug!(game = %self.game, row = idx + 1, "skipping match row");
                }
                line
            })
            .collect();

        if matches.is_empty() {
            vec![layout.empty_sentinel.to_string()]
        } else {
            matches
        }
    }

    fn name(&self) -> &str {
        self.game.code()
    }
}
