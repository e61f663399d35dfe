use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::extract::{selector, stripped_text, Extractor};

/// Sentinel when the roster table yields no player
pub const NO_PLAYERS: &str = "Nenhum jogador encontrado";

/// Roster lines kept
pub const MAX_PLAYERS: usize = 10;

static ROSTER_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table.roster-card"));
static PLAYER_ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr.Player"));
static ID_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.ID"));
static POSITION_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.Position"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static BOLD: LazyLock<Selector> = LazyLock::new(|| selector("b"));

/// Roster card extractor, same markup on every game wiki
pub struct RosterExtractor;

impl Extractor for RosterExtractor {
    fn extract(&self, document: &Html) -> Vec<String> {
        let mut players = Vec::new();

        if let Some(table) = document.select(&ROSTER_TABLE).next() {
            for row in table.select(&PLAYER_ROW) {
                let Some(name) = player_name(row) else {
                    continue;
                };
                let position = player_position(row);

                players.push(if position.is_empty() {
                    name
                } else {
                    format!("{} - ({})", name, position)
                });

                if players.len() == MAX_PLAYERS {
                    break;
                }
            }
        }

        if players.is_empty() {
            vec![NO_PLAYERS.to_string()]
        } else {
            players
        }
    }

    fn name(&self) -> &str {
        "roster"
    }
}

/// Linked player's title (minus the red-link suffix), else the bold name
fn player_name(row: ElementRef<'_>) -> Option<String> {
    let id_cell = row.select(&ID_CELL).next()?;

    let name = match id_cell.select(&LINK).next() {
        Some(link) => link
            .value()
            .attr("title")
            .unwrap_or_default()
            .replace(" (page does not exist)", ""),
        None => stripped_text(id_cell.select(&BOLD).next()?),
    };

    (!name.is_empty()).then_some(name)
}

fn player_position(row: ElementRef<'_>) -> String {
    match row.select(&POSITION_CELL).next() {
        Some(cell) => clean_position(&stripped_text(cell)),
        None => String::new(),
    }
}

/// "Role:(Coach)" / "Position:.In-game leader" → "Coach" / "In-game leader"
pub fn clean_position(raw: &str) -> String {
    let last = raw.rsplit('.').next().unwrap_or_default();
    last.replace("Role:", "")
        .replace(['(', ')'], "")
        .trim()
        .replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(rows: &str) -> Vec<String> {
        let html = format!(
            r#"<html><body><table class="wikitable roster-card"><tbody>
               <tr><th>ID</th><th>Position</th></tr>{}</tbody></table></body></html>"#,
            rows
        );
        RosterExtractor.extract(&Html::parse_document(&html))
    }

    #[test]
    fn test_linked_players_with_positions() {
        let lines = roster(
            r#"<tr class="Player"><td class="ID"><a href="/valorant/Mwzera" title="Mwzera">mwzera</a></td>
                   <td class="Position"><i>Role:</i>&nbsp;(Duelist)</td></tr>
               <tr class="Player"><td class="ID"><a href="/valorant/Kheytz" title="Kheytz (page does not exist)">kheytz</a></td>
                   <td class="Position"></td></tr>"#,
        );
        assert_eq!(lines, vec!["Mwzera - (Duelist)".to_string(), "Kheytz".to_string()]);
    }

    #[test]
    fn test_bold_name_fallback() {
        let lines = roster(
            r#"<tr class="Player"><td class="ID"><b> guerri </b></td><td class="Position">Role: Coach</td></tr>"#,
        );
        assert_eq!(lines, vec!["guerri - (Coach)".to_string()]);
    }

    #[test]
    fn test_skips_rows_without_name() {
        let lines = roster(
            r#"<tr class="Player"><td class="ID"><span>?</span></td></tr>
               <tr class="Player"><td class="ID"><a href="/x">no title</a></td></tr>
               <tr class="Player"><td class="Name">orphan</td></tr>"#,
        );
        assert_eq!(lines, vec![NO_PLAYERS.to_string()]);
    }

    #[test]
    fn test_caps_at_ten_players() {
        let rows: String = (0..14)
            .map(|i| format!(r#"<tr class="Player"><td class="ID"><b>p{}</b></td></tr>"#, i))
            .collect();
        let lines = roster(&rows);
        assert_eq!(lines.len(), MAX_PLAYERS);
        assert_eq!(lines[9], "p9");
    }

    #[test]
    fn test_missing_table_gives_sentinel() {
        let lines = RosterExtractor.extract(&Html::parse_document("<p>no roster</p>"));
        assert_eq!(lines, vec![NO_PLAYERS.to_string()]);
    }

    #[test]
    fn test_clean_position() {
        assert_eq!(clean_position("Role:(Coach)"), "Coach");
        assert_eq!(clean_position("Position:.In-game leader"), "In-game leader");
        assert_eq!(clean_position("Top&nbsp;Laner"), "Top Laner");
        assert_eq!(clean_position(""), "");
    }
}
