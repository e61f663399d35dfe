use serde::{Deserialize, Serialize};
use std::fmt;

/// Games the bot knows how to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    #[serde(rename = "counterstrike")]
    CounterStrike,
    Valorant,
    #[serde(rename = "leagueoflegends")]
    LeagueOfLegends,
}

impl Game {
    /// Menu order (option 1, 2, 3)
    pub const ALL: [Game; 3] = [Game::CounterStrike, Game::Valorant, Game::LeagueOfLegends];

    /// Liquipedia wiki code, also the first URL path segment
    pub fn code(self) -> &'static str {
        match self {
            Game::CounterStrike => "counterstrike",
            Game::Valorant => "valorant",
            Game::LeagueOfLegends => "leagueoflegends",
        }
    }

    pub fn from_code(code: &str) -> Option<Game> {
        Game::ALL.into_iter().find(|g| g.code() == code)
    }

    /// Short name used in titles ("Jogadores FURIA (CS2)")
    pub fn display_name(self) -> &'static str {
        match self {
            Game::CounterStrike => "CS2",
            Game::Valorant => "Valorant",
            Game::LeagueOfLegends => "LoL",
        }
    }

    /// Label shown in the game menu
    pub fn menu_label(self) -> &'static str {
        match self {
            Game::CounterStrike => "CS2",
            Game::Valorant => "Valorant",
            Game::LeagueOfLegends => "League of Legends",
        }
    }

    /// Page suffix that lists a team's matches
    pub fn matches_path(self) -> &'static str {
        match self {
            Game::LeagueOfLegends => "Played_Matches",
            _ => "Matches",
        }
    }

    /// Column layout of the first `wikitable` on the matches page
    pub fn match_layout(self) -> MatchLayout {
        match self {
            // Known fragility: the column-count guard (5) does not cover the
            // columns actually read (up to 8). Short rows get skipped.
            Game::CounterStrike => MatchLayout {
                rows: 5,
                min_columns: 5,
                date: 0,
                event: 5,
                home: Some(6),
                opponent: 8,
                opponent_fallback: Some("TBD"),
                opponent_max_chars: None,
                result: ResultRule::Score { column: 7 },
                event_first: false,
                empty_sentinel: "Nenhuma partida de CS2 encontrada",
                missing_table_sentinel: None,
            },
            Game::Valorant => MatchLayout {
                rows: 5,
                min_columns: 4,
                date: 0,
                event: 4,
                home: None,
                opponent: 6,
                opponent_fallback: Some("TBD"),
                opponent_max_chars: None,
                result: ResultRule::Score { column: 5 },
                event_first: false,
                empty_sentinel: "Nenhuma partida de Valorant encontrada",
                missing_table_sentinel: None,
            },
            Game::LeagueOfLegends => MatchLayout {
                rows: 9,
                min_columns: 5,
                date: 0,
                event: 3,
                home: None,
                opponent: 4,
                opponent_fallback: None,
                opponent_max_chars: Some(30),
                result: ResultRule::RowClass {
                    win: "recent-matches-bg-win",
                    lose: "recent-matches-bg-lose",
                },
                event_first: true,
                empty_sentinel: "Nenhuma partida válida encontrada",
                missing_table_sentinel: Some("Nenhuma tabela de partidas encontrada"),
            },
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where a match row's outcome comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultRule {
    /// `x:y` score cell, annotated by comparing both sides
    Score { column: usize },
    /// Tri-state read off the row's CSS classes
    RowClass { win: &'static str, lose: &'static str },
}

/// Per-game column mapping for the matches table (0-indexed `td` cells)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLayout {
    /// Data rows scanned after the header row
    pub rows: usize,
    /// Rows with fewer cells are ignored outright
    pub min_columns: usize,
    pub date: usize,
    pub event: usize,
    /// Home team column; `None` means the organization itself
    pub home: Option<usize>,
    pub opponent: usize,
    /// Used when the opponent column is absent; `None` makes it mandatory
    pub opponent_fallback: Option<&'static str>,
    pub opponent_max_chars: Option<usize>,
    pub result: ResultRule,
    /// `event - matchup` instead of `matchup - event`
    pub event_first: bool,
    pub empty_sentinel: &'static str,
    /// Sentinel when the page has no `wikitable` at all (defaults to `empty_sentinel`)
    pub missing_table_sentinel: Option<&'static str>,
}

/// The two queryable categories per team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Players,
    Matches,
}

impl DataKind {
    /// Sub-menu choice: 1 → players, 2 → matches
    pub fn from_choice(choice: i64) -> Option<DataKind> {
        match choice {
            1 => Some(DataKind::Players),
            2 => Some(DataKind::Matches),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataKind::Players => "players",
            DataKind::Matches => "matches",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "players" => Ok(DataKind::Players),
            "matches" => Ok(DataKind::Matches),
            other => Err(format!("unknown data kind '{}'", other)),
        }
    }
}

/// Static game → team list table, fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCatalog {
    entries: Vec<(Game, Vec<String>)>,
}

impl GameCatalog {
    /// Build a catalog; games keep menu order regardless of input order
    pub fn new(entries: impl IntoIterator<Item = (Game, Vec<String>)>) -> Self {
        let mut entries: Vec<(Game, Vec<String>)> = entries.into_iter().collect();
        entries.sort_by_key(|(game, _)| Game::ALL.iter().position(|g| g == game));
        entries.dedup_by_key(|(game, _)| *game);
        Self { entries }
    }

    pub fn games(&self) -> impl Iterator<Item = Game> + '_ {
        self.entries.iter().map(|(game, _)| *game)
    }

    /// Game for a 1-based menu choice
    pub fn game_at(&self, choice: i64) -> Option<Game> {
        let idx = usize::try_from(choice.checked_sub(1)?).ok()?;
        self.entries.get(idx).map(|(game, _)| *game)
    }

    pub fn teams(&self, game: Game) -> &[String] {
        self.entries
            .iter()
            .find(|(g, _)| *g == game)
            .map(|(_, teams)| teams.as_slice())
            .unwrap_or(&[])
    }

    /// Organization's main roster for a game (first listed team)
    pub fn main_team(&self, game: Game) -> Option<&str> {
        self.teams(game).first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GameCatalog {
    fn default() -> Self {
        let teams = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        Self::new([
            (Game::CounterStrike, teams(&["FURIA", "FURIA Academy", "FURIA Female"])),
            (Game::Valorant, teams(&["FURIA", "FURIA Academy", "FURIA Female"])),
            (Game::LeagueOfLegends, teams(&["FURIA", "FURIA Youth"])),
        ])
    }
}

/// Team display name → URL slug ("FURIA Academy" → "FURIA_Academy")
pub fn team_slug(team: &str) -> String {
    team.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_codes_round_trip() {
        for game in Game::ALL {
            assert_eq!(Game::from_code(game.code()), Some(game));
        }
        assert_eq!(Game::from_code("dota2"), None);
    }

    #[test]
    fn test_matches_path() {
        assert_eq!(Game::LeagueOfLegends.matches_path(), "Played_Matches");
        assert_eq!(Game::CounterStrike.matches_path(), "Matches");
        assert_eq!(Game::Valorant.matches_path(), "Matches");
    }

    #[test]
    fn test_default_catalog() {
        let catalog = GameCatalog::default();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.game_at(2), Some(Game::Valorant));
        assert_eq!(catalog.game_at(0), None);
        assert_eq!(catalog.game_at(4), None);
        assert_eq!(catalog.game_at(-1), None);
        assert_eq!(catalog.teams(Game::LeagueOfLegends), &["FURIA", "FURIA Youth"]);
        assert_eq!(catalog.main_team(Game::Valorant), Some("FURIA"));
    }

    #[test]
    fn test_catalog_keeps_menu_order() {
        let catalog = GameCatalog::new([
            (Game::LeagueOfLegends, vec!["A".to_string()]),
            (Game::CounterStrike, vec!["B".to_string()]),
        ]);
        let games: Vec<Game> = catalog.games().collect();
        assert_eq!(games, vec![Game::CounterStrike, Game::LeagueOfLegends]);
        assert!(catalog.teams(Game::Valorant).is_empty());
    }

    #[test]
    fn test_data_kind_choice() {
        assert_eq!(DataKind::from_choice(1), Some(DataKind::Players));
        assert_eq!(DataKind::from_choice(2), Some(DataKind::Matches));
        assert_eq!(DataKind::from_choice(3), None);
        assert_eq!("Matches".parse::<DataKind>(), Ok(DataKind::Matches));
    }

    #[test]
    fn test_team_slug() {
        assert_eq!(team_slug("FURIA Academy"), "FURIA_Academy");
        assert_eq!(team_slug("FURIA"), "FURIA");
    }
}
