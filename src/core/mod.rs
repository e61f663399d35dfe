pub mod game;
pub mod response;

pub use game::{team_slug, DataKind, Game, GameCatalog, MatchLayout, ResultRule};
pub use response::BotResponse;
