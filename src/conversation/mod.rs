//! Per-user menu dialogue: game → team → data kind → answer.
//!
//! Every turn either re-prompts with the user's state untouched, or ends the
//! conversation (`is_final`) with the state removed. `0` / `sair` cancel from
//! any step.

pub mod messages;
pub mod state;

use std::sync::Arc;

use crate::config::BotConfig;
use crate::core::{BotResponse, DataKind, Game, GameCatalog};
use crate::engine::DataLookup;
use crate::error::{BotError, Result};

pub use state::{ConversationState, MemoryStateStore, StateStore};

/// Words that end the conversation at any step (compared case-insensitively)
pub const CANCEL_WORDS: [&str; 2] = ["0", "sair"];

/// Command text when `message` addresses the bot, `None` otherwise
pub fn addressed_command<'a>(message: &'a str, mention: &str) -> Option<&'a str> {
    message.strip_prefix(mention).map(str::trim)
}

fn is_cancel(command: &str) -> bool {
    CANCEL_WORDS.iter().any(|word| command.eq_ignore_ascii_case(word))
}

fn parse_choice(command: &str) -> Option<i64> {
    command.parse().ok()
}

/// Menu-driven dialogue engine
pub struct Conversation {
    store: Arc<dyn StateStore>,
    data: Arc<dyn DataLookup>,
    catalog: GameCatalog,
    team_selection: bool,
    mention: String,
}

impl Conversation {
    pub fn new(
        store: Arc<dyn StateStore>,
        data: Arc<dyn DataLookup>,
        catalog: GameCatalog,
        config: &BotConfig,
    ) -> Self {
        Self {
            store,
            data,
            catalog,
            team_selection: config.team_selection_enabled,
            mention: config.bot_mention.clone(),
        }
    }

    pub fn catalog(&self) -> &GameCatalog {
        &self.catalog
    }

    /// Handle one command from `user_id` (mention already stripped)
    pub async fn on_user_command(&self, user_id: &str, text: &str) -> BotResponse {
        match self.handle(user_id, text.trim()).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(user_id, "❌ Error handling command: {}", e);
                if let Err(e) = self.store.remove(user_id).await {
                    tracing::error!(user_id, "Failed to clear state: {}", e);
                }
                BotResponse::last(messages::PROCESSING_ERROR)
            }
        }
    }

    async fn handle(&self, user_id: &str, command: &str) -> Result<BotResponse> {
        if is_cancel(command) {
            self.store.remove(user_id).await?;
            tracing::info!(user_id, "conversation cancelled");
            return Ok(BotResponse::last(messages::CANCELLED));
        }

        match self.store.get(user_id).await? {
            None => {
                self.store.put(user_id, ConversationState::Menu).await?;
                tracing::info!(user_id, "conversation started");
                Ok(BotResponse::prompt(messages::game_menu(&self.catalog)))
            }
            Some(ConversationState::Menu) => self.choose_game(user_id, command).await,
            Some(ConversationState::GameSelected { game, teams }) => {
                self.choose_team(user_id, game, &teams, command).await
            }
            Some(ConversationState::TeamSelected { game, team }) => {
                self.choose_data(user_id, game, &team, command).await
            }
        }
    }

    async fn choose_game(&self, user_id: &str, command: &str) -> Result<BotResponse> {
        let Some(choice) = parse_choice(command) else {
            return Ok(BotResponse::prompt(messages::NOT_A_NUMBER));
        };
        let Some(game) = self.catalog.game_at(choice) else {
            return Ok(BotResponse::prompt(messages::invalid_game(&self.catalog)));
        };

        if !self.team_selection {
            let team = self
                .catalog
                .main_team(game)
                .ok_or_else(|| BotError::Other(format!("No teams listed for {}", game)))?
                .to_string();
            let menu = messages::data_menu(game, &team);
            self.store
                .put(user_id, ConversationState::TeamSelected { game, team })
                .await?;
            tracing::info!(user_id, %game, "game selected, team fixed");
            return Ok(BotResponse::prompt(menu));
        }

        let teams = self.catalog.teams(game).to_vec();
        let menu = messages::team_menu(game, &teams);
        self.store
            .put(user_id, ConversationState::GameSelected { game, teams })
            .await?;
        tracing::info!(user_id, %game, "game selected");
        Ok(BotResponse::prompt(menu))
    }

    async fn choose_team(&self, user_id: &str, game: Game, teams: &[String], command: &str) -> Result<BotResponse> {
        let Some(choice) = parse_choice(command) else {
            return Ok(BotResponse::prompt(messages::NOT_A_NUMBER));
        };
        let team = usize::try_from(choice)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| teams.get(idx));
        let Some(team) = team else {
            return Ok(BotResponse::prompt(messages::INVALID_TEAM));
        };

        let menu = messages::data_menu(game, team);
        self.store
            .put(
                user_id,
                ConversationState::TeamSelected {
                    game,
                    team: team.clone(),
                },
            )
            .await?;
        tracing::info!(user_id, %game, team = team.as_str(), "team selected");
        Ok(BotResponse::prompt(menu))
    }

    async fn choose_data(&self, user_id: &str, game: Game, team: &str, command: &str) -> Result<BotResponse> {
        let Some(choice) = parse_choice(command) else {
            return Ok(BotResponse::prompt(messages::NOT_A_NUMBER));
        };
        let Some(kind) = DataKind::from_choice(choice) else {
            return Ok(BotResponse::prompt(messages::invalid_data_kind()));
        };

        let lines = self.data.lookup(game, team, kind).await?;
        let answer = messages::answer(game, team, kind, &lines, &self.mention);

        self.store.remove(user_id).await?;
        tracing::info!(user_id, %game, team, %kind, "answered with {} lines", lines.len());
        Ok(BotResponse::last(answer))
    }
}
