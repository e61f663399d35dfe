use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::core::Game;
use crate::error::Result;

/// Where a user is in the menu flow.
///
/// No stored state means the next message opens the game menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationState {
    /// Game menu shown, waiting for a game number (the game-selection step)
    Menu,
    /// Game chosen, waiting for a team number
    GameSelected { game: Game, teams: Vec<String> },
    /// Team chosen, waiting for players (1) or matches (2)
    TeamSelected { game: Game, team: String },
}

impl ConversationState {
    pub fn game(&self) -> Option<Game> {
        match self {
            ConversationState::Menu => None,
            ConversationState::GameSelected { game, .. } | ConversationState::TeamSelected { game, .. } => Some(*game),
        }
    }

    pub fn team(&self) -> Option<&str> {
        match self {
            ConversationState::TeamSelected { team, .. } => Some(team),
            _ => None,
        }
    }
}

/// Trait for per-user dialogue state storage
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<ConversationState>>;

    async fn put(&self, user_id: &str, state: ConversationState) -> Result<()>;

    /// Removing an absent user is not an error
    async fn remove(&self, user_id: &str) -> Result<()>;
}

/// Process-lifetime in-memory store
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    states: RwLock<HashMap<String, ConversationState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users mid-conversation
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, user_id: &str) -> Result<Option<ConversationState>> {
        Ok(self.states.read().await.get(user_id).cloned())
    }

    async fn put(&self, user_id: &str, state: ConversationState) -> Result<()> {
        self.states.write().await.insert(user_id.to_string(), state);
        Ok(())
    }

    async fn remove(&self, user_id: &str) -> Result<()> {
        self.states.write().await.remove(user_id);
        Ok(())
    }
}
