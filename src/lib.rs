//! # FURIA Esports Bot
//!
//! Menu-driven chat assistant answering roster and recent-match questions
//! about FURIA teams, scraped from Liquipedia:
//! - TTL + FIFO bounded cache in front of every page fetch
//! - Rate-limited fetcher with a cached "temporary error" sentinel
//! - Per-game HTML extractors (CS2, Valorant, League of Legends)
//! - Per-user conversation state machine
//! - Multiple interfaces: Rust library, Python bindings, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use furia_esports_bot::{BotConfig, FuriaBot};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let bot = FuriaBot::new(BotConfig::default())?;
//!
//!     let menu = bot.on_user_command("sid-42", "oi").await;
//!     println!("{}", menu.message);
//!
//!     let teams = bot.on_user_command("sid-42", "1").await;
//!     assert!(!teams.is_final);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod conversation;
pub mod core;
pub mod engine;
pub mod error;
pub mod extract;
pub mod providers;

use std::sync::Arc;

// Re-export primary types
pub use cache::{CacheStats, Clock, ManualClock, SystemClock, TtlCache};
pub use config::BotConfig;
pub use conversation::{addressed_command, Conversation, ConversationState, MemoryStateStore, StateStore};
pub use crate::core::{BotResponse, DataKind, Game, GameCatalog};
pub use engine::{DataLookup, EsportsData, TEMPORARY_ERROR};
pub use error::{BotError, Result};

// Python bindings
#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "python")]
pub use python::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fully wired bot: in-memory state store, cached Liquipedia lookups, default catalog
pub struct FuriaBot {
    conversation: Conversation,
    data: Arc<EsportsData>,
    config: BotConfig,
}

impl FuriaBot {
    /// Create the bot on the real Liquipedia client
    pub fn new(config: BotConfig) -> Result<Self> {
        let data = Arc::new(EsportsData::new(&config)?);
        Ok(Self::from_parts(data, Arc::new(MemoryStateStore::new()), GameCatalog::default(), config))
    }

    /// Create the bot from pre-built components
    pub fn from_parts(
        data: Arc<EsportsData>,
        store: Arc<dyn StateStore>,
        catalog: GameCatalog,
        config: BotConfig,
    ) -> Self {
        let conversation = Conversation::new(store, data.clone(), catalog, &config);
        Self {
            conversation,
            data,
            config,
        }
    }

    /// Sole entry point for transports
    pub async fn on_user_command(&self, user_id: &str, text: &str) -> BotResponse {
        self.conversation.on_user_command(user_id, text).await
    }

    /// Command text when a chat message addresses the bot
    pub fn addressed_command<'a>(&self, message: &'a str) -> Option<&'a str> {
        addressed_command(message, &self.config.bot_mention)
    }

    pub fn data(&self) -> &EsportsData {
        &self.data
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.data.cache_stats()
    }
}
