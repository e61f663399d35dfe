use async_trait::async_trait;
use std::sync::Arc;

use crate::cache::{CacheStats, Clock, SystemClock, TtlCache};
use crate::config::BotConfig;
use crate::core::{DataKind, Game};
use crate::error::Result;
use crate::extract::extract_page;
use crate::providers::{Fetcher, LiquipediaClient, PageSource};

/// Sentinel returned (and cached) when the page could not be fetched
pub const TEMPORARY_ERROR: &str = "Erro temporário. Por favor, tente novamente mais tarde.";

/// Cache key: one entry per (game, team, data kind)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub game: Game,
    pub team: String,
    pub kind: DataKind,
}

/// What the conversation engine calls at its terminal step
#[async_trait]
pub trait DataLookup: Send + Sync {
    /// Display lines for a team, never empty
    async fn lookup(&self, game: Game, team: &str, kind: DataKind) -> Result<Vec<String>>;
}

/// Cached Liquipedia lookups: TTL cache → fetcher → extractor
pub struct EsportsData {
    cache: TtlCache<LookupKey, Vec<String>>,
    fetcher: Fetcher,
    organization: String,
}

impl EsportsData {
    /// Create the service on top of the real Liquipedia client
    pub fn new(config: &BotConfig) -> Result<Self> {
        let source = Arc::new(LiquipediaClient::new(config)?);
        Ok(Self::with_source(source, config, Arc::new(SystemClock)))
    }

    /// Create the service with an injected page source and clock
    pub fn with_source(source: Arc<dyn PageSource>, config: &BotConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache: TtlCache::with_clock(config.cache_maxsize, config.cache_ttl(), clock),
            fetcher: Fetcher::new(source, config),
            organization: config.organization.clone(),
        }
    }

    /// Display lines for `(game, team, kind)`, served from cache while fresh.
    ///
    /// Fetch failures come back as a one-line [`TEMPORARY_ERROR`] sequence,
    /// which is cached like any other answer until it expires.
    pub async fn get_esports_data(&self, game: Game, team: &str, kind: DataKind) -> Vec<String> {
        let key = LookupKey {
            game,
            team: team.to_string(),
            kind,
        };

        self.cache
            .get_or_compute(key, || self.fetch_and_extract(game, team, kind))
            .await
    }

    async fn fetch_and_extract(&self, game: Game, team: &str, kind: DataKind) -> Vec<String> {
        match self.fetcher.fetch(game, team, kind).await {
            Ok(html) => extract_page(game, kind, &html, &self.organization),
            Err(_) => vec![TEMPORARY_ERROR.to_string()],
        }
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop expired cache entries
    pub fn purge_expired(&self) -> usize {
        self.cache.purge_expired()
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }
}

#[async_trait]
impl DataLookup for EsportsData {
    async fn lookup(&self, game: Game, team: &str, kind: DataKind) -> Result<Vec<String>> {
        Ok(self.get_esports_data(game, team, kind).await)
    }
}
