use std::sync::Arc;
use std::time::Duration;

use crate::config::BotConfig;
use crate::core::{team_slug, DataKind, Game};
use crate::error::Result;
use crate::providers::PageSource;

/// Builds Liquipedia URLs and performs one rate-limited GET per call
pub struct Fetcher {
    source: Arc<dyn PageSource>,
    base_url: String,
    delay: Duration,
}

impl Fetcher {
    pub fn new(source: Arc<dyn PageSource>, config: &BotConfig) -> Self {
        Self {
            source,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            delay: Duration::from_secs(config.rate_limit_delay_secs),
        }
    }

    /// `<root>/<game>/<slug>` plus the matches page suffix when asked for matches
    pub fn page_url(&self, game: Game, team: &str, kind: DataKind) -> String {
        let slug = urlencoding::encode(&team_slug(team)).into_owned();
        let base = format!("{}/{}/{}", self.base_url, game.code(), slug);
        match kind {
            DataKind::Players => base,
            DataKind::Matches => format!("{}/{}", base, game.matches_path()),
        }
    }

    /// Wait out the rate-limit delay, then fetch the page
    pub async fn fetch(&self, game: Game, team: &str, kind: DataKind) -> Result<String> {
        let url = self.page_url(game, team, kind);

        tokio::time::sleep(self.delay).await;

        tracing::info!(%game, team, %kind, source = self.source.name(), "🌐 GET {}", url);
        match self.source.get(&url).await {
            Ok(body) => Ok(body),
            Err(e) => {
                tracing::warn!(%game, team, %kind, "Fetch failed: {}", e);
                Err(e)
            }
        }
    }
}
