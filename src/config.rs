//! Bot configuration with defaults tuned for Liquipedia.
//!
//! Values come from, in order of precedence:
//! - `FURIA_*` environment variables ([`BotConfig::from_env`])
//! - a JSON document ([`BotConfig::from_json`]), missing keys falling back to defaults
//! - [`BotConfig::default`]

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Result;

/// Runtime configuration of the fetch pipeline and the dialogue.
///
/// # Examples
///
/// ```
/// use furia_esports_bot::BotConfig;
///
/// let config = BotConfig::from_json(r#"{"cache_ttl_secs": 60}"#).unwrap();
/// assert_eq!(config.cache_ttl_secs, 60);
/// assert_eq!(config.cache_maxsize, 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Site root, no trailing slash needed
    pub base_url: String,

    /// Identifying User-Agent sent with every request
    pub user_agent: String,

    pub accept_language: String,

    pub request_timeout_secs: u64,

    /// Sleep before every outbound request (paid once per cache miss)
    pub rate_limit_delay_secs: u64,

    pub cache_maxsize: usize,

    pub cache_ttl_secs: u64,

    /// When off, the team step is skipped and the main roster is used
    pub team_selection_enabled: bool,

    /// Chat prefix that addresses the bot
    pub bot_mention: String,

    /// Name used as the home side when the table has no home column
    pub organization: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            base_url: "https://liquipedia.net".to_string(),
            user_agent: "FURIA Esports Bot/1.0".to_string(),
            accept_language: "pt-BR".to_string(),
            request_timeout_secs: 10,
            rate_limit_delay_secs: 2,
            cache_maxsize: 32,
            cache_ttl_secs: 300,
            team_selection_enabled: true,
            bot_mention: "@FuriaBot".to_string(),
            organization: "FURIA".to_string(),
        }
    }
}

impl BotConfig {
    /// Load from JSON; absent keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overlaid with `FURIA_*` environment variables
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from a lookup function; unparsable values are ignored
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(value: Option<String>, fallback: T) -> T {
            value.and_then(|v| v.trim().parse().ok()).unwrap_or(fallback)
        }

        if let Some(v) = lookup("FURIA_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("FURIA_USER_AGENT") {
            self.user_agent = v;
        }
        if let Some(v) = lookup("FURIA_ACCEPT_LANGUAGE") {
            self.accept_language = v;
        }
        if let Some(v) = lookup("FURIA_BOT_MENTION") {
            self.bot_mention = v;
        }
        if let Some(v) = lookup("FURIA_ORGANIZATION") {
            self.organization = v;
        }
        self.request_timeout_secs = parsed(lookup("FURIA_REQUEST_TIMEOUT_SECS"), self.request_timeout_secs);
        self.rate_limit_delay_secs = parsed(lookup("FURIA_RATE_LIMIT_DELAY_SECS"), self.rate_limit_delay_secs);
        self.cache_maxsize = parsed(lookup("FURIA_CACHE_MAXSIZE"), self.cache_maxsize);
        self.cache_ttl_secs = parsed(lookup("FURIA_CACHE_TTL_SECS"), self.cache_ttl_secs);
        self.team_selection_enabled = parsed(lookup("FURIA_TEAM_SELECTION"), self.team_selection_enabled);
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.base_url, "https://liquipedia.net");
        assert_eq!(config.accept_language, "pt-BR");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.rate_limit_delay_secs, 2);
        assert_eq!(config.cache_maxsize, 32);
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert!(config.team_selection_enabled);
    }

    #[test]
    fn test_partial_json() {
        let config = BotConfig::from_json(r#"{"team_selection_enabled": false, "organization": "Furia"}"#).unwrap();
        assert!(!config.team_selection_enabled);
        assert_eq!(config.organization, "Furia");
        assert_eq!(config.bot_mention, "@FuriaBot");
    }

    #[test]
    fn test_invalid_json() {
        assert!(BotConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_overlay() {
        let mut env = HashMap::new();
        env.insert("FURIA_CACHE_MAXSIZE", "8".to_string());
        env.insert("FURIA_CACHE_TTL_SECS", "not-a-number".to_string());
        env.insert("FURIA_TEAM_SELECTION", "false".to_string());
        env.insert("FURIA_BOT_MENTION", "@Bot".to_string());

        let config = BotConfig::default().overlay(|k| env.get(k).cloned());
        assert_eq!(config.cache_maxsize, 8);
        assert_eq!(config.cache_ttl_secs, 300); // unparsable → default
        assert!(!config.team_selection_enabled);
        assert_eq!(config.bot_mention, "@Bot");
    }
}
