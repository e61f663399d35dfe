pub mod fetcher;
pub mod liquipedia;

use async_trait::async_trait;
use crate::error::Result;

pub use fetcher::Fetcher;
pub use liquipedia::LiquipediaClient;

/// Trait for page sources (Liquipedia over HTTP, canned pages in tests)
#[async_trait]
pub trait PageSource: Send + Sync {
    /// GET `url` and return the HTML body
    async fn get(&self, url: &str) -> Result<String>;

    /// Get source name
    fn name(&self) -> &str;
}
