use async_trait::async_trait;

use crate::types::{Article, ChatPrompt};
use crate::Result;

/// Seam between the views and the backend. Implemented over HTTP by
/// `nh_api`; tests substitute their own.
#[async_trait]
pub trait ArticleService: Send + Sync {
    /// Fetch the feed, newest first, in server order
    async fn list_articles(&self) -> Result<Vec<Article>>;

    /// Fetch one article with its full detail fields
    async fn article(&self, id: &str) -> Result<Article>;

    /// Ask the assistant about an article; returns the reply text
    async fn send_chat(&self, prompt: &ChatPrompt) -> Result<String>;
}
