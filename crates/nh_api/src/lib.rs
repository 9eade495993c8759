use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use nh_core::{Article, ArticleService, ChatPrompt, Error, Result, SyncReport};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the NewsHub backend.
///
/// A bare pass-through: no retry, no caching, no local queueing. Transport
/// failures, unexpected statuses and undecodable bodies surface as distinct
/// error variants so callers can tell them apart.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ArticlesEnvelope {
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

#[derive(Deserialize)]
struct HealthReply {
    status: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                parsed.scheme(),
                base_url
            )));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List the feed, optionally narrowed to a category and capped at `limit`.
    pub async fn list_articles_filtered(
        &self,
        category: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Article>> {
        let mut request = self.client.get(self.endpoint("/api/articles"));
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        debug!("GET /api/articles");
        let response = request.send().await?;
        let envelope: ArticlesEnvelope = decode(check_status(response)?).await?;
        Ok(envelope.articles)
    }

    /// `GET /api/health`; returns the reported status string.
    pub async fn health(&self) -> Result<String> {
        debug!("GET /api/health");
        let response = self.client.get(self.endpoint("/api/health")).send().await?;
        let reply: HealthReply = decode(check_status(response)?).await?;
        Ok(reply.status)
    }

    /// Ask the backend to fetch, curate and store `count` fresh articles.
    pub async fn sync(&self, count: u32) -> Result<SyncReport> {
        debug!("POST /api/sync?count={}", count);
        let response = self
            .client
            .post(self.endpoint("/api/sync"))
            .query(&[("count", count.to_string())])
            .send()
            .await?;
        decode(check_status(response)?).await
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::UnexpectedStatus(status.as_u16()))
    }
}

/// Decode via the body text so an undecodable payload maps to
/// `Error::Malformed` instead of disappearing into a reqwest error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl ArticleService for ApiClient {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        self.list_articles_filtered(None, None).await
    }

    async fn article(&self, id: &str) -> Result<Article> {
        debug!("GET /api/articles/{}", id);
        let response = self
            .client
            .get(self.endpoint(&format!("/api/articles/{}", id)))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(id.to_string()));
        }
        decode(check_status(response)?).await
    }

    async fn send_chat(&self, prompt: &ChatPrompt) -> Result<String> {
        debug!(
            "POST /api/chat ({} history entries, {} byte message)",
            prompt.history.len(),
            prompt.message.len()
        );
        let response = self
            .client
            .post(self.endpoint("/api/chat"))
            .json(prompt)
            .send()
            .await?;
        let reply: ChatReply = decode(check_status(response)?).await?;
        Ok(reply.reply)
    }
}

pub mod prelude {
    pub use super::ApiClient;
    pub use nh_core::{Article, ArticleService, Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_the_base_url() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.endpoint("/api/articles"), "http://localhost:8000/api/articles");
    }

    #[test]
    fn garbage_base_url_is_rejected() {
        assert!(matches!(ApiClient::new("not a url"), Err(Error::InvalidUrl(_))));
        assert!(matches!(ApiClient::new("ftp://host"), Err(Error::InvalidUrl(_))));
    }
}
