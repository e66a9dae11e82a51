//! Thin gateway over the remote news and favorites HTTP services.
//!
//! Four read operations (headlines, search, category browse, favorites
//! list) and two write operations (add/remove favorite), each returning
//! normalized results or a typed [`GatewayError`]. Category browse reuses
//! the search endpoint with the category name as the query, matching the
//! backend's contract. A `204 No Content` favorites list is a successful
//! empty result, never an error.

use crate::model::Article;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors produced by calls to the remote services.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure (DNS, connection, TLS).
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the configured deadline.
    #[error("Request timed out")]
    Timeout,
    /// Non-2xx response carrying a server-provided message.
    #[error("{0}")]
    Remote(String),
    /// Non-2xx response without a usable message body.
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Success response whose body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

pub struct NewsGateway {
    client: reqwest::Client,
    /// Base URL without a trailing slash.
    base: String,
    country: String,
    sort_by: String,
    timeout: Duration,
}

impl NewsGateway {
    pub fn new(
        client: reqwest::Client,
        base_url: Url,
        country: impl Into<String>,
        sort_by: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base: base_url.as_str().trim_end_matches('/').to_string(),
            country: country.into(),
            sort_by: sort_by.into(),
            timeout,
        }
    }

    /// Top headlines for the configured country.
    pub async fn headlines(&self, page: u32, page_size: u32) -> Result<Vec<Article>, GatewayError> {
        let request = self
            .client
            .get(format!("{}/api/news/top-headlines", self.base))
            .query(&[
                ("country", self.country.clone()),
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
            ]);
        let response = self.send_with_deadline(request).await?;
        Self::decode_articles(response).await
    }

    /// Free-text search, sorted by the configured order.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Article>, GatewayError> {
        let request = self
            .client
            .get(format!("{}/api/news/search", self.base))
            .query(&[
                ("query", query.to_string()),
                ("sortBy", self.sort_by.clone()),
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
            ]);
        let response = self.send_with_deadline(request).await?;
        Self::decode_articles(response).await
    }

    /// Category browse. The backend has no dedicated category endpoint; it
    /// is a search by category name.
    pub async fn category(
        &self,
        name: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Article>, GatewayError> {
        self.search(name, page, page_size).await
    }

    /// The user's full favorites list. Unpaginated; `204` maps to empty.
    pub async fn favorites_list(&self, user_id: &str) -> Result<Vec<Article>, GatewayError> {
        let request = self
            .client
            .get(format!("{}/api/favorites/{}", self.base, user_id));
        let response = self.send_with_deadline(request).await?;
        Self::decode_articles(response).await
    }

    /// Mark an article as a favorite. Idempotent at the server boundary.
    pub async fn add_favorite(&self, user_id: &str, article_id: &str) -> Result<(), GatewayError> {
        let request = self.client.post(format!(
            "{}/api/favorites/{}/add/{}",
            self.base, user_id, article_id
        ));
        let response = self.send_with_deadline(request).await?;
        Self::check_status(response).await
    }

    /// Remove an article from the favorites. Idempotent at the server boundary.
    pub async fn remove_favorite(
        &self,
        user_id: &str,
        article_id: &str,
    ) -> Result<(), GatewayError> {
        let request = self.client.delete(format!(
            "{}/api/favorites/{}/remove/{}",
            self.base, user_id, article_id
        ));
        let response = self.send_with_deadline(request).await?;
        Self::check_status(response).await
    }

    async fn send_with_deadline(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GatewayError> {
        tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| GatewayError::Timeout)?
            .map_err(GatewayError::Network)
    }

    async fn decode_articles(response: reqwest::Response) -> Result<Vec<Article>, GatewayError> {
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            // "No favorites" — a successful empty result.
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(Self::remote_error(status, response).await);
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn check_status(response: reqwest::Response) -> Result<(), GatewayError> {
        let status = response.status();
        if status.is_success() {
            // Body is a plain confirmation string; nothing to decode.
            Ok(())
        } else {
            Err(Self::remote_error(status, response).await)
        }
    }

    /// Build the error for a non-success response. The backend reports
    /// failures as `{"error": "..."}`; fall back to the bare status when the
    /// body carries no usable message.
    async fn remote_error(status: StatusCode, response: reqwest::Response) -> GatewayError {
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
            .and_then(|v| v.get("error").and_then(|m| m.as_str()).map(str::to_string));

        match message {
            Some(m) if !m.is_empty() => GatewayError::Remote(m),
            _ => {
                tracing::debug!(status = status.as_u16(), "Remote failure without message body");
                GatewayError::HttpStatus(status.as_u16())
            }
        }
    }
}
