//! Client for the upstream WordPress REST API.
//!
//! The relay only needs two operations against WordPress: writing a single
//! meta key on a content submission, and updating a post's primary title.
//! Both are POSTs authenticated with a Basic authorization header built from
//! the configured application password.

use crate::config::WordPressConfig;
use crate::protocol::PostId;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Value as JsonValue, json};

/// Meta keys written on the content submission record.
pub const META_CHAT_ID: &str = "_telegram_chat_id";
pub const META_MEMBERS: &str = "_telegram_members";
pub const META_TITLE: &str = "telegram_title";
pub const META_DESCRIPTION: &str = "telegram_description";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// WordPress answered with a non-success status. The response body text
    /// is carried so the caller sees what the API complained about.
    #[error("WordPress API error [{status}]: {body}")]
    Status { status: u16, body: String },

    #[error("WordPress request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Narrow interface over the remote content store.
///
/// The update handler only talks to WordPress through this trait, so its
/// validation and mapping logic can be exercised without network access.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Write one meta key on the content submission addressed by `post_id`.
    /// Writes are overwrites; repeating one leaves the same remote state.
    async fn write_metadata(
        &self,
        post_id: &PostId,
        key: &str,
        value: JsonValue,
    ) -> Result<(), ApiError>;

    /// Update the post's primary title field.
    async fn update_title(&self, post_id: &PostId, title: &str) -> Result<(), ApiError>;
}

/// reqwest-backed `ContentApi` implementation.
pub struct WordPressClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl WordPressClient {
    pub fn new(config: &WordPressConfig) -> Self {
        let credentials = format!("{}:{}", config.auth_user, config.password());
        let auth_header = format!("Basic {}", STANDARD.encode(credentials.as_bytes()));

        WordPressClient {
            client: reqwest::Client::new(),
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            auth_header,
        }
    }

    async fn post_json(&self, url: String, body: JsonValue) -> Result<(), ApiError> {
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl ContentApi for WordPressClient {
    async fn write_metadata(
        &self,
        post_id: &PostId,
        key: &str,
        value: JsonValue,
    ) -> Result<(), ApiError> {
        let url = format!("{}/content_submission/{}", self.base_url, post_id);
        let body = json!({ "meta": { key: value } });

        tracing::debug!(%post_id, key, "writing post meta");
        metrics::counter!(crate::metrics_defs::UPSTREAM_WRITES.name, "kind" => "meta").increment(1);
        self.post_json(url, body).await
    }

    async fn update_title(&self, post_id: &PostId, title: &str) -> Result<(), ApiError> {
        let url = format!("{}/posts/{}", self.base_url, post_id);
        let body = json!({ "title": title });

        tracing::debug!(%post_id, "updating post title");
        metrics::counter!(crate::metrics_defs::UPSTREAM_WRITES.name, "kind" => "title").increment(1);
        self.post_json(url, body).await
    }
}
