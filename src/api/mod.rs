//! REST client for the catalog service.
//!
//! Two read endpoints matter to a session: `GET /books` and `GET /me`.
//! `GET /books/{id}` is exposed for single-book refreshes.

use std::time::Duration;

use async_trait::async_trait;
use plume_kernel::settings::ApiSettings;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::catalog::models::{Book, BookId, User};
use crate::catalog::CatalogSource;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-2xx status.
    #[error("request failed: {status}")]
    Status { status: u16 },

    /// Body did not match the expected shape.
    #[error("parse error: {0}")]
    Decode(String),
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_books(&self) -> Result<Vec<Book>, ApiError> {
        self.get("/books").await
    }

    pub async fn fetch_book(&self, id: &BookId) -> Result<Book, ApiError> {
        self.get(&format!("/books/{}", id)).await
    }

    pub async fn fetch_me(&self) -> Result<User, ApiError> {
        self.get("/me").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "fetching");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_books(&self) -> Result<Vec<Book>, ApiError> {
        ApiClient::fetch_books(self).await
    }

    async fn fetch_me(&self) -> Result<User, ApiError> {
        ApiClient::fetch_me(self).await
    }
}
