// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The fetch collaborator seam and its HTTP implementation.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::query::QueryDescriptor;

/// A fetched feed payload, before any decoding.
#[derive(Debug, Clone)]
pub struct Payload {
    /// Raw response body.
    pub body: Vec<u8>,

    /// Declared content type, when the transport reports one.
    pub content_type: Option<String>,
}

/// Transport seam: turns a query descriptor into a raw payload.
///
/// The resolution engine performs no I/O of its own; timeout and retry
/// policy belong to implementations of this trait.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches the feed addressed by `query`.
    async fn fetch(&self, query: &QueryDescriptor) -> Result<Payload, FeedError>;
}

/// Production fetcher over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FeedConfig,
}

impl HttpFetcher {
    /// Creates a fetcher from the feed configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, query: &QueryDescriptor) -> Result<Payload, FeedError> {
        let url = query.url(&self.config.base_url);
        debug!(%url, "fetching timetable feed");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response".to_string());
            return Err(FeedError::Http(format!("{status}: {text}")));
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().await?.to_vec();
        Ok(Payload { body, content_type })
    }
}
