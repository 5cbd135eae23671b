//! HTTP profile lookup against the Mojang name-history endpoint

use crate::error::Result;
use crate::identity::cache::{NameLookup, NameRecord};
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.mojang.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Profile-service client with a bounded request timeout
pub struct MojangLookup {
    client: reqwest::Client,
    base_url: String,
}

impl MojangLookup {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint, used by tests
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl NameLookup for MojangLookup {
    async fn history(&self, canonical_id: &str) -> Result<Vec<NameRecord>> {
        let url = format!("{}/user/profiles/{}/names", self.base_url, canonical_id);
        let records = self
            .client
            .get(&url)
            .send()
            .await
            .context("Profile request failed")?
            .error_for_status()
            .context("Profile request rejected")?
            .json::<Vec<NameRecord>>()
            .await
            .context("Malformed profile response")?;
        Ok(records)
    }
}
