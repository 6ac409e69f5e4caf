use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::SourceSettings;
use crate::types::ContentItem;

/// Producer of the raw, ordered fragment list for a query reference.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, reference: &str) -> Result<Vec<ContentItem>>;
}

/// Pull the item list out of a persisted-query response.
///
/// Accepts `{"data": {"<anyKey>": {"items": [...]}}}` as well as
/// `{"data": {"items": [...]}}`. Entries that are not objects are skipped.
pub fn extract_items(envelope: &Value) -> Result<Vec<ContentItem>> {
    let data = envelope
        .get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| anyhow!("response has no `data` object"))?;

    let items = match data.get("items").and_then(Value::as_array) {
        Some(list) => list,
        None => data
            .values()
            .find_map(|v| v.get("items").and_then(Value::as_array))
            .ok_or_else(|| anyhow!("response `data` carries no `items` list"))?,
    };

    let mut out = Vec::with_capacity(items.len());
    for (idx, raw) in items.iter().enumerate() {
        if !raw.is_object() {
            tracing::warn!(index = idx, "skipping non-object content item");
            continue;
        }
        match serde_json::from_value::<ContentItem>(raw.clone()) {
            Ok(item) => out.push(item),
            Err(e) => tracing::warn!(index = idx, error = %e, "skipping undecodable content item"),
        }
    }
    Ok(out)
}

/// Fetches persisted GraphQL queries over HTTP.
pub struct HttpContentSource {
    client: reqwest::Client,
    settings: SourceSettings,
}

impl HttpContentSource {
    pub fn new(settings: SourceSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self, reference: &str) -> Result<Vec<ContentItem>> {
        let url = self.settings.query_url(reference)?;
        tracing::debug!(%url, "fetching content fragments");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request failed: {url}"))?
            .error_for_status()
            .with_context(|| format!("bad status from {url}"))?;
        let body: Value = resp.json().await.with_context(|| format!("invalid JSON from {url}"))?;
        extract_items(&body)
    }
}

/// Reads a saved query response from disk; the reference is ignored.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

#[async_trait]
impl ContentSource for JsonFileSource {
    async fn fetch(&self, _reference: &str) -> Result<Vec<ContentItem>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        let body: Value = serde_json::from_str(&text).with_context(|| format!("parsing {}", self.path.display()))?;
        extract_items(&body)
    }
}

/// In-memory items, optionally delayed.
#[derive(Debug, Clone, Default)]
pub struct StaticContentSource {
    items: Vec<ContentItem>,
    delay: Duration,
}

impl StaticContentSource {
    pub fn new(items: Vec<ContentItem>) -> Self { Self { items, delay: Duration::ZERO } }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn fetch(&self, _reference: &str) -> Result<Vec<ContentItem>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.items.clone())
    }
}
