use anyhow::{bail, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Source of the viewer's candidate locations.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// A non-empty list of location names. Not guaranteed stable across calls.
    async fn locations(&self) -> Result<Vec<String>>;
}

/// Fixed location list, answered after a short delay to behave like a real lookup.
#[derive(Debug, Clone)]
pub struct StaticLocations {
    locations: Vec<String>,
    delay: Duration,
}

impl StaticLocations {
    pub fn new<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { locations: locations.into_iter().map(Into::into).collect(), delay: Duration::ZERO }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for StaticLocations {
    fn default() -> Self {
        Self::new(["Delhi", "Bangalore", "Chennai"]).with_delay(Duration::from_millis(200))
    }
}

#[async_trait]
impl LocationProvider for StaticLocations {
    async fn locations(&self) -> Result<Vec<String>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.locations.is_empty() {
            bail!("location signal returned no locations");
        }
        Ok(self.locations.clone())
    }
}
