//! Configuration types for the analysis pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Hard cap on comments returned by one ingestion.
pub const MAX_COMMENTS: usize = 1000;

/// Largest page size the comment-listing service accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Configuration for sentiment classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Comments per completion request.
    ///
    /// Default: 50.
    pub batch_size: usize,

    /// Minimum spacing between consecutive completion requests.
    ///
    /// Zero disables throttling. Default: 100ms.
    #[serde(with = "duration_millis")]
    pub batch_interval: Duration,

    /// Batches in flight at once.
    ///
    /// 1 processes batches strictly in order. Default: 1.
    pub max_concurrency: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            batch_interval: Duration::from_millis(100),
            max_concurrency: 1,
        }
    }
}

impl ClassifierConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set batch size (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the throttle interval between batch requests.
    pub fn with_batch_interval(mut self, interval: Duration) -> Self {
        self.batch_interval = interval;
        self
    }

    /// Set how many batches may be in flight (minimum 1).
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.batch_interval, Duration::from_millis(100));
        assert_eq!(config.max_concurrency, 1);
    }

    #[test]
    fn test_builders_floor_at_one() {
        let config = ClassifierConfig::new().with_batch_size(0).with_max_concurrency(0);
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.max_concurrency, 1);
    }
}
