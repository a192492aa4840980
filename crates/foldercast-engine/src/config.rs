//! Dispatch configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default inter-call delay under the sequential strategy, in milliseconds.
///
/// Values below this tend to trip provider rate limiting.
pub const DEFAULT_INTER_CALL_DELAY_MS: u64 = 1000;

/// Delivery strategy for one dispatch.
///
/// `Bulk` assumes (unverified) atomic bulk support from the provider;
/// `Sequential` is the safe default and is client-side rate-limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One provider call covering every target
    Bulk,
    /// One delay-spaced call per target, in folder order
    #[default]
    Sequential,
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Delivery strategy
    #[serde(default)]
    pub strategy: Strategy,
    /// Delay before each sequential call, in milliseconds.
    /// Ignored under `Bulk`.
    #[serde(default = "default_delay_ms")]
    pub inter_call_delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    DEFAULT_INTER_CALL_DELAY_MS
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            inter_call_delay_ms: DEFAULT_INTER_CALL_DELAY_MS,
        }
    }
}

impl DispatchConfig {
    /// Create the default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a delivery strategy
    #[inline]
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// With an inter-call delay in milliseconds
    #[inline]
    #[must_use]
    pub fn with_inter_call_delay_ms(mut self, delay_ms: u64) -> Self {
        self.inter_call_delay_ms = delay_ms;
        self
    }

    /// Inter-call delay as a duration
    #[inline]
    #[must_use]
    pub fn inter_call_delay(&self) -> Duration {
        Duration::from_millis(self.inter_call_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sequential_with_one_second_delay() {
        let config = DispatchConfig::default();
        assert_eq!(config.strategy, Strategy::Sequential);
        assert_eq!(config.inter_call_delay_ms, 1000);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: DispatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DispatchConfig::default());

        let config: DispatchConfig =
            serde_json::from_str(r#"{"strategy":"bulk","inter_call_delay_ms":250}"#).unwrap();
        assert_eq!(config.strategy, Strategy::Bulk);
        assert_eq!(config.inter_call_delay(), Duration::from_millis(250));
    }
}
