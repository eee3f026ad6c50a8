//! Resolution engine configuration.

use crate::dns::Service;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which name resolution provider the engine builds by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverBackend {
    /// Operating system resolver (`getaddrinfo`).
    #[default]
    System,
    /// hickory-dns using the system's resolv.conf.
    Hickory,
}

/// Resolution engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-resolution timeout, measured from the start of each lookup
    #[serde(with = "millis", rename = "timeout_ms")]
    pub timeout: Duration,
    /// Service used by `add_host` when the caller gives none
    pub default_service: Service,
    /// Provider used by `ResolutionEngine::new`
    pub backend: ResolverBackend,
    /// Name of the worker thread
    pub worker_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            default_service: Service::default(),
            backend: ResolverBackend::System,
            worker_name: "dns-resolver".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the per-resolution timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the default service.
    pub fn default_service(mut self, service: impl Into<Service>) -> Self {
        self.default_service = service.into();
        self
    }

    /// Set the resolver backend.
    pub fn backend(mut self, backend: ResolverBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the worker thread name.
    pub fn worker_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.default_service.as_str(), "http");
        assert_eq!(config.backend, ResolverBackend::System);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new()
            .timeout(Duration::from_millis(250))
            .default_service("https")
            .backend(ResolverBackend::Hickory)
            .worker_name("lookup");

        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.default_service.port(), Ok(443));
        assert_eq!(config.backend, ResolverBackend::Hickory);
        assert_eq!(config.worker_name, "lookup");
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{"timeout_ms": 2000, "backend": "hickory"}"#)
            .expect("valid config");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.backend, ResolverBackend::Hickory);
        assert_eq!(config.default_service.as_str(), "http");
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig::new().default_service("8443");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"timeout_ms\":3000"));
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_rejects_bad_backend() {
        assert!(EngineConfig::from_json(r#"{"backend": "carrier-pigeon"}"#).is_err());
    }
}
