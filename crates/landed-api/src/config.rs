use crate::error::{ApiError, Result};
use landed_report::EstimationProfile;
use std::net::SocketAddr;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_LOG_FILTER: &str = "landed_api=info,tower_http=info";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address (LANDED_ADDR)
    pub addr: SocketAddr,
    /// YAML estimation profile (LANDED_PROFILE); the standard profile when unset
    pub profile_path: Option<String>,
    /// Fallback filter when RUST_LOG is unset (LANDED_LOG)
    pub log_filter: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, so tests need not touch the process env
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = lookup("LANDED_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        Ok(Self {
            addr: addr
                .parse::<SocketAddr>()
                .map_err(|_| ApiError::Config(format!("LANDED_ADDR must be host:port, got {}", addr)))?,
            profile_path: lookup("LANDED_PROFILE").filter(|p| !p.trim().is_empty()),
            log_filter: lookup("LANDED_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    pub fn load_profile(&self) -> Result<EstimationProfile> {
        match &self.profile_path {
            Some(path) => Ok(EstimationProfile::from_file(path)?),
            None => Ok(EstimationProfile::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr.port(), 8787);
        assert!(config.profile_path.is_none());
        assert_eq!(config.load_profile().unwrap(), EstimationProfile::default());
    }

    #[test]
    fn test_invalid_addr() {
        let err = ApiConfig::from_lookup(lookup(&[("LANDED_ADDR", "not-an-addr")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_missing_profile_file() {
        let config = ApiConfig::from_lookup(lookup(&[("LANDED_PROFILE", "/nonexistent.yaml")])).unwrap();
        assert!(matches!(config.load_profile(), Err(ApiError::Profile(_))));
    }
}
