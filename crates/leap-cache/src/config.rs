//! Configuration for the replay and digest caches.

use serde::{Deserialize, Serialize};

/// Sizes and lifetimes of the transmission caches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Number of transmitted frames remembered by the replay cache.
    ///
    /// When full, the oldest frame is evicted.
    /// Default: `10`
    pub history_capacity: usize,

    /// Maximum number of frame digests kept for lookup.
    /// Default: `256`
    pub digest_capacity: usize,

    /// Seconds a frame digest stays valid after it is posted.
    /// Default: `10`
    pub digest_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            history_capacity: 10,
            digest_capacity:  256,
            digest_ttl_secs:  10,
        }
    }
}

impl CacheConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// | Variable               | Default |
    /// |------------------------|---------|
    /// | `LEAP_CACHE_CAPACITY`  | `10`    |
    /// | `LEAP_DIGEST_CAPACITY` | `256`   |
    /// | `LEAP_DIGEST_TTL_SECS` | `10`    |
    pub fn from_env() -> Self {
        fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        }

        let def = Self::default();
        Self {
            history_capacity: env_parse("LEAP_CACHE_CAPACITY",  def.history_capacity),
            digest_capacity:  env_parse("LEAP_DIGEST_CAPACITY", def.digest_capacity),
            digest_ttl_secs:  env_parse("LEAP_DIGEST_TTL_SECS", def.digest_ttl_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CacheConfig::default();
        assert_eq!(cfg.history_capacity, 10);
        assert_eq!(cfg.digest_capacity, 256);
        assert_eq!(cfg.digest_ttl_secs, 10);
    }

    /// Env vars are process-global, so every scenario runs in one test.
    #[test]
    fn from_env_all_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        std::env::remove_var("LEAP_CACHE_CAPACITY");
        std::env::remove_var("LEAP_DIGEST_CAPACITY");
        std::env::remove_var("LEAP_DIGEST_TTL_SECS");
        assert_eq!(CacheConfig::from_env(), CacheConfig::default());

        std::env::set_var("LEAP_CACHE_CAPACITY", "32");
        std::env::set_var("LEAP_DIGEST_TTL_SECS", "3");
        let cfg = CacheConfig::from_env();
        assert_eq!(cfg.history_capacity, 32);
        assert_eq!(cfg.digest_capacity, 256);
        assert_eq!(cfg.digest_ttl_secs, 3);

        std::env::set_var("LEAP_CACHE_CAPACITY", "many");
        assert_eq!(CacheConfig::from_env().history_capacity, 10);

        std::env::remove_var("LEAP_CACHE_CAPACITY");
        std::env::remove_var("LEAP_DIGEST_TTL_SECS");
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = CacheConfig::default();
        let json = serde_json::to_string(&cfg).expect("serialize");
        let parsed: CacheConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, cfg);
    }
}
