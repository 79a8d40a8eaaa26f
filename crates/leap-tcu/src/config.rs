//! Transmission control unit configuration.
//!
//! All values have defaults that work on the reference bench (a 4×4×4 cube
//! behind a USB serial bridge).  Override them with `LEAP_*` variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use leap_cache::CacheConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcuConfig {
    /// Cube side length.  Must be a power of two.
    /// Default: `4`
    pub dim: usize,

    /// Path of the transmitter device.
    /// Default: `/dev/ttyUSB0`
    pub device: String,

    /// A write that takes longer than this fails with `WriteTimeout`.
    /// Default: `5000`
    pub write_timeout_ms: u64,

    /// Pause between two transmitted frames.
    /// Default: `1000`
    pub idle_interval_ms: u64,

    /// Directory holding the `.txt` payload files.
    /// Default: `payload`
    pub payload_dir: String,

    /// Replay and digest cache sizing.
    pub cache: CacheConfig,

    /// Sessions that may be open at the same time.
    /// Default: `2`
    pub ap_capacity: usize,

    /// Buffer of the event bus; slow subscribers lag past this.
    /// Default: `64`
    pub event_capacity: usize,

    /// `tracing` filter directive.
    /// Default: `info`
    pub log_level: String,
}

impl Default for TcuConfig {
    fn default() -> Self {
        Self {
            dim:              4,
            device:           "/dev/ttyUSB0".into(),
            write_timeout_ms: 5_000,
            idle_interval_ms: 1_000,
            payload_dir:      "payload".into(),
            cache:            CacheConfig::default(),
            ap_capacity:      2,
            event_capacity:   64,
            log_level:        "info".into(),
        }
    }
}

impl TcuConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// | Variable                | Default        |
    /// |-------------------------|----------------|
    /// | `LEAP_DIM`              | `4`            |
    /// | `LEAP_DEVICE`           | `/dev/ttyUSB0` |
    /// | `LEAP_WRITE_TIMEOUT_MS` | `5000`         |
    /// | `LEAP_IDLE_INTERVAL_MS` | `1000`         |
    /// | `LEAP_PAYLOAD_DIR`      | `payload`      |
    /// | `LEAP_AP_CAPACITY`      | `2`            |
    /// | `LEAP_EVENT_CAPACITY`   | `64`           |
    /// | `LEAP_LOG_LEVEL`        | `info`         |
    ///
    /// Cache sizing comes from [`CacheConfig::from_env`].
    pub fn from_env() -> Self {
        fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        }

        let def = Self::default();
        Self {
            dim:              env_parse("LEAP_DIM",              def.dim),
            device:           env_parse("LEAP_DEVICE",           def.device),
            write_timeout_ms: env_parse("LEAP_WRITE_TIMEOUT_MS", def.write_timeout_ms),
            idle_interval_ms: env_parse("LEAP_IDLE_INTERVAL_MS", def.idle_interval_ms),
            payload_dir:      env_parse("LEAP_PAYLOAD_DIR",      def.payload_dir),
            cache:            CacheConfig::from_env(),
            ap_capacity:      env_parse("LEAP_AP_CAPACITY",      def.ap_capacity),
            event_capacity:   env_parse("LEAP_EVENT_CAPACITY",   def.event_capacity),
            log_level:        env_parse("LEAP_LOG_LEVEL",        def.log_level),
        }
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = TcuConfig::default();
        assert_eq!(cfg.dim, 4);
        assert_eq!(cfg.device, "/dev/ttyUSB0");
        assert_eq!(cfg.write_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.idle_interval(), Duration::from_secs(1));
        assert_eq!(cfg.ap_capacity, 2);
        assert_eq!(cfg.cache.history_capacity, 10);
    }

    /// Env vars are process-global, so every scenario runs in one test.
    #[test]
    fn from_env_all_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        let keys = [
            "LEAP_DIM",
            "LEAP_DEVICE",
            "LEAP_IDLE_INTERVAL_MS",
            "LEAP_AP_CAPACITY",
            "LEAP_CACHE_CAPACITY",
        ];
        for k in keys {
            std::env::remove_var(k);
        }
        assert_eq!(TcuConfig::from_env(), TcuConfig::default());

        std::env::set_var("LEAP_DIM", "8");
        std::env::set_var("LEAP_DEVICE", "/dev/ttyACM1");
        std::env::set_var("LEAP_IDLE_INTERVAL_MS", "250");
        std::env::set_var("LEAP_CACHE_CAPACITY", "4");
        let cfg = TcuConfig::from_env();
        assert_eq!(cfg.dim, 8);
        assert_eq!(cfg.device, "/dev/ttyACM1");
        assert_eq!(cfg.idle_interval(), Duration::from_millis(250));
        assert_eq!(cfg.cache.history_capacity, 4);
        assert_eq!(cfg.ap_capacity, 2);

        // Unparseable values fall back to the default.
        std::env::set_var("LEAP_AP_CAPACITY", "-1");
        assert_eq!(TcuConfig::from_env().ap_capacity, 2);

        for k in keys {
            std::env::remove_var(k);
        }
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = TcuConfig::default();
        let json = serde_json::to_string(&cfg).expect("serialize");
        let parsed: TcuConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, cfg);
    }
}
