// Configuration module entry point
// Layered settings: built-in defaults, optional TOML file, CONTACT_* env vars

mod types;

use std::net::SocketAddr;
use std::time::Duration;

pub use types::{
    Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, RoutesConfig,
    ServerConfig,
};

/// Config file used when none is given (extension resolved by `config`)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// A missing file is not an error. Environment variables use the
    /// `CONTACT` prefix and `__` between sections, e.g. `CONTACT_SERVER__PORT`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "contact-gateway")?
            .set_default("http.max_body_size", 65_536)? // 64KB
            .set_default("routes.submit_path", "/submit")?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CONTACT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Upper bound on a single connection's lifetime
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(std::cmp::max(
            self.performance.read_timeout,
            self.performance.write_timeout,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("contact-gateway-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}.toml"));
        std::fs::write(&path, content).unwrap();
        path.with_extension("")
    }

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("/nonexistent/contact-gateway/config").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.routes.submit_path, "/submit");
        assert_eq!(cfg.http.max_body_size, 65_536);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.routes.health.enabled);
        assert_eq!(cfg.routes.health.liveness_path, "/healthz");
        assert!(cfg.server.workers.is_none());
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = write_config(
            "override",
            r#"
[server]
port = 9090
workers = 2

[routes]
submit_path = "/api/contact"

[routes.health]
enabled = false

[performance]
read_timeout = 5
write_timeout = 12
max_connections = 64
"#,
        );
        let cfg = Config::load_from(&path.to_string_lossy()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.routes.submit_path, "/api/contact");
        assert!(!cfg.routes.health.enabled);
        assert_eq!(cfg.routes.health.readiness_path, "/readyz");
        assert_eq!(cfg.performance.max_connections, Some(64));
        assert_eq!(cfg.connection_timeout(), Duration::from_secs(12));
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 9090);
    }

    #[test]
    fn test_invalid_socket_addr() {
        let mut cfg = Config::load_from("/nonexistent/contact-gateway/config").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_health_probe_paths() {
        let health = HealthConfig::default();
        assert!(health.is_probe("/healthz"));
        assert!(health.is_probe("/readyz"));
        assert!(!health.is_probe("/submit"));

        let disabled = HealthConfig {
            enabled: false,
            ..HealthConfig::default()
        };
        assert!(!disabled.is_probe("/healthz"));
    }
}
