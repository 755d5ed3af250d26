//! Application configuration loaded from environment variables.

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parses `LOG_FORMAT`; anything other than `json` selects text output.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default `"0.0.0.0"`)
/// - `PORT`: listen port (default `3000`)
/// - `RUST_LOG`: tracing filter directive (default `"info"`)
/// - `LOG_FORMAT`: `text` or `json` (default `text`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .map(|raw| LogFormat::parse(&raw))
                .unwrap_or(defaults.log_format),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_lookup_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("LOG_FORMAT", "JSON"),
        ]);
        let config = Config::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let config = Config::from_lookup(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
    }
}
