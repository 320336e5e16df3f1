//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Raw cookie header string ("name=value; name2=value2")
    #[serde(default)]
    pub cookie: Option<String>,

    /// Cookie file (browser export or single-line header form)
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,

    /// Local HTML override for the lowest-price page
    #[serde(default)]
    pub html_file: Option<PathBuf>,

    /// Local HTML override for the median-price page
    #[serde(default)]
    pub html_file_median: Option<PathBuf>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            cookie: None,
            cookie_file: None,
            html_file: None,
            html_file_median: None,
            format: OutputFormat::Plain,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("cm-pricer").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(cookie) = std::env::var("CM_COOKIE") {
            self.cookie = Some(cookie);
        }

        if let Ok(path) = std::env::var("CM_COOKIE_FILE") {
            self.cookie_file = Some(PathBuf::from(path));
        }

        if let Ok(timeout) = std::env::var("CM_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        self
    }
}

/// Output format for the price report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The original script's line format: URL, then KEY=VALUE lines.
    #[default]
    Plain,
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use: plain, table, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.format, OutputFormat::Plain);
        assert!(config.cookie.is_none());
        assert!(config.cookie_file.is_none());
        assert!(config.html_file.is_none());
        assert!(config.html_file_median.is_none());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert_eq!("PLAIN".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Plain.to_string(), "plain");
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            timeout_secs = 10
            cookie = "a=1"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.cookie.as_deref(), Some("a=1"));
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            timeout_secs = 15
            cookie_file = "/tmp/cookies.txt"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.cookie_file, Some(PathBuf::from("/tmp/cookies.txt")));
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_with_env() {
        let orig_cookie = std::env::var("CM_COOKIE").ok();
        let orig_timeout = std::env::var("CM_TIMEOUT").ok();

        std::env::set_var("CM_COOKIE", "session=abc");
        std::env::set_var("CM_TIMEOUT", "7");

        let config = Config::new().with_env();
        assert_eq!(config.cookie.as_deref(), Some("session=abc"));
        assert_eq!(config.timeout_secs, 7);

        match orig_cookie {
            Some(v) => std::env::set_var("CM_COOKIE", v),
            None => std::env::remove_var("CM_COOKIE"),
        }
        match orig_timeout {
            Some(v) => std::env::set_var("CM_TIMEOUT", v),
            None => std::env::remove_var("CM_TIMEOUT"),
        }
    }

    #[test]
    fn test_config_with_env_invalid_timeout() {
        let orig = std::env::var("CM_TIMEOUT").ok();
        std::env::set_var("CM_TIMEOUT", "not_a_number");

        let config = Config::new().with_env();
        assert_eq!(config.timeout_secs, 30);

        match orig {
            Some(v) => std::env::set_var("CM_TIMEOUT", v),
            None => std::env::remove_var("CM_TIMEOUT"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            timeout_secs: 12,
            cookie: Some("a=1".to_string()),
            cookie_file: Some(PathBuf::from("/tmp/c.txt")),
            html_file: None,
            html_file_median: None,
            format: OutputFormat::Table,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.timeout_secs, config.timeout_secs);
        assert_eq!(parsed.cookie, config.cookie);
        assert_eq!(parsed.cookie_file, config.cookie_file);
        assert_eq!(parsed.format, config.format);
    }
}
