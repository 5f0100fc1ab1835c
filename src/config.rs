//! Configuration management for chatview
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! Every default the viewer relies on (data directory, output directory,
//! port, refresh intervals) lives here and is passed explicitly to the
//! components that need it.

use crate::cli::Cli;
use crate::error::{Result, ViewerError};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure for chatview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Claude Code data directory (contains `projects/`)
    #[serde(default = "default_claude_dir")]
    pub claude_dir: PathBuf,

    /// Where static HTML files are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Live server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum number of sessions to generate or list
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Live server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Auto-refresh intervals for live pages
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Rendering limits
    #[serde(default)]
    pub render: RenderConfig,
}

fn home_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_claude_dir() -> PathBuf {
    home_dir().join(".claude")
}

fn default_output_dir() -> PathBuf {
    home_dir().join("claude-chat-history")
}

fn default_port() -> u16 {
    8787
}

fn default_limit() -> usize {
    50
}

/// Live server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind; the server is meant for localhost only
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// `localhost` or any address in `127.0.0.0/8` or `::1`
fn is_loopback_host(host: &str) -> bool {
    host.eq_ignore_ascii_case("localhost")
        || host
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
        }
    }
}

/// Client-side polling intervals embedded into live pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Refresh interval for the session list (seconds)
    #[serde(default = "default_index_refresh")]
    pub index_seconds: u32,

    /// Refresh interval for a single session view (seconds)
    #[serde(default = "default_session_refresh")]
    pub session_seconds: u32,
}

fn default_index_refresh() -> u32 {
    10
}

fn default_session_refresh() -> u32 {
    5
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            index_seconds: default_index_refresh(),
            session_seconds: default_session_refresh(),
        }
    }
}

/// Truncation limits applied while rendering (in characters)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Preview text taken from the first user message
    #[serde(default = "default_preview_max")]
    pub preview_max_chars: usize,

    /// Thinking block text
    #[serde(default = "default_thinking_max")]
    pub thinking_max_chars: usize,

    /// Generic tool input JSON
    #[serde(default = "default_tool_input_max")]
    pub tool_input_max_chars: usize,

    /// Tool result text
    #[serde(default = "default_tool_result_max")]
    pub tool_result_max_chars: usize,
}

fn default_preview_max() -> usize {
    150
}

fn default_thinking_max() -> usize {
    1000
}

fn default_tool_input_max() -> usize {
    500
}

fn default_tool_result_max() -> usize {
    1000
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            preview_max_chars: default_preview_max(),
            thinking_max_chars: default_thinking_max(),
            tool_input_max_chars: default_tool_input_max(),
            tool_result_max_chars: default_tool_result_max(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            claude_dir: default_claude_dir(),
            output_dir: default_output_dir(),
            port: default_port(),
            limit: default_limit(),
            server: ServerConfig::default(),
            refresh: RefreshConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// When `cli.config` is unset, `<config dir>/chatview/config.yaml` is
    /// tried; a missing file falls back to defaults.
    ///
    /// # Arguments
    ///
    /// * `cli` - Parsed command line, used for the file path and overrides
    ///
    /// # Errors
    ///
    /// Returns error if an existing file cannot be read or parsed
    pub fn load(cli: &Cli) -> Result<Self> {
        let path = match &cli.config {
            Some(path) => Some(PathBuf::from(path)),
            None => ProjectDirs::from("", "", "chatview")
                .map(|dirs| dirs.config_dir().join("config.yaml")),
        };

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                if cli.config.is_some() {
                    tracing::warn!("Config file not found at {}, using defaults", path.display());
                }
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    /// Parse a YAML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ViewerError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ViewerError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        // The upstream CLI relocates its data directory with this variable
        if let Ok(dir) = std::env::var("CLAUDE_CONFIG_DIR") {
            self.claude_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("CHATVIEW_CLAUDE_DIR") {
            self.claude_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("CHATVIEW_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        if let Ok(host) = std::env::var("CHATVIEW_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("CHATVIEW_PORT") {
            if let Ok(value) = port.parse() {
                self.port = value;
            } else {
                tracing::warn!("Invalid CHATVIEW_PORT: {}", port);
            }
        }

        if let Ok(limit) = std::env::var("CHATVIEW_LIMIT") {
            if let Ok(value) = limit.parse() {
                self.limit = value;
            } else {
                tracing::warn!("Invalid CHATVIEW_LIMIT: {}", limit);
            }
        }
    }

    /// Apply flag overrides from the command line
    pub fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.claude_dir {
            self.claude_dir = dir.clone();
        }
        if let Some(dir) = &cli.output {
            self.output_dir = dir.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(limit) = cli.limit {
            self.limit = limit;
        }
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any value is outside its acceptable range
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ViewerError::Config("port must be greater than 0".to_string()).into());
        }

        if self.limit == 0 {
            return Err(ViewerError::Config("limit must be greater than 0".to_string()).into());
        }

        if self.server.host.trim().is_empty() {
            return Err(ViewerError::Config("server.host cannot be empty".to_string()).into());
        }

        if !is_loopback_host(&self.server.host) {
            return Err(ViewerError::Config(format!(
                "server.host must be localhost or a loopback address, got '{}'",
                self.server.host
            ))
            .into());
        }

        if self.refresh.index_seconds == 0 || self.refresh.session_seconds == 0 {
            return Err(ViewerError::Config(
                "refresh intervals must be greater than 0".to_string(),
            )
            .into());
        }

        let render = &self.render;
        if render.preview_max_chars == 0
            || render.thinking_max_chars == 0
            || render.tool_input_max_chars == 0
            || render.tool_result_max_chars == 0
        {
            return Err(ViewerError::Config(
                "render limits must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    const ENV_VARS: [&str; 6] = [
        "CLAUDE_CONFIG_DIR",
        "CHATVIEW_CLAUDE_DIR",
        "CHATVIEW_OUTPUT_DIR",
        "CHATVIEW_HOST",
        "CHATVIEW_PORT",
        "CHATVIEW_LIMIT",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8787);
        assert_eq!(config.limit, 50);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.refresh.index_seconds, 10);
        assert_eq!(config.refresh.session_seconds, 5);
        assert!(config.claude_dir.ends_with(".claude"));
        assert!(config.output_dir.ends_with("claude-chat-history"));
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = Config::default();
        config.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_limit() {
        let mut config = Config::default();
        config.limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_refresh() {
        let mut config = Config::default();
        config.refresh.session_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_host() {
        let mut config = Config::default();
        config.server.host = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_non_loopback_host() {
        for host in ["0.0.0.0", "192.168.1.10", "::", "example.com"] {
            let mut config = Config::default();
            config.server.host = host.to_string();
            let err = config.validate().unwrap_err();
            assert!(
                err.to_string().contains("loopback"),
                "{} should be rejected",
                host
            );
        }
    }

    #[test]
    fn test_config_validation_accepts_loopback_hosts() {
        for host in ["127.0.0.1", "127.0.0.2", "localhost", "::1"] {
            let mut config = Config::default();
            config.server.host = host.to_string();
            assert!(config.validate().is_ok(), "{} should be accepted", host);
        }
    }

    #[test]
    fn test_config_validation_zero_render_limit() {
        let mut config = Config::default();
        config.render.thinking_max_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_partial_yaml_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "port: 9100\nrefresh:\n  index_seconds: 30\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.refresh.index_seconds, 30);
        assert_eq!(config.refresh.session_seconds, 5);
        assert_eq!(config.limit, 50);
    }

    #[test]
    fn test_from_file_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "port: [not a number").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ViewerError>(),
            Some(ViewerError::Config(_))
        ));
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let mut config = Config::default();
        let cli = Cli {
            claude_dir: Some(PathBuf::from("/data/claude")),
            output: Some(PathBuf::from("/tmp/html")),
            port: Some(9000),
            limit: Some(3),
            ..Default::default()
        };
        config.apply_cli_overrides(&cli);

        assert_eq!(config.claude_dir, PathBuf::from("/data/claude"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/html"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.limit, 3);
    }

    #[test]
    #[serial]
    fn test_env_vars_override_file_values() {
        clear_env();
        std::env::set_var("CLAUDE_CONFIG_DIR", "/upstream/claude");
        std::env::set_var("CHATVIEW_OUTPUT_DIR", "/srv/html");
        std::env::set_var("CHATVIEW_HOST", "localhost");
        std::env::set_var("CHATVIEW_PORT", "9200");
        std::env::set_var("CHATVIEW_LIMIT", "not-a-number");

        let mut config = Config::default();
        config.apply_env_vars();

        assert_eq!(config.claude_dir, PathBuf::from("/upstream/claude"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/html"));
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.port, 9200);
        assert_eq!(config.limit, 50);

        std::env::set_var("CHATVIEW_CLAUDE_DIR", "/own/claude");
        config.apply_env_vars();
        assert_eq!(config.claude_dir, PathBuf::from("/own/claude"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_with_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("viewer.yaml");
        fs::write(&path, "limit: 7\n").unwrap();

        let cli = Cli {
            config: Some(path.to_string_lossy().to_string()),
            port: Some(9001),
            ..Default::default()
        };
        clear_env();
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.limit, 7);
    }
}
