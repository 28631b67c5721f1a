//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$TENDERDESK_CONFIG` (environment variable)
//! 2. `~/.config/tenderdesk/config.toml` (Linux/macOS)
//!    `%APPDATA%\tenderdesk\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Backend endpoints and security token handling.
    pub backend: BackendConfig,
    /// Email form submission.
    pub submit: SubmitConfig,
    /// Dismissible notices.
    pub notices: NoticeConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Interface language code ("en", "es"). Empty = detect from environment.
    pub lang: String,
}

/// Backend endpoints and security token handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Origin of the tender backend, e.g. `https://tenders.example.com`.
    pub base_url: String,
    /// Path of the multipart upload endpoint.
    pub upload_path: String,
    /// Path template of the removal endpoint; `{id}` is replaced by the document id.
    pub remove_path: String,
    /// Name of the cookie holding the anti-forgery token.
    pub csrf_cookie: String,
    /// Header the token is sent in.
    pub csrf_header: String,
    /// Request timeout in seconds (0 = none).
    pub timeout_secs: u64,
}

/// How the email form reacts to a submit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitPolicy {
    /// Ask for confirmation, then show the busy overlay before submitting.
    Confirm,
    /// Sync checkboxes and editor content, then submit without prompting.
    Direct,
}

/// Email form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// Submission policy: "confirm" or "direct".
    pub policy: SubmitPolicy,
    /// Delay between showing the busy overlay and submitting, in milliseconds.
    pub overlay_delay_ms: u64,
}

/// Dismissible notices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// Seconds before a notice dismisses itself.
    pub auto_dismiss_secs: u64,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "warn".to_string(),
            lang: String::new(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            upload_path: "/tenders/upload-document/".to_string(),
            remove_path: "/tenders/document/{id}/remove/".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            timeout_secs: 0,
        }
    }
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            policy: SubmitPolicy::Confirm,
            overlay_delay_ms: 100,
        }
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_secs: 5,
        }
    }
}

impl BackendConfig {
    /// Request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl SubmitConfig {
    pub fn overlay_delay(&self) -> Duration {
        Duration::from_millis(self.overlay_delay_ms)
    }
}

impl NoticeConfig {
    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.auto_dismiss_secs as i64)
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("TENDERDESK_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    dirs::config_dir().map(|d| d.join("tenderdesk").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tenderdesk")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    cache_dir(config).join("tenderdesk.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.backend.upload_path, "/tenders/upload-document/");
        assert_eq!(cfg.backend.csrf_cookie, "csrftoken");
        assert_eq!(cfg.backend.csrf_header, "X-CSRFToken");
        assert_eq!(cfg.submit.policy, SubmitPolicy::Confirm);
        assert_eq!(cfg.notices.auto_dismiss_secs, 5);
        assert!(cfg.backend.timeout().is_none());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let mut cfg = Config::default();
        cfg.submit.policy = SubmitPolicy::Direct;
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        assert!(toml_str.contains("policy = \"direct\""));
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.submit.policy, SubmitPolicy::Direct);
        assert_eq!(parsed.backend.remove_path, cfg.backend.remove_path);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[backend]
base_url = "https://tenders.example.com"
timeout_secs = 30

[submit]
policy = "direct"
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.backend.base_url, "https://tenders.example.com");
        assert_eq!(cfg.backend.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(cfg.submit.policy, SubmitPolicy::Direct);
        // Other fields use defaults
        assert_eq!(cfg.submit.overlay_delay_ms, 100);
        assert_eq!(cfg.backend.csrf_cookie, "csrftoken");
        assert_eq!(cfg.notices.lifetime(), chrono::Duration::seconds(5));
    }

    #[test]
    fn test_log_file_under_cache_dir() {
        let mut cfg = Config::default();
        cfg.general.cache_dir = Some(PathBuf::from("/tmp/td-cache"));
        assert_eq!(
            log_file_path(&cfg),
            PathBuf::from("/tmp/td-cache/tenderdesk.log")
        );
    }
}
