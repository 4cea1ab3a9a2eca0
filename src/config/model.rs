//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reject settings that would only fail later, at call time.
    pub fn validate(&self) -> Result<()> {
        if self.backend.kind == BackendKind::Http {
            let parsed = url::Url::parse(&self.backend.url)
                .with_context(|| format!("Invalid backend url '{}'", self.backend.url))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                bail!("Backend url must be http or https, got '{}'", parsed.scheme());
            }
        }
        let [min, max] = self.backend.latency_ms;
        if min > max {
            bail!("backend.latency_ms must be [min, max], got [{}, {}]", min, max);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process actor, useful without a running backend.
    Local,
    /// JSON over HTTP.
    Http,
}

/// Where greet calls go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_kind")]
    pub kind: BackendKind,
    #[serde(default = "default_url")]
    pub url: String,
    /// Per-call timeout. `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Simulated latency range for the local actor, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: [u64; 2],
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            latency_ms: default_latency_ms(),
        }
    }
}

fn default_kind() -> BackendKind {
    BackendKind::Local
}

fn default_url() -> String {
    "http://127.0.0.1:4943".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_latency_ms() -> [u64; 2] {
    [50, 400]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_button_label")]
    pub button_label: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            button_label: default_button_label(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_title() -> String {
    "greetbox".to_string()
}

fn default_button_label() -> String {
    "Click Me!".to_string()
}

fn default_placeholder() -> String {
    "Enter your name".to_string()
}

/// Which resolution gets to write the greeting when calls overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// Every resolution is applied as it arrives; the last to arrive wins.
    #[default]
    Arrival,
    /// Resolutions older than the last applied call are dropped.
    Latest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorReporting {
    /// Show failures in the status bar.
    #[default]
    Report,
    /// Only log failures.
    Silent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub ordering: Ordering,
    #[serde(default)]
    pub on_error: ErrorReporting,
}

/// Diagnostic log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: default_log_dir(),
            level: default_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_dir() -> String {
    "~/.local/share/greetbox/logs".to_string()
}

fn default_level() -> String {
    "greetbox=info".to_string()
}
