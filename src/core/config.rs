//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chatbot/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatbotConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub responder: ResponderConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ResponderConfig {
    pub reply_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub copied_indicator_ms: Option<u64>,
    pub placeholder: Option<String>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub title: Option<String>,
    pub reply_delay_ms: Option<u64>,
    pub copied_indicator_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = crate::core::state::DEFAULT_TITLE;
pub const DEFAULT_REPLY_DELAY_MS: u64 = 0;
pub const DEFAULT_COPIED_INDICATOR_MS: u64 = 2000;
pub const DEFAULT_PLACEHOLDER: &str = "Type your message...";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub title: String,
    pub reply_delay_ms: u64,
    pub copied_indicator_ms: u64,
    pub placeholder: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&ChatbotConfig::default(), &CliOverrides::default())
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.chatbot/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chatbot").join("config.toml"))
}

/// Load config from `~/.chatbot/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatbotConfig::default()`.
pub fn load_config() -> Result<ChatbotConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(ChatbotConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ChatbotConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ChatbotConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ChatbotConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Chatbot Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# title = "AI Chatbot"                  # Or set CHATBOT_TITLE

# [responder]
# reply_delay_ms = 0                    # Simulated reply latency (CHATBOT_REPLY_DELAY_MS)

# [ui]
# copied_indicator_ms = 2000            # How long "copied" stays on after a copy
# placeholder = "Type your message..."
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

fn env_u64(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {key}={raw:?}: not a number");
            None
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChatbotConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Title: CLI → env → config → default
    let title = cli
        .title
        .clone()
        .or_else(|| std::env::var("CHATBOT_TITLE").ok())
        .or_else(|| config.general.title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    // Reply delay: CLI → env → config → default
    let reply_delay_ms = cli
        .reply_delay_ms
        .or_else(|| env_u64("CHATBOT_REPLY_DELAY_MS"))
        .or(config.responder.reply_delay_ms)
        .unwrap_or(DEFAULT_REPLY_DELAY_MS);

    // Copied indicator: CLI → config → default
    let copied_indicator_ms = cli
        .copied_indicator_ms
        .or(config.ui.copied_indicator_ms)
        .unwrap_or(DEFAULT_COPIED_INDICATOR_MS);

    ResolvedConfig {
        title,
        reply_delay_ms,
        copied_indicator_ms,
        placeholder: config
            .ui
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
    }
}
