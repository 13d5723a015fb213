use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::fetcher::FetchConfig;
use crate::query::{FeedLocale, DEFAULT_ENDPOINT, DEFAULT_QUERY};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub ui: UiConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub endpoint: String,
    pub hl: String,
    pub gl: String,
    pub ceid: String,
    pub cache_ttl_seconds: u64,
    pub request_timeout_seconds: u64,
    pub max_feed_kib: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub default_query: String,
    pub window_width: f32,
    pub window_height: f32,
    pub font_size: f32,
    pub summary_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background_color: [u8; 3],
    pub card_color: [u8; 3],
    pub accent_color: [u8; 3],
    pub focus_color: [u8; 3],
    pub text_color: [u8; 3],
    pub secondary_text_color: [u8; 3],
    pub border_color: [u8; 3],
}

impl Default for FeedConfig {
    fn default() -> Self {
        let locale = FeedLocale::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            hl: locale.hl,
            gl: locale.gl,
            ceid: locale.ceid,
            cache_ttl_seconds: 300,
            request_timeout_seconds: 5,
            max_feed_kib: 4 * 1024,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_query: DEFAULT_QUERY.to_owned(),
            window_width: 1200.0,
            window_height: 860.0,
            font_size: 14.0,
            summary_rows: 3,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background_color: [244, 245, 247],
            card_color: [255, 255, 255],
            accent_color: [51, 51, 51],
            focus_color: [227, 25, 55],
            text_color: [51, 51, 51],
            secondary_text_color: [136, 136, 136],
            border_color: [224, 224, 224],
        }
    }
}

impl FeedConfig {
    pub fn to_fetch_config(&self) -> FetchConfig {
        FetchConfig {
            endpoint: self.endpoint.clone(),
            locale: FeedLocale {
                hl: self.hl.clone(),
                gl: self.gl.clone(),
                ceid: self.ceid.clone(),
            },
            cache_ttl: Duration::from_secs(self.cache_ttl_seconds),
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
            max_feed_bytes: self.max_feed_kib.saturating_mul(1024),
        }
    }
}

impl AppConfig {
    /// `<config_dir>/newsgrid/config.json`
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsgrid").join("config.json"))
    }

    /// Loads the user configuration, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load() -> Self {
        let path = match Self::config_file_path() {
            Ok(path) => path,
            Err(err) => {
                warn!(error = %err, "using default configuration");
                return Self::default();
            }
        };
        if !path.exists() {
            info!(path = %path.display(), "no configuration file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, path = %path.display(), "using default configuration");
                Self::default()
            }
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }
}

impl ThemeConfig {
    pub fn background_color32(&self) -> egui::Color32 {
        rgb(self.background_color)
    }

    pub fn card_color32(&self) -> egui::Color32 {
        rgb(self.card_color)
    }

    pub fn accent_color32(&self) -> egui::Color32 {
        rgb(self.accent_color)
    }

    pub fn focus_color32(&self) -> egui::Color32 {
        rgb(self.focus_color)
    }

    pub fn text_color32(&self) -> egui::Color32 {
        rgb(self.text_color)
    }

    pub fn secondary_text_color32(&self) -> egui::Color32 {
        rgb(self.secondary_text_color)
    }

    pub fn border_color32(&self) -> egui::Color32 {
        rgb(self.border_color)
    }
}

fn rgb([r, g, b]: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(r, g, b)
}
