use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the YouTube extractor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YouTube API access
    pub youtube: YouTubeConfig,

    /// Caption negotiation settings
    pub captions: CaptionConfig,

    /// Playlist paging settings
    pub playlist: PlaylistConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    /// YouTube Data API v3 key
    pub api_key: Option<String>,

    /// Base URL of the Data API
    pub api_base_url: String,

    /// Base URL of the watch pages and the InnerTube player endpoint
    pub watch_base_url: String,

    /// HTTP request timeout in seconds
    pub request_timeout_seconds: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Language requested when the caller does not name one
    pub default_language: String,

    /// Subtitle format requested from the caption endpoint
    pub payload_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    /// Items requested per page (the API caps this at 50)
    pub page_size: u32,

    /// Stop paging after this many pages
    pub max_pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            watch_base_url: "https://www.youtube.com".to_string(),
            request_timeout_seconds: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            default_language: crate::captions::DEFAULT_LANGUAGE.to_string(),
            payload_format: "vtt".to_string(),
        }
    }
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            max_pages: 200,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one the default
    /// locations are tried, falling back to built-in defaults. Environment
    /// overrides are applied last.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_default_locations(),
        };

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    fn from_default_locations() -> Self {
        let config_paths = ["yt-extract.toml", "config/yt-extract.toml"];

        for path in &config_paths {
            let path = Path::new(path);
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("{:#}", e),
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Self::default()
    }

    /// Apply overrides read through `lookup` (normally the process environment)
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("YOUTUBE_API_KEY").filter(|key| !key.is_empty()) {
            self.youtube.api_key = Some(api_key);
        }

        if let Some(base_url) = lookup("YT_EXTRACT_API_BASE_URL") {
            self.youtube.api_base_url = base_url;
        }

        if let Some(log_level) = lookup("YT_EXTRACT_LOG_LEVEL") {
            self.logging.log_level = log_level;
        }

        if let Some(language) = lookup("YT_EXTRACT_DEFAULT_LANGUAGE") {
            self.captions.default_language = language;
        }

        self
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_redacted()?)?;
        tracing::info!("💾 Configuration saved to: {}", path.display());
        Ok(())
    }

    /// TOML rendering with the API key masked
    pub fn to_toml_redacted(&self) -> Result<String> {
        let mut redacted = self.clone();
        if redacted.youtube.api_key.is_some() {
            redacted.youtube.api_key = Some("<redacted>".to_string());
        }
        Ok(toml::to_string_pretty(&redacted)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match &self.youtube.api_key {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(anyhow!(
                    "YouTube API key is required. Set the YOUTUBE_API_KEY environment variable."
                ))
            }
        }

        if self.youtube.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }

        if !(1..=50).contains(&self.playlist.page_size) {
            return Err(anyhow!("playlist page_size must be between 1 and 50"));
        }

        if self.playlist.max_pages == 0 {
            return Err(anyhow!("playlist max_pages must be greater than 0"));
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "YouTube Extractor Configuration:\n\
            - API Base URL: {}\n\
            - API Key: {}\n\
            - Default Language: {}\n\
            - Caption Format: {}\n\
            - Playlist Page Size: {}",
            self.youtube.api_base_url,
            if self.youtube.api_key.is_some() { "set" } else { "missing" },
            self.captions.default_language,
            self.captions.payload_format,
            self.playlist.page_size,
        )
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.youtube.api_key = Some(api_key.into());
        self
    }

    /// Point both the Data API and the watch endpoints at one base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.config.youtube.api_base_url = base_url.clone();
        self.config.youtube.watch_base_url = base_url;
        self
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.config.captions.default_language = language.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.config.playlist.page_size = page_size;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.playlist.max_pages = max_pages;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
