use crate::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_MAX_RETRIES, DEFAULT_OUTPUT_FILE, DEFAULT_PROFILES_PER_PAGE,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TARGET_PER_ROLE, DEFAULT_USER_AGENT, TWINE_BASE_URL,
};
use crate::error::{Result, ScraperError};
use crate::infra::export::ExportFormat;
use crate::pipeline::processing::validators::FilterRules;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "TWINE_SCRAPER_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub collector: CollectorConfig,
    pub filters: FilterRules,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub base_url: String,
    pub target_per_role: usize,
    pub max_retries: u32,
    pub profiles_per_page: usize,
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// Fill under-delivering roles with generated profiles
    pub use_fallback: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: TWINE_BASE_URL.to_string(),
            target_per_role: DEFAULT_TARGET_PER_ROLE,
            max_retries: DEFAULT_MAX_RETRIES,
            profiles_per_page: DEFAULT_PROFILES_PER_PAGE,
            timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            use_fallback: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub format: ExportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            format: ExportFormat::Csv,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `TWINE_SCRAPER_CONFIG` is consulted, then
    /// `twine_scraper.toml` in the working directory, and finally built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(from_env) = std::env::var(CONFIG_PATH_ENV) {
            if !from_env.trim().is_empty() {
                return Self::from_file(Path::new(from_env.trim()));
            }
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::from_file(default_path);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.collector.profiles_per_page == 0 {
            return Err(ScraperError::Config(
                "collector.profiles_per_page must be at least 1".to_string(),
            ));
        }
        if self.filters.profile_url_prefix.trim().is_empty() {
            return Err(ScraperError::Config(
                "filters.profile_url_prefix must not be empty".to_string(),
            ));
        }
        // An empty entry matches every name or email and would reject the whole batch
        if self.filters.brand_prefix.trim().is_empty() {
            return Err(ScraperError::Config(
                "filters.brand_prefix must not be empty".to_string(),
            ));
        }
        for (key, entries) in [
            ("brand_keywords", &self.filters.brand_keywords),
            ("test_email_patterns", &self.filters.test_email_patterns),
            ("test_names", &self.filters.test_names),
        ] {
            if entries.iter().any(|entry| entry.trim().is_empty()) {
                return Err(ScraperError::Config(format!(
                    "filters.{key} must not contain empty entries"
                )));
            }
        }
        Ok(())
    }
}
