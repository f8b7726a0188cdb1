use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// Base URL of the recipe API (no trailing slash)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with profile requests
    #[serde(default)]
    pub api_token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Quiescence window for the ingredient input, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Minimum number of characters before an autocomplete lookup is issued
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// Maximum number of suggestions requested per lookup
    #[serde(default = "default_autocomplete_limit")]
    pub autocomplete_limit: usize,
    /// Recipes per results page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// How long a toast stays visible, in milliseconds
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    /// Where onboarding and milestone flags are kept. In-memory when unset.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            timeout_secs: default_timeout_secs(),
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            autocomplete_limit: default_autocomplete_limit(),
            page_size: default_page_size(),
            toast_duration_ms: default_toast_duration_ms(),
            storage_path: None,
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_len() -> usize {
    crate::selector::MIN_QUERY_LEN
}

fn default_autocomplete_limit() -> usize {
    10
}

fn default_page_size() -> usize {
    crate::results::PAGE_SIZE
}

fn default_toast_duration_ms() -> u64 {
    4000
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe-finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("recipe-finder").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_FINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = FinderConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.debounce_window(), Duration::from_millis(300));
        assert_eq!(config.min_query_len, 2);
        assert_eq!(config.autocomplete_limit, 10);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.toast_duration(), Duration::from_secs(4));
        assert!(config.api_token.is_none());
        assert!(config.storage_path.is_none());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: FinderConfig = Config::builder()
            .add_source(config::File::from_str(
                "base_url = \"https://recipes.example.com\"\npage_size = 12\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.base_url, "https://recipes.example.com");
        assert_eq!(config.page_size, 12);
        // Untouched fields fall back to defaults
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }
}
