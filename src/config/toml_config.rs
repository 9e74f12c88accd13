use crate::utils::error::{GeoError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";
pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_LIMIT: u32 = 1;
/// The provider caps `limit` at five matches.
pub const MAX_LIMIT: u32 = 5;

pub const DIRECT_PATH: &str = "/geo/1.0/direct";
pub const ZIP_PATH: &str = "/geo/1.0/zip";

/// Settings injected into the geocoder at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub api_key: String,
    pub default_country: String,
    pub default_limit: u32,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    geocoder: GeocoderConfig,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            default_country: DEFAULT_COUNTRY.to_string(),
            default_limit: DEFAULT_LIMIT,
            timeout_seconds: None,
        }
    }
}

impl GeocoderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load the `[geocoder]` table from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GeoError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let file: ConfigFile =
            toml::from_str(&processed_content).map_err(|e| GeoError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        Ok(file.geocoder)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GeoError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        Ok(Url::parse(&url)?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for GeocoderConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("geocoder.base_url", &self.base_url)?;

        if self.api_key.is_empty() {
            return Err(GeoError::MissingConfigError {
                field: "geocoder.api_key".to_string(),
            });
        }
        validation::validate_resolved("geocoder.api_key", &self.api_key)?;
        validation::validate_non_empty_string("geocoder.api_key", &self.api_key)?;

        validation::validate_non_empty_string("geocoder.default_country", &self.default_country)?;
        validation::validate_range("geocoder.default_limit", self.default_limit, 1, MAX_LIMIT)?;

        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("geocoder.timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }
}
