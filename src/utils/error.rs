use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("API key rejected by the geocoding service (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("Geocoding service quota exceeded (HTTP {status})")]
    RateLimited { status: u16 },

    #[error("Geocoding service error from {endpoint}: HTTP {status}")]
    ServiceError { endpoint: String, status: u16 },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl GeoError {
    /// Errors that would repeat for every following lookup.
    pub fn is_systemic(&self) -> bool {
        matches!(
            self,
            GeoError::Unauthorized { .. } | GeoError::RateLimited { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GeoError::ApiError(_) => "Check your network connection and the geocoding base URL",
            GeoError::MalformedResponse { .. } => {
                "The service returned an unexpected body; verify base_url points at the geocoding API"
            }
            GeoError::Unauthorized { .. } => {
                "Provide a valid key via --api-key or the OPENWEATHER_API_KEY environment variable"
            }
            GeoError::RateLimited { .. } => {
                "The API key's call quota is used up; wait before retrying or upgrade the plan"
            }
            GeoError::ServiceError { .. } => "The geocoding service is failing; try again later",
            GeoError::UrlError(_) => "Fix the base_url setting",
            GeoError::IoError(_) => "Check that the config file exists and is readable",
            GeoError::ConfigError { .. }
            | GeoError::MissingConfigError { .. }
            | GeoError::InvalidConfigValueError { .. } => "Review the configuration file and flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
