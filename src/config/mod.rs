pub mod toml_config;

pub use toml_config::GeocoderConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "geoloc-util")]
#[command(about = "Resolve city/state pairs and zip codes into coordinates")]
pub struct CliConfig {
    #[arg(
        long,
        num_args = 1..,
        required = true,
        help = "Locations in the format \"City, State\" or a 5-digit zip code"
    )]
    pub locations: Vec<String>,

    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, help = "TOML file with a [geocoder] table")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Config file (or defaults) with the command-line key layered on top.
    pub fn geocoder_config(&self) -> Result<GeocoderConfig> {
        let mut config = match &self.config {
            Some(path) => GeocoderConfig::from_file(path)?,
            None => GeocoderConfig::default(),
        };

        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }

        Ok(config)
    }
}
