use crate::config::toml_config::{GeocoderConfig, DIRECT_PATH, ZIP_PATH};
use crate::core::{Geocoder, LocationRecord};
use crate::utils::error::{GeoError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// `Geocoder` backed by the OpenWeatherMap geocoding API.
pub struct OpenWeatherGeocoder {
    config: GeocoderConfig,
    client: Client,
}

impl OpenWeatherGeocoder {
    pub fn new(config: GeocoderConfig) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("geoloc-util/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// One GET against `path`. Successful replies and the provider's 400/404
    /// answers are parsed as JSON, since "not found" comes back as an error object.
    async fn fetch_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.config.endpoint(path)?;

        // query string is left out so the key never reaches the log
        tracing::debug!("Making geocoding request to: {}", url);
        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("appid", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        match status {
            StatusCode::UNAUTHORIZED => {
                return Err(GeoError::Unauthorized {
                    status: status.as_u16(),
                })
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(GeoError::RateLimited {
                    status: status.as_u16(),
                })
            }
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {}
            _ if !status.is_success() => {
                return Err(GeoError::ServiceError {
                    endpoint: path.to_string(),
                    status: status.as_u16(),
                })
            }
            _ => {}
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeoError::MalformedResponse {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for OpenWeatherGeocoder {
    async fn city_data(
        &self,
        city: &str,
        state: &str,
        country: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Option<LocationRecord>> {
        let country = country.unwrap_or(self.config.default_country.as_str());
        let limit = limit.unwrap_or(self.config.default_limit);

        let payload = self
            .fetch_json(
                DIRECT_PATH,
                &[
                    ("q", format!("{},{},{}", city, state, country)),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        Ok(LocationRecord::from_direct_payload(payload))
    }

    async fn city_data_by_zip(
        &self,
        zip_code: &str,
        country: Option<&str>,
    ) -> Result<Option<LocationRecord>> {
        let country = country.unwrap_or(self.config.default_country.as_str());

        let payload = self
            .fetch_json(ZIP_PATH, &[("zip", format!("{},{}", zip_code, country))])
            .await?;

        Ok(LocationRecord::from_zip_payload(payload))
    }
}
