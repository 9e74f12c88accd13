use crate::domain::model::LocationRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Lookup operations against a geocoding provider.
///
/// `Ok(None)` means the provider found nothing; `Err` is reserved for transport
/// failures, unreadable bodies and rejected credentials.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves a city and state/region code. `None` for country or limit
    /// falls back to the geocoder's configured defaults.
    async fn city_data(
        &self,
        city: &str,
        state: &str,
        country: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Option<LocationRecord>>;

    async fn city_data_by_zip(
        &self,
        zip_code: &str,
        country: Option<&str>,
    ) -> Result<Option<LocationRecord>>;
}
