pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::GeocoderConfig;
pub use core::{
    batch::{BatchReport, BatchResolver, Diagnostic},
    geocoder::OpenWeatherGeocoder,
};
pub use domain::{descriptor::LocationDescriptor, model::LocationRecord, ports::Geocoder};
pub use utils::error::{GeoError, Result};
