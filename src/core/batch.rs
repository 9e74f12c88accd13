use crate::core::{Geocoder, LocationDescriptor, LocationRecord};
use crate::utils::error::{GeoError, Result};
use std::fmt;

/// Why a descriptor produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    PostalCodeNotFound { zip_code: String },
    LocationNotFound { descriptor: String },
    InvalidFormat { descriptor: String },
    LookupFailed { descriptor: String, message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PostalCodeNotFound { zip_code } => {
                write!(f, "No location data found for zip code {}.", zip_code)
            }
            Diagnostic::LocationNotFound { descriptor } => {
                write!(f, "No location data found for {}.", descriptor)
            }
            Diagnostic::InvalidFormat { descriptor } => {
                write!(f, "Invalid location format: {}", descriptor)
            }
            Diagnostic::LookupFailed {
                descriptor,
                message,
            } => write!(f, "Lookup failed for {}: {}", descriptor, message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Resolved locations, in input order.
    pub records: Vec<LocationRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BatchReport {
    pub fn into_records(self) -> Vec<LocationRecord> {
        self.records
    }

    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub struct BatchResolver<G: Geocoder> {
    geocoder: G,
}

impl<G: Geocoder> BatchResolver<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Resolves each descriptor in turn. Per-item failures become diagnostics;
    /// only a systemic error (rejected API key, exhausted quota) aborts the run.
    pub async fn run<S: AsRef<str>>(&self, locations: &[S]) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for location in locations {
            let raw = location.as_ref();
            let descriptor = LocationDescriptor::parse(raw);

            let outcome = match &descriptor {
                LocationDescriptor::PostalCode(zip_code) => {
                    self.geocoder.city_data_by_zip(zip_code, None).await
                }
                LocationDescriptor::CityState { city, state } => {
                    self.geocoder.city_data(city, state, None, None).await
                }
                LocationDescriptor::Invalid(_) => {
                    Self::record_diagnostic(
                        &mut report,
                        Diagnostic::InvalidFormat {
                            descriptor: raw.to_string(),
                        },
                    );
                    continue;
                }
            };

            match outcome {
                Ok(Some(record)) => {
                    tracing::debug!("Resolved {} to {}", raw, record);
                    report.records.push(record);
                }
                Ok(None) => {
                    let diagnostic = match descriptor {
                        LocationDescriptor::PostalCode(zip_code) => {
                            Diagnostic::PostalCodeNotFound { zip_code }
                        }
                        _ => Diagnostic::LocationNotFound {
                            descriptor: raw.to_string(),
                        },
                    };
                    Self::record_diagnostic(&mut report, diagnostic);
                }
                Err(e) if e.is_systemic() => {
                    tracing::error!("Aborting batch at {}: {}", raw, e);
                    return Err(e);
                }
                Err(e) => Self::record_diagnostic(&mut report, lookup_failed(raw, &e)),
            }
        }

        tracing::info!(
            "Resolved {} of {} locations",
            report.records.len(),
            locations.len()
        );
        Ok(report)
    }

    fn record_diagnostic(report: &mut BatchReport, diagnostic: Diagnostic) {
        // the caller prints diagnostics; only trace them here
        tracing::debug!("{}", diagnostic);
        report.diagnostics.push(diagnostic);
    }
}

fn lookup_failed(descriptor: &str, error: &GeoError) -> Diagnostic {
    Diagnostic::LookupFailed {
        descriptor: descriptor.to_string(),
        message: error.to_string(),
    }
}
