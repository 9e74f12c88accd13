use std::fmt;

/// How a location string from the command line should be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationDescriptor {
    PostalCode(String),
    CityState { city: String, state: String },
    Invalid(String),
}

impl LocationDescriptor {
    /// Classifies a raw descriptor. Exactly five ASCII digits is a postal code,
    /// otherwise the string must split on a single comma into two trimmed parts.
    pub fn parse(input: &str) -> Self {
        if input.len() == 5 && input.bytes().all(|b| b.is_ascii_digit()) {
            return LocationDescriptor::PostalCode(input.to_string());
        }

        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [city, state] => LocationDescriptor::CityState {
                city: city.to_string(),
                state: state.to_string(),
            },
            _ => LocationDescriptor::Invalid(input.to_string()),
        }
    }
}

impl fmt::Display for LocationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationDescriptor::PostalCode(code) => write!(f, "{}", code),
            LocationDescriptor::CityState { city, state } => write!(f, "{}, {}", city, state),
            LocationDescriptor::Invalid(raw) => write!(f, "{}", raw),
        }
    }
}
