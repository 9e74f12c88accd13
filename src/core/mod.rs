pub mod batch;
pub mod geocoder;

pub use crate::domain::descriptor::LocationDescriptor;
pub use crate::domain::model::LocationRecord;
pub use crate::domain::ports::Geocoder;
pub use crate::utils::error::Result;
