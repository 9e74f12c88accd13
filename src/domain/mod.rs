// Domain layer: location model, descriptor classification and the geocoder port.
// No I/O here; the HTTP implementation lives in core::geocoder.

pub mod descriptor;
pub mod model;
pub mod ports;
