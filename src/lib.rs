pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;
pub mod zone;

pub use error::{Result, ThermozoneError};
pub use zone::{classify, validate, Zone, ZoneConfig, ZoneInput};
