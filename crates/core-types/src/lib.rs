pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use structs::{DateRange, PricePoint, RiskFreePoint, MAX_RANGE_YEARS};
