pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

pub use error::AmortizationError;
pub use types::*;

/// Standard result type for all amortization operations
pub type CoreResult<T> = Result<T, AmortizationError>;
