pub mod error;
pub mod types;

#[cfg(feature = "currency")]
pub mod currency;

#[cfg(feature = "loans")]
pub mod loans;

pub use error::FinboardError;
pub use types::*;

/// Standard result type for all finboard operations
pub type FinboardResult<T> = Result<T, FinboardError>;
