pub mod error;
pub mod types;

#[cfg(feature = "profitability")]
pub mod profitability;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::FirmRoiError;

pub type FirmRoiResult<T> = Result<T, FirmRoiError>;
