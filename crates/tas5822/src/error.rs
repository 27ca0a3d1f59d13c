//! Driver error types.

use crate::init::InitStep;
use crate::wire::BusStatus;

/// Errors returned by register operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The bus finished a transaction with a non-zero status.
    Bus(BusStatus),
    /// The bus refused a byte while a transaction was being queued.
    ByteRejected,
    /// A read returned no data.
    NoData,
    /// Driving the reset line failed.
    ResetLine,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(status) => write!(f, "I2C transaction failed: {status}"),
            Self::ByteRejected => write!(f, "I2C byte rejected"),
            Self::NoData => write!(f, "I2C read returned no data"),
            Self::ResetLine => write!(f, "reset line GPIO error"),
        }
    }
}

impl From<BusStatus> for Error {
    fn from(status: BusStatus) -> Self {
        Self::Bus(status)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Power-on sequence failure: which step stopped it and why.
///
/// The chip is left in whatever state the last successful step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitError {
    /// Step that failed. No later step was attempted.
    pub step: InitStep,
    /// Underlying failure.
    pub cause: Error,
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.step.failure_message(), self.cause)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
