//! Driver configuration and constants.

/// 7-bit bus address with the ADR pin strapped to the first resistor option.
pub const DEFAULT_ADDRESS: u8 = 0x2C;

/// Every address selectable through the ADR pin strap.
pub const STRAP_ADDRESSES: [u8; 4] = [0x2C, 0x2D, 0x2E, 0x2F];

/// Prefix of every line written to the diagnostic sink.
pub const LOG_PREFIX: &str = "TAS5822: ";

/// Delays used by the power-on sequence, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Reset line hold time, applied after driving it low and again after
    /// releasing it.
    pub reset_hold_ms: u32,
    /// Settle time after the DSP reset and the core/register reset writes.
    pub settle_ms: u32,
}

impl Timing {
    /// Shortest reset line hold the chip tolerates.
    pub const MIN_RESET_HOLD_MS: u32 = 10;

    /// Shortest settle time after a reset write.
    pub const MIN_SETTLE_MS: u32 = 5;

    /// Copy with each delay raised to its minimum.
    #[must_use]
    pub fn at_least_minimum(self) -> Self {
        Self {
            reset_hold_ms: self.reset_hold_ms.max(Self::MIN_RESET_HOLD_MS),
            settle_ms: self.settle_ms.max(Self::MIN_SETTLE_MS),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reset_hold_ms: Self::MIN_RESET_HOLD_MS,
            settle_ms: Self::MIN_SETTLE_MS,
        }
    }
}
