//! Gain and volume register encodings.
//!
//! Both newtypes hold the raw register code and can only be built through a
//! clamping constructor, so an out-of-range request is never written to the
//! chip. Same idea as the DAP's `VolumePercent` / `AttenuationRegister` pair.
//!
//! | Register | Step   | Code 0   | Max code          |
//! |----------|--------|----------|-------------------|
//! | AGAIN    | 0.5 dB | 0 dBFS   | 31 = -15.5 dBFS   |
//! | DIG_VOL  | 0.5 dB | +24 dB   | 0xFE = -103 dB    |

use crate::registers::{AGAIN_MASK, DIG_VOL_0DB, DIG_VOL_MUTE};

// ── AnalogGain ───────────────────────────────────────────────────────────────

/// AGAIN register value.
///
/// The register stores attenuation magnitude in 0.5 dB steps while callers
/// speak in negative dBFS, hence `code = round(-2 * dbfs)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct AnalogGain(u8);

impl AnalogGain {
    /// Quietest setting.
    pub const MIN_DBFS: f32 = -15.5;

    /// Loudest setting.
    pub const MAX_DBFS: f32 = 0.0;

    /// -15.5 dBFS, written at the end of the power-on sequence.
    pub const QUIETEST: AnalogGain = AnalogGain(31);

    /// 0 dBFS.
    pub const LOUDEST: AnalogGain = AnalogGain(0);

    /// Encode a gain in dBFS.
    ///
    /// Inputs are clamped to [-15.5, 0.0] and rounded half away from zero
    /// (-0.25 dBFS -> code 1). NaN maps to the quietest setting.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_dbfs(dbfs: f32) -> Self {
        if dbfs.is_nan() {
            return Self::QUIETEST;
        }
        let clamped = dbfs.clamp(Self::MIN_DBFS, Self::MAX_DBFS);
        // In [0.0, 31.0] after clamping, so the cast is exact.
        Self(libm::roundf(-2.0 * clamped) as u8)
    }

    /// Wrap a code read back from AGAIN; reserved bits 7:5 are dropped.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        Self(code & AGAIN_MASK)
    }

    /// Register code, 0..=31.
    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Gain in dBFS.
    pub fn dbfs(self) -> f32 {
        -f32::from(self.0) / 2.0
    }
}

// ── DigitalVolume ────────────────────────────────────────────────────────────

/// DIG_VOL register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct DigitalVolume(u8);

impl DigitalVolume {
    /// Lowest audible setting.
    pub const MIN_DB: f32 = -103.0;

    /// Highest setting.
    pub const MAX_DB: f32 = 24.0;

    /// Unity gain.
    pub const UNITY: DigitalVolume = DigitalVolume(DIG_VOL_0DB);

    /// Digital mute.
    pub const MUTE: DigitalVolume = DigitalVolume(DIG_VOL_MUTE);

    /// Encode a volume in dB, clamped to [-103.0, +24.0]. NaN maps to [`Self::MUTE`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_db(db: f32) -> Self {
        if db.is_nan() {
            return Self::MUTE;
        }
        let clamped = db.clamp(Self::MIN_DB, Self::MAX_DB);
        // Half-dB steps in [-206, 48].
        let steps = libm::roundf(2.0 * clamped) as i16;
        let code = i16::from(DIG_VOL_0DB).saturating_sub(steps);
        Self(u8::try_from(code).unwrap_or(DIG_VOL_MUTE.saturating_sub(1)))
    }

    /// Wrap a code read back from DIG_VOL.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        Self(code)
    }

    /// Register code.
    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Volume in dB, or `None` when muted.
    pub fn db(self) -> Option<f32> {
        if self.0 == DIG_VOL_MUTE {
            None
        } else {
            Some((f32::from(DIG_VOL_0DB) - f32::from(self.0)) / 2.0)
        }
    }
}
