//! DEVICE_CTRL_2 bit fields.
//!
//! The control word packs three independent fields into one byte:
//!
//! ```text
//!   7   6   5   4          3      2    1   0
//! [ -   -   -   DSP_RESET  MUTE   -  [ CTRL_STATE ] ]
//! ```
//!
//! [`ControlWord`] is a pure value type: every setter returns a new word with
//! only the targeted bits changed. The driver feeds it the byte it just read
//! back from the device and writes the result, so fields owned by other
//! operations survive.

use crate::registers::{CTRL2_DSP_RESET, CTRL2_MUTE, CTRL2_STATE_MASK};

/// Output stage control state (DEVICE_CTRL_2 bits 1:0, POWER_STATE bits 1:0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ControlState {
    /// Deep sleep: lowest power, registers retained, I²C alive.
    DeepSleep = 0x00,
    /// Sleep: DSP stopped, output stage off.
    Sleep = 0x01,
    /// High impedance: output stage switched off, DSP running.
    HighZ = 0x02,
    /// Play: output stage switching.
    Play = 0x03,
}

impl ControlState {
    /// All four states in encoding order.
    pub const ALL: [ControlState; 4] = [
        ControlState::DeepSleep,
        ControlState::Sleep,
        ControlState::HighZ,
        ControlState::Play,
    ];

    /// Two-bit field value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode the low two bits of `raw`; the remaining bits are ignored.
    pub const fn from_bits(raw: u8) -> Self {
        match raw & CTRL2_STATE_MASK {
            0x00 => ControlState::DeepSleep,
            0x01 => ControlState::Sleep,
            0x02 => ControlState::HighZ,
            _ => ControlState::Play,
        }
    }

    /// Short human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            ControlState::DeepSleep => "deep sleep",
            ControlState::Sleep => "sleep",
            ControlState::HighZ => "hi-z",
            ControlState::Play => "play",
        }
    }
}

impl core::fmt::Display for ControlState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw DEVICE_CTRL_2 value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ControlWord(u8);

impl ControlWord {
    /// DSP held in reset, output Hi-Z, muted. First write of the power-on sequence.
    pub const DSP_RESET_HIZ_MUTED: ControlWord =
        ControlWord(CTRL2_DSP_RESET | CTRL2_MUTE | ControlState::HighZ.bits());

    /// DSP running, output Hi-Z, muted.
    pub const DSP_NORMAL_HIZ_MUTED: ControlWord =
        ControlWord(CTRL2_MUTE | ControlState::HighZ.bits());

    /// DSP running, playing, muted. State left behind by a completed power-on sequence.
    pub const PLAY_MUTED: ControlWord = ControlWord(CTRL2_MUTE | ControlState::Play.bits());

    /// Wrap a byte read from the device.
    #[inline]
    pub const fn from_bits(raw: u8) -> Self {
        Self(raw)
    }

    /// Byte to write back to the device.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Soft-mute flag (bit 3).
    #[inline]
    pub const fn is_muted(self) -> bool {
        self.0 & CTRL2_MUTE != 0
    }

    /// DSP reset flag (bit 4).
    #[inline]
    pub const fn dsp_in_reset(self) -> bool {
        self.0 & CTRL2_DSP_RESET != 0
    }

    /// Control state field (bits 1:0).
    #[inline]
    pub const fn state(self) -> ControlState {
        ControlState::from_bits(self.0)
    }

    /// Copy of this word with bit 3 replaced by `muted`.
    #[must_use]
    pub const fn with_muted(self, muted: bool) -> Self {
        let flag = if muted { CTRL2_MUTE } else { 0 };
        Self((self.0 & !CTRL2_MUTE) | flag)
    }

    /// Copy of this word with bits 1:0 replaced by `state`.
    #[must_use]
    pub const fn with_state(self, state: ControlState) -> Self {
        Self((self.0 & !CTRL2_STATE_MASK) | state.bits())
    }
}

impl From<ControlWord> for u8 {
    fn from(word: ControlWord) -> u8 {
        word.bits()
    }
}
