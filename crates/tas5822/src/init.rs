//! Power-on sequence steps.
//!
//! ```text
//! [ResetLine] -> [DspResetHiZMute] -> [CoreAndRegisterReset] -> [DspNormalHiZMute]
//!     -> [AudioFormat] -> [Mute] -> [Play] -> [MinimumGain] -> Initialized
//! ```
//!
//! Each step runs only if the previous one succeeded. The first four register
//! steps are plain writes from a fixed table; the last three go through the
//! same read-modify-write operations callers use, so the chip ends up muted,
//! playing and at -15.5 dBFS no matter what the earlier writes left behind.

use crate::control::ControlWord;
use crate::registers::{
    Register, RESET_CTRL_DIGITAL_CORE, RESET_CTRL_REGISTERS, SAP_CTRL1_I2S_DEFAULT,
};

/// One step of the power-on sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStep {
    /// Pulse the reset line low then high. Skipped without a reset line.
    ResetLine,
    /// DEVICE_CTRL_2: DSP reset, output Hi-Z, muted.
    DspResetHiZMute,
    /// RESET_CTRL: reset the digital core and every register.
    CoreAndRegisterReset,
    /// DEVICE_CTRL_2: DSP running, output Hi-Z, muted.
    DspNormalHiZMute,
    /// SAP_CTRL1: default I²S framing.
    AudioFormat,
    /// Force the soft-mute bit on.
    Mute,
    /// Switch the control state to play.
    Play,
    /// Analog gain to -15.5 dBFS.
    MinimumGain,
}

impl InitStep {
    /// Steps in execution order.
    pub const SEQUENCE: [InitStep; 8] = [
        InitStep::ResetLine,
        InitStep::DspResetHiZMute,
        InitStep::CoreAndRegisterReset,
        InitStep::DspNormalHiZMute,
        InitStep::AudioFormat,
        InitStep::Mute,
        InitStep::Play,
        InitStep::MinimumGain,
    ];

    /// Fixed register write performed by this step, if it is a plain write.
    pub const fn register_write(self) -> Option<(Register, u8)> {
        match self {
            InitStep::DspResetHiZMute => Some((
                Register::DEVICE_CTRL_2,
                ControlWord::DSP_RESET_HIZ_MUTED.bits(),
            )),
            InitStep::CoreAndRegisterReset => Some((
                Register::RESET_CTRL,
                RESET_CTRL_DIGITAL_CORE | RESET_CTRL_REGISTERS,
            )),
            InitStep::DspNormalHiZMute => Some((
                Register::DEVICE_CTRL_2,
                ControlWord::DSP_NORMAL_HIZ_MUTED.bits(),
            )),
            InitStep::AudioFormat => Some((Register::SAP_CTRL1, SAP_CTRL1_I2S_DEFAULT)),
            InitStep::ResetLine | InitStep::Mute | InitStep::Play | InitStep::MinimumGain => None,
        }
    }

    /// Whether the chip needs the settle delay after this step.
    pub const fn needs_settle(self) -> bool {
        matches!(
            self,
            InitStep::DspResetHiZMute | InitStep::CoreAndRegisterReset
        )
    }

    /// Line written to the diagnostic sink when this step fails.
    pub const fn failure_message(self) -> &'static str {
        match self {
            InitStep::ResetLine => "Failed to set: Reset Line",
            InitStep::DspResetHiZMute => "Failed to set: DSP Reset + HighZ + Mute",
            InitStep::CoreAndRegisterReset => "Failed to set: Reset Digital Core + Reset Registers",
            InitStep::DspNormalHiZMute => "Failed to set: DSP Normal + HighZ + Mute",
            InitStep::AudioFormat => "Failed to set: Audio Format",
            InitStep::Mute => "Failed to set: Muted",
            InitStep::Play => "Failed to set: Playing",
            InitStep::MinimumGain => "Failed to set: Analog Gain",
        }
    }
}

impl core::fmt::Display for InitStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.failure_message())
    }
}
