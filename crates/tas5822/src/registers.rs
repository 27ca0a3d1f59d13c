//! TAS5822 register map
//!
//! Source: Texas Instruments TAS5822M datasheet, Section 8.6 (Register Maps),
//! book 0 / page 0. Only page 0 control and status registers are listed; the
//! coefficient pages used by the DSP are out of reach of this driver.
//!
//! # Key I²C constraints
//!
//! ## One register per transaction
//! Every access in this driver selects the register with the first payload
//! byte and moves exactly one data byte. The auto-increment mode controlled
//! by `I2C_PAGE_AUTO_INC` is never relied on.
//!
//! ## DEVICE_CTRL_2 is shared state
//! DSP reset, mute and the two-bit control state all live in
//! `DEVICE_CTRL_2` (0x03). Those fields are only ever changed through a
//! read-modify-write of the full byte; see [`crate::control::ControlWord`].

/// Page 0 register addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(non_camel_case_types)]
pub enum Register {
    /// Reset control: digital core reset (bit 4), register reset (bit 0).
    RESET_CTRL = 0x01,
    /// Device control 1: modulation scheme, bridge mode, switching frequency.
    DEVICE_CTRL_1 = 0x02,
    /// Device control 2: DSP reset (bit 4), mute (bit 3), control state (bits 1:0).
    DEVICE_CTRL_2 = 0x03,
    /// I²C page auto-increment disable.
    I2C_PAGE_AUTO_INC = 0x0F,
    /// Signal channel control: MCLK ratio and sample rate overrides.
    SIG_CH_CTRL = 0x28,
    /// Clock detection control.
    CLOCK_DET_CTRL = 0x29,
    /// SDOUT source select.
    SDOUT_SEL = 0x30,
    /// I²S control: BCK/LRCK polarity.
    I2S_CTRL = 0x31,
    /// Serial audio port control 1: data format and word length.
    SAP_CTRL1 = 0x33,
    /// Serial audio port control 2: data offset.
    SAP_CTRL2 = 0x34,
    /// Serial audio port control 3: left/right channel routing.
    SAP_CTRL3 = 0x35,
    /// Detected sample rate.
    FS_MON = 0x37,
    /// Detected BCK ratio.
    BCK_MON = 0x38,
    /// Clock detection status.
    CLKDET_STATUS = 0x39,
    /// Digital volume, 0.5 dB per step, 0x30 = 0 dB, 0xFF = mute.
    DIG_VOL = 0x4C,
    /// Digital volume ramp control 1.
    DIG_VOL_CTRL1 = 0x4E,
    /// Digital volume ramp control 2.
    DIG_VOL_CTRL2 = 0x4F,
    /// Auto-mute control.
    AUTO_MUTE_CTRL = 0x50,
    /// Auto-mute time.
    AUTO_MUTE_TIME = 0x51,
    /// Auto-mute delay.
    AMUTE_DELAY = 0x52,
    /// Analog control: PWM frequency and bandwidth.
    ANA_CTRL = 0x53,
    /// Analog gain, 0.5 dB attenuation per step, bits 4:0.
    AGAIN = 0x54,
    /// Biquad write control.
    BQ_WR_CTRL1 = 0x5C,
    /// DAC control.
    DAC_CTRL = 0x5D,
    /// ADR pin control.
    ADR_PIN_CTRL = 0x60,
    /// ADR pin configuration.
    ADR_PIN_CONFIG = 0x61,
    /// DSP miscellaneous.
    DSP_MISC = 0x66,
    /// Die identification (read-only).
    DIE_ID = 0x67,
    /// Current power state (read-only), same encoding as the control state.
    POWER_STATE = 0x68,
    /// Auto-mute state (read-only).
    AUTOMUTE_STATE = 0x69,
    /// Phase control.
    PHASE_CTRL = 0x6A,
    /// Spread spectrum control 0.
    SS_CTRL0 = 0x6B,
    /// Spread spectrum control 1.
    SS_CTRL1 = 0x6C,
    /// Spread spectrum control 2.
    SS_CTRL2 = 0x6D,
    /// Spread spectrum control 3.
    SS_CTRL3 = 0x6E,
    /// Spread spectrum control 4.
    SS_CTRL4 = 0x6F,
    /// Per-channel over-current and DC fault flags (read-only).
    CHAN_FAULT = 0x70,
    /// Global faults 1: clock, PVDD over/under voltage (read-only).
    GLOBAL_FAULT1 = 0x71,
    /// Global faults 2: over-temperature shutdown (read-only).
    GLOBAL_FAULT2 = 0x72,
    /// Over-temperature warnings (read-only).
    OT_WARNING = 0x73,
    /// Fault pin reporting control 1.
    PIN_CONTROL1 = 0x74,
    /// Fault pin reporting control 2.
    PIN_CONTROL2 = 0x75,
    /// Fault clear (write-only, bit 7 clears latched analog faults).
    FAULT_CLEAR = 0x78,
}

impl Register {
    /// Every register in address order.
    pub const ALL: [Register; 43] = [
        Register::RESET_CTRL,
        Register::DEVICE_CTRL_1,
        Register::DEVICE_CTRL_2,
        Register::I2C_PAGE_AUTO_INC,
        Register::SIG_CH_CTRL,
        Register::CLOCK_DET_CTRL,
        Register::SDOUT_SEL,
        Register::I2S_CTRL,
        Register::SAP_CTRL1,
        Register::SAP_CTRL2,
        Register::SAP_CTRL3,
        Register::FS_MON,
        Register::BCK_MON,
        Register::CLKDET_STATUS,
        Register::DIG_VOL,
        Register::DIG_VOL_CTRL1,
        Register::DIG_VOL_CTRL2,
        Register::AUTO_MUTE_CTRL,
        Register::AUTO_MUTE_TIME,
        Register::AMUTE_DELAY,
        Register::ANA_CTRL,
        Register::AGAIN,
        Register::BQ_WR_CTRL1,
        Register::DAC_CTRL,
        Register::ADR_PIN_CTRL,
        Register::ADR_PIN_CONFIG,
        Register::DSP_MISC,
        Register::DIE_ID,
        Register::POWER_STATE,
        Register::AUTOMUTE_STATE,
        Register::PHASE_CTRL,
        Register::SS_CTRL0,
        Register::SS_CTRL1,
        Register::SS_CTRL2,
        Register::SS_CTRL3,
        Register::SS_CTRL4,
        Register::CHAN_FAULT,
        Register::GLOBAL_FAULT1,
        Register::GLOBAL_FAULT2,
        Register::OT_WARNING,
        Register::PIN_CONTROL1,
        Register::PIN_CONTROL2,
        Register::FAULT_CLEAR,
    ];

    /// Register address as sent on the bus.
    #[inline]
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Look up the register at `addr`, if it is part of the map.
    pub fn from_addr(addr: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.addr() == addr)
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg.addr()
    }
}

// ---------------------------------------------------------------------------
// Register field values
// ---------------------------------------------------------------------------

/// RESET_CTRL bit 4: reset the digital core.
pub const RESET_CTRL_DIGITAL_CORE: u8 = 0b0001_0000;

/// RESET_CTRL bit 0: restore every control register to its default.
pub const RESET_CTRL_REGISTERS: u8 = 0b0000_0001;

/// DEVICE_CTRL_2 bit 4: hold the DSP in reset.
pub const CTRL2_DSP_RESET: u8 = 0b0001_0000;

/// DEVICE_CTRL_2 bit position of the soft-mute flag.
pub const CTRL2_MUTE_BIT: u8 = 3;

/// DEVICE_CTRL_2 soft-mute flag.
pub const CTRL2_MUTE: u8 = 1 << CTRL2_MUTE_BIT;

/// DEVICE_CTRL_2 bits 1:0: control state field.
pub const CTRL2_STATE_MASK: u8 = 0b0000_0011;

/// SAP_CTRL1 power-on default: I²S framing, 24-bit word.
pub const SAP_CTRL1_I2S_DEFAULT: u8 = 0x00;

/// AGAIN bits 4:0 hold the attenuation code.
pub const AGAIN_MASK: u8 = 0b0001_1111;

/// FAULT_CLEAR bit 7: clear latched analog faults.
pub const FAULT_CLEAR_ANALOG: u8 = 0b1000_0000;

/// DIG_VOL code for 0 dB.
pub const DIG_VOL_0DB: u8 = 0x30;

/// DIG_VOL code that mutes the digital path.
pub const DIG_VOL_MUTE: u8 = 0xFF;
