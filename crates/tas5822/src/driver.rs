//! TAS5822 control driver.
//!
//! Talks to the chip through any [`Wire`] and waits through any
//! [`DelayNs`]. The audio stream itself arrives on the I²S pins and never
//! passes through this driver.
//!
//! # Access model
//!
//! Every operation takes `&mut self` and completes its bus transactions
//! before returning. Mute and control-state changes are a read followed by a
//! write of DEVICE_CTRL_2; nothing stops another bus master from changing the
//! register in between, so the driver must be the only writer of its chip's
//! address. Share the bus itself through `&mut` or an `embedded-hal-bus`
//! wrapper, never the chip.
//!
//! # Reset line
//!
//! The optional reset line is the chip's active-low PDN pin. It is pulsed
//! once at the start of [`Tas5822::init`] and left high.

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::config::{Timing, LOG_PREFIX};
use crate::control::{ControlState, ControlWord};
use crate::error::{Error, InitError};
use crate::faults::FaultStatus;
use crate::gain::{AnalogGain, DigitalVolume};
use crate::init::InitStep;
use crate::registers::{Register, FAULT_CLEAR_ANALOG};
use crate::wire::{BusStatus, Wire};

/// Placeholder reset line for a driver built without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResetLine;

impl ErrorType for NoResetLine {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoResetLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Diagnostic sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLogSink;

impl core::fmt::Write for NoLogSink {
    fn write_str(&mut self, _s: &str) -> core::fmt::Result {
        Ok(())
    }
}

/// TAS5822 driver.
///
/// - `W`: bus transport, usually `&mut` to a shared bus
/// - `D`: delay provider used by [`init`](Self::init)
/// - `P`: reset (PDN) line, [`NoResetLine`] when absent
/// - `S`: diagnostic sink for failed init steps, [`NoLogSink`] when absent
pub struct Tas5822<W, D, P = NoResetLine, S = NoLogSink> {
    wire: W,
    delay: D,
    address: u8,
    reset_line: Option<P>,
    log_sink: S,
    timing: Timing,
}

impl<W: Wire, D: DelayNs> Tas5822<W, D> {
    /// Create a driver for the chip at 7-bit `address`.
    ///
    /// No bus traffic happens until the first operation.
    pub fn new(wire: W, delay: D, address: u8) -> Self {
        Self {
            wire,
            delay,
            address,
            reset_line: None,
            log_sink: NoLogSink,
            timing: Timing::default(),
        }
    }
}

impl<W, D, P, S> Tas5822<W, D, P, S> {
    /// Attach the PDN reset line, pulsed by [`init`](Self::init).
    pub fn with_reset_line<P2: OutputPin>(self, pin: P2) -> Tas5822<W, D, P2, S> {
        Tas5822 {
            wire: self.wire,
            delay: self.delay,
            address: self.address,
            reset_line: Some(pin),
            log_sink: self.log_sink,
            timing: self.timing,
        }
    }

    /// Send a prefixed line to `sink` for every failed init step.
    pub fn with_log_sink<S2: core::fmt::Write>(self, sink: S2) -> Tas5822<W, D, P, S2> {
        Tas5822 {
            wire: self.wire,
            delay: self.delay,
            address: self.address,
            reset_line: self.reset_line,
            log_sink: sink,
            timing: self.timing,
        }
    }

    /// Override the init delays. Values below the chip minimums are raised.
    #[must_use]
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing.at_least_minimum();
        self
    }

    /// Bus address given at construction.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Delays used by [`init`](Self::init).
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Diagnostic sink, e.g. to inspect captured lines.
    pub fn log_sink(&self) -> &S {
        &self.log_sink
    }

    /// Destroy the driver and hand back the transport, delay and reset line.
    pub fn release(self) -> (W, D, Option<P>) {
        (self.wire, self.delay, self.reset_line)
    }
}

impl<W: Wire, D, P, S> Tas5822<W, D, P, S> {
    // ── Register primitives ──────────────────────────────────────────────

    /// Write `value` to `reg`: register address then value, one transaction.
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("TAS5822 write {=u8:#x} <- {=u8:#x}", reg.addr(), value);
        #[cfg(feature = "tracing")]
        tracing::trace!(register = reg.addr(), value, "TAS5822 write");

        self.wire.begin_transmission(self.address);
        let reg_accepted = self.wire.write(reg.addr());
        let value_accepted = self.wire.write(value);
        if let Some(status) = BusStatus::from_code(self.wire.end_transmission()) {
            return Err(status.into());
        }
        if !(reg_accepted && value_accepted) {
            return Err(Error::ByteRejected);
        }
        Ok(())
    }

    /// Read one byte from `reg`.
    ///
    /// The register-select phase and the read phase both report failure;
    /// a failed read is never mistaken for a register holding zero.
    pub fn read_register(&mut self, reg: Register) -> Result<u8, Error> {
        self.wire.begin_transmission(self.address);
        let selected = self.wire.write(reg.addr());
        if let Some(status) = BusStatus::from_code(self.wire.end_transmission()) {
            return Err(status.into());
        }
        if !selected {
            return Err(Error::ByteRejected);
        }
        if self.wire.request_from(self.address, 1) == 0 {
            return Err(Error::NoData);
        }
        let value = self.wire.read().ok_or(Error::NoData)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("TAS5822 read {=u8:#x} -> {=u8:#x}", reg.addr(), value);
        #[cfg(feature = "tracing")]
        tracing::trace!(register = reg.addr(), value, "TAS5822 read");

        Ok(value)
    }

    /// Read DEVICE_CTRL_2, apply `f`, write the full byte back.
    ///
    /// Nothing is written if the read fails.
    fn modify_control_word(
        &mut self,
        f: impl FnOnce(ControlWord) -> ControlWord,
    ) -> Result<ControlWord, Error> {
        let current = ControlWord::from_bits(self.read_register(Register::DEVICE_CTRL_2)?);
        let next = f(current);
        self.write_register(Register::DEVICE_CTRL_2, next.bits())?;
        Ok(next)
    }

    // ── Control word ─────────────────────────────────────────────────────

    /// Raw DEVICE_CTRL_2 contents.
    pub fn control_word(&mut self) -> Result<ControlWord, Error> {
        self.read_register(Register::DEVICE_CTRL_2)
            .map(ControlWord::from_bits)
    }

    /// Set or clear soft mute (DEVICE_CTRL_2 bit 3). Other bits are kept.
    pub fn set_muted(&mut self, muted: bool) -> Result<(), Error> {
        self.modify_control_word(|w| w.with_muted(muted))
            .map(|_| ())
    }

    /// Whether soft mute is on.
    pub fn is_muted(&mut self) -> Result<bool, Error> {
        self.control_word().map(ControlWord::is_muted)
    }

    /// Change the control state (DEVICE_CTRL_2 bits 1:0). Other bits are kept.
    pub fn set_control_state(&mut self, state: ControlState) -> Result<(), Error> {
        self.modify_control_word(|w| w.with_state(state))
            .map(|_| ())
    }

    /// Requested control state as held in DEVICE_CTRL_2.
    pub fn control_state(&mut self) -> Result<ControlState, Error> {
        self.control_word().map(ControlWord::state)
    }

    /// State the chip is actually in (POWER_STATE), which can lag behind
    /// the requested state or differ from it after a fault.
    pub fn power_state(&mut self) -> Result<ControlState, Error> {
        self.read_register(Register::POWER_STATE)
            .map(ControlState::from_bits)
    }

    // ── Gain and volume ──────────────────────────────────────────────────

    /// Set the analog gain in dBFS, clamped to [-15.5, 0.0].
    ///
    /// Returns the encoding that was written.
    pub fn set_analog_gain(&mut self, dbfs: f32) -> Result<AnalogGain, Error> {
        let gain = AnalogGain::from_dbfs(dbfs);
        self.write_register(Register::AGAIN, gain.code())?;
        Ok(gain)
    }

    /// Current analog gain.
    pub fn analog_gain(&mut self) -> Result<AnalogGain, Error> {
        self.read_register(Register::AGAIN)
            .map(AnalogGain::from_code)
    }

    /// Set the digital volume in dB, clamped to [-103.0, +24.0].
    ///
    /// Applied in one write; the chip's own ramp settings decide how the
    /// change is faded in.
    pub fn set_digital_volume(&mut self, db: f32) -> Result<DigitalVolume, Error> {
        let volume = DigitalVolume::from_db(db);
        self.write_register(Register::DIG_VOL, volume.code())?;
        Ok(volume)
    }

    /// Current digital volume.
    pub fn digital_volume(&mut self) -> Result<DigitalVolume, Error> {
        self.read_register(Register::DIG_VOL)
            .map(DigitalVolume::from_code)
    }

    // ── Status ───────────────────────────────────────────────────────────

    /// Read the fault and over-temperature warning registers.
    pub fn faults(&mut self) -> Result<FaultStatus, Error> {
        Ok(FaultStatus {
            channel: self.read_register(Register::CHAN_FAULT)?,
            global1: self.read_register(Register::GLOBAL_FAULT1)?,
            global2: self.read_register(Register::GLOBAL_FAULT2)?,
            ot_warning: self.read_register(Register::OT_WARNING)?,
        })
    }

    /// Clear latched analog faults.
    pub fn clear_faults(&mut self) -> Result<(), Error> {
        self.write_register(Register::FAULT_CLEAR, FAULT_CLEAR_ANALOG)
    }

    /// Die identification byte.
    pub fn die_id(&mut self) -> Result<u8, Error> {
        self.read_register(Register::DIE_ID)
    }
}

impl<W, D, P, S> Tas5822<W, D, P, S>
where
    W: Wire,
    D: DelayNs,
    P: OutputPin,
    S: core::fmt::Write,
{
    /// Run the power-on sequence and leave the chip playing, muted, at
    /// -15.5 dBFS analog gain.
    ///
    /// Stops at the first failing step; steps already done are not undone.
    /// Call [`set_muted(false)`](Self::set_muted) afterwards to hear audio.
    pub fn init(&mut self) -> Result<(), InitError> {
        #[cfg(feature = "defmt")]
        defmt::info!("Initialising TAS5822 at {=u8:#x}", self.address);
        #[cfg(feature = "tracing")]
        tracing::info!(address = self.address, "Initialising TAS5822");

        self.wire.begin();

        for step in InitStep::SEQUENCE {
            if let Err(cause) = self.run_step(step) {
                self.report_failure(step, cause);
                return Err(InitError { step, cause });
            }
            if step.needs_settle() {
                self.delay.delay_ms(self.timing.settle_ms);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!("TAS5822 initialisation complete");
        #[cfg(feature = "tracing")]
        tracing::info!("TAS5822 initialisation complete");
        Ok(())
    }

    fn run_step(&mut self, step: InitStep) -> Result<(), Error> {
        match step {
            InitStep::ResetLine => self.pulse_reset_line(),
            InitStep::DspResetHiZMute
            | InitStep::CoreAndRegisterReset
            | InitStep::DspNormalHiZMute
            | InitStep::AudioFormat => match step.register_write() {
                Some((reg, value)) => self.write_register(reg, value),
                None => Ok(()),
            },
            InitStep::Mute => self.set_muted(true),
            InitStep::Play => self.set_control_state(ControlState::Play),
            InitStep::MinimumGain => self.set_analog_gain(AnalogGain::MIN_DBFS).map(|_| ()),
        }
    }

    fn pulse_reset_line(&mut self) -> Result<(), Error> {
        let Some(pin) = self.reset_line.as_mut() else {
            return Ok(());
        };
        pin.set_low().map_err(|_| Error::ResetLine)?;
        self.delay.delay_ms(self.timing.reset_hold_ms);
        pin.set_high().map_err(|_| Error::ResetLine)?;
        self.delay.delay_ms(self.timing.reset_hold_ms);
        Ok(())
    }

    fn report_failure(&mut self, step: InitStep, cause: Error) {
        // Sink errors are ignored.
        let _ = writeln!(self.log_sink, "{LOG_PREFIX}{}", step.failure_message());

        #[cfg(feature = "defmt")]
        defmt::error!("TAS5822 init failed at {}: {}", step, cause);
        #[cfg(feature = "tracing")]
        tracing::error!(step = step.failure_message(), error = %cause, "TAS5822 init failed");
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        let _ = cause;
    }
}
