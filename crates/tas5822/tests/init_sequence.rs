//! Power-on sequence tests against the in-memory register model.
//!
//! Run with: cargo test -p tas5822 --test init_sequence

// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use tas5822::config::Timing;
use tas5822::mock::{RecordingDelay, RegisterModel};
use tas5822::{AnalogGain, ControlWord, Error, InitError, InitStep, Register, Tas5822};

const ADDR: u8 = 0x44;

/// Reset line whose first `set_low` fails.
struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Pin edge or wait, in the order the driver issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Low,
    High,
    Delay(u32),
    DelayNs(u32),
}

type EventLog = RefCell<heapless::Vec<Event, 16>>;

/// Reset line that appends its edges to a shared log.
struct LoggedPin<'a>(&'a EventLog);

impl ErrorType for LoggedPin<'_> {
    type Error = Infallible;
}

impl OutputPin for LoggedPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::Low).unwrap();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::High).unwrap();
        Ok(())
    }
}

/// Delay that appends its waits to the same log instead of sleeping.
struct LoggedDelay<'a>(&'a EventLog);

impl DelayNs for LoggedDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(Event::DelayNs(ns)).unwrap();
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(Event::Delay(ms)).unwrap();
    }
}

// ---------------------------------------------------------------------------
// Successful sequence
// ---------------------------------------------------------------------------

/// After init the chip is playing, muted, at the quietest analog gain.
#[test]
fn initialised_state_is_play_muted_quietest() {
    let mut model = RegisterModel::new(ADDR);
    let mut amp = Tas5822::new(&mut model, RecordingDelay::new(), ADDR);
    amp.init().expect("init must succeed on a healthy bus");
    drop(amp);

    assert_eq!(
        model.value(Register::DEVICE_CTRL_2),
        ControlWord::PLAY_MUTED.bits()
    );
    assert_eq!(model.value(Register::DEVICE_CTRL_2), 0b0000_1011);
    assert_eq!(model.value(Register::AGAIN), AnalogGain::QUIETEST.code());
    assert_eq!(model.value(Register::AGAIN), 31);
    assert_eq!(model.value(Register::SAP_CTRL1), 0x00);
    assert_eq!(model.value(Register::RESET_CTRL), 0b0001_0001);
}

/// Register writes happen in the documented order with the documented values.
#[test]
fn writes_follow_power_on_order() {
    let mut model = RegisterModel::new(ADDR);
    Tas5822::new(&mut model, RecordingDelay::new(), ADDR)
        .init()
        .unwrap();

    assert_eq!(
        model.write_log(),
        &[
            (0x03, 0b0001_1010), // DSP reset + Hi-Z + mute
            (0x01, 0b0001_0001), // core + register reset
            (0x03, 0b0000_1010), // DSP normal + Hi-Z + mute
            (0x33, 0x00),        // I2S framing
            (0x03, 0b0000_1010), // mute (already set)
            (0x03, 0b0000_1011), // play
            (0x54, 31),          // -15.5 dBFS
        ]
    );
    // Only the two read-modify-write steps read anything.
    assert_eq!(model.register(Register::DEVICE_CTRL_2).read_count, 2);
    assert_eq!(model.total_read_count(), 2);
}

/// Stale register contents do not leak through: mute is forced and the
/// state field ends at play whatever the preloaded value was.
#[test]
fn init_overrides_stale_control_word() {
    let mut model = RegisterModel::new(ADDR);
    model.set_register(Register::DEVICE_CTRL_2, 0b0000_0000);
    model.set_register(Register::AGAIN, 0);
    Tas5822::new(&mut model, RecordingDelay::new(), ADDR)
        .init()
        .unwrap();

    let word = ControlWord::from_bits(model.value(Register::DEVICE_CTRL_2));
    assert!(word.is_muted());
    assert!(!word.dsp_in_reset());
    assert_eq!(word.state(), tas5822::ControlState::Play);
    assert_eq!(model.value(Register::AGAIN), 31);
}

/// The bus is started once per init call.
#[test]
fn init_begins_bus() {
    let mut model = RegisterModel::new(ADDR);
    let mut amp = Tas5822::new(&mut model, RecordingDelay::new(), ADDR);
    amp.init().unwrap();
    amp.init().unwrap();
    drop(amp);
    assert_eq!(model.begin_calls(), 2);
}

/// The reset line is pulsed low then high before any register traffic.
#[test]
fn reset_line_is_pulsed_low_then_high() {
    let mut pin = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);
    let mut model = RegisterModel::new(ADDR);
    let amp = Tas5822::new(&mut model, RecordingDelay::new(), ADDR);
    let mut amp = amp.with_reset_line(pin.clone());
    amp.init().unwrap();

    let (_, delay, _) = amp.release();
    assert_eq!(delay.calls_ms.as_slice(), &[10, 10, 5, 5]);
    pin.done();
}

/// Each reset-line edge is followed by its hold, and the settle delays only
/// start once the pin is released.
#[test]
fn reset_holds_follow_each_edge() {
    let log = EventLog::default();
    let mut model = RegisterModel::new(ADDR);
    let amp = Tas5822::new(&mut model, LoggedDelay(&log), ADDR);
    let mut amp = amp.with_reset_line(LoggedPin(&log));
    amp.init().unwrap();

    assert_eq!(
        log.borrow().as_slice(),
        &[
            Event::Low,
            Event::Delay(10),
            Event::High,
            Event::Delay(10),
            Event::Delay(5),
            Event::Delay(5),
        ]
    );
}

/// Custom hold times keep the same ordering.
#[test]
fn custom_reset_hold_follows_each_edge() {
    let log = EventLog::default();
    let timing = Timing {
        reset_hold_ms: 25,
        settle_ms: 8,
    };
    let mut model = RegisterModel::new(ADDR);
    Tas5822::new(&mut model, LoggedDelay(&log), ADDR)
        .with_reset_line(LoggedPin(&log))
        .with_timing(timing)
        .init()
        .unwrap();

    assert_eq!(
        log.borrow().as_slice(),
        &[
            Event::Low,
            Event::Delay(25),
            Event::High,
            Event::Delay(25),
            Event::Delay(8),
            Event::Delay(8),
        ]
    );
}

/// A successful init writes nothing to the diagnostic sink.
#[test]
fn success_is_silent() {
    let mut model = RegisterModel::new(ADDR);
    let amp = Tas5822::new(&mut model, RecordingDelay::new(), ADDR);
    let mut amp = amp.with_log_sink(String::new());
    amp.init().unwrap();
    assert!(amp.log_sink().is_empty());
}

// ---------------------------------------------------------------------------
// Failure at each step
// ---------------------------------------------------------------------------

/// Register steps in the order their data writes reach the bus.
const WRITE_STEPS: [InitStep; 7] = [
    InitStep::DspResetHiZMute,
    InitStep::CoreAndRegisterReset,
    InitStep::DspNormalHiZMute,
    InitStep::AudioFormat,
    InitStep::Mute,
    InitStep::Play,
    InitStep::MinimumGain,
];

/// Failing write N stops the sequence at the matching step, and nothing
/// after it reaches the chip.
#[test]
fn failing_step_aborts_remaining_sequence() {
    for (index, expected_step) in WRITE_STEPS.iter().copied().enumerate() {
        let mut model = RegisterModel::new(ADDR);
        model.fail_write_number(index as u32);
        let result = Tas5822::new(&mut model, RecordingDelay::new(), ADDR).init();

        let err = result.expect_err("injected failure must surface");
        assert_eq!(err.step, expected_step, "write #{index}");
        assert!(matches!(err.cause, Error::Bus(_)), "write #{index}: {err}");

        // Only the writes before the failing one were committed.
        assert_eq!(model.total_write_count(), index as u32, "write #{index}");
        assert_eq!(model.write_log().len(), index, "write #{index}");
    }
}

/// Later registers keep a zero write count when an early step fails.
#[test]
fn audio_format_failure_leaves_gain_untouched() {
    let mut model = RegisterModel::new(ADDR);
    model.fail_writes_to(Register::SAP_CTRL1);
    let err = Tas5822::new(&mut model, RecordingDelay::new(), ADDR)
        .init()
        .unwrap_err();

    assert_eq!(err.step, InitStep::AudioFormat);
    assert_eq!(model.register(Register::AGAIN).write_count, 0);
    assert_eq!(model.register(Register::DEVICE_CTRL_2).read_count, 0);
    // DSP reset write and DSP normal write only.
    assert_eq!(model.register(Register::DEVICE_CTRL_2).write_count, 2);
}

/// A failing gain write is the last step; the control word is already final.
#[test]
fn gain_failure_reports_last_step() {
    let mut model = RegisterModel::new(ADDR);
    model.fail_writes_to(Register::AGAIN);
    let err = Tas5822::new(&mut model, RecordingDelay::new(), ADDR)
        .init()
        .unwrap_err();

    assert_eq!(err.step, InitStep::MinimumGain);
    assert_eq!(model.value(Register::DEVICE_CTRL_2), 0b0000_1011);
}

/// A failed read inside the mute step aborts before its write.
#[test]
fn read_failure_during_mute_aborts() {
    let mut model = RegisterModel::new(ADDR);
    model.fail_reads(true);
    let err = Tas5822::new(&mut model, RecordingDelay::new(), ADDR)
        .init()
        .unwrap_err();

    assert_eq!(
        err,
        InitError {
            step: InitStep::Mute,
            cause: Error::NoData
        }
    );
    assert_eq!(model.total_write_count(), 4);
    assert_eq!(model.register(Register::AGAIN).write_count, 0);
}

/// A chip that does not answer fails at the first register write.
#[test]
fn absent_chip_fails_first_write() {
    let mut model = RegisterModel::new(ADDR);
    let err = Tas5822::new(&mut model, RecordingDelay::new(), 0x2C)
        .init()
        .unwrap_err();
    assert_eq!(err.step, InitStep::DspResetHiZMute);
    assert_eq!(model.total_write_count(), 0);
}

/// A broken reset line stops init before any register traffic.
#[test]
fn reset_line_failure_aborts_before_bus_traffic() {
    let mut model = RegisterModel::new(ADDR);
    let mut amp = Tas5822::new(&mut model, RecordingDelay::new(), ADDR)
        .with_reset_line(BrokenPin)
        .with_log_sink(String::new());
    let err = amp.init().unwrap_err();

    assert_eq!(err.step, InitStep::ResetLine);
    assert_eq!(err.cause, Error::ResetLine);
    assert_eq!(amp.log_sink().as_str(), "TAS5822: Failed to set: Reset Line\n");
    drop(amp);
    assert_eq!(model.total_write_count(), 0);
}

/// Each failure writes exactly one prefixed line naming the step.
#[test]
fn failure_is_logged_to_sink() {
    let mut model = RegisterModel::new(ADDR);
    model.fail_write_number(1);
    let amp = Tas5822::new(&mut model, RecordingDelay::new(), ADDR);
    let mut amp = amp.with_log_sink(String::new());
    amp.init().unwrap_err();
    assert_eq!(
        amp.log_sink().as_str(),
        "TAS5822: Failed to set: Reset Digital Core + Reset Registers\n"
    );
}

/// The sink may be lent rather than moved.
#[test]
fn borrowed_sink_receives_lines() {
    let mut lines = String::new();
    let mut model = RegisterModel::new(ADDR);
    model.fail_writes_to(Register::AGAIN);
    Tas5822::new(&mut model, RecordingDelay::new(), ADDR)
        .with_log_sink(&mut lines)
        .init()
        .unwrap_err();
    assert_eq!(lines, "TAS5822: Failed to set: Analog Gain\n");
}
