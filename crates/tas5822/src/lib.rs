//! Control driver for the Texas Instruments TAS5822 class-D amplifier
//!
//! The TAS5822 takes audio over I²S and is configured over I²C. This crate
//! covers the I²C side: bringing the chip from power-on to a muted playing
//! state, and changing mute, control state, analog gain and digital volume
//! afterwards.
//!
//! # Layers
//!
//! ```text
//! Application
//!         ↓
//! Tas5822 driver (this crate: power-on sequence, bit-field updates)
//!         ↓
//! Wire (byte transport contract)  ←  I2cWire (any embedded-hal 1.0 I2c)
//!         ↓
//! MCU I²C peripheral
//! ```
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls
//! - `defmt`: defmt logging and `defmt::Format` derives (target builds)
//! - `tracing`: tracing events (host builds)
//!
//! # Example
//!
//! ```no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::I2c;
//! use tas5822::{config, I2cWire, Tas5822};
//!
//! fn bring_up<I: I2c, D: DelayNs>(i2c: I, delay: D) -> Result<(), tas5822::Error> {
//!     let mut bus = I2cWire::new(i2c);
//!     let mut amp = Tas5822::new(&mut bus, delay, config::DEFAULT_ADDRESS);
//!     amp.init().map_err(|e| e.cause)?; // leaves the chip muted
//!     amp.set_analog_gain(-6.0)?;
//!     amp.set_muted(false)
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)]
// Pedantic lints suppressed for this register-level driver:
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // register accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod control;
pub mod driver;
pub mod error;
pub mod faults;
pub mod gain;
pub mod i2c;
pub mod init;
pub mod mock;
pub mod registers;
pub mod wire;

pub use control::{ControlState, ControlWord};
pub use driver::{NoLogSink, NoResetLine, Tas5822};
pub use error::{Error, InitError};
pub use faults::FaultStatus;
pub use gain::{AnalogGain, DigitalVolume};
pub use i2c::I2cWire;
pub use init::InitStep;
pub use registers::Register;
pub use wire::{BusStatus, Wire};
