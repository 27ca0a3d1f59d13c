//! [`Wire`] on top of an embedded-hal 1.0 I²C bus.
//!
//! Bytes queued between `begin_transmission` and `end_transmission` are sent
//! as one [`I2c::write`]; `request_from` performs one [`I2c::read`] and
//! `read` drains the result. Works with any HAL bus, including the
//! `embedded-hal-bus` shared-bus wrappers.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};
use heapless::Vec;

use crate::wire::{BusStatus, Wire};

/// Transmit and receive buffer size, in bytes.
pub const BUFFER_LEN: usize = 32;

/// embedded-hal I²C bus adapted to the [`Wire`] contract.
pub struct I2cWire<I> {
    i2c: I,
    address: u8,
    transmitting: bool,
    overflowed: bool,
    tx: Vec<u8, BUFFER_LEN>,
    rx: Vec<u8, BUFFER_LEN>,
    rx_pos: usize,
}

impl<I: I2c> I2cWire<I> {
    /// Wrap a configured I²C bus.
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            address: 0,
            transmitting: false,
            overflowed: false,
            tx: Vec::new(),
            rx: Vec::new(),
            rx_pos: 0,
        }
    }

    /// Give the bus back.
    pub fn release(self) -> I {
        self.i2c
    }

    fn status_for(kind: ErrorKind) -> BusStatus {
        match kind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => BusStatus::DataNack,
            ErrorKind::NoAcknowledge(_) => BusStatus::AddressNack,
            _ => BusStatus::Other,
        }
    }
}

impl<I: I2c> Wire for I2cWire<I> {
    fn begin(&mut self) {
        // The HAL hands over an already configured bus.
    }

    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.transmitting = true;
        self.overflowed = false;
        self.tx.clear();
    }

    fn write(&mut self, byte: u8) -> bool {
        if !self.transmitting {
            return false;
        }
        if self.tx.push(byte).is_err() {
            self.overflowed = true;
            return false;
        }
        true
    }

    fn end_transmission(&mut self) -> u8 {
        if !self.transmitting {
            return BusStatus::Other.code();
        }
        self.transmitting = false;
        if self.overflowed {
            return BusStatus::DataTooLong.code();
        }
        match self.i2c.write(self.address, &self.tx) {
            Ok(()) => 0,
            Err(e) => Self::status_for(e.kind()).code(),
        }
    }

    fn request_from(&mut self, address: u8, count: u8) -> u8 {
        let len = usize::from(count).min(BUFFER_LEN);
        self.rx.clear();
        self.rx_pos = 0;
        if self.rx.resize(len, 0).is_err() {
            return 0;
        }
        match self.i2c.read(address, &mut self.rx) {
            Ok(()) => u8::try_from(len).unwrap_or(u8::MAX),
            Err(_) => {
                self.rx.clear();
                0
            }
        }
    }

    fn read(&mut self) -> Option<u8> {
        let byte = self.rx.get(self.rx_pos).copied()?;
        self.rx_pos = self.rx_pos.saturating_add(1);
        Some(byte)
    }
}
