//! Byte-level two-wire transport contract.
//!
//! The driver talks to the chip through [`Wire`], a small trait shaped after
//! the classic "begin transmission / write bytes / end transmission" bus API
//! that microcontroller I²C peripherals commonly expose. Any such bus can be
//! plugged in directly; embedded-hal 1.0 buses go through
//! [`crate::i2c::I2cWire`].
//!
//! `&mut T` implements `Wire` whenever `T` does, so a single bus can be lent
//! to a driver without giving up ownership.

/// Addressed byte transport shared with other devices on the bus.
///
/// At most one transaction is in flight at a time: the first byte written
/// after [`begin_transmission`](Wire::begin_transmission) selects the
/// register, subsequent bytes are payload.
pub trait Wire {
    /// Bring up the bus. Must be idempotent.
    fn begin(&mut self);

    /// Start queuing a write transaction to `address`.
    fn begin_transmission(&mut self, address: u8);

    /// Queue one byte. Returns `false` if the byte was not accepted.
    fn write(&mut self, byte: u8) -> bool;

    /// Send the queued bytes and release the bus.
    ///
    /// Returns the completion status; `0` is success, see [`BusStatus`] for
    /// the non-zero codes.
    fn end_transmission(&mut self) -> u8;

    /// Read `count` bytes from `address` into the receive buffer.
    ///
    /// Returns the number of bytes made available.
    fn request_from(&mut self, address: u8, count: u8) -> u8;

    /// Take the next byte from the receive buffer, `None` once it is drained.
    fn read(&mut self) -> Option<u8>;
}

impl<T: Wire + ?Sized> Wire for &mut T {
    fn begin(&mut self) {
        T::begin(self);
    }

    fn begin_transmission(&mut self, address: u8) {
        T::begin_transmission(self, address);
    }

    fn write(&mut self, byte: u8) -> bool {
        T::write(self, byte)
    }

    fn end_transmission(&mut self) -> u8 {
        T::end_transmission(self)
    }

    fn request_from(&mut self, address: u8, count: u8) -> u8 {
        T::request_from(self, address, count)
    }

    fn read(&mut self) -> Option<u8> {
        T::read(self)
    }
}

/// Non-zero completion status of a write transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusStatus {
    /// 1: more bytes queued than the transmit buffer holds.
    DataTooLong,
    /// 2: no acknowledge on the address byte (device absent or wrong address).
    AddressNack,
    /// 3: no acknowledge on a data byte.
    DataNack,
    /// 4: bus error, arbitration loss or other failure.
    Other,
    /// 5: the transaction timed out.
    Timeout,
    /// Any other non-zero code reported by the bus.
    Unknown(u8),
}

impl BusStatus {
    /// Decode a completion code. `0` (success) yields `None`.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(BusStatus::DataTooLong),
            2 => Some(BusStatus::AddressNack),
            3 => Some(BusStatus::DataNack),
            4 => Some(BusStatus::Other),
            5 => Some(BusStatus::Timeout),
            other => Some(BusStatus::Unknown(other)),
        }
    }

    /// Completion code this status was decoded from.
    pub const fn code(self) -> u8 {
        match self {
            BusStatus::DataTooLong => 1,
            BusStatus::AddressNack => 2,
            BusStatus::DataNack => 3,
            BusStatus::Other => 4,
            BusStatus::Timeout => 5,
            BusStatus::Unknown(code) => code,
        }
    }
}

impl core::fmt::Display for BusStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DataTooLong => write!(f, "transmit buffer overflow"),
            Self::AddressNack => write!(f, "address not acknowledged"),
            Self::DataNack => write!(f, "data not acknowledged"),
            Self::Other => write!(f, "bus error"),
            Self::Timeout => write!(f, "bus timeout"),
            Self::Unknown(code) => write!(f, "bus status {code}"),
        }
    }
}
