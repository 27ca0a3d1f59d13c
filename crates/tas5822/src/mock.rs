//! In-memory TAS5822 model for host-side testing
//!
//! [`RegisterModel`] implements [`Wire`] and behaves like the chip's page 0
//! register file: the first byte of a write selects a register, the second
//! byte stores into it, and reads return the selected register. Every access
//! is counted per register so tests can assert what the driver touched.
//!
//! Failures can be injected per register or per write so that tests can stop
//! the power-on sequence at any step.
//!
//! [`RecordingDelay`] implements `DelayNs` and records each millisecond
//! delay instead of sleeping.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::registers::Register;
use crate::wire::{BusStatus, Wire};

/// Number of write transactions remembered by [`RegisterModel::write_log`].
pub const WRITE_LOG_LEN: usize = 64;

/// State of one modelled register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterSlot {
    /// Current value.
    pub value: u8,
    /// Completed data writes.
    pub write_count: u32,
    /// Bytes read back.
    pub read_count: u32,
}

/// Register-file model of a TAS5822 at one bus address.
pub struct RegisterModel {
    address: u8,
    slots: [RegisterSlot; 256],
    active: bool,
    target: Option<u8>,
    pending: Option<u8>,
    read_remaining: u8,
    begin_calls: u32,
    writes_seen: u32,
    fail_register: Option<Register>,
    fail_write_index: Option<u32>,
    fail_reads: bool,
    log: Vec<(u8, u8), WRITE_LOG_LEN>,
}

impl RegisterModel {
    /// Model a chip answering at `address`, every register zero.
    pub fn new(address: u8) -> Self {
        Self {
            address,
            slots: [RegisterSlot::default(); 256],
            active: false,
            target: None,
            pending: None,
            read_remaining: 0,
            begin_calls: 0,
            writes_seen: 0,
            fail_register: None,
            fail_write_index: None,
            fail_reads: false,
            log: Vec::new(),
        }
    }

    /// Clear every register, counter, log entry and injected failure.
    pub fn reset(&mut self) {
        *self = Self::new(self.address);
    }

    /// Preload a register without counting a write.
    pub fn set_register(&mut self, reg: Register, value: u8) {
        if let Some(slot) = self.slots.get_mut(usize::from(reg.addr())) {
            slot.value = value;
        }
    }

    /// Current state of a register.
    pub fn register(&self, reg: Register) -> RegisterSlot {
        self.slots
            .get(usize::from(reg.addr()))
            .copied()
            .unwrap_or_default()
    }

    /// Shorthand for `register(reg).value`.
    pub fn value(&self, reg: Register) -> u8 {
        self.register(reg).value
    }

    /// Data writes across all registers.
    pub fn total_write_count(&self) -> u32 {
        self.slots
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.write_count))
    }

    /// Reads across all registers.
    pub fn total_read_count(&self) -> u32 {
        self.slots
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.read_count))
    }

    /// Times [`Wire::begin`] was called.
    pub fn begin_calls(&self) -> u32 {
        self.begin_calls
    }

    /// Committed `(register, value)` writes in order, up to [`WRITE_LOG_LEN`].
    pub fn write_log(&self) -> &[(u8, u8)] {
        &self.log
    }

    /// NACK every data write to `reg`.
    pub fn fail_writes_to(&mut self, reg: Register) {
        self.fail_register = Some(reg);
    }

    /// NACK the data write with zero-based position `index`, counting every
    /// write transaction that carried a data byte.
    pub fn fail_write_number(&mut self, index: u32) {
        self.fail_write_index = Some(index);
    }

    /// Make every `request_from` return no data.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    fn should_fail(&self, target: u8, index: u32) -> bool {
        self.fail_register.map(Register::addr) == Some(target)
            || self.fail_write_index == Some(index)
    }

    fn commit(&mut self, target: u8, value: u8) {
        if let Some(slot) = self.slots.get_mut(usize::from(target)) {
            slot.value = value;
            slot.write_count = slot.write_count.saturating_add(1);
        }
        let _ = self.log.push((target, value)); // full log: keep the first entries
    }
}

impl Wire for RegisterModel {
    fn begin(&mut self) {
        self.begin_calls = self.begin_calls.saturating_add(1);
    }

    fn begin_transmission(&mut self, address: u8) {
        self.active = address == self.address;
        self.pending = None;
        if self.active {
            self.target = None;
        }
    }

    fn write(&mut self, byte: u8) -> bool {
        if !self.active {
            return false;
        }
        match (self.target, self.pending) {
            (None, _) => {
                self.target = Some(byte);
                true
            }
            (Some(_), None) => {
                self.pending = Some(byte);
                true
            }
            // One data byte per transaction.
            (Some(_), Some(_)) => false,
        }
    }

    fn end_transmission(&mut self) -> u8 {
        if !self.active {
            return BusStatus::AddressNack.code();
        }
        self.active = false;
        let (Some(target), Some(value)) = (self.target, self.pending.take()) else {
            // Register select only: the write phase of a read.
            return 0;
        };
        let index = self.writes_seen;
        self.writes_seen = self.writes_seen.saturating_add(1);
        if self.should_fail(target, index) {
            return BusStatus::DataNack.code();
        }
        self.commit(target, value);
        0
    }

    fn request_from(&mut self, address: u8, count: u8) -> u8 {
        if address != self.address || self.fail_reads || self.target.is_none() {
            self.read_remaining = 0;
            return 0;
        }
        self.read_remaining = count;
        count
    }

    fn read(&mut self) -> Option<u8> {
        if self.read_remaining == 0 {
            return None;
        }
        self.read_remaining = self.read_remaining.saturating_sub(1);
        let slot = self.slots.get_mut(usize::from(self.target?))?;
        slot.read_count = slot.read_count.saturating_add(1);
        Some(slot.value)
    }
}

/// Delay provider that records instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    /// Every `delay_ms` argument, in call order (first 16 kept).
    pub calls_ms: Vec<u32, 16>,
    /// Total requested delay in nanoseconds.
    pub total_ns: u64,
}

impl RecordingDelay {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requested delay in whole milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.total_ns.saturating_div(1_000_000)
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns = self.total_ns.saturating_add(u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        let _ = self.calls_ms.push(ms);
        self.total_ns = self
            .total_ns
            .saturating_add(u64::from(ms).saturating_mul(1_000_000));
    }
}
