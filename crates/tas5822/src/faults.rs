//! Fault and warning status snapshot.

/// Raw contents of the four fault/warning registers, read in one call to
/// [`Tas5822::faults`](crate::Tas5822::faults).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultStatus {
    /// CHAN_FAULT (0x70): per-channel over-current and DC faults.
    pub channel: u8,
    /// GLOBAL_FAULT1 (0x71): clock errors, PVDD over/under voltage.
    pub global1: u8,
    /// GLOBAL_FAULT2 (0x72): over-temperature shutdown.
    pub global2: u8,
    /// OT_WARNING (0x73): over-temperature warnings.
    pub ot_warning: u8,
}

impl FaultStatus {
    /// No fault latched and no warning raised.
    pub const fn is_clear(&self) -> bool {
        self.channel == 0 && self.global1 == 0 && self.global2 == 0 && self.ot_warning == 0
    }

    /// A fault that shuts the output stage down is latched.
    ///
    /// Warnings alone do not count.
    pub const fn has_fault(&self) -> bool {
        self.channel != 0 || self.global1 != 0 || self.global2 != 0
    }
}
