//! Probe outcome classification

use busscan_hal::{AddressAck, BusError};

/// What a single probe found at an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeOutcome {
    /// A device acknowledged its address
    Acknowledged,
    /// Address was NAKed, or the bus was busy and the probe was skipped
    NotPresent,
    /// Peripheral flagged a bus error during the address phase
    AddressError,
    /// A status flag never changed (typically no bus connected)
    Timeout,
}

impl ProbeOutcome {
    /// Check if a device answered
    ///
    /// Every other outcome is handled identically: nothing is reported.
    pub fn is_present(&self) -> bool {
        matches!(self, ProbeOutcome::Acknowledged)
    }
}

impl From<AddressAck> for ProbeOutcome {
    fn from(ack: AddressAck) -> Self {
        match ack {
            AddressAck::Acknowledged => ProbeOutcome::Acknowledged,
            AddressAck::NotAcknowledged => ProbeOutcome::NotPresent,
        }
    }
}

impl From<BusError> for ProbeOutcome {
    fn from(e: BusError) -> Self {
        match e {
            BusError::BusBusy => ProbeOutcome::NotPresent,
            BusError::AddressingError => ProbeOutcome::AddressError,
            BusError::Timeout => ProbeOutcome::Timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ack_is_present() {
        assert!(ProbeOutcome::Acknowledged.is_present());
        assert!(!ProbeOutcome::NotPresent.is_present());
        assert!(!ProbeOutcome::AddressError.is_present());
        assert!(!ProbeOutcome::Timeout.is_present());
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(ProbeOutcome::from(BusError::BusBusy), ProbeOutcome::NotPresent);
        assert_eq!(
            ProbeOutcome::from(BusError::AddressingError),
            ProbeOutcome::AddressError
        );
        assert_eq!(ProbeOutcome::from(BusError::Timeout), ProbeOutcome::Timeout);
    }
}
