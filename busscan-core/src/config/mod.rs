//! Scan configuration
//!
//! Compile-time tunables. The firmware build script fills a
//! [`ScanConfig`] from `scan.toml` and checks it with
//! [`ScanConfig::validate`] before anything is flashed.

use core::ops::Range;

use busscan_hal::{BusAddress, PollBudget};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scan engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ScanConfig {
    /// First address probed in a sweep
    pub first_address: u8,
    /// One past the last address probed in a sweep
    pub end_address: u8,
    /// Pause between cycles in milliseconds
    pub idle_ms: u32,
    /// Iteration cap for every busy-poll on the bus
    pub poll_limit: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors from configuration validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Address range has no addresses in it
    EmptyRange,
    /// Address range includes reserved addresses
    ReservedAddress,
    /// Poll limit of zero would time out every wait
    ZeroPollLimit,
}

impl ScanConfig {
    /// Full non-reserved range, 30 s idle, one million polls
    pub const DEFAULT: Self = Self {
        first_address: BusAddress::SCAN_RANGE.start,
        end_address: BusAddress::SCAN_RANGE.end,
        idle_ms: 30_000,
        poll_limit: PollBudget::DEFAULT_LIMIT,
    };

    /// Check the configuration for values the engine cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_address >= self.end_address {
            return Err(ConfigError::EmptyRange);
        }
        if self.first_address < BusAddress::SCAN_RANGE.start
            || self.end_address > BusAddress::SCAN_RANGE.end
        {
            return Err(ConfigError::ReservedAddress);
        }
        if self.poll_limit == 0 {
            return Err(ConfigError::ZeroPollLimit);
        }
        Ok(())
    }

    /// Address range clamped to the non-reserved block
    ///
    /// An unvalidated config can never make the engine probe a reserved
    /// address.
    pub fn scan_range(&self) -> Range<u8> {
        let start = self.first_address.max(BusAddress::SCAN_RANGE.start);
        let end = self.end_address.min(BusAddress::SCAN_RANGE.end);
        start..end.max(start)
    }

    /// Polling budget handed to the prober
    pub fn poll_budget(&self) -> PollBudget {
        PollBudget::new(self.poll_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ScanConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.scan_range(), 8..120);
        assert_eq!(config.idle_ms, 30_000);
        assert_eq!(config.poll_limit, 1_000_000);
    }

    #[test]
    fn test_empty_range_rejected() {
        let config = ScanConfig {
            first_address: 0x40,
            end_address: 0x40,
            ..ScanConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyRange));
    }

    #[test]
    fn test_reserved_range_rejected() {
        let low = ScanConfig {
            first_address: 0x00,
            ..ScanConfig::DEFAULT
        };
        assert_eq!(low.validate(), Err(ConfigError::ReservedAddress));

        let high = ScanConfig {
            end_address: 0x80,
            ..ScanConfig::DEFAULT
        };
        assert_eq!(high.validate(), Err(ConfigError::ReservedAddress));
    }

    #[test]
    fn test_zero_poll_limit_rejected() {
        let config = ScanConfig {
            poll_limit: 0,
            ..ScanConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollLimit));
    }

    #[test]
    fn test_scan_range_clamps_unvalidated_config() {
        let config = ScanConfig {
            first_address: 0x02,
            end_address: 0x7F,
            ..ScanConfig::DEFAULT
        };
        assert_eq!(config.scan_range(), 0x08..0x78);

        let inverted = ScanConfig {
            first_address: 0x70,
            end_address: 0x10,
            ..ScanConfig::DEFAULT
        };
        assert!(inverted.scan_range().is_empty());
    }
}
