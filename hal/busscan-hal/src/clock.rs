//! SCL clock divider calculations
//!
//! Pure arithmetic for the two STM32 I2C peripheral generations, kept
//! apart from the register drivers so it can be checked on the host.
//! Every divider rounds towards the slower bus: a device rated for
//! 400 kHz must never see a faster clock.

use crate::i2c::BusSpeed;

/// TIMINGR field values for the STM32F0/F3/L0 ("v2") I2C block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub presc: u8,
    pub scldel: u8,
    pub sdadel: u8,
    pub sclh: u8,
    pub scll: u8,
}

impl Timing {
    /// Timing for `speed` given the I2C kernel clock
    ///
    /// The prescaler brings the kernel clock down to at most a 4 MHz tick
    /// for standard mode and 8 MHz for fast mode, after which the
    /// reference manual's fixed low/high periods apply.
    pub fn for_speed(kernel_hz: u32, speed: BusSpeed) -> Self {
        match speed {
            BusSpeed::Standard => Self {
                presc: prescaler(kernel_hz, 4_000_000),
                scldel: 0x4,
                sdadel: 0x2,
                sclh: 0x0F,
                scll: 0x13,
            },
            BusSpeed::Fast => Self {
                presc: prescaler(kernel_hz, 8_000_000),
                scldel: 0x3,
                sdadel: match kernel_hz {
                    48_000_000.. => 0x3,
                    16_000_000.. => 0x2,
                    _ => 0x1,
                },
                sclh: 0x03,
                scll: 0x09,
            },
        }
    }

    /// Raw TIMINGR value
    pub fn bits(&self) -> u32 {
        (u32::from(self.presc) << 28)
            | (u32::from(self.scldel) << 20)
            | (u32::from(self.sdadel) << 16)
            | (u32::from(self.sclh) << 8)
            | u32::from(self.scll)
    }
}

fn prescaler(kernel_hz: u32, tick_hz: u32) -> u8 {
    // PRESC is four bits wide
    kernel_hz.div_ceil(tick_hz).saturating_sub(1).min(15) as u8
}

/// CR2/CCR/TRISE settings for the STM32F1/GD32 ("v1") I2C block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockControl {
    /// Peripheral clock in MHz (CR2.FREQ)
    pub freq_mhz: u8,
    /// SCL divider (CCR.CCR)
    pub ccr: u16,
    /// Maximum rise time in peripheral clock ticks, plus one
    pub trise: u8,
    /// Fast mode with a 2:1 low/high duty cycle
    pub fast: bool,
}

impl ClockControl {
    /// Divider settings for `speed` given the APB clock
    pub fn for_speed(pclk_hz: u32, speed: BusSpeed) -> Self {
        let freq_mhz = (pclk_hz / 1_000_000).clamp(2, 50);
        match speed {
            BusSpeed::Standard => Self {
                freq_mhz: freq_mhz as u8,
                ccr: pclk_hz.div_ceil(2 * speed.hz()).clamp(4, 0xFFF) as u16,
                // 1000 ns rise time
                trise: (freq_mhz + 1) as u8,
                fast: false,
            },
            BusSpeed::Fast => Self {
                freq_mhz: freq_mhz as u8,
                ccr: pclk_hz.div_ceil(3 * speed.hz()).clamp(1, 0xFFF) as u16,
                // 300 ns rise time
                trise: (freq_mhz * 300 / 1000 + 1) as u8,
                fast: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Length of one prescaled TIMINGR tick in picoseconds
    fn tick_ps(kernel_hz: u32, timing: Timing) -> u64 {
        (u64::from(timing.presc) + 1) * 1_000_000_000_000 / u64::from(kernel_hz)
    }

    /// Tick length the fixed SCLL/SCLH values are designed for
    fn nominal_tick_ps(speed: BusSpeed) -> u64 {
        match speed {
            BusSpeed::Standard => 250_000,
            BusSpeed::Fast => 125_000,
        }
    }

    #[test]
    fn test_standard_timing() {
        assert_eq!(Timing::for_speed(8_000_000, BusSpeed::Standard).bits(), 0x1042_0F13);
        assert_eq!(Timing::for_speed(48_000_000, BusSpeed::Standard).bits(), 0xB042_0F13);
    }

    #[test]
    fn test_fast_timing() {
        assert_eq!(Timing::for_speed(8_000_000, BusSpeed::Fast).bits(), 0x0031_0309);
        assert_eq!(Timing::for_speed(48_000_000, BusSpeed::Fast).bits(), 0x5033_0309);
    }

    #[test]
    fn test_fast_timing_odd_kernel_clock_rounds_slower() {
        // 12 MHz undivided would give 83 ns ticks and a clock well above 400 kHz
        let timing = Timing::for_speed(12_000_000, BusSpeed::Fast);
        assert_eq!(timing.presc, 1);
        assert!(tick_ps(12_000_000, timing) >= 125_000);

        let timing = Timing::for_speed(36_000_000, BusSpeed::Fast);
        assert_eq!(timing.presc, 4);
        assert!(tick_ps(36_000_000, timing) >= 125_000);
    }

    #[test]
    fn test_timing_tick_never_shorter_than_nominal() {
        for mhz in 2..=48u32 {
            let hz = mhz * 1_000_000;
            for speed in [BusSpeed::Standard, BusSpeed::Fast] {
                let timing = Timing::for_speed(hz, speed);
                assert!(
                    tick_ps(hz, timing) >= nominal_tick_ps(speed),
                    "{} MHz at {} kHz",
                    mhz,
                    speed.khz()
                );
            }
        }
    }

    #[test]
    fn test_prescaler_saturates() {
        assert_eq!(prescaler(1_000_000, 4_000_000), 0);
        assert_eq!(prescaler(200_000_000, 4_000_000), 15);
    }

    #[test]
    fn test_standard_mode_8mhz() {
        let clock = ClockControl::for_speed(8_000_000, BusSpeed::Standard);
        assert_eq!(clock.freq_mhz, 8);
        assert_eq!(clock.ccr, 40);
        assert_eq!(clock.trise, 9);
        assert!(!clock.fast);
    }

    #[test]
    fn test_fast_mode_36mhz() {
        let clock = ClockControl::for_speed(36_000_000, BusSpeed::Fast);
        assert_eq!(clock.freq_mhz, 36);
        assert_eq!(clock.ccr, 30);
        assert_eq!(clock.trise, 11);
        assert!(clock.fast);
    }

    #[test]
    fn test_fast_mode_divider_rounds_up() {
        // 8 MHz / 1.2 MHz = 6.67, must not run faster than 400 kHz
        let clock = ClockControl::for_speed(8_000_000, BusSpeed::Fast);
        assert_eq!(clock.ccr, 7);
    }
}
