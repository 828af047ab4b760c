//! Probe driver for the STM32F1 I2C peripheral
//!
//! Every step of a transaction is a separate flag in SR1/SR2: START is
//! requested in CR1 and acknowledged by SB, the address byte goes through
//! DR and ends in either ADDR or AF. All waits are bounded by a
//! [`PollBudget`].

use busscan_hal::{
    AddressAck, BusAddress, BusError, BusSpeed, ClockControl, Direction, PollBudget, ProbeBus,
};
use embassy_stm32::pac::i2c::{vals, I2c as Regs};

/// Register-level probe driver for one I2C instance
pub struct I2cProbe {
    regs: Regs,
    pclk_hz: u32,
    budget: PollBudget,
}

impl I2cProbe {
    /// Wrap an I2C register block
    ///
    /// The peripheral must already be clocked and its pins muxed, which
    /// embassy's `I2c::new_blocking` takes care of.
    pub fn new(regs: Regs, pclk_hz: u32, budget: PollBudget) -> Self {
        Self {
            regs,
            pclk_hz,
            budget,
        }
    }
}

impl ProbeBus for I2cProbe {
    fn configure(&mut self, speed: BusSpeed) {
        let clock = ClockControl::for_speed(self.pclk_hz, speed);

        // CCR and TRISE may only be changed while PE is clear
        self.regs.cr1().modify(|w| w.set_pe(false));
        self.regs.cr2().modify(|w| w.set_freq(clock.freq_mhz));
        self.regs.ccr().write(|w| {
            if clock.fast {
                w.set_f_s(vals::FS::FAST);
                w.set_duty(vals::Duty::DUTY2_1);
            } else {
                w.set_f_s(vals::FS::STANDARD);
            }
            w.set_ccr(clock.ccr);
        });
        self.regs.trise().write(|w| w.set_trise(clock.trise));
        self.regs.cr1().modify(|w| w.set_pe(true));

        #[cfg(feature = "defmt")]
        defmt::debug!("i2c: {} kHz, {}", speed.khz(), clock);
    }

    fn is_busy(&self) -> bool {
        self.regs.sr2().read().busy()
    }

    fn start(&mut self) -> Result<(), BusError> {
        if self.is_busy() {
            return Err(BusError::BusBusy);
        }

        self.regs.cr1().modify(|w| w.set_start(true));
        let regs = self.regs;
        self.budget.wait_for(|| regs.sr1().read().start())
    }

    fn address(&mut self, addr: BusAddress, direction: Direction) -> Result<AddressAck, BusError> {
        self.regs.dr().write(|w| w.set_dr(addr.frame(direction)));

        let regs = self.regs;
        self.budget.poll(|| {
            let sr1 = regs.sr1().read();
            if sr1.addr() {
                // Reading SR2 after SR1 clears ADDR
                let _ = regs.sr2().read();
                Some(Ok(AddressAck::Acknowledged))
            } else if sr1.af() {
                regs.sr1().write(|w| {
                    w.0 = !0;
                    w.set_af(false);
                });
                Some(Ok(AddressAck::NotAcknowledged))
            } else if sr1.berr() || sr1.arlo() {
                Some(Err(BusError::AddressingError))
            } else {
                None
            }
        })?
    }

    fn clear_address_error(&mut self) {
        // SR1 error flags are cleared by writing zero
        self.regs.sr1().write(|w| {
            w.0 = !0;
            w.set_berr(false);
            w.set_arlo(false);
            w.set_af(false);
        });
    }

    fn stop(&mut self) -> Result<(), BusError> {
        self.regs.cr1().modify(|w| w.set_stop(true));

        // Hardware clears STOP once the condition is on the wire
        let regs = self.regs;
        let released = self.budget.wait_for(|| !regs.cr1().read().stop());
        if released.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("i2c: STOP never completed");
        }
        released
    }
}
