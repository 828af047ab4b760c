//! Probe driver for the STM32F0 I2C peripheral
//!
//! The F0 parts carry the newer ("v2") I2C block: the start condition and
//! the address byte are issued together through CR2, and the hardware
//! reports the result in ISR. Clock and pin setup stay with embassy; this
//! driver only touches the registers, one flag at a time, and every wait
//! is bounded by a [`PollBudget`].

use busscan_hal::{
    AddressAck, BusAddress, BusError, BusSpeed, Direction, PollBudget, ProbeBus, Timing,
};
use embassy_stm32::pac::i2c::{vals, I2c as Regs};

/// Register-level probe driver for one I2C instance
pub struct I2cProbe {
    regs: Regs,
    kernel_hz: u32,
    budget: PollBudget,
}

impl I2cProbe {
    /// Wrap an I2C register block
    ///
    /// The peripheral must already be clocked and its pins muxed, which
    /// embassy's `I2c::new_blocking` takes care of.
    pub fn new(regs: Regs, kernel_hz: u32, budget: PollBudget) -> Self {
        Self {
            regs,
            kernel_hz,
            budget,
        }
    }

    fn clear_flags(&self) {
        self.regs.icr().write(|w| {
            w.set_nackcf(true);
            w.set_stopcf(true);
            w.set_berrcf(true);
            w.set_arlocf(true);
        });
    }

    /// Toggle PE to drop whatever the state machine was doing
    fn reset(&self) {
        self.regs.cr1().modify(|w| w.set_pe(false));
        self.regs.cr1().modify(|w| w.set_pe(true));
    }
}

impl ProbeBus for I2cProbe {
    fn configure(&mut self, speed: BusSpeed) {
        let timing = Timing::for_speed(self.kernel_hz, speed);

        // TIMINGR is only writable while the peripheral is disabled
        self.regs.cr1().modify(|w| w.set_pe(false));
        self.regs.timingr().write(|w| {
            w.set_presc(timing.presc);
            w.set_scldel(timing.scldel);
            w.set_sdadel(timing.sdadel);
            w.set_sclh(timing.sclh);
            w.set_scll(timing.scll);
        });
        self.regs.cr1().modify(|w| w.set_pe(true));

        #[cfg(feature = "defmt")]
        defmt::debug!("i2c: {} kHz, TIMINGR={=u32:#x}", speed.khz(), timing.bits());
    }

    fn is_busy(&self) -> bool {
        self.regs.isr().read().busy()
    }

    fn start(&mut self) -> Result<(), BusError> {
        // START goes out together with the address in CR2, so all that
        // can be checked here is that nobody else holds the bus
        if self.is_busy() {
            return Err(BusError::BusBusy);
        }
        Ok(())
    }

    fn address(&mut self, addr: BusAddress, direction: Direction) -> Result<AddressAck, BusError> {
        self.clear_flags();
        self.regs.cr2().write(|w| {
            w.set_add10(vals::Addmode::BIT7);
            w.set_sadd(u16::from(addr.get()) << 1);
            w.set_dir(match direction {
                Direction::Write => vals::Dir::WRITE,
                Direction::Read => vals::Dir::READ,
            });
            w.set_nbytes(0);
            w.set_autoend(vals::Autoend::SOFTWARE);
            w.set_start(true);
        });

        let regs = self.regs;
        self.budget.poll(|| {
            let isr = regs.isr().read();
            if isr.nackf() {
                regs.icr().write(|w| w.set_nackcf(true));
                Some(Ok(AddressAck::NotAcknowledged))
            } else if isr.berr() || isr.arlo() {
                Some(Err(BusError::AddressingError))
            } else if isr.tc() {
                Some(Ok(AddressAck::Acknowledged))
            } else {
                None
            }
        })?
    }

    fn clear_address_error(&mut self) {
        self.regs.icr().write(|w| {
            w.set_berrcf(true);
            w.set_arlocf(true);
        });
    }

    fn stop(&mut self) -> Result<(), BusError> {
        // After a NACK the hardware has already sent STOP on its own
        if self.is_busy() {
            self.regs.cr2().modify(|w| w.set_stop(true));
        }

        let regs = self.regs;
        let released = self.budget.wait_for(|| !regs.isr().read().busy());
        self.regs.icr().write(|w| {
            w.set_stopcf(true);
            w.set_nackcf(true);
        });

        if released.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("i2c: bus still busy after STOP, resetting peripheral");
            self.reset();
        }
        released
    }
}
