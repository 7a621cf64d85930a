//! Chip reset and cache resynchronization.
//!
//! A reset returns the chip to its power-on configuration (CONFIG mode,
//! page 0, default units, internal oscillator). Nothing in the cache can be
//! trusted afterwards, so the relevant registers are read back from the chip.

use core::convert::Infallible;

use embedded_hal::{
  delay::DelayNs,
  digital::{Error as _, ErrorType, OutputPin},
  i2c::*,
};

use crate::{defs::*, Bno055, Error, OperationMode, Units};

impl<I, D, P, E> Bno055<I, D, P>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  P: OutputPin,
{
  /// Reset the chip with the configured [`ResetMethod`].
  ///
  /// Software reset sets `RST_SYS` in `SYS_TRIGGER`; hardware reset holds
  /// nRESET low for 10 ms. Both are followed by a 650 ms boot delay and a
  /// resync of the cached page, mode, units and crystal selection.
  ///
  /// Once the reset went out the cache holds the power-on values, even if
  /// the resync fails.
  pub fn reset_chip(&mut self) -> Result<(), Error<E>> {
    match self.reset {
      ResetMethod::Software => {
        self.ensure_page0()?;
        self.write_u8(Reg::SysTrigger, SYS_TRIGGER_RST_SYS)?;
      }
      ResetMethod::Hardware(ref mut pin) => {
        pin.set_low().map_err(|e| Error::ResetPin(e.kind()))?;
        self.delay.delay_ms(RESET_PULSE_DELAY);
        pin.set_high().map_err(|e| Error::ResetPin(e.kind()))?;
      }
    }
    info!("BNO055 reset");

    self.delay.delay_ms(RESET_DELAY);
    self.state.power_on();
    self.sync_from_hardware()
  }

  /// Replace the cached page, crystal selection, mode and units with the
  /// values currently held by the chip.
  ///
  /// The page is taken over as soon as it is read. Crystal selection, mode
  /// and units are committed together once all three registers were read
  /// and decoded.
  pub(crate) fn sync_from_hardware(&mut self) -> Result<(), Error<E>> {
    let page = self.read_u8(Reg::PageId)?;
    self.state.page = page;
    self.ensure_page0()?;

    let trigger = self.read_u8(Reg::SysTrigger)?;
    let opr_mode = self.read_u8(Reg::OprMode)?;
    let units: Units = self.read(Reg::UnitSel)?;

    let mode = OperationMode::try_from(opr_mode & OPR_MODE_MASK).map_err(|_| {
      error!("Unknown operation mode reported: {}", opr_mode);
      Error::InvalidState
    })?;

    self.state.external_crystal = trigger & SYS_TRIGGER_CLK_SEL != 0;
    self.state.mode = mode;
    self.state.apply_units(units);
    debug!("State resynchronized - mode {}, units {:?}", mode.name(), units);
    Ok(())
  }
}

/// How [`Bno055::reset_chip`] resets the chip.
#[derive(Debug)]
pub enum ResetMethod<P> {
  /// Write `RST_SYS` over I2C
  Software,
  /// Pulse the nRESET line (active low)
  Hardware(P),
}

/// Placeholder pin type for drivers that reset over I2C.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResetPin;

impl ErrorType for NoResetPin {
  type Error = Infallible;
}

impl OutputPin for NoResetPin {
  fn set_low(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }

  fn set_high(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }
}
