use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::*};

use crate::{defs::*, Bno055, Error};

impl<I, D, P, E> Bno055<I, D, P>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  P: OutputPin,
{
  /// Trigger the built-in self-test and check `ST_RESULT`.
  ///
  /// Waits 200 ms for the test to complete. The cached page, mode, units and
  /// crystal selection are re-read from the chip afterwards whether or not
  /// the test passed. Fails with [`Error::SelfTestFailed`] if any subsystem
  /// reports a failure.
  pub fn start_self_test(&mut self) -> Result<SelfTestResult, Error<E>> {
    self.ensure_page0()?;
    self.update_u8(Reg::SysTrigger, SYS_TRIGGER_SELF_TEST, SYS_TRIGGER_SELF_TEST)?;
    self.delay.delay_ms(SELF_TEST_DELAY);

    let result: SelfTestResult = self.read(Reg::StResult)?;
    self.sync_from_hardware()?;

    if !result.passed() {
      error!(
        "Self test failed - Acc: {}, Mag: {}, Gyro: {}, MCU: {}",
        result.accel,
        result.mag,
        result.gyro,
        result.mcu
      );
      return Err(Error::SelfTestFailed(result));
    }

    info!("Self test passed");
    Ok(result)
  }
}

/// `ST_RESULT` flags; `true` means the subsystem passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct SelfTestResult {
  pub accel: bool,
  pub mag: bool,
  pub gyro: bool,
  pub mcu: bool,
}

impl SelfTestResult {
  pub fn passed(&self) -> bool {
    self.accel && self.mag && self.gyro && self.mcu
  }
}
