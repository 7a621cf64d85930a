use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::*};

use crate::{defs::*, Bno055, Error};

impl<I, D, P, E> Bno055<I, D, P>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  P: OutputPin,
{
  /// Read `CALIB_STAT` and cache it.
  ///
  /// Meant to be polled until [`CalibrationStatus::is_calibrated`] holds
  /// while the sensor is moved through its calibration routine.
  pub fn get_calibration_status(&mut self) -> Result<CalibrationStatus, Error<E>> {
    self.ensure_page0()?;
    let status: CalibrationStatus = self.read(Reg::CalibStat)?;
    debug!(
      "Calibration status - Acc: {}, Gyro: {}, Mag: {}, Sys: {}",
      status.accel,
      status.gyro,
      status.mag,
      status.system
    );
    self.state.calibration = status;
    Ok(status)
  }
}

/// Per-subsystem calibration level, 0 (uncalibrated) to 3 (fully calibrated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct CalibrationStatus {
  #[bits(2)]
  pub mag: u8,
  #[bits(2)]
  pub accel: u8,
  #[bits(2)]
  pub gyro: u8,
  #[bits(2)]
  pub system: u8,
}

impl CalibrationStatus {
  pub const FULLY_CALIBRATED: u8 = 3;

  pub fn is_calibrated(&self) -> bool {
    [self.system, self.gyro, self.accel, self.mag].iter().all(|&level| level == Self::FULLY_CALIBRATED)
  }
}
