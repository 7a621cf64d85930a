//! Register page and operation mode control.
//!
//! Register addresses 0x08..=0x1F resolve to different registers depending
//! on the selected page; every register this driver touches lives on page 0.
//! The cached page is switched back to 0 before each access.
//!
//! CONFIG is the only mode in which units, crystal selection, axis mapping
//! and offsets may be written. Operations that need it go through
//! [`Bno055::with_config_mode`], which restores the prior mode afterwards.

use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::*};

use crate::{defs::*, Bno055, Error};

impl<I, D, P, E> Bno055<I, D, P>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  P: OutputPin,
{
  /// Select register page 0 or 1.
  ///
  /// Always writes `PAGE_ID`, even if the cached page already matches. The
  /// cache is updated only once the write succeeded.
  pub fn set_page(&mut self, page: u8) -> Result<(), Error<E>> {
    if page > 1 {
      error!("Invalid page passed: {}", page);
      return Err(Error::InvalidArgument);
    }
    self.write_u8(Reg::PageId, page)?;
    self.state.page = page;
    Ok(())
  }

  pub(crate) fn ensure_page0(&mut self) -> Result<(), Error<E>> {
    if self.state.page != 0 {
      self.set_page(0)?;
    }
    Ok(())
  }

  /// Switch the operation mode.
  ///
  /// A no-op without bus traffic when `mode` matches the cached mode.
  /// Otherwise rewrites the low nibble of `OPR_MODE` and blocks for the
  /// mode switch settle time before updating the cache.
  pub fn set_mode(&mut self, mode: OperationMode) -> Result<(), Error<E>> {
    if mode == self.state.mode {
      return Ok(());
    }
    self.write_mode(mode)
  }

  pub(crate) fn write_mode(&mut self, mode: OperationMode) -> Result<(), Error<E>> {
    self.ensure_page0()?;
    self.update_u8(Reg::OprMode, OPR_MODE_MASK, mode.into())?;
    self.delay.delay_ms(MODE_SWITCH_DELAY);
    trace!("Operation mode {} -> {}", self.state.mode.name(), mode.name());
    self.state.mode = mode;
    Ok(())
  }

  /// Run `f` in CONFIG mode, then restore the mode that was active on entry.
  ///
  /// The restore runs whether `f` succeeded or not; an error from `f` takes
  /// precedence over an error from the restore.
  pub(crate) fn with_config_mode<T>(
    &mut self,
    settle: Settle,
    f: impl FnOnce(&mut Self) -> Result<T, Error<E>>,
  ) -> Result<T, Error<E>> {
    let prior = self.state.mode;
    if prior != OperationMode::Config {
      warn!("Not in CONFIG mode ({}). Switching to CONFIG", prior.name());
      self.set_mode(OperationMode::Config)?;
      if settle.enter > 0 {
        self.delay.delay_ms(settle.enter);
      }
    }

    let result = f(self);
    let restored = self.set_mode(prior);
    if restored.is_ok() && settle.restore > 0 {
      self.delay.delay_ms(settle.restore);
    }

    let value = result?;
    restored?;
    Ok(value)
  }
}

/// Extra settle times around a scoped CONFIG switch, in ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settle {
  /// After entering CONFIG (only if a switch happened)
  pub enter: u32,
  /// After restoring the prior mode
  pub restore: u32,
}

impl Settle {
  pub const NONE: Self = Self { enter: 0, restore: 0 };
  pub const OFFSETS: Self = Self { enter: CONFIG_ENTRY_DELAY, restore: 0 };
  pub const AXIS_REMAP: Self = Self { enter: CONFIG_ENTRY_DELAY, restore: AXIS_REMAP_RESTORE_DELAY };
}

/// Operation modes (`OPR_MODE` bits 3:0).
///
/// Modes from [`Imu`](Self::Imu) upwards are fusion modes: the on-chip
/// processor derives orientation, gravity and linear acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
  /// Configuration mode, all sensors off
  #[default]
  Config = 0x00,
  AccOnly = 0x01,
  MagOnly = 0x02,
  GyroOnly = 0x03,
  AccMag = 0x04,
  AccGyro = 0x05,
  MagGyro = 0x06,
  /// Accelerometer, magnetometer and gyroscope, no fusion
  Amg = 0x07,
  /// Relative orientation from accelerometer and gyroscope
  Imu = 0x08,
  /// Absolute heading from accelerometer and magnetometer
  Compass = 0x09,
  /// Magnetometer used in place of the gyroscope
  M4g = 0x0A,
  /// Nine degrees of freedom, fast magnetometer calibration off
  NdofFmcOff = 0x0B,
  /// Nine degrees of freedom, fast magnetometer calibration on
  Ndof = 0x0C,
}

impl OperationMode {
  pub const fn is_fusion(self) -> bool {
    self as u8 >= OperationMode::Imu as u8
  }

  pub const fn name(self) -> &'static str {
    match self {
      OperationMode::Config => "CONFIG",
      OperationMode::AccOnly => "ACC_ONLY",
      OperationMode::MagOnly => "MAG_ONLY",
      OperationMode::GyroOnly => "GYRO_ONLY",
      OperationMode::AccMag => "ACC_MAG",
      OperationMode::AccGyro => "ACC_GYRO",
      OperationMode::MagGyro => "MAG_GYRO",
      OperationMode::Amg => "AMG",
      OperationMode::Imu => "IMU",
      OperationMode::Compass => "COMPASS",
      OperationMode::M4g => "M4G",
      OperationMode::NdofFmcOff => "NDOF_FMC_OFF",
      OperationMode::Ndof => "NDOF",
    }
  }
}

impl From<OperationMode> for u8 {
  fn from(value: OperationMode) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for OperationMode {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0x00 => Ok(OperationMode::Config),
      0x01 => Ok(OperationMode::AccOnly),
      0x02 => Ok(OperationMode::MagOnly),
      0x03 => Ok(OperationMode::GyroOnly),
      0x04 => Ok(OperationMode::AccMag),
      0x05 => Ok(OperationMode::AccGyro),
      0x06 => Ok(OperationMode::MagGyro),
      0x07 => Ok(OperationMode::Amg),
      0x08 => Ok(OperationMode::Imu),
      0x09 => Ok(OperationMode::Compass),
      0x0A => Ok(OperationMode::M4g),
      0x0B => Ok(OperationMode::NdofFmcOff),
      0x0C => Ok(OperationMode::Ndof),
      _ => Err(()),
    }
  }
}
