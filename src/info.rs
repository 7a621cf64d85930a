use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::*};

use crate::{defs::*, Bno055, Error};

impl<I, D, P, E> Bno055<I, D, P>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  P: OutputPin,
{
  /// Read the sub-sensor IDs and firmware revisions.
  pub fn revision(&mut self) -> Result<Revision, Error<E>> {
    self.ensure_page0()?;
    let mut b = [0u8; 6];
    self.read_bytes(Reg::AccId, &mut b)?;
    Ok(Revision {
      accelerometer: b[0],
      magnetometer: b[1],
      gyroscope: b[2],
      software: u16::from_le_bytes([b[3], b[4]]),
      bootloader: b[5],
    })
  }

  /// Read `SYS_CLK_STATUS`, `SYS_STATUS` and `SYS_ERR`.
  pub fn system_status(&mut self) -> Result<SystemStatus, Error<E>> {
    self.ensure_page0()?;
    let mut b = [0u8; 3];
    self.read_bytes(Reg::SysClkStatus, &mut b)?;
    Ok(SystemStatus { clock_config_busy: b[0] & 0x01 != 0, status: b[1], error: b[2] })
  }
}

/// Chip identification registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Revision {
  /// Accelerometer chip ID (0xFB)
  pub accelerometer: u8,
  /// Magnetometer chip ID (0x32)
  pub magnetometer: u8,
  /// Gyroscope chip ID (0x0F)
  pub gyroscope: u8,
  pub software: u16,
  pub bootloader: u8,
}

/// System state as reported by the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemStatus {
  /// Clock source change still in progress
  pub clock_config_busy: bool,
  /// 0 idle, 1 system error, 2 initializing peripherals, 3 system
  /// initialization, 4 executing self-test, 5 fusion running, 6 running
  /// without fusion
  pub status: u8,
  /// Error code, meaningful when `status` is 1
  pub error: u8,
}

impl SystemStatus {
  pub const fn has_error(&self) -> bool {
    self.status == 1
  }
}
