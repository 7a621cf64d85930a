//! Axis remapping for non-default mounting orientations.
//!
//! `AXIS_MAP_CONFIG` assigns a physical sensor axis to each output axis
//! (two bits per output axis, x in bits 1:0, y in 3:2, z in 5:4) and
//! `AXIS_MAP_SIGN` inverts individual output axes (x in bit 2, y in bit 1,
//! z in bit 0).
//!
//! # Examples
//!
//! ```ignore
//! use bno055::{Axis, AxisRemap};
//!
//! // Board mounted rotated 90° around Z
//! imu.remap_axis(AxisRemap::new(Axis::PositiveY, Axis::NegativeX, Axis::PositiveZ))?;
//! ```

use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::*};

use crate::{defs::*, mode::Settle, Bno055, Error};

impl<I, D, P, E> Bno055<I, D, P>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  P: OutputPin,
{
  /// Apply an axis mapping.
  ///
  /// Rejects mappings that name the same physical axis twice with
  /// [`Error::InvalidArgument`] before touching the bus. Switches to CONFIG
  /// mode if needed and restores the prior mode afterwards.
  pub fn remap_axis(&mut self, remap: AxisRemap) -> Result<(), Error<E>> {
    if !remap.is_valid() {
      error!("Invalid axis remap: {:?}", remap);
      return Err(Error::InvalidArgument);
    }

    let [config, sign] = remap.registers();
    self.ensure_page0()?;
    self.with_config_mode(Settle::AXIS_REMAP, |bno| {
      bno.write_u8(Reg::AxisMapConfig, config)?;
      bno.delay.delay_ms(AXIS_REMAP_DELAY);
      bno.write_u8(Reg::AxisMapSign, sign)?;
      bno.delay.delay_ms(AXIS_REMAP_DELAY);
      Ok(())
    })?;

    debug!("Axis remap applied: config {}, sign {}", config, sign);
    Ok(())
  }

  /// Read back the active axis mapping.
  pub fn axis_remap(&mut self) -> Result<AxisRemap, Error<E>> {
    self.ensure_page0()?;
    let map: AxisMap = self.read(Reg::AxisMapConfig)?;
    Ok(map.into())
  }
}

/// Source of one output axis: a physical axis and its sign.
///
/// Bits 1:0 select the physical axis, bit 2 inverts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
  PositiveX = 0,
  PositiveY = 1,
  PositiveZ = 2,
  NegativeX = 4,
  NegativeY = 5,
  NegativeZ = 6,
}

impl Axis {
  /// Physical axis index (0 = X, 1 = Y, 2 = Z).
  pub const fn physical(self) -> u8 {
    self as u8 & 0x03
  }

  pub const fn is_negative(self) -> bool {
    self as u8 & 0x04 != 0
  }

  const fn from_parts(physical: u8, negative: bool) -> Self {
    match (physical, negative) {
      (1, false) => Axis::PositiveY,
      (2, false) => Axis::PositiveZ,
      (1, true) => Axis::NegativeY,
      (2, true) => Axis::NegativeZ,
      (_, true) => Axis::NegativeX,
      _ => Axis::PositiveX,
    }
  }
}

impl From<Axis> for u8 {
  fn from(value: Axis) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for Axis {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Axis::PositiveX),
      1 => Ok(Axis::PositiveY),
      2 => Ok(Axis::PositiveZ),
      4 => Ok(Axis::NegativeX),
      5 => Ok(Axis::NegativeY),
      6 => Ok(Axis::NegativeZ),
      _ => Err(()),
    }
  }
}

/// Output axis assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisRemap {
  pub x: Axis,
  pub y: Axis,
  pub z: Axis,
}

impl Default for AxisRemap {
  fn default() -> Self {
    Self { x: Axis::PositiveX, y: Axis::PositiveY, z: Axis::PositiveZ }
  }
}

impl AxisRemap {
  pub const fn new(x: Axis, y: Axis, z: Axis) -> Self {
    Self { x, y, z }
  }

  /// Every output axis must come from a different physical axis.
  pub const fn is_valid(&self) -> bool {
    let (x, y, z) = (self.x.physical(), self.y.physical(), self.z.physical());
    x != y && y != z && x != z
  }

  /// `AXIS_MAP_CONFIG` and `AXIS_MAP_SIGN`, in register order.
  pub fn registers(&self) -> [u8; 2] {
    AxisMap::from(*self).into()
  }

  /// `AXIS_MAP_CONFIG` value.
  pub fn map_config(&self) -> u8 {
    self.registers()[0]
  }

  /// `AXIS_MAP_SIGN` value.
  pub fn map_sign(&self) -> u8 {
    self.registers()[1]
  }

  /// Decode the register pair. A reserved physical index (3) reads as X.
  pub fn from_registers(config: u8, sign: u8) -> Self {
    AxisMap::from([config, sign]).into()
  }
}

/// `AXIS_MAP_CONFIG` (physical axis index per output axis) followed by
/// `AXIS_MAP_SIGN` (inversion per output axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 2)]
struct AxisMap {
  #[bits(2)]
  pub x: u8,
  #[bits(2)]
  pub y: u8,
  #[bits(2)]
  pub z: u8,
  #[skip(2)]
  pub z_negative: bool,
  pub y_negative: bool,
  pub x_negative: bool,
}

impl From<AxisRemap> for AxisMap {
  fn from(remap: AxisRemap) -> Self {
    Self {
      x: remap.x.physical(),
      y: remap.y.physical(),
      z: remap.z.physical(),
      z_negative: remap.z.is_negative(),
      y_negative: remap.y.is_negative(),
      x_negative: remap.x.is_negative(),
    }
  }
}

impl From<AxisMap> for AxisRemap {
  fn from(map: AxisMap) -> Self {
    Self {
      x: Axis::from_parts(map.x, map.x_negative),
      y: Axis::from_parts(map.y, map.y_negative),
      z: Axis::from_parts(map.z, map.z_negative),
    }
  }
}
