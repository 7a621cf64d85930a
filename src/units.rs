//! Unit selection, scale factors and clock source.
//!
//! `UNIT_SEL` picks the physical unit of each output domain. The divisor used
//! to turn register counts into that unit depends on the selection, so the
//! cached [`ScaleFactors`] are always replaced together with the cached
//! [`Units`].
//!
//! ```ignore
//! use bno055::{AccelUnit, AngularRateUnit, Units};
//!
//! let units = Units {
//!     acceleration: AccelUnit::MilliG,
//!     angular_rate: AngularRateUnit::RadiansPerSecond,
//!     ..Default::default()
//! };
//! imu.set_units(units)?;
//! ```

use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::*};

use crate::{defs::*, mode::Settle, Bno055, Error, OperationMode};

impl<I, D, P, E> Bno055<I, D, P>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  P: OutputPin,
{
  /// Select measurement units.
  ///
  /// Switches to CONFIG mode if needed and restores the prior mode afterwards.
  /// `UNIT_SEL` is left untouched when `units` already match the cache; the
  /// scale factors are recomputed either way.
  pub fn set_units(&mut self, units: Units) -> Result<(), Error<E>> {
    trace!("Setting units to {:?}", units);
    self.with_config_mode(Settle::NONE, |bno| {
      bno.ensure_page0()?;
      if bno.state.units == units {
        trace!("Already in units {:?}", units);
      } else {
        bno.update_u8(Reg::UnitSel, UNIT_SEL_MASK, units.bits())?;
      }
      bno.state.apply_units(units);
      Ok(())
    })
  }

  /// Select the external 32 kHz crystal (`true`) or the internal oscillator.
  ///
  /// Must be called in CONFIG mode; fails with [`Error::InvalidState`]
  /// without touching the bus otherwise. Blocks 650 ms for the oscillator to
  /// lock.
  pub fn set_external_crystal(&mut self, enable: bool) -> Result<(), Error<E>> {
    if self.state.mode != OperationMode::Config {
      error!("Cannot change clock source outside CONFIG mode. Current mode: {}", self.state.mode.name());
      return Err(Error::InvalidState);
    }

    self.ensure_page0()?;
    let bits = if enable { SYS_TRIGGER_CLK_SEL } else { 0 };
    self.update_u8(Reg::SysTrigger, SYS_TRIGGER_CLK_SEL, bits)?;
    self.delay.delay_ms(CLK_SEL_DELAY);
    self.state.external_crystal = enable;
    Ok(())
  }
}

/// Acceleration unit, also used for linear acceleration and gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelUnit {
  /// m/s², 100 LSB per unit
  #[default]
  MetersPerSecondSquared = 0,
  /// mg, 1 LSB per unit
  MilliG = 1,
}

impl From<AccelUnit> for u8 {
  fn from(value: AccelUnit) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for AccelUnit {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(AccelUnit::MetersPerSecondSquared),
      1 => Ok(AccelUnit::MilliG),
      _ => Err(()),
    }
  }
}

/// Angular rate unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AngularRateUnit {
  /// °/s, 16 LSB per unit
  #[default]
  DegreesPerSecond = 0,
  /// rad/s, 900 LSB per unit
  RadiansPerSecond = 1,
}

impl From<AngularRateUnit> for u8 {
  fn from(value: AngularRateUnit) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for AngularRateUnit {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(AngularRateUnit::DegreesPerSecond),
      1 => Ok(AngularRateUnit::RadiansPerSecond),
      _ => Err(()),
    }
  }
}

/// Euler angle unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EulerUnit {
  /// °, 16 LSB per unit
  #[default]
  Degrees = 0,
  /// rad, 900 LSB per unit
  Radians = 1,
}

impl From<EulerUnit> for u8 {
  fn from(value: EulerUnit) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for EulerUnit {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(EulerUnit::Degrees),
      1 => Ok(EulerUnit::Radians),
      _ => Err(()),
    }
  }
}

/// Temperature unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
  /// °C, 1 LSB per unit
  #[default]
  Celsius = 0,
  /// °F, 2 LSB per unit
  Fahrenheit = 1,
}

impl From<TemperatureUnit> for u8 {
  fn from(value: TemperatureUnit) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for TemperatureUnit {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(TemperatureUnit::Celsius),
      1 => Ok(TemperatureUnit::Fahrenheit),
      _ => Err(()),
    }
  }
}

/// Sign convention of the fused orientation output (pitch direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OrientationFormat {
  #[default]
  Windows = 0,
  Android = 1,
}

impl From<OrientationFormat> for u8 {
  fn from(value: OrientationFormat) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for OrientationFormat {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(OrientationFormat::Windows),
      1 => Ok(OrientationFormat::Android),
      _ => Err(()),
    }
  }
}

/// Unit selection register (`UNIT_SEL`).
///
/// Bits 3, 5 and 6 are reserved; they read as ignored and pack as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct Units {
  #[bits(1)]
  pub acceleration: AccelUnit,
  #[bits(1)]
  pub angular_rate: AngularRateUnit,
  #[bits(1)]
  pub euler: EulerUnit,
  #[skip(1)]
  #[bits(1)]
  pub temperature: TemperatureUnit,
  #[skip(2)]
  #[bits(1)]
  pub orientation: OrientationFormat,
}

impl Units {
  /// Decode a register value. Every unit field is a single bit, so any
  /// value decodes.
  pub fn from_register(value: u8) -> Self {
    Self::try_from([value]).unwrap_or_default()
  }

  /// Register value with the reserved bits cleared.
  pub fn bits(self) -> u8 {
    let [byte]: [u8; 1] = self.try_into().unwrap_or_default();
    byte
  }

  /// Register counts per physical unit for every output domain.
  pub const fn scale_factors(self) -> ScaleFactors {
    ScaleFactors {
      accelerometer: match self.acceleration {
        AccelUnit::MetersPerSecondSquared => 100.0,
        AccelUnit::MilliG => 1.0,
      },
      gyroscope: match self.angular_rate {
        AngularRateUnit::DegreesPerSecond => 16.0,
        AngularRateUnit::RadiansPerSecond => 900.0,
      },
      euler_angle: match self.euler {
        EulerUnit::Degrees => 16.0,
        EulerUnit::Radians => 900.0,
      },
      magnetometer: MAG_LSB_PER_UT,
      temperature: match self.temperature {
        TemperatureUnit::Celsius => 1.0,
        TemperatureUnit::Fahrenheit => 2.0,
      },
      quaternion: QUATERNION_LSB,
    }
  }
}

/// Divisors turning register counts into physical units.
///
/// Magnetometer (16 LSB/µT) and quaternion (2^14 LSB) are fixed; the rest
/// follow [`Units`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleFactors {
  pub accelerometer: f32,
  pub gyroscope: f32,
  pub euler_angle: f32,
  pub magnetometer: f32,
  pub temperature: f32,
  pub quaternion: f32,
}

impl Default for ScaleFactors {
  fn default() -> Self {
    Units::default().scale_factors()
  }
}
