//! Sensor output reading.
//!
//! Every output domain is read with one burst transaction and decoded with
//! the cached scale factor of its domain. The matching field of
//! [`Readings`] is replaced as a whole once the transaction succeeded.
//!
//! # Examples
//!
//! ```ignore
//! use bno055::SensorKind;
//!
//! imu.get_readings(SensorKind::Gravity)?;
//! let g = imu.state().readings.gravity;
//!
//! // Or through the typed accessors
//! let q = imu.quaternion()?;
//! let euler = imu.euler_angles()?;
//! ```

use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::*};
use micromath::{vector::Vector3d, Quaternion};

use crate::{codec::pair, defs::*, Bno055, Error};

impl<I, D, P, E> Bno055<I, D, P>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  P: OutputPin,
{
  /// Read one output domain and store it in the cached [`Readings`].
  pub fn get_readings(&mut self, kind: SensorKind) -> Result<&Readings, Error<E>> {
    let mut raw = [0u8; 8];
    let buf = &mut raw[..kind.len()];

    self.ensure_page0()?;
    self.read_bytes(kind.register(), buf)?;

    let scale = self.state.scale;
    let readings = &mut self.state.readings;
    match kind {
      SensorKind::Accelerometer => {
        let v = vector(buf, scale.accelerometer);
        trace!("Acceleration - X: {}, Y: {}, Z: {}", v.x, v.y, v.z);
        readings.raw_acceleration = v;
      }
      SensorKind::Magnetometer => {
        let v = vector(buf, scale.magnetometer);
        trace!("Magnetometer - X: {}, Y: {}, Z: {}", v.x, v.y, v.z);
        readings.magnetometer = v;
      }
      SensorKind::Gyroscope => {
        let v = vector(buf, scale.gyroscope);
        trace!("Gyroscope - X: {}, Y: {}, Z: {}", v.x, v.y, v.z);
        readings.gyroscope = v;
      }
      SensorKind::EulerAngle => {
        let e = EulerAngles {
          yaw: pair(buf, 0, scale.euler_angle),
          roll: pair(buf, 2, scale.euler_angle),
          pitch: pair(buf, 4, scale.euler_angle),
        };
        trace!("Euler - Yaw: {}, Roll: {}, Pitch: {}", e.yaw, e.roll, e.pitch);
        readings.euler_angles = e;
      }
      SensorKind::Quaternion => {
        let q = Quaternion::new(
          pair(buf, 0, scale.quaternion),
          pair(buf, 2, scale.quaternion),
          pair(buf, 4, scale.quaternion),
          pair(buf, 6, scale.quaternion),
        );
        trace!("Quaternion - W: {}, X: {}, Y: {}, Z: {}", q.w(), q.x(), q.y(), q.z());
        readings.quaternion = q;
      }
      SensorKind::LinearAcceleration => {
        let v = vector(buf, scale.accelerometer);
        trace!("Linear acceleration - X: {}, Y: {}, Z: {}", v.x, v.y, v.z);
        readings.linear_acceleration = v;
      }
      SensorKind::Gravity => {
        let v = vector(buf, scale.accelerometer);
        trace!("Gravity - X: {}, Y: {}, Z: {}", v.x, v.y, v.z);
        readings.gravity = v;
      }
      SensorKind::Temperature => {
        let t = f32::from(buf[0] as i8) / scale.temperature;
        trace!("Temperature - {}", t);
        readings.temperature = t;
      }
    }

    Ok(&self.state.readings)
  }

  /// Acceleration including gravity, in the selected acceleration unit.
  pub fn acceleration(&mut self) -> Result<Vector3d<f32>, Error<E>> {
    Ok(self.get_readings(SensorKind::Accelerometer)?.raw_acceleration)
  }

  /// Acceleration with gravity removed (fusion modes only).
  pub fn linear_acceleration(&mut self) -> Result<Vector3d<f32>, Error<E>> {
    Ok(self.get_readings(SensorKind::LinearAcceleration)?.linear_acceleration)
  }

  /// Gravity vector (fusion modes only).
  pub fn gravity(&mut self) -> Result<Vector3d<f32>, Error<E>> {
    Ok(self.get_readings(SensorKind::Gravity)?.gravity)
  }

  /// Angular rate in the selected unit.
  pub fn gyroscope(&mut self) -> Result<Vector3d<f32>, Error<E>> {
    Ok(self.get_readings(SensorKind::Gyroscope)?.gyroscope)
  }

  /// Magnetic field in µT.
  pub fn magnetometer(&mut self) -> Result<Vector3d<f32>, Error<E>> {
    Ok(self.get_readings(SensorKind::Magnetometer)?.magnetometer)
  }

  pub fn euler_angles(&mut self) -> Result<EulerAngles, Error<E>> {
    Ok(self.get_readings(SensorKind::EulerAngle)?.euler_angles)
  }

  /// Unit quaternion (fusion modes only).
  pub fn quaternion(&mut self) -> Result<Quaternion, Error<E>> {
    Ok(self.get_readings(SensorKind::Quaternion)?.quaternion)
  }

  pub fn temperature(&mut self) -> Result<f32, Error<E>> {
    Ok(self.get_readings(SensorKind::Temperature)?.temperature)
  }
}

fn vector(buf: &[u8], scale: f32) -> Vector3d<f32> {
  Vector3d { x: pair(buf, 0, scale), y: pair(buf, 2, scale), z: pair(buf, 4, scale) }
}

pub(crate) const ZERO: Vector3d<f32> = Vector3d { x: 0.0, y: 0.0, z: 0.0 };

/// Output domains, identified by the address of their first data register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorKind {
  Accelerometer = 0x08,
  Magnetometer = 0x0E,
  Gyroscope = 0x14,
  EulerAngle = 0x1A,
  Quaternion = 0x20,
  LinearAcceleration = 0x28,
  Gravity = 0x2E,
  Temperature = 0x34,
}

impl SensorKind {
  /// Bytes in one sample: 1 for temperature, 8 for the quaternion, 6 for
  /// every three-axis vector.
  pub const fn len(self) -> usize {
    match self {
      SensorKind::Temperature => 1,
      SensorKind::Quaternion => 8,
      _ => 6,
    }
  }

  pub(crate) const fn register(self) -> Reg {
    match self {
      SensorKind::Accelerometer => Reg::AccDataX,
      SensorKind::Magnetometer => Reg::MagDataX,
      SensorKind::Gyroscope => Reg::GyrDataX,
      SensorKind::EulerAngle => Reg::EulDataH,
      SensorKind::Quaternion => Reg::QuaDataW,
      SensorKind::LinearAcceleration => Reg::LiaDataX,
      SensorKind::Gravity => Reg::GrvDataX,
      SensorKind::Temperature => Reg::Temp,
    }
  }
}

/// Fused orientation in the selected Euler unit.
///
/// The chip reports heading first, then roll, then pitch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EulerAngles {
  pub yaw: f32,
  pub roll: f32,
  pub pitch: f32,
}

/// Last decoded value of every output domain.
#[derive(Debug, Clone, Copy)]
pub struct Readings {
  pub raw_acceleration: Vector3d<f32>,
  pub linear_acceleration: Vector3d<f32>,
  pub gravity: Vector3d<f32>,
  pub gyroscope: Vector3d<f32>,
  pub magnetometer: Vector3d<f32>,
  pub euler_angles: EulerAngles,
  pub quaternion: Quaternion,
  pub temperature: f32,
}

impl Default for Readings {
  fn default() -> Self {
    Self {
      raw_acceleration: ZERO,
      linear_acceleration: ZERO,
      gravity: ZERO,
      gyroscope: ZERO,
      magnetometer: ZERO,
      euler_angles: EulerAngles::default(),
      quaternion: Quaternion::new(0.0, 0.0, 0.0, 0.0),
      temperature: 0.0,
    }
  }
}
