#![no_std]
#![doc = include_str!("../README.md")]
//!
//! ## Design Principles
//!
//! - **Cached chip state**: page, operation mode, units and crystal selection
//!   are mirrored in [`DeviceState`] and resynchronized from hardware after a
//!   reset or self-test.
//! - **Blocking**: built on the `embedded-hal` 1.0 blocking I2C, delay and
//!   digital traits; datasheet settle delays always run to completion.
//! - **Scoped CONFIG mode**: operations that need CONFIG mode switch into it
//!   and restore the prior mode on every exit path.
//!
//! ## Module Organization
//!
//! - [`mode`]: register page and operation mode control
//! - [`units`]: unit selection, scale factors and external crystal
//! - [`sensor`]: fused and raw sensor output
//! - [`calib`]: calibration status
//! - [`offset`]: calibration offset profile read/write
//! - [`selftest`]: built-in self-test
//! - [`reset`]: software and hardware reset
//! - [`axis_remap`]: axis mapping and sign
//! - [`info`]: chip revision and system status
//! - [`codec`]: fixed-point register encoding

#[macro_use]
mod fmt;

pub mod axis_remap;
pub mod calib;
pub mod codec;
mod defs;
pub mod info;
pub mod mode;
pub mod offset;
pub mod reset;
pub(crate) mod rw;
pub mod selftest;
pub mod sensor;
mod state;
pub mod units;

use defs::*;
use embedded_hal::{
  delay::DelayNs,
  digital::{Error as _, OutputPin},
  i2c::*,
};

pub use axis_remap::{Axis, AxisRemap};
pub use calib::CalibrationStatus;
pub use info::{Revision, SystemStatus};
pub use micromath::{vector::Vector3d, Quaternion};
pub use mode::OperationMode;
pub use offset::SensorOffsets;
pub use reset::{NoResetPin, ResetMethod};
pub use selftest::SelfTestResult;
pub use sensor::{EulerAngles, Readings, SensorKind};
pub use state::DeviceState;
pub use units::*;

/// Driver error type.
///
/// Wraps the underlying I2C error and adds BNO055-specific error conditions.
/// Every error aborts the operation that raised it; cached state keeps its
/// last known-good value.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// I2C communication error
  I2c(E),
  /// Out-of-range page, unit bits or axis configuration
  InvalidArgument,
  /// Operation requires CONFIG mode, or the chip reported an unknown mode
  InvalidState,
  /// Chip ID mismatch (expected 0xA0)
  InvalidChipId(u8),
  /// One or more subsystems failed the built-in self-test
  SelfTestFailed(SelfTestResult),
  /// Driving the hardware reset pin failed
  ResetPin(embedded_hal::digital::ErrorKind),
}

/// BNO055 device driver instance.
///
/// Owns the I2C bus, the delay provider and the reset method, and keeps the
/// cached [`DeviceState`] of one physical chip.
///
/// # Type Parameters
///
/// - `I`: I2C implementation (must implement `embedded_hal::i2c::I2c`)
/// - `D`: Delay provider (must implement `embedded_hal::delay::DelayNs`)
/// - `P`: Reset pin (must implement `embedded_hal::digital::OutputPin`);
///   [`NoResetPin`] when the chip is reset over I2C
///
/// # Examples
///
/// ```ignore
/// let mut imu = Bno055::new(i2c, delay);
/// imu.initialize()?;
/// imu.configure(OperationMode::Ndof, Units::default())?;
/// ```
pub struct Bno055<I, D, P = NoResetPin> {
  i2c: I,
  delay: D,
  address: u8,
  reset: ResetMethod<P>,
  state: DeviceState,
}

impl<I, D> Bno055<I, D, NoResetPin> {
  /// Create a driver that resets the chip through `SYS_TRIGGER`.
  ///
  /// # Arguments
  ///
  /// - `i2c`: I2C bus implementation
  /// - `delay`: Delay provider for settle times
  pub fn new(i2c: I, delay: D) -> Self {
    Self::with_reset(i2c, delay, ResetMethod::Software)
  }
}

impl<I, D, P> Bno055<I, D, P> {
  /// Create a driver that resets the chip by pulsing its nRESET line.
  ///
  /// The pin is driven high (idle) by [`initialize`](Self::initialize).
  pub fn with_hardware_reset(i2c: I, delay: D, pin: P) -> Self {
    Self::with_reset(i2c, delay, ResetMethod::Hardware(pin))
  }

  fn with_reset(i2c: I, delay: D, reset: ResetMethod<P>) -> Self {
    Self { i2c, delay, address: ADDR_I2C_PRIM, reset, state: DeviceState::default() }
  }

  /// Use the alternative I2C address (0x29, COM3 pulled high).
  pub fn with_alternative_address(mut self) -> Self {
    self.address = ADDR_I2C_ALT;
    self
  }

  /// 7-bit I2C address the driver talks to.
  pub fn address(&self) -> u8 {
    self.address
  }

  /// Cached chip state.
  pub fn state(&self) -> &DeviceState {
    &self.state
  }

  /// Cached operation mode.
  pub fn mode(&self) -> OperationMode {
    self.state.mode
  }

  /// Whether the last calibration status read reported all subsystems at level 3.
  pub fn is_calibrated(&self) -> bool {
    self.state.calibration.is_calibrated()
  }

  /// Tear down the driver and hand back its resources.
  pub fn release(self) -> (I, D, ResetMethod<P>) {
    (self.i2c, self.delay, self.reset)
  }
}

impl<I, D, P, E> Bno055<I, D, P>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  P: OutputPin,
{
  /// Bring the chip into a known state.
  ///
  /// Selects page 0, verifies the chip ID, parks the reset pin high (hardware
  /// reset only), forces CONFIG mode and writes the cached units. Must run
  /// before any other operation.
  pub fn initialize(&mut self) -> Result<(), Error<E>> {
    self.set_page(0)?;

    let id = self.read_u8(Reg::ChipId)?;
    if id != BNO055_CHIP_ID {
      error!("Invalid chip ID: {}", id);
      return Err(Error::InvalidChipId(id));
    }
    debug!("Verified BNO055 chip ID {}", id);

    if let ResetMethod::Hardware(pin) = &mut self.reset {
      pin.set_high().map_err(|e| Error::ResetPin(e.kind()))?;
    }

    // The cache cannot be trusted before the first write, so neither the
    // mode nor the units go through their no-op checks here.
    self.write_mode(OperationMode::Config)?;
    info!("BNO055 initialized with operation mode set to CONFIG");

    let units = self.state.units;
    self.update_u8(Reg::UnitSel, UNIT_SEL_MASK, units.bits())?;
    self.state.apply_units(units);
    Ok(())
  }

  /// Configure the chip for `mode` with the given `units`.
  ///
  /// Sequence: enter CONFIG, enable the external crystal (if not already),
  /// set units (if changed), then switch to `mode`. Units can only be written
  /// in CONFIG mode, so the order is fixed.
  pub fn configure(&mut self, mode: OperationMode, units: Units) -> Result<(), Error<E>> {
    self.set_mode(OperationMode::Config)?;
    trace!("Operation mode set to CONFIG");

    if !self.state.external_crystal {
      self.set_external_crystal(true)?;
    }
    trace!("External crystal set");

    if self.state.units != units {
      self.set_units(units)?;
    }
    trace!("Desired units set");

    self.set_mode(mode)?;
    info!("Configured BNO055 for {} operation", mode.name());
    Ok(())
  }

  /// Read the chip ID register (0xA0 for a BNO055).
  pub fn chip_id(&mut self) -> Result<u8, Error<E>> {
    self.ensure_page0()?;
    self.read_u8(Reg::ChipId)
  }
}
