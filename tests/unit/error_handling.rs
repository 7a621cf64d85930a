//! Transport failures and cache consistency

use bno055::{Error, NoResetPin, OperationMode, ResetMethod, Units};

use crate::common::*;

#[test]
fn initialize_surfaces_transport_failure() {
  let (mut imu, bus) = create_driver();
  bus.fail_next_read();
  assert!(matches!(imu.initialize(), Err(Error::I2c(MockError))));

  // No internal retry; a second call succeeds
  imu.initialize().unwrap();
}

#[test]
fn failed_unit_write_keeps_cached_units_and_restores_mode() {
  let (mut imu, bus) = initialized_driver();
  imu.set_mode(OperationMode::Imu).unwrap();
  bus.fail_write_to(0x3B);

  let units = Units { temperature: bno055::TemperatureUnit::Fahrenheit, ..Default::default() };
  assert!(matches!(imu.set_units(units), Err(Error::I2c(_))));
  assert_eq!(imu.state().units, Units::default());
  assert_eq!(imu.state().scale.temperature, 1.0);
  assert_eq!(imu.mode(), OperationMode::Imu);
}

#[test]
fn failed_crystal_write_keeps_flag_and_skips_settle() {
  let (mut imu, bus) = initialized_driver();
  bus.fail_write_to(0x3F);

  assert!(matches!(imu.set_external_crystal(true), Err(Error::I2c(_))));
  assert!(!imu.state().external_crystal);
  assert!(bus.delays().is_empty());
}

#[test]
fn configure_stops_at_first_failure() {
  let (mut imu, bus) = initialized_driver();
  bus.fail_write_to(0x3F);

  assert!(matches!(imu.configure(OperationMode::Ndof, Units::default()), Err(Error::I2c(_))));
  assert_eq!(imu.mode(), OperationMode::Config);
  assert!(bus.writes_to(0x3D).is_empty());
}

#[test]
fn release_hands_back_resources() {
  let (imu, _bus) = initialized_driver();
  let (_i2c, _delay, reset) = imu.release();
  assert!(matches!(reset, ResetMethod::<NoResetPin>::Software));
}
