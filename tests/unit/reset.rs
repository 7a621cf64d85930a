//! Software and hardware reset with state resynchronization

use bno055::{AccelUnit, Error, OperationMode, OrientationFormat, Units};

use crate::common::*;

fn configured() -> (SoftwareDriver, MockBus) {
  let (mut imu, bus) = initialized_driver();
  imu.configure(OperationMode::Ndof, Units { acceleration: AccelUnit::MilliG, ..Default::default() }).unwrap();
  bus.clear_events();
  (imu, bus)
}

#[test]
fn software_reset_triggers_and_resyncs() {
  let (mut imu, bus) = configured();
  assert!(imu.state().external_crystal);

  imu.reset_chip().unwrap();
  assert_eq!(
    bus.events(),
    vec![
      Event::Write { page: 0, reg: 0x3F, value: 0x20 },
      Event::Delay(650),
      Event::Read { page: 0, reg: 0x07, len: 1 },
      Event::Read { page: 0, reg: 0x3F, len: 1 },
      Event::Read { page: 0, reg: 0x3D, len: 1 },
      Event::Read { page: 0, reg: 0x3B, len: 1 },
    ]
  );

  let state = imu.state();
  assert_eq!(state.mode, OperationMode::Config);
  assert!(!state.external_crystal);
  assert_eq!(state.page, 0);
  // Power-on UNIT_SEL is 0x80
  assert_eq!(state.units, Units { orientation: OrientationFormat::Android, ..Default::default() });
  assert_eq!(state.scale.accelerometer, 100.0);
}

#[test]
fn hardware_reset_pulses_the_pin() {
  let (mut imu, bus) = create_hardware_driver();
  imu.initialize().unwrap();
  assert_eq!(bus.events().iter().filter(|e| **e == Event::Pin(true)).count(), 1);

  imu.set_mode(OperationMode::Imu).unwrap();
  bus.clear_events();

  imu.reset_chip().unwrap();
  let events = bus.events();
  assert_eq!(&events[..4], &[Event::Pin(false), Event::Delay(10), Event::Pin(true), Event::Delay(650)]);
  assert!(bus.writes_to(0x3F).is_empty());
  assert_eq!(imu.mode(), OperationMode::Config);
}

#[test]
fn failed_reset_trigger_keeps_cache() {
  let (mut imu, bus) = configured();
  bus.fail_next_write();

  assert!(matches!(imu.reset_chip(), Err(Error::I2c(_))));
  assert_eq!(imu.mode(), OperationMode::Ndof);
  assert!(imu.state().external_crystal);
  assert!(bus.delays().is_empty());

  imu.reset_chip().unwrap();
  assert_eq!(imu.mode(), OperationMode::Config);
}

#[test]
fn failed_resync_after_reset_assumes_power_on_state() {
  let (mut imu, bus) = create_hardware_driver();
  imu.initialize().unwrap();
  imu.set_mode(OperationMode::Amg).unwrap();
  bus.fail_read_from(0x3B);

  assert!(matches!(imu.reset_chip(), Err(Error::I2c(_))));
  assert_eq!(imu.mode(), OperationMode::Config);
  assert_eq!(imu.state().page, 0);
  assert!(!imu.state().external_crystal);
  assert_eq!(imu.state().units, Units { orientation: OrientationFormat::Android, ..Units::default() });

  // The chip really is in CONFIG, so leaving it must hit the bus
  bus.clear_events();
  imu.set_mode(OperationMode::Amg).unwrap();
  assert_eq!(bus.writes_to(0x3D), vec![0x07]);
  assert_eq!(bus.register(0x3D), 0x07);
}

#[test]
fn failed_software_resync_assumes_power_on_state() {
  let (mut imu, bus) = initialized_driver();
  imu.set_mode(OperationMode::Ndof).unwrap();
  imu.set_external_crystal(true).unwrap();
  bus.fail_read_from(0x3D);

  assert!(matches!(imu.reset_chip(), Err(Error::I2c(_))));
  assert_eq!(imu.mode(), OperationMode::Config);
  assert!(!imu.state().external_crystal);
}
