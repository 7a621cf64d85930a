//! Axis remap register sequence

use bno055::{Axis, AxisRemap, Error, OperationMode};

use crate::common::*;

#[test]
fn duplicate_axes_are_rejected_before_any_bus_traffic() {
  let (mut imu, bus) = initialized_driver();

  let result = imu.remap_axis(AxisRemap::new(Axis::PositiveX, Axis::PositiveX, Axis::PositiveZ));
  assert!(matches!(result, Err(Error::InvalidArgument)));
  let result = imu.remap_axis(AxisRemap::new(Axis::PositiveY, Axis::NegativeY, Axis::PositiveZ));
  assert!(matches!(result, Err(Error::InvalidArgument)));
  assert!(bus.events().is_empty());
}

#[test]
fn remap_in_config_writes_both_registers_with_settles() {
  let (mut imu, bus) = initialized_driver();

  imu.remap_axis(AxisRemap::new(Axis::PositiveY, Axis::NegativeX, Axis::PositiveZ)).unwrap();
  assert_eq!(
    bus.events(),
    vec![
      Event::Write { page: 0, reg: 0x41, value: 0x21 },
      Event::Delay(10),
      Event::Write { page: 0, reg: 0x42, value: 0x02 },
      Event::Delay(10),
      Event::Delay(20),
    ]
  );
}

#[test]
fn remap_from_fusion_mode_restores_it() {
  let (mut imu, bus) = initialized_driver();
  imu.set_mode(OperationMode::Ndof).unwrap();
  bus.clear_events();

  imu.remap_axis(AxisRemap::new(Axis::NegativeX, Axis::NegativeY, Axis::PositiveZ)).unwrap();
  assert_eq!(bus.writes_to(0x3D), vec![0x00, 0x0C]);
  assert_eq!(bus.delays(), vec![30, 25, 10, 10, 30, 20]);
  assert_eq!(bus.register(0x42), 0x06);
  assert_eq!(imu.mode(), OperationMode::Ndof);
}

#[test]
fn remap_reads_back() {
  let (mut imu, bus) = initialized_driver();
  assert_eq!(imu.axis_remap().unwrap(), AxisRemap::default());

  let remap = AxisRemap::new(Axis::PositiveZ, Axis::PositiveX, Axis::NegativeY);
  imu.remap_axis(remap).unwrap();
  bus.clear_events();
  assert_eq!(imu.axis_remap().unwrap(), remap);
  assert_eq!(bus.events(), vec![Event::Read { page: 0, reg: 0x41, len: 2 }]);
}

#[test]
fn failed_sign_write_restores_mode() {
  let (mut imu, bus) = initialized_driver();
  imu.set_mode(OperationMode::Compass).unwrap();
  bus.fail_write_to(0x42);

  let result = imu.remap_axis(AxisRemap::new(Axis::PositiveY, Axis::PositiveX, Axis::PositiveZ));
  assert!(matches!(result, Err(Error::I2c(_))));
  assert_eq!(imu.mode(), OperationMode::Compass);
  assert_eq!(bus.register(0x3D), 0x09);
}
