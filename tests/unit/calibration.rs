//! Calibration status polling

use bno055::Error;

use crate::common::*;

const CALIB_STAT: u8 = 0x35;

#[test]
fn all_ones_is_fully_calibrated() {
  let (mut imu, bus) = initialized_driver();
  bus.set_register(CALIB_STAT, 0xFF);

  let status = imu.get_calibration_status().unwrap();
  assert_eq!((status.system, status.gyro, status.accel, status.mag), (3, 3, 3, 3));
  assert!(status.is_calibrated());
  assert!(imu.is_calibrated());
}

#[test]
fn all_zeros_is_uncalibrated() {
  let (mut imu, bus) = initialized_driver();
  bus.set_register(CALIB_STAT, 0x00);

  let status = imu.get_calibration_status().unwrap();
  assert_eq!((status.system, status.gyro, status.accel, status.mag), (0, 0, 0, 0));
  assert!(!status.is_calibrated());
  assert!(!imu.is_calibrated());
}

#[test]
fn fields_decode_from_their_bit_pairs() {
  let (mut imu, bus) = initialized_driver();
  // sys 0, gyr 3, acc 2, mag 1
  bus.set_register(CALIB_STAT, 0b00_11_10_01);

  let status = imu.get_calibration_status().unwrap();
  assert_eq!(status.system, 0);
  assert_eq!(status.gyro, 3);
  assert_eq!(status.accel, 2);
  assert_eq!(status.mag, 1);
  assert!(!status.is_calibrated());
}

#[test]
fn polling_sees_calibration_progress() {
  let (mut imu, bus) = initialized_driver();
  bus.set_register(CALIB_STAT, 0x3F);
  assert!(!imu.get_calibration_status().unwrap().is_calibrated());

  bus.set_register(CALIB_STAT, 0xFF);
  assert!(imu.get_calibration_status().unwrap().is_calibrated());
  assert_eq!(bus.events().len(), 2);
}

#[test]
fn read_failure_keeps_previous_status() {
  let (mut imu, bus) = initialized_driver();
  bus.set_register(CALIB_STAT, 0xFF);
  imu.get_calibration_status().unwrap();

  bus.fail_next_read();
  assert!(matches!(imu.get_calibration_status(), Err(Error::I2c(_))));
  assert!(imu.is_calibrated());
}
