use crate::{defs::UNIT_SEL_POR, CalibrationStatus, OperationMode, Readings, ScaleFactors, SensorOffsets, Units};

/// Driver-side mirror of the chip's configuration and last readings.
///
/// Only the driver mutates it. `page`, `mode`, `units` and `external_crystal`
/// track the hardware registers; they are re-read from the chip after a reset
/// or self-test.
#[derive(Debug, Clone, Copy)]
pub struct DeviceState {
  /// Selected register page (0 or 1)
  pub page: u8,
  pub mode: OperationMode,
  pub units: Units,
  /// Always derived from `units`
  pub scale: ScaleFactors,
  pub external_crystal: bool,
  pub offsets: SensorOffsets,
  pub calibration: CalibrationStatus,
  pub readings: Readings,
}

impl DeviceState {
  pub(crate) fn apply_units(&mut self, units: Units) {
    self.units = units;
    self.scale = units.scale_factors();
  }

  /// Registers the chip holds right after a reset.
  pub(crate) fn power_on(&mut self) {
    self.page = 0;
    self.mode = OperationMode::Config;
    self.external_crystal = false;
    self.apply_units(Units::from_register(UNIT_SEL_POR));
  }
}

impl Default for DeviceState {
  fn default() -> Self {
    let units = Units::default();
    Self {
      page: 0,
      mode: OperationMode::Config,
      units,
      scale: units.scale_factors(),
      external_crystal: false,
      offsets: SensorOffsets::default(),
      calibration: CalibrationStatus::default(),
      readings: Readings::default(),
    }
  }
}
