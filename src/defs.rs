#![allow(dead_code)]

/// Page 0 register map. `PageId` is the only register mirrored on page 1.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reg {
  ChipId = 0x00,
  AccId = 0x01,
  MagId = 0x02,
  GyrId = 0x03,
  SwRevIdLsb = 0x04,
  SwRevIdMsb = 0x05,
  BlRevId = 0x06,
  PageId = 0x07,
  AccDataX = 0x08,
  MagDataX = 0x0E,
  GyrDataX = 0x14,
  EulDataH = 0x1A,
  QuaDataW = 0x20,
  LiaDataX = 0x28,
  GrvDataX = 0x2E,
  Temp = 0x34,
  CalibStat = 0x35,
  StResult = 0x36,
  IntSta = 0x37,
  SysClkStatus = 0x38,
  SysStatus = 0x39,
  SysErr = 0x3A,
  UnitSel = 0x3B,
  OprMode = 0x3D,
  PwrMode = 0x3E,
  SysTrigger = 0x3F,
  TempSource = 0x40,
  AxisMapConfig = 0x41,
  AxisMapSign = 0x42,
  AccOffsetXLsb = 0x55,
  MagOffsetXLsb = 0x5B,
  GyrOffsetXLsb = 0x61,
  AccRadiusLsb = 0x67,
  MagRadiusLsb = 0x69,
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

// SYS_TRIGGER bits
pub(crate) const SYS_TRIGGER_SELF_TEST: u8 = 0x01;
pub(crate) const SYS_TRIGGER_RST_SYS: u8 = 0x20;
pub(crate) const SYS_TRIGGER_CLK_SEL: u8 = 0x80;

pub(crate) const OPR_MODE_MASK: u8 = 0x0F;

// UNIT_SEL: ACC(0) GYR(1) EUL(2) TEMP(4) ORI(7); bits 3, 5, 6 reserved
pub(crate) const UNIT_SEL_MASK: u8 = 0x97;
pub(crate) const UNIT_SEL_POR: u8 = 0x80;

pub(crate) const BNO055_CHIP_ID: u8 = 0xA0;

// I2C addresses (COM3 low / high)
pub(crate) const ADDR_I2C_PRIM: u8 = 0x28;
pub(crate) const ADDR_I2C_ALT: u8 = 0x29;

// Offset block: ACC_OFFSET_X_LSB..=MAG_RADIUS_MSB
pub(crate) const OFFSET_BLOCK_LEN: usize = 22;

// Settle times in ms, per datasheet
pub(crate) const MODE_SWITCH_DELAY: u32 = 30;
pub(crate) const CLK_SEL_DELAY: u32 = 650;
pub(crate) const RESET_DELAY: u32 = 650;
pub(crate) const RESET_PULSE_DELAY: u32 = 10;
pub(crate) const SELF_TEST_DELAY: u32 = 200;
pub(crate) const CONFIG_ENTRY_DELAY: u32 = 25;
pub(crate) const AXIS_REMAP_DELAY: u32 = 10;
pub(crate) const AXIS_REMAP_RESTORE_DELAY: u32 = 20;

// Fixed scale divisors (LSB per unit)
pub(crate) const MAG_LSB_PER_UT: f32 = 16.0;
pub(crate) const QUATERNION_LSB: f32 = 16384.0;
