//! Fixed-point register codec.
//!
//! The BNO055 stores every multi-byte output and offset register as a
//! little-endian two's-complement pair (LSB at the lower address). Physical
//! values are the raw integer divided by a per-domain LSB-per-unit divisor
//! (see [`ScaleFactors`](crate::ScaleFactors)).
//!
//! All functions here are total and pure.

use micromath::F32Ext;

/// Combine a register pair into a signed 16-bit value.
#[inline]
pub const fn decode16(msb: u8, lsb: u8) -> i16 {
  i16::from_le_bytes([lsb, msb])
}

/// Decode a register pair and divide by `scale` (LSB per physical unit).
#[inline]
pub fn decode_scaled(msb: u8, lsb: u8, scale: f32) -> f32 {
  f32::from(decode16(msb, lsb)) / scale
}

/// Convert a physical value to register counts, rounding to nearest.
///
/// Results outside the `i16` range saturate to `i16::MIN` / `i16::MAX`.
pub fn encode_scaled(value: f32, scale: f32) -> i16 {
  let counts = F32Ext::round(value * scale);
  if counts >= f32::from(i16::MAX) {
    i16::MAX
  } else if counts <= f32::from(i16::MIN) {
    i16::MIN
  } else {
    // NaN lands here and casts to 0
    counts as i16
  }
}

/// Split a signed 16-bit value into `(lsb, msb)`.
#[inline]
pub const fn encode16(value: i16) -> (u8, u8) {
  let [lsb, msb] = value.to_le_bytes();
  (lsb, msb)
}

/// Decode the little-endian pair starting at `buf[at]`.
#[inline]
pub(crate) fn pair(buf: &[u8], at: usize, scale: f32) -> f32 {
  decode_scaled(buf[at + 1], buf[at], scale)
}
