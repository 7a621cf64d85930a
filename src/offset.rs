//! Calibration offset profile.
//!
//! Once the chip reports full calibration, its offsets can be read back and
//! stored by the application, then written again after the next power-up to
//! skip the calibration routine. The block is only writable in CONFIG mode.
//!
//! Layout of the 22-byte block starting at `ACC_OFFSET_X_LSB`, each value a
//! little-endian `i16`:
//!
//! | Bytes  | Content                      | Scale                  |
//! |--------|------------------------------|------------------------|
//! | 0..6   | accelerometer offset x, y, z | acceleration unit      |
//! | 6..12  | magnetometer offset x, y, z  | 16 LSB per µT          |
//! | 12..18 | gyroscope offset x, y, z     | angular rate unit      |
//! | 18..20 | accelerometer radius         | raw                    |
//! | 20..22 | magnetometer radius          | raw                    |

use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::*};
use micromath::vector::Vector3d;

use crate::{
  codec::{decode16, encode16, encode_scaled, pair},
  defs::*,
  mode::Settle,
  sensor::ZERO,
  Bno055, Error, ScaleFactors,
};

impl<I, D, P, E> Bno055<I, D, P>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  P: OutputPin,
{
  /// Read the offset block in one burst and cache it.
  ///
  /// Switches to CONFIG mode if needed and restores the prior mode afterwards.
  pub fn get_offsets(&mut self) -> Result<SensorOffsets, Error<E>> {
    self.ensure_page0()?;
    self.with_config_mode(Settle::OFFSETS, |bno| {
      let mut block = [0u8; OFFSET_BLOCK_LEN];
      bno.read_bytes(Reg::AccOffsetXLsb, &mut block)?;
      trace!("Offset block read: {:?}", block);

      let offsets = SensorOffsets::decode(&block, &bno.state.scale);
      bno.state.offsets = offsets;
      Ok(offsets)
    })
  }

  /// Write the offset block, radius registers included.
  ///
  /// The offset registers only accept single-byte writes, so the block goes
  /// out as 22 consecutive transactions. The cache holds the values as the
  /// chip will report them, i.e. after rounding to register counts.
  pub fn set_offsets(&mut self, offsets: &SensorOffsets) -> Result<(), Error<E>> {
    let block = offsets.encode(&self.state.scale);
    trace!("Offset block write: {:?}", block);

    self.ensure_page0()?;
    self.with_config_mode(Settle::OFFSETS, |bno| {
      let base: u8 = Reg::AccOffsetXLsb.into();
      for (addr, value) in (base..).zip(block) {
        bno.write_raw(addr, value)?;
      }
      bno.state.offsets = SensorOffsets::decode(&block, &bno.state.scale);
      info!("Sensor offsets written");
      Ok(())
    })
  }
}

/// Calibration offsets in physical units, plus the raw radius values.
#[derive(Debug, Clone, Copy)]
pub struct SensorOffsets {
  pub accelerometer: Vector3d<f32>,
  pub magnetometer: Vector3d<f32>,
  pub gyroscope: Vector3d<f32>,
  pub accelerometer_radius: i16,
  pub magnetometer_radius: i16,
}

impl SensorOffsets {
  /// Decode a register block with the given scale factors.
  pub fn decode(block: &[u8; OFFSET_BLOCK_LEN], scale: &ScaleFactors) -> Self {
    let vector = |at: usize, s: f32| Vector3d { x: pair(block, at, s), y: pair(block, at + 2, s), z: pair(block, at + 4, s) };
    Self {
      accelerometer: vector(0, scale.accelerometer),
      magnetometer: vector(6, scale.magnetometer),
      gyroscope: vector(12, scale.gyroscope),
      accelerometer_radius: decode16(block[19], block[18]),
      magnetometer_radius: decode16(block[21], block[20]),
    }
  }

  /// Encode into a register block, saturating out-of-range values.
  pub fn encode(&self, scale: &ScaleFactors) -> [u8; OFFSET_BLOCK_LEN] {
    let mut words = [0i16; OFFSET_BLOCK_LEN / 2];
    let vectors = [
      (self.accelerometer, scale.accelerometer),
      (self.magnetometer, scale.magnetometer),
      (self.gyroscope, scale.gyroscope),
    ];
    for (i, (v, s)) in vectors.into_iter().enumerate() {
      words[i * 3] = encode_scaled(v.x, s);
      words[i * 3 + 1] = encode_scaled(v.y, s);
      words[i * 3 + 2] = encode_scaled(v.z, s);
    }
    words[9] = self.accelerometer_radius;
    words[10] = self.magnetometer_radius;

    let mut block = [0u8; OFFSET_BLOCK_LEN];
    for (chunk, word) in block.chunks_exact_mut(2).zip(words) {
      let (lsb, msb) = encode16(word);
      chunk[0] = lsb;
      chunk[1] = msb;
    }
    block
  }
}

impl Default for SensorOffsets {
  fn default() -> Self {
    Self { accelerometer: ZERO, magnetometer: ZERO, gyroscope: ZERO, accelerometer_radius: 0, magnetometer_radius: 0 }
  }
}
