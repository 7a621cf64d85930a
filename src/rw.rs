use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::*};

use crate::{defs::Reg, Bno055, Error};

impl<I, D, P, E> Bno055<I, D, P>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
  P: OutputPin,
{
  pub(crate) fn read<const N: usize, T: TryFrom<[u8; N]>>(&mut self, reg: Reg) -> Result<T, Error<E>> {
    let mut b = [0u8; N];
    self.read_bytes(reg, &mut b)?;
    TryFrom::try_from(b).map_err(|_| Error::InvalidState)
  }

  pub(crate) fn read_u8(&mut self, reg: Reg) -> Result<u8, Error<E>> {
    let mut b = [0u8; 1];
    self.read_bytes(reg, &mut b)?;
    Ok(b[0])
  }

  /// Burst read starting at `reg`; the chip auto-increments the address.
  pub(crate) fn read_bytes(&mut self, reg: Reg, buf: &mut [u8]) -> Result<(), Error<E>> {
    self.i2c.write_read(self.address, &[reg.into()], buf).map_err(Error::I2c)
  }

  pub(crate) fn write_u8(&mut self, reg: Reg, value: u8) -> Result<(), Error<E>> {
    self.write_raw(reg.into(), value)
  }

  /// Single-register write by raw address, for walking register blocks.
  pub(crate) fn write_raw(&mut self, addr: u8, value: u8) -> Result<(), Error<E>> {
    self.i2c.write(self.address, &[addr, value]).map_err(Error::I2c)
  }

  /// Read-modify-write of the bits selected by `mask`.
  pub(crate) fn update_u8(&mut self, reg: Reg, mask: u8, bits: u8) -> Result<u8, Error<E>> {
    let current = self.read_u8(reg)?;
    let next = (current & !mask) | (bits & mask);
    self.write_u8(reg, next)?;
    Ok(next)
  }
}
