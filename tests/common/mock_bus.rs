//! Simulated BNO055 behind `embedded_hal::i2c::I2c`.
//!
//! Holds a two-page register file with the chip's auto-incrementing register
//! pointer, logs every bus access, delay and reset-pin change in one ordered
//! stream, and models the `SYS_TRIGGER` side effects (reset, self-test).

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};

pub const PAGE_ID: u8 = 0x07;
pub const SYS_TRIGGER: u8 = 0x3F;
pub const ST_RESULT: u8 = 0x36;

/// One observable action, in the order the driver performed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
  /// Burst read of `len` bytes starting at `reg`
  Read { page: u8, reg: u8, len: usize },
  /// Single register write (a multi-byte write logs one event per byte)
  Write { page: u8, reg: u8, value: u8 },
  Delay(u32),
  /// Reset pin driven high (`true`) or low
  Pin(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl i2c::Error for MockError {
  fn kind(&self) -> ErrorKind {
    ErrorKind::Other
  }
}

#[derive(Debug)]
struct Chip {
  address: u8,
  page: u8,
  pointer: u8,
  registers: [[u8; 128]; 2],
  self_test_result: u8,
  events: Vec<Event>,
  fail_next_read: bool,
  fail_next_write: bool,
  fail_write_to: Option<u8>,
  fail_read_from: Option<u8>,
  reset_line_low: bool,
}

impl Chip {
  fn new() -> Self {
    let mut chip = Self {
      address: 0x28,
      page: 0,
      pointer: 0,
      registers: [[0; 128]; 2],
      self_test_result: 0x0F,
      events: Vec::new(),
      fail_next_read: false,
      fail_next_write: false,
      fail_write_to: None,
      fail_read_from: None,
      reset_line_low: false,
    };
    chip.power_on();
    chip
  }

  /// Power-on register values
  fn power_on(&mut self) {
    self.page = 0;
    self.registers = [[0; 128]; 2];
    let p0 = &mut self.registers[0];
    p0[0x00] = 0xA0; // CHIP_ID
    p0[0x01] = 0xFB; // ACC_ID
    p0[0x02] = 0x32; // MAG_ID
    p0[0x03] = 0x0F; // GYR_ID
    p0[0x04] = 0x11; // SW_REV_ID_LSB
    p0[0x05] = 0x03; // SW_REV_ID_MSB
    p0[0x06] = 0x15; // BL_REV_ID
    p0[ST_RESULT as usize] = 0x0F;
    p0[0x3B] = 0x80; // UNIT_SEL
    p0[0x41] = 0x24; // AXIS_MAP_CONFIG
  }

  fn read(&mut self) -> u8 {
    let value = if self.pointer == PAGE_ID { self.page } else { self.registers[self.page as usize][self.pointer as usize & 0x7F] };
    self.pointer = self.pointer.wrapping_add(1);
    value
  }

  fn write(&mut self, value: u8) {
    let reg = self.pointer;
    self.events.push(Event::Write { page: self.page, reg, value });
    self.pointer = self.pointer.wrapping_add(1);

    if reg == PAGE_ID {
      self.page = value & 0x01;
      return;
    }
    if self.page == 0 && reg == SYS_TRIGGER {
      if value & 0x20 != 0 {
        self.power_on();
        return;
      }
      if value & 0x01 != 0 {
        self.registers[0][ST_RESULT as usize] = self.self_test_result;
      }
      self.registers[0][SYS_TRIGGER as usize] = value & 0x80;
      return;
    }
    self.registers[self.page as usize][reg as usize & 0x7F] = value;
  }
}

/// Shared handle to the simulated chip; clones observe the same state.
#[derive(Debug, Clone)]
pub struct MockBus {
  chip: Rc<RefCell<Chip>>,
}

impl MockBus {
  pub fn new() -> Self {
    Self { chip: Rc::new(RefCell::new(Chip::new())) }
  }

  /// Answer on the alternative address instead of 0x28.
  pub fn at_address(self, address: u8) -> Self {
    self.chip.borrow_mut().address = address;
    self
  }

  pub fn delay(&self) -> MockDelay {
    MockDelay { chip: self.chip.clone() }
  }

  pub fn pin(&self) -> MockPin {
    MockPin { chip: self.chip.clone() }
  }

  pub fn register(&self, reg: u8) -> u8 {
    self.chip.borrow().registers[0][reg as usize]
  }

  pub fn set_register(&self, reg: u8, value: u8) {
    self.chip.borrow_mut().registers[0][reg as usize] = value;
  }

  pub fn set_registers(&self, start: u8, values: &[u8]) {
    let mut chip = self.chip.borrow_mut();
    for (i, value) in values.iter().enumerate() {
      chip.registers[0][start as usize + i] = *value;
    }
  }

  pub fn page(&self) -> u8 {
    self.chip.borrow().page
  }

  /// `ST_RESULT` value produced by the next self-test trigger.
  pub fn set_self_test_result(&self, value: u8) {
    self.chip.borrow_mut().self_test_result = value;
  }

  pub fn events(&self) -> Vec<Event> {
    self.chip.borrow().events.clone()
  }

  pub fn clear_events(&self) {
    self.chip.borrow_mut().events.clear();
  }

  /// Writes to `reg`, in order.
  pub fn writes_to(&self, reg: u8) -> Vec<u8> {
    self
      .events()
      .into_iter()
      .filter_map(|e| match e {
        Event::Write { reg: r, value, .. } if r == reg => Some(value),
        _ => None,
      })
      .collect()
  }

  pub fn delays(&self) -> Vec<u32> {
    self
      .events()
      .into_iter()
      .filter_map(|e| match e {
        Event::Delay(ms) => Some(ms),
        _ => None,
      })
      .collect()
  }

  pub fn fail_next_read(&self) {
    self.chip.borrow_mut().fail_next_read = true;
  }

  pub fn fail_next_write(&self) {
    self.chip.borrow_mut().fail_next_write = true;
  }

  /// Fail the next read transaction starting at `reg`.
  pub fn fail_read_from(&self, reg: u8) {
    self.chip.borrow_mut().fail_read_from = Some(reg);
  }

  /// Fail the next write transaction addressed to `reg`.
  pub fn fail_write_to(&self, reg: u8) {
    self.chip.borrow_mut().fail_write_to = Some(reg);
  }
}

impl ErrorType for MockBus {
  type Error = MockError;
}

impl I2c<SevenBitAddress> for MockBus {
  fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
    let mut chip = self.chip.borrow_mut();
    if address != chip.address {
      return Err(MockError);
    }

    let has_read = operations.iter().any(|op| matches!(op, Operation::Read(_)));
    let target = operations.iter().find_map(|op| match op {
      Operation::Write(bytes) => bytes.first().copied(),
      _ => None,
    });
    if has_read {
      if chip.fail_next_read {
        chip.fail_next_read = false;
        return Err(MockError);
      }
      if target.is_some() && chip.fail_read_from == target {
        chip.fail_read_from = None;
        return Err(MockError);
      }
    } else {
      if chip.fail_next_write {
        chip.fail_next_write = false;
        return Err(MockError);
      }
      if target.is_some() && chip.fail_write_to == target {
        chip.fail_write_to = None;
        return Err(MockError);
      }
    }

    for op in operations.iter_mut() {
      match op {
        Operation::Write(bytes) => {
          if let Some((&reg, data)) = bytes.split_first() {
            chip.pointer = reg;
            for &value in data {
              chip.write(value);
            }
          }
        }
        Operation::Read(buf) => {
          let (page, reg, len) = (chip.page, chip.pointer, buf.len());
          chip.events.push(Event::Read { page, reg, len });
          for byte in buf.iter_mut() {
            *byte = chip.read();
          }
        }
      }
    }
    Ok(())
  }
}

/// Delay provider that logs instead of sleeping.
#[derive(Debug, Clone)]
pub struct MockDelay {
  chip: Rc<RefCell<Chip>>,
}

impl DelayNs for MockDelay {
  fn delay_ns(&mut self, ns: u32) {
    self.chip.borrow_mut().events.push(Event::Delay(ns / 1_000_000));
  }

  fn delay_ms(&mut self, ms: u32) {
    self.chip.borrow_mut().events.push(Event::Delay(ms));
  }
}

/// Reset line wired to the simulated chip; a rising edge after a low level
/// restores power-on register values.
#[derive(Debug, Clone)]
pub struct MockPin {
  chip: Rc<RefCell<Chip>>,
}

impl PinErrorType for MockPin {
  type Error = Infallible;
}

impl OutputPin for MockPin {
  fn set_low(&mut self) -> Result<(), Self::Error> {
    let mut chip = self.chip.borrow_mut();
    chip.reset_line_low = true;
    chip.events.push(Event::Pin(false));
    Ok(())
  }

  fn set_high(&mut self) -> Result<(), Self::Error> {
    let mut chip = self.chip.borrow_mut();
    if chip.reset_line_low {
      chip.reset_line_low = false;
      chip.power_on();
    }
    chip.events.push(Event::Pin(true));
    Ok(())
  }
}
