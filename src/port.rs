//! [PinDriver] which manipulates GPIO port registers directly
//!
//! This is the fast path for targets where each GPIO port exposes a direction
//! register and an output register, and a pin is addressed by its port and a
//! bitmask within that port. It saves the dispatch through per-pin HAL types at
//! the cost of being tied to that register layout.

use bondrewd::Bitfields;

use crate::driver::{Level, PinDriver, PinMode};

/// A GPIO addressed by port and bit, packed into a single byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Bitfields)]
#[bondrewd(default_endianness = "le")]
pub struct PortPin {
    #[bondrewd(bit_length = 5)]
    port: u8,
    #[bondrewd(bit_length = 3)]
    bit: u8,
}

impl PortPin {
    /// Address bit `bit` of port `port`
    ///
    /// Returns `None` unless `port < 32` and `bit < 8`.
    pub fn new(port: u8, bit: u8) -> Option<Self> {
        if port < 32 && bit < 8 {
            Some(Self { port, bit })
        } else {
            None
        }
    }

    /// Index of the GPIO port
    pub fn port(&self) -> u8 {
        self.port
    }

    /// Bit position within the port; `0..=7`
    pub fn bit(&self) -> u8 {
        self.bit
    }

    /// The mask selecting this pin within its port's registers
    pub fn mask(&self) -> u8 {
        1 << self.bit
    }
}

impl From<u8> for PortPin {
    fn from(raw: u8) -> Self {
        Self::from_bytes([raw])
    }
}

impl From<PortPin> for u8 {
    fn from(pin: PortPin) -> Self {
        pin.into_bytes()[0]
    }
}

/// The per-port registers touched by [PortDriver]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Data direction; a set bit makes the pin an output
    Direction,
    /// Output latch; a set bit drives the pin high
    Output,
}

/// Raw access to a target's GPIO port registers and its ADC
pub trait PortRegisters {
    type Error;

    fn read(&mut self, port: u8, register: Register) -> Result<u8, Self::Error>;

    fn write(&mut self, port: u8, register: Register, value: u8) -> Result<(), Self::Error>;

    /// Blocking 10-bit conversion of the analog channel behind `pin`
    fn convert(&mut self, pin: PortPin) -> Result<u16, Self::Error>;
}

/// Pin driver performing read-modify-write cycles on port registers
pub struct PortDriver<R> {
    registers: R,
}

impl<R> PortDriver<R>
where
    R: PortRegisters,
{
    pub fn new(registers: R) -> Self {
        Self { registers }
    }

    pub fn release(self) -> R {
        self.registers
    }

    // -----------------------------------------------------------------------
    // PRIVATE

    fn modify(&mut self, pin: PortPin, register: Register, set: bool) -> Result<(), R::Error> {
        let value = self.registers.read(pin.port, register)?;
        let value = if set {
            value | pin.mask()
        } else {
            value & !pin.mask()
        };

        self.registers.write(pin.port, register, value)
    }
}

impl<R> PinDriver for PortDriver<R>
where
    R: PortRegisters,
{
    type Pin = PortPin;
    type Error = R::Error;

    fn set_mode(&mut self, pin: PortPin, mode: PinMode) -> Result<(), Self::Error> {
        self.modify(pin, Register::Direction, mode == PinMode::Output)
    }

    fn write(&mut self, pin: PortPin, level: Level) -> Result<(), Self::Error> {
        self.modify(pin, Register::Output, level == Level::High)
    }

    fn read_analog(&mut self, pin: PortPin) -> Result<u16, Self::Error> {
        self.registers.convert(pin)
    }
}
