//! Low-level pin access used by the sampling routines

/// Electrical role of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    /// High-impedance input
    Input,
    /// Push-pull output
    Output,
}

/// Digital output level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// The digital and analog I/O primitives the touchscreen needs
///
/// Implementations exclusively own the four electrode pins for as long as the
/// [TouchScreen](crate::TouchScreen) holds them. Every operation re-asserts the
/// roles it needs, so implementations don't have to track anything between calls.
pub trait PinDriver {
    /// Identifies one of the electrode pins
    type Pin: Copy;
    /// Any error raised by the underlying hardware
    type Error;

    /// Switch a pin between input and output
    fn set_mode(&mut self, pin: Self::Pin, mode: PinMode) -> Result<(), Self::Error>;

    /// Drive a pin's output latch
    fn write(&mut self, pin: Self::Pin, level: Level) -> Result<(), Self::Error>;

    /// Perform a blocking 10-bit conversion on a pin, returning a value in
    /// `0..=1023`
    fn read_analog(&mut self, pin: Self::Pin) -> Result<u16, Self::Error>;
}

impl<D> PinDriver for &mut D
where
    D: PinDriver,
{
    type Pin = D::Pin;
    type Error = D::Error;

    fn set_mode(&mut self, pin: Self::Pin, mode: PinMode) -> Result<(), Self::Error> {
        (**self).set_mode(pin, mode)
    }

    fn write(&mut self, pin: Self::Pin, level: Level) -> Result<(), Self::Error> {
        (**self).write(pin, level)
    }

    fn read_analog(&mut self, pin: Self::Pin) -> Result<u16, Self::Error> {
        (**self).read_analog(pin)
    }
}
