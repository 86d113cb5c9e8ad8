//! 4-Wire Resistive Touchscreen
//!
//! Reads position and pressure from a bare resistive panel using four GPIOs,
//! two of which must be analog-capable, without a dedicated touch controller.
//! One plate is energised at a time while the other acts as a probe; the probe
//! voltage gives the contact position along the energised axis. Pressure is
//! estimated from the contact resistance between the plates.

#![cfg_attr(not(test), no_std)]

use log::{debug, trace};

pub use crate::{
    config::Config,
    driver::{Level, PinDriver, PinMode},
    hal::{Electrode, FlexPin, HalError, HalPins},
    port::{PortDriver, PortPin, PortRegisters, Register},
    sampling::{AGREEMENT_TOLERANCE, MAX_SAMPLES},
};
use crate::sampling::{Reading, Samples};

mod config;
mod driver;
mod hal;
mod port;
mod sampling;

// Full scale of a 10-bit conversion
const ADC_MAX: i32 = 1023;

/// Any type of error which may occur while sampling the panel
#[derive(Debug)]
pub enum Error<E> {
    /// Changing the direction of a pin failed
    ModeError(E),
    /// Driving a pin high or low failed
    WriteError(E),
    /// An analog conversion failed
    AdcError(E),
}

/// A touch sample
///
/// `x` and `y` are in ADC units. `z` is a pressure estimate; `0` means no
/// trustworthy contact was seen, not that no pressure was applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Does this sample's pressure exceed `threshold`?
    pub fn is_pressed(&self, threshold: i16) -> bool {
        self.z > threshold
    }
}

/// The pins connected to each electrode of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Electrodes<P> {
    pub x_plus: P,
    pub y_plus: P,
    pub x_minus: P,
    pub y_minus: P,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Resistive touchscreen driver
///
/// The driver owns the electrode pins exclusively. Each call reconfigures them
/// from scratch, and [TouchScreen::get_point] hands them back in output mode so
/// they can be shared with, for example, a display bus.
pub struct TouchScreen<D>
where
    D: PinDriver,
{
    driver: D,
    pins: Electrodes<D::Pin>,
    plate_resistance: u16,
    samples: usize,
    /// Advisory threshold for callers deciding whether a [Point] is a real
    /// touch; never consulted by the driver itself
    pub pressure_threshold: i16,
}

impl<D, E> TouchScreen<D>
where
    D: PinDriver<Error = E>,
{
    /// Create a driver with the default [Config]
    pub fn new(driver: D, xp: D::Pin, yp: D::Pin, xm: D::Pin, ym: D::Pin) -> Self {
        Self::with_config(driver, electrodes(xp, yp, xm, ym), Config::default())
    }

    /// Create a driver which knows the X plate's resistance in ohms, enabling
    /// the resistance based pressure estimate
    pub fn with_resistance(
        driver: D,
        xp: D::Pin,
        yp: D::Pin,
        xm: D::Pin,
        ym: D::Pin,
        plate_resistance: u16,
    ) -> Self {
        let config = Config::default().with_plate_resistance(plate_resistance);

        Self::with_config(driver, electrodes(xp, yp, xm, ym), config)
    }

    pub fn with_config(driver: D, pins: Electrodes<D::Pin>, config: Config) -> Self {
        Self {
            driver,
            pins,
            plate_resistance: config.plate_resistance,
            samples: config.sample_count(),
            pressure_threshold: config.pressure_threshold,
        }
    }

    /// Give the pin driver back
    pub fn release(self) -> D {
        self.driver
    }

    pub fn pins(&self) -> Electrodes<D::Pin> {
        self.pins
    }

    pub fn plate_resistance(&self) -> u16 {
        self.plate_resistance
    }

    /// Samples taken per axis by [TouchScreen::get_point]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Single reading of the X position, in `0..=1023`
    ///
    /// The pins are left configured for the measurement.
    pub fn read_touch_x(&mut self) -> Result<i16, Error<E>> {
        self.read_axis(Axis::X)
    }

    /// Single reading of the Y position, in `0..=1023`
    ///
    /// The pins are left configured for the measurement.
    pub fn read_touch_y(&mut self) -> Result<i16, Error<E>> {
        self.read_axis(Axis::Y)
    }

    /// Estimate the touch pressure
    ///
    /// With a known plate resistance this takes a fresh X reading, so the pins
    /// are cycled twice. Degenerate readings saturate or wrap rather than
    /// erroring.
    pub fn pressure(&mut self) -> Result<u16, Error<E>> {
        let (z1, z2) = self.read_contact()?;

        if self.plate_resistance != 0 {
            let x = self.read_touch_x()?;

            Ok(touch_resistance(z1, z2, x, self.plate_resistance) as u16)
        } else {
            Ok(contact_difference(z1, z2) as u16)
        }
    }

    /// Oversample the panel and return a [Point]
    ///
    /// If either axis' samples disagree, `z` is forced to `0`. All four pins
    /// are left in output mode, even when sampling fails.
    pub fn get_point(&mut self) -> Result<Point, Error<E>> {
        let point = self.measure();
        let restored = self.drive_all();

        let point = point?;
        restored?;

        Ok(point)
    }

    // -----------------------------------------------------------------------
    // PRIVATE

    fn measure(&mut self) -> Result<Point, Error<E>> {
        let x = self.sample_axis(Axis::X)?;
        let y = self.sample_axis(Axis::Y)?;

        let (z1, z2) = self.read_contact()?;

        let x_pos = x.value as i16;
        let mut z = if self.plate_resistance != 0 {
            touch_resistance(z1, z2, x_pos, self.plate_resistance) as i16
        } else {
            contact_difference(z1, z2) as i16
        };

        if !(x.valid && y.valid) {
            debug!("samples disagree (x: {}, y: {}); dropping pressure {}", x.valid, y.valid, z);
            z = 0;
        }

        Ok(Point::new(x_pos, y.value as i16, z))
    }

    /// Put every electrode back into output mode, attempting all four and
    /// reporting the first failure
    fn drive_all(&mut self) -> Result<(), Error<E>> {
        let Electrodes {
            x_plus,
            y_plus,
            x_minus,
            y_minus,
        } = self.pins;

        [y_plus, x_minus, y_minus, x_plus]
            .into_iter()
            .map(|pin| self.set_mode(pin, PinMode::Output))
            .fold(Ok(()), Result::and)
    }

    fn read_axis(&mut self, axis: Axis) -> Result<i16, Error<E>> {
        let probe = self.energise(axis)?;
        let raw = self.read(probe)?;

        Ok((ADC_MAX - raw as i32) as i16)
    }

    fn sample_axis(&mut self, axis: Axis) -> Result<Reading, Error<E>> {
        let probe = self.energise(axis)?;

        let mut samples = (0..self.samples)
            .take(MAX_SAMPLES)
            .map(|_| self.read(probe))
            .collect::<Result<Samples, _>>()?;
        trace!("{:?} samples: {:?}", axis, samples.as_slice());

        Ok(sampling::select(&mut samples))
    }

    /// Float the plate orthogonal to `axis` and drive a gradient across `axis`,
    /// returning the pin to probe
    fn energise(&mut self, axis: Axis) -> Result<D::Pin, Error<E>> {
        let Electrodes {
            x_plus,
            y_plus,
            x_minus,
            y_minus,
        } = self.pins;

        let (high, low, sense, other) = match axis {
            Axis::X => (x_plus, x_minus, y_plus, y_minus),
            Axis::Y => (y_plus, y_minus, x_minus, x_plus),
        };

        self.set_mode(sense, PinMode::Input)?;
        self.set_mode(other, PinMode::Input)?;
        self.write(sense, Level::Low)?;
        self.write(other, Level::Low)?;

        self.set_mode(high, PinMode::Output)?;
        self.write(high, Level::High)?;
        self.set_mode(low, PinMode::Output)?;
        self.write(low, Level::Low)?;

        Ok(sense)
    }

    /// Drive current through the contact point and read both sides of it
    fn read_contact(&mut self) -> Result<(u16, u16), Error<E>> {
        let Electrodes {
            x_plus,
            y_plus,
            x_minus,
            y_minus,
        } = self.pins;

        self.set_mode(x_plus, PinMode::Output)?;
        self.write(x_plus, Level::Low)?;
        self.set_mode(y_minus, PinMode::Output)?;
        self.write(y_minus, Level::High)?;

        self.write(x_minus, Level::Low)?;
        self.set_mode(x_minus, PinMode::Input)?;
        self.write(y_plus, Level::Low)?;
        self.set_mode(y_plus, PinMode::Input)?;

        let z1 = self.read(x_minus)?;
        let z2 = self.read(y_plus)?;
        trace!("z1: {}, z2: {}", z1, z2);

        Ok((z1, z2))
    }

    fn set_mode(&mut self, pin: D::Pin, mode: PinMode) -> Result<(), Error<E>> {
        self.driver.set_mode(pin, mode).map_err(Error::ModeError)
    }

    fn write(&mut self, pin: D::Pin, level: Level) -> Result<(), Error<E>> {
        self.driver.write(pin, level).map_err(Error::WriteError)
    }

    fn read(&mut self, pin: D::Pin) -> Result<u16, Error<E>> {
        self.driver.read_analog(pin).map_err(Error::AdcError)
    }
}

fn electrodes<P>(x_plus: P, y_plus: P, x_minus: P, y_minus: P) -> Electrodes<P> {
    Electrodes {
        x_plus,
        y_plus,
        x_minus,
        y_minus,
    }
}

/// Contact resistance in ohms, from the ratio of the two contact readings and
/// the X position along a plate of known resistance
fn touch_resistance(z1: u16, z2: u16, x: i16, plate_resistance: u16) -> f32 {
    let mut rtouch = z2 as f32 / z1 as f32;
    rtouch -= 1.0;
    rtouch *= x as f32;
    rtouch *= plate_resistance as f32;
    rtouch /= 1024.0;

    rtouch
}

/// Pressure proxy used when the plate resistance is unknown
fn contact_difference(z1: u16, z2: u16) -> i32 {
    ADC_MAX - (z2 as i32 - z1 as i32)
}
