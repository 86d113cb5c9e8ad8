//! [PinDriver] built on the portable `embedded-hal` traits

use core::marker::PhantomData;

use embedded_hal::{
    adc::{Channel, OneShot},
    digital::v2::OutputPin,
};

use crate::driver::{Level, PinDriver, PinMode};

/// An output pin which can also be switched to a floating input at runtime
///
/// Most HALs encode the pin mode in the type; boards wiring a resistive panel
/// need a GPIO type that can change direction in place instead (a "flex" or
/// dynamic pin).
pub trait FlexPin: OutputPin {
    /// Disable the output driver, leaving the pin floating
    fn set_as_input(&mut self) -> Result<(), Self::Error>;

    /// Enable the output driver
    fn set_as_output(&mut self) -> Result<(), Self::Error>;
}

/// The four electrodes of a 4-wire panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Electrode {
    XPlus,
    YPlus,
    XMinus,
    YMinus,
}

/// Any error which may occur while driving the electrodes through `embedded-hal`
#[derive(Debug)]
pub enum HalError<P, A> {
    /// Switching or writing a pin failed
    PinError(P),
    /// The analog conversion failed
    AdcError(A),
    /// Tried to sample an electrode which is not wired to the ADC
    NotAnalog(Electrode),
}

/// Electrode pins and ADC for a panel wired to ordinary GPIOs
///
/// Only Y+ and X- are ever sampled, so only those two need ADC channels.
pub struct HalPins<M, ADC, XP, YP, XM, YM> {
    adc: ADC,
    xp: XP,
    yp: YP,
    xm: XM,
    ym: YM,
    _adc: PhantomData<M>,
}

impl<M, ADC, XP, YP, XM, YM> HalPins<M, ADC, XP, YP, XM, YM> {
    /// Take ownership of the ADC and the four electrode pins
    pub fn new(adc: ADC, xp: XP, yp: YP, xm: XM, ym: YM) -> Self {
        Self {
            adc,
            xp,
            yp,
            xm,
            ym,
            _adc: PhantomData,
        }
    }

    /// Give the ADC and pins back
    pub fn release(self) -> (ADC, XP, YP, XM, YM) {
        (self.adc, self.xp, self.yp, self.xm, self.ym)
    }
}

impl<M, ADC, XP, YP, XM, YM, PE, AE> PinDriver for HalPins<M, ADC, XP, YP, XM, YM>
where
    ADC: OneShot<M, u16, YP, Error = AE> + OneShot<M, u16, XM, Error = AE>,
    XP: FlexPin<Error = PE>,
    YP: FlexPin<Error = PE> + Channel<M>,
    XM: FlexPin<Error = PE> + Channel<M>,
    YM: FlexPin<Error = PE>,
{
    type Pin = Electrode;
    type Error = HalError<PE, AE>;

    fn set_mode(&mut self, pin: Electrode, mode: PinMode) -> Result<(), Self::Error> {
        match (pin, mode) {
            (Electrode::XPlus, PinMode::Input) => self.xp.set_as_input(),
            (Electrode::XPlus, PinMode::Output) => self.xp.set_as_output(),
            (Electrode::YPlus, PinMode::Input) => self.yp.set_as_input(),
            (Electrode::YPlus, PinMode::Output) => self.yp.set_as_output(),
            (Electrode::XMinus, PinMode::Input) => self.xm.set_as_input(),
            (Electrode::XMinus, PinMode::Output) => self.xm.set_as_output(),
            (Electrode::YMinus, PinMode::Input) => self.ym.set_as_input(),
            (Electrode::YMinus, PinMode::Output) => self.ym.set_as_output(),
        }
        .map_err(HalError::PinError)
    }

    fn write(&mut self, pin: Electrode, level: Level) -> Result<(), Self::Error> {
        match pin {
            Electrode::XPlus => drive(&mut self.xp, level),
            Electrode::YPlus => drive(&mut self.yp, level),
            Electrode::XMinus => drive(&mut self.xm, level),
            Electrode::YMinus => drive(&mut self.ym, level),
        }
        .map_err(HalError::PinError)
    }

    fn read_analog(&mut self, pin: Electrode) -> Result<u16, Self::Error> {
        let result = match pin {
            Electrode::YPlus => {
                nb::block!(<ADC as OneShot<M, u16, YP>>::read(&mut self.adc, &mut self.yp))
            }
            Electrode::XMinus => {
                nb::block!(<ADC as OneShot<M, u16, XM>>::read(&mut self.adc, &mut self.xm))
            }
            other => return Err(HalError::NotAnalog(other)),
        };

        result.map_err(HalError::AdcError)
    }
}

fn drive<P>(pin: &mut P, level: Level) -> Result<(), P::Error>
where
    P: OutputPin,
{
    match level {
        Level::Low => pin.set_low(),
        Level::High => pin.set_high(),
    }
}
