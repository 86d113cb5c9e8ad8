use std::collections::{HashMap, VecDeque};

use resistive_touch::{
    Level,
    PinDriver,
    PinMode,
    Point,
    PortDriver,
    PortPin,
    PortRegisters,
    Register,
    TouchScreen,
};

/// In-memory register file for four 8-bit ports
#[derive(Debug, Default)]
struct FakePorts {
    direction: [u8; 4],
    output: [u8; 4],
    conversions: HashMap<u8, VecDeque<u16>>,
}

impl FakePorts {
    fn queue(&mut self, pin: PortPin, values: &[u16]) {
        self.conversions
            .entry(pin.into())
            .or_default()
            .extend(values.iter().copied());
    }
}

impl PortRegisters for FakePorts {
    type Error = ();

    fn read(&mut self, port: u8, register: Register) -> Result<u8, Self::Error> {
        let bank = match register {
            Register::Direction => &self.direction,
            Register::Output => &self.output,
        };

        bank.get(port as usize).copied().ok_or(())
    }

    fn write(&mut self, port: u8, register: Register, value: u8) -> Result<(), Self::Error> {
        let bank = match register {
            Register::Direction => &mut self.direction,
            Register::Output => &mut self.output,
        };

        *bank.get_mut(port as usize).ok_or(())? = value;
        Ok(())
    }

    fn convert(&mut self, pin: PortPin) -> Result<u16, Self::Error> {
        self.conversions
            .get_mut(&u8::from(pin))
            .and_then(VecDeque::pop_front)
            .ok_or(())
    }
}

#[test]
fn mode_and_level_touch_only_their_bit() {
    let pin = PortPin::new(1, 2).unwrap();
    let mut driver = PortDriver::new(FakePorts {
        direction: [0, 0b1000_0001, 0, 0],
        output: [0, 0b1000_0000, 0, 0],
        ..FakePorts::default()
    });

    driver.set_mode(pin, PinMode::Output).unwrap();
    driver.write(pin, Level::High).unwrap();

    let ports = driver.release();
    assert_eq!(ports.direction[1], 0b1000_0101);
    assert_eq!(ports.output[1], 0b1000_0100);

    let mut driver = PortDriver::new(ports);
    driver.write(pin, Level::Low).unwrap();
    driver.set_mode(pin, PinMode::Input).unwrap();

    let ports = driver.release();
    assert_eq!(ports.direction[1], 0b1000_0001);
    assert_eq!(ports.output[1], 0b1000_0000);
}

#[test]
fn invalid_port_is_an_error() {
    let mut driver = PortDriver::new(FakePorts::default());

    assert!(driver.set_mode(PortPin::new(9, 0).unwrap(), PinMode::Output).is_err());
}

#[test]
fn get_point_through_port_registers() {
    let xp = PortPin::new(1, 0).unwrap();
    let yp = PortPin::new(1, 1).unwrap();
    let xm = PortPin::new(2, 5).unwrap();
    let ym = PortPin::new(2, 6).unwrap();

    let mut ports = FakePorts {
        direction: [0, 0, 0b0000_0001, 0],
        ..FakePorts::default()
    };
    ports.queue(yp, &[600, 601, 600]);
    ports.queue(xm, &[400, 400, 400]);

    let mut ts = TouchScreen::with_resistance(PortDriver::new(ports), xp, yp, xm, ym, 300);

    // ((600 / 400) - 1) * 601 * 300 / 1024 = 88.04
    assert_eq!(ts.get_point().unwrap(), Point::new(601, 400, 88));

    let ports = ts.release().release();
    assert_eq!(ports.direction[1], 0b0000_0011);
    assert_eq!(ports.direction[2], 0b0110_0001);
}
