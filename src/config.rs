use crate::sampling::MAX_SAMPLES;

/// Tunables for a [TouchScreen](crate::TouchScreen)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Samples taken per axis by [get_point](crate::TouchScreen::get_point);
    /// clamped to `1..=MAX_SAMPLES`
    pub samples: u8,
    /// Resistance across the X plate in ohms; `0` if unknown
    pub plate_resistance: u16,
    /// Pressure above which callers should consider the panel touched
    pub pressure_threshold: i16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            samples: 2,
            plate_resistance: 0,
            pressure_threshold: 10,
        }
    }
}

impl Config {
    pub fn with_samples(mut self, samples: u8) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_plate_resistance(mut self, ohms: u16) -> Self {
        self.plate_resistance = ohms;
        self
    }

    pub fn with_pressure_threshold(mut self, threshold: i16) -> Self {
        self.pressure_threshold = threshold;
        self
    }

    pub(crate) fn sample_count(&self) -> usize {
        (self.samples as usize).clamp(1, MAX_SAMPLES)
    }
}
