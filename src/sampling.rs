//! Oversampling of a single axis

use heapless::Vec;

/// Upper bound on the number of samples taken per axis
pub const MAX_SAMPLES: usize = 16;

/// Two samples further apart than this are treated as a bouncing contact
pub const AGREEMENT_TOLERANCE: i32 = 5;

/// Raw readings for one axis, taken back to back with the pins held steady
pub(crate) type Samples = Vec<u16, MAX_SAMPLES>;

/// The value chosen from a set of samples, and whether it can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Reading {
    pub value: u16,
    pub valid: bool,
}

/// Reduce one axis' samples to a single value
///
/// With one sample it is returned as-is. With two, the second is returned and
/// the reading is only valid when both agree within [AGREEMENT_TOLERANCE].
/// With three or more the median is returned; taking the middle element
/// already discards outliers, so no agreement check is made.
pub(crate) fn select(samples: &mut [u16]) -> Reading {
    debug_assert!(!samples.is_empty());

    let mut valid = true;

    match samples.len() {
        1 => {}
        2 => {
            let spread = samples[0] as i32 - samples[1] as i32;
            if spread.abs() > AGREEMENT_TOLERANCE {
                valid = false;
            }
        }
        _ => samples.sort_unstable(),
    }

    Reading {
        value: samples[samples.len() / 2],
        valid,
    }
}
