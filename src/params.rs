//! Parameter definitions for the convolution visualiser.
//!
//! Ranges mirror the sliders the user is given; the sampling rate is fixed.

use crate::wave::{WaveShape, WaveformSpec};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Samples per second on the shared time axis (Hz)
pub const SAMPLING_RATE: f64 = 100.0;

pub const DURATION_RANGE: RangeInclusive<u32> = 1..=10;
pub const FPS_RANGE: RangeInclusive<u32> = 1..=100;
pub const FREQUENCY_RANGE: RangeInclusive<f64> = 0.1..=5.0;
pub const AMPLITUDE_RANGE: RangeInclusive<f64> = 0.1..=5.0;
pub const OFFSET_RANGE: RangeInclusive<f64> = -2.0..=2.0;

/// Step between the time samples (seconds)
pub fn dt() -> f64 {
    1.0 / SAMPLING_RATE
}

/// Everything the visualiser needs to compute one parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Length of both input signals (seconds)
    pub duration_secs: u32,

    /// Animation speed, approximate frames per second
    pub fps: u32,

    /// Stationary signal
    pub signal1: WaveformSpec,

    /// Signal that gets flipped and slid across `signal1`
    pub signal2: WaveformSpec,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duration_secs: 5,
            fps: 50,
            signal1: WaveformSpec {
                shape: WaveShape::Square,
                frequency: 1.0,
                amplitude: 1.0,
                x_offset: 0.0,
                y_offset: 0.0,
            },
            signal2: WaveformSpec {
                shape: WaveShape::Sine,
                frequency: 0.5,
                amplitude: 1.0,
                x_offset: 0.0,
                y_offset: 0.0,
            },
        }
    }
}

impl Settings {
    /// Number of samples on the time axis
    pub fn sample_count(&self) -> usize {
        (self.duration_secs as f64 * SAMPLING_RATE) as usize
    }

    pub fn duration(&self) -> f64 {
        self.duration_secs as f64
    }

    /// Copy of these settings with every field pulled into its allowed range.
    pub fn clamped(&self) -> Self {
        Self {
            duration_secs: clamp_to(self.duration_secs, &DURATION_RANGE),
            fps: clamp_to(self.fps, &FPS_RANGE),
            signal1: self.signal1.clamped(),
            signal2: self.signal2.clamped(),
        }
    }
}

impl WaveformSpec {
    pub fn clamped(&self) -> Self {
        Self {
            shape: self.shape,
            frequency: clamp_to(self.frequency, &FREQUENCY_RANGE),
            amplitude: clamp_to(self.amplitude, &AMPLITUDE_RANGE),
            x_offset: clamp_to(self.x_offset, &OFFSET_RANGE),
            y_offset: clamp_to(self.y_offset, &OFFSET_RANGE),
        }
    }
}

fn clamp_to<T: PartialOrd + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    if value < *range.start() {
        *range.start()
    } else if value > *range.end() {
        *range.end()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_initial_sliders() {
        let settings = Settings::default();
        assert_eq!(settings.duration_secs, 5);
        assert_eq!(settings.fps, 50);
        assert_eq!(settings.signal1.shape, WaveShape::Square);
        assert_eq!(settings.signal2.shape, WaveShape::Sine);
        assert_eq!(settings.signal2.frequency, 0.5);
    }

    #[test]
    fn test_sample_count() {
        let mut settings = Settings::default();
        settings.duration_secs = 1;
        assert_eq!(settings.sample_count(), 100);
        settings.duration_secs = 10;
        assert_eq!(settings.sample_count(), 1000);
        assert!((dt() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_clamped() {
        let mut settings = Settings::default();
        settings.duration_secs = 0;
        settings.fps = 500;
        settings.signal1.frequency = 0.0;
        settings.signal1.x_offset = -7.5;
        settings.signal2.amplitude = 9.0;
        settings.signal2.y_offset = 3.0;

        let clamped = settings.clamped();
        assert_eq!(clamped.duration_secs, 1);
        assert_eq!(clamped.fps, 100);
        assert_eq!(clamped.signal1.frequency, 0.1);
        assert_eq!(clamped.signal1.x_offset, -2.0);
        assert_eq!(clamped.signal2.amplitude, 5.0);
        assert_eq!(clamped.signal2.y_offset, 2.0);
    }

    #[test]
    fn test_clamped_keeps_valid_values() {
        let settings = Settings::default();
        assert_eq!(settings.clamped(), settings);
    }
}
