use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

const TAU: f64 = 2.0 * PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WaveShape {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl WaveShape {
    pub const ALL: [WaveShape; 4] = [
        WaveShape::Square,
        WaveShape::Sine,
        WaveShape::Sawtooth,
        WaveShape::Triangle,
    ];

    /// Looks a shape up by name. Anything unrecognised is a sine wave.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sine" | "sin" => WaveShape::Sine,
            "square" => WaveShape::Square,
            "sawtooth" | "saw" => WaveShape::Sawtooth,
            "triangle" => WaveShape::Triangle,
            other => {
                log::warn!("Unknown wave shape '{}', using Sine", other);
                WaveShape::Sine
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WaveShape::Sine => "Sine",
            WaveShape::Square => "Square",
            WaveShape::Sawtooth => "Sawtooth",
            WaveShape::Triangle => "Triangle",
        }
    }

    /// Unit-amplitude waveform evaluated at angle `x` (radians).
    fn evaluate(&self, x: f64) -> f64 {
        match self {
            WaveShape::Sine => x.sin(),
            WaveShape::Square => {
                if x.rem_euclid(TAU) < PI {
                    1.0
                } else {
                    -1.0
                }
            }
            WaveShape::Sawtooth => x.rem_euclid(TAU) / PI - 1.0,
            WaveShape::Triangle => {
                let phase = x.rem_euclid(TAU);
                if phase < PI {
                    2.0 * phase / PI - 1.0
                } else {
                    (3.0 * PI - 2.0 * phase) / PI
                }
            }
        }
    }
}

impl From<&str> for WaveShape {
    fn from(name: &str) -> Self {
        WaveShape::from_name(name)
    }
}

impl fmt::Display for WaveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User parameters for one periodic input signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformSpec {
    pub shape: WaveShape,
    pub frequency: f64,
    pub amplitude: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Default for WaveformSpec {
    fn default() -> Self {
        WaveformSpec {
            shape: WaveShape::Sine,
            frequency: 1.0,
            amplitude: 1.0,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

impl WaveformSpec {
    /// Value of the offset waveform at time `t`: `primary(t - x_offset) + y_offset`.
    pub fn value_at(&self, t: f64) -> f64 {
        primary_function(t - self.x_offset, self.frequency, self.amplitude, self.shape)
            + self.y_offset
    }
}

/// `amplitude * shape(2π * frequency * t)` with no offsets applied.
pub fn primary_function(t: f64, frequency: f64, amplitude: f64, shape: WaveShape) -> f64 {
    amplitude * shape.evaluate(TAU * frequency * t)
}

/// Uniform time axis starting at zero, end point excluded.
pub fn time_axis(samples: usize, dt: f64) -> Vec<f64> {
    (0..samples).map(|i| i as f64 * dt).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct SampledSignal {
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

impl SampledSignal {
    pub fn generate(spec: &WaveformSpec, time: &[f64]) -> SampledSignal {
        SampledSignal {
            time: time.to_vec(),
            values: time.iter().map(|&t| spec.value_at(t)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
