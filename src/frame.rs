//! Flip-and-slide frame construction.
//!
//! A [`ConvolutionSession`] holds everything derived from one parameter set: the
//! shared time axis, both sampled inputs and the full convolution. Frames are built
//! from it on demand and keep no state between shift indices.

use crate::math::{convolve_full, ConvolutionError, ConvolutionResult};
use crate::params::{dt, Settings};
use crate::wave::{time_axis, SampledSignal, WaveformSpec};
use serde::Serialize;

/// One step of the sliding visualisation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnimationFrame {
    pub shift_index: usize,
    /// Shift time `shift_index * dt` (seconds)
    pub t_current: f64,
    pub tau: Vec<f64>,
    pub signal1: Vec<f64>,
    /// Signal 2 reversed and shifted to `t_current`, zero outside the overlap window
    pub sliding: Vec<f64>,
    pub product: Vec<f64>,
    /// Convolution time axis truncated to `0..=shift_index`
    pub result_time: Vec<f64>,
    /// Convolution values truncated to `0..=shift_index`
    pub result_so_far: Vec<f64>,
    /// Marker at exactly `shift_index`
    pub current_point: (f64, f64),
}

#[derive(Clone, Debug)]
pub struct ConvolutionSession {
    settings: Settings,
    dt: f64,
    signal1: SampledSignal,
    signal2: SampledSignal,
    convolution: ConvolutionResult,
}

impl ConvolutionSession {
    pub fn new(settings: Settings) -> Result<Self, ConvolutionError> {
        let dt = dt();
        let tau = time_axis(settings.sample_count(), dt);

        let signal1 = SampledSignal::generate(&settings.signal1, &tau);
        let signal2 = SampledSignal::generate(&settings.signal2, &tau);

        Self::from_signals(settings, dt, signal1, signal2)
    }

    /// Builds a session from already sampled inputs. Both must share one time axis.
    pub fn from_signals(
        settings: Settings,
        dt: f64,
        signal1: SampledSignal,
        signal2: SampledSignal,
    ) -> Result<Self, ConvolutionError> {
        if signal1.time != signal2.time {
            return Err(ConvolutionError::MismatchedAxis);
        }

        let convolution = convolve_full(&signal1.values, &signal2.values, dt)?;

        Ok(ConvolutionSession {
            settings,
            dt,
            signal1,
            signal2,
            convolution,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn tau(&self) -> &[f64] {
        &self.signal1.time
    }

    pub fn signal1(&self) -> &SampledSignal {
        &self.signal1
    }

    pub fn signal2(&self) -> &SampledSignal {
        &self.signal2
    }

    pub fn convolution(&self) -> &ConvolutionResult {
        &self.convolution
    }

    /// Number of shift indices, one per convolution output
    pub fn total_steps(&self) -> usize {
        self.convolution.len()
    }

    /// Shift index shown while no animation is playing
    pub fn midpoint(&self) -> usize {
        self.total_steps() / 2
    }

    /// Builds the frame for `shift_index`, clamped into `0..total_steps`.
    pub fn frame(&self, shift_index: usize) -> AnimationFrame {
        let shift_index = shift_index.min(self.total_steps() - 1);
        let t_current = shift_index as f64 * self.dt;

        let tau = self.tau();
        let sliding = sliding_signal(
            tau,
            &self.settings.signal2,
            t_current,
            self.settings.duration(),
        );

        let product = self
            .signal1
            .values
            .iter()
            .zip(&sliding)
            .map(|(a, b)| a * b)
            .collect();

        let visible = ..=shift_index;
        let current_point = (
            self.convolution.time[shift_index],
            self.convolution.values[shift_index],
        );

        log::debug!(
            "Frame {} (t = {:.2}s), conv = {:.4}",
            shift_index,
            t_current,
            current_point.1
        );

        AnimationFrame {
            shift_index,
            t_current,
            tau: tau.to_vec(),
            signal1: self.signal1.values.clone(),
            sliding,
            product,
            result_time: self.convolution.time[visible].to_vec(),
            result_so_far: self.convolution.values[visible].to_vec(),
            current_point,
        }
    }
}

/// Evaluates `g(t_current - tau)` for the sliding signal.
///
/// Local times outside `[0, duration)` produce exactly zero; the y offset is only
/// added inside the window.
pub fn sliding_signal(tau: &[f64], spec: &WaveformSpec, t_current: f64, duration: f64) -> Vec<f64> {
    tau.iter()
        .map(|&tau| {
            let t_local = t_current - tau;
            if (0.0..duration).contains(&t_local) {
                spec.value_at(t_local)
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::WaveShape;

    fn session(duration_secs: u32) -> ConvolutionSession {
        let settings = Settings {
            duration_secs,
            ..Settings::default()
        };
        ConvolutionSession::new(settings).unwrap()
    }

    #[test]
    fn test_total_steps_and_midpoint() {
        let session = session(2);
        assert_eq!(session.total_steps(), 399);
        assert_eq!(session.midpoint(), 199);
    }

    #[test]
    fn test_first_frame_only_touches_origin() {
        let session = session(1);
        let frame = session.frame(0);
        assert_eq!(frame.t_current, 0.0);
        assert!(frame.sliding[1..].iter().all(|&v| v == 0.0));
        assert_eq!(frame.result_so_far.len(), 1);
    }

    #[test]
    fn test_shift_index_is_clamped() {
        let session = session(1);
        let frame = session.frame(10_000);
        assert_eq!(frame.shift_index, 198);
        assert_eq!(frame.result_so_far.len(), 199);
        assert_eq!(frame.result_so_far, session.convolution().values);
    }

    #[test]
    fn test_sliding_window_bounds() {
        let spec = WaveformSpec {
            shape: WaveShape::Square,
            frequency: 1.0,
            amplitude: 1.0,
            x_offset: 0.0,
            y_offset: 0.5,
        };
        let tau = time_axis(100, 0.01);
        let sliding = sliding_signal(&tau, &spec, 0.5, 1.0);

        for (i, &t) in tau.iter().enumerate() {
            if t <= 0.5 {
                assert_ne!(sliding[i], 0.0, "inside window at tau = {}", t);
            } else {
                // y offset must not leak outside the window
                assert_eq!(sliding[i], 0.0, "outside window at tau = {}", t);
            }
        }
    }

    #[test]
    fn test_window_excludes_duration() {
        let spec = WaveformSpec::default();
        // t_local = 1.0 - 0.0 equals duration and must be dropped
        let sliding = sliding_signal(&[0.0, 0.25], &spec, 1.0, 1.0);
        assert_eq!(sliding[0], 0.0);
        assert!((sliding[1] - spec.value_at(0.75)).abs() < 1e-12);
    }

    #[test]
    fn test_product_is_pointwise() {
        let session = session(1);
        let frame = session.frame(120);
        for i in 0..frame.tau.len() {
            assert_eq!(frame.product[i], frame.signal1[i] * frame.sliding[i]);
        }
        assert_eq!(frame.current_point, session.convolution().point(120).unwrap());
    }

    #[test]
    fn test_mismatched_axis_is_rejected() {
        let spec = WaveformSpec::default();
        let a = SampledSignal::generate(&spec, &time_axis(10, 0.01));
        let b = SampledSignal::generate(&spec, &time_axis(12, 0.01));
        let result = ConvolutionSession::from_signals(Settings::default(), 0.01, a, b);
        assert_eq!(result.err(), Some(ConvolutionError::MismatchedAxis));
    }
}
