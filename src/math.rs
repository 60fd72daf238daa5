use rayon::prelude::*;
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvolutionError {
    /// One of the inputs had no samples
    EmptySignal { which: &'static str },
    /// The two input signals were sampled on different time axes
    MismatchedAxis,
}

impl fmt::Display for ConvolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvolutionError::EmptySignal { which } => {
                write!(f, "cannot convolve: {} has no samples", which)
            }
            ConvolutionError::MismatchedAxis => {
                write!(f, "input signals are not sampled on the same time axis")
            }
        }
    }
}

impl std::error::Error for ConvolutionError {}

/// Full linear convolution of two signals together with its time axis.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvolutionResult {
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

impl ConvolutionResult {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Time and value at `index`
    pub fn point(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.time.get(index)?, *self.values.get(index)?))
    }
}

/// Calculates `dt * Σ_k y1[k] * y2[n - k]` for every `n` in `0..len(y1) + len(y2) - 1`.
///
/// Boundaries are implicitly zero padded, so the first and last outputs only see a
/// single overlapping sample pair. Scaling by `dt` turns the discrete sum into a
/// rectangle-rule estimate of the continuous convolution integral.
pub fn convolve_full(y1: &[f64], y2: &[f64], dt: f64) -> Result<ConvolutionResult, ConvolutionError> {
    if y1.is_empty() {
        return Err(ConvolutionError::EmptySignal { which: "signal 1" });
    }
    if y2.is_empty() {
        return Err(ConvolutionError::EmptySignal { which: "signal 2" });
    }

    let start = Instant::now();
    let output_len = y1.len() + y2.len() - 1;
    let min_chunk = (output_len / num_cpus::get()).max(1);

    let values: Vec<f64> = (0..output_len)
        .into_par_iter()
        .with_min_len(min_chunk)
        .map(|n| {
            let k_min = n.saturating_sub(y2.len() - 1);
            let k_max = n.min(y1.len() - 1);
            let sum: f64 = (k_min..=k_max).map(|k| y1[k] * y2[n - k]).sum();
            sum * dt
        })
        .collect();

    let time = (0..output_len).map(|i| i as f64 * dt).collect();

    log::info!(
        "Convolution of {} x {} samples Elapsed Time: {:?}",
        y1.len(),
        y2.len(),
        start.elapsed()
    );

    Ok(ConvolutionResult { time, values })
}
