//! Flip-and-slide convolution of two parameterised periodic waveforms.
//!
//! [`wave`] samples the inputs, [`math`] computes the full convolution once,
//! [`frame`] rebuilds the sliding interaction for any shift index and
//! [`animation`] sequences those frames towards a [`animation::FrameSink`].

pub mod animation;
pub mod frame;
pub mod math;
pub mod params;
pub mod wave;

pub use animation::{AnimationDriver, FrameSink, Pacer, PlaybackStatus, StopSignal, ThreadPacer};
pub use frame::{AnimationFrame, ConvolutionSession};
pub use math::{convolve_full, ConvolutionError, ConvolutionResult};
pub use params::Settings;
pub use wave::{primary_function, SampledSignal, WaveShape, WaveformSpec};
