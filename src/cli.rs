//! Command-line argument parsing.

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use signal_convolutor::{Settings, WaveShape, WaveformSpec};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Progress bar and a closing summary
    Summary,
    /// One JSON object per frame on stdout
    Jsonl,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "signal_convolutor")]
#[command(about = "Animated flip-and-slide convolution of two waveforms", long_about = None)]
pub struct Args {
    /// Run without a window and stream frames to the terminal
    #[arg(long)]
    pub headless: bool,

    /// Headless output format
    #[arg(long, value_enum, default_value = "summary")]
    pub format: OutputFormat,

    /// Start the animation (headless only); false shows the idle frame
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub start: bool,

    /// Raise the stop signal before the driver is invoked (headless only)
    #[arg(long)]
    pub stop: bool,

    /// Signal duration in seconds (1-10)
    #[arg(long, value_name = "SECONDS", default_value_t = 5)]
    pub duration: u32,

    /// Animation speed in frames per second (1-100)
    #[arg(long, value_name = "FPS", default_value_t = 50)]
    pub fps: u32,

    /// Shape of signal 1: sine, square, sawtooth, triangle
    #[arg(long, default_value = "square")]
    pub shape1: String,

    #[arg(long, default_value_t = 1.0)]
    pub freq1: f64,

    #[arg(long, default_value_t = 1.0)]
    pub amp1: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x_off1: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub y_off1: f64,

    /// Shape of signal 2: sine, square, sawtooth, triangle
    #[arg(long, default_value = "sine")]
    pub shape2: String,

    #[arg(long, default_value_t = 0.5)]
    pub freq2: f64,

    #[arg(long, default_value_t = 1.0)]
    pub amp2: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub x_off2: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub y_off2: f64,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or_else(|_| {
            eprintln!("Warning: Unknown log level '{}', using info", self.log_level);
            LevelFilter::Info
        })
    }

    /// Settings described by the arguments, pulled into the allowed ranges
    pub fn settings(&self) -> Settings {
        Settings {
            duration_secs: self.duration,
            fps: self.fps,
            signal1: WaveformSpec {
                shape: WaveShape::from(self.shape1.as_str()),
                frequency: self.freq1,
                amplitude: self.amp1,
                x_offset: self.x_off1,
                y_offset: self.y_off1,
            },
            signal2: WaveformSpec {
                shape: WaveShape::from(self.shape2.as_str()),
                frequency: self.freq2,
                amplitude: self.amp2,
                x_offset: self.x_off2,
                y_offset: self.y_off2,
            },
        }
        .clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settings_default() {
        let args = Args::parse_from(["signal_convolutor"]);
        assert!(!args.headless);
        assert!(args.start);
        assert_eq!(args.format, OutputFormat::Summary);
        assert_eq!(args.settings(), Settings::default());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let args = Args::parse_from([
            "signal_convolutor",
            "--duration",
            "30",
            "--x-off2",
            "-5",
            "--shape2",
            "zigzag",
        ]);
        let settings = args.settings();
        assert_eq!(settings.duration_secs, 10);
        assert_eq!(settings.signal2.x_offset, -2.0);
        assert_eq!(settings.signal2.shape, WaveShape::Sine);
    }

    #[test]
    fn test_shape_names() {
        let args = Args::parse_from([
            "signal_convolutor",
            "--shape1",
            "Triangle",
            "--shape2",
            "sawtooth",
        ]);
        let settings = args.settings();
        assert_eq!(settings.signal1.shape, WaveShape::Triangle);
        assert_eq!(settings.signal2.shape, WaveShape::Sawtooth);
    }

    #[test]
    fn test_headless_flags() {
        let args = Args::parse_from([
            "signal_convolutor",
            "--headless",
            "--format",
            "jsonl",
            "--start",
            "false",
        ]);
        assert!(args.headless);
        assert_eq!(args.format, OutputFormat::Jsonl);
        assert!(!args.start);
    }

    #[test]
    fn test_log_level() {
        let args = Args::parse_from(["signal_convolutor", "--log-level", "debug"]);
        assert_eq!(args.log_level(), LevelFilter::Debug);
        let args = Args::parse_from(["signal_convolutor", "--log-level", "loud"]);
        assert_eq!(args.log_level(), LevelFilter::Info);
    }
}
