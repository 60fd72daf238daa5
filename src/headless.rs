//! Terminal front-ends for the animation driver.

use crate::cli::OutputFormat;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use signal_convolutor::animation::{shift_indices, AnimationDriver};
use signal_convolutor::{
    AnimationFrame, ConvolutionSession, FrameSink, PlaybackStatus, Settings, StopSignal,
    ThreadPacer,
};
use std::error::Error;
use std::io::{self, Write};

/// Shows a progress bar while frames arrive and logs where the run ended.
pub struct SummarySink {
    progress: ProgressBar,
    last_point: Option<(usize, f64, f64)>,
}

impl SummarySink {
    pub fn new(frames: u64) -> Self {
        let progress = ProgressBar::new(frames);
        progress.set_style(
            ProgressStyle::with_template("{bar:40.green} {pos}/{len} frames, {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        SummarySink {
            progress,
            last_point: None,
        }
    }
}

impl FrameSink for SummarySink {
    fn render(&mut self, frame: &AnimationFrame) {
        let (t, value) = frame.current_point;
        self.last_point = Some((frame.shift_index, t, value));
        self.progress.set_message(format!("t = {:.2}s, conv = {:.4}", t, value));
        self.progress.inc(1);
    }

    fn status(&mut self, status: PlaybackStatus) {
        if status == PlaybackStatus::Running {
            return;
        }
        self.progress.finish();

        if let Some((index, t, value)) = self.last_point {
            log::info!(
                "{:?} at shift index {} (t = {:.2}s), convolution = {:.6}",
                status,
                index,
                t,
                value
            );
        }
    }
}

#[derive(Serialize)]
struct Header<'a> {
    settings: &'a Settings,
    total_steps: usize,
}

#[derive(Serialize)]
struct StatusLine {
    status: String,
}

/// Writes one JSON object per line: a header, every frame, then the final status.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink {
            writer,
            error: None,
        }
    }

    pub fn write_header(&mut self, session: &ConvolutionSession) {
        let header = Header {
            settings: session.settings(),
            total_steps: session.total_steps(),
        };
        self.write_line(&header);
    }

    fn write_line<T: Serialize>(&mut self, value: &T) {
        if self.error.is_some() {
            return;
        }

        let result = serde_json::to_writer(&mut self.writer, value)
            .map_err(io::Error::from)
            .and_then(|_| writeln!(self.writer));

        if let Err(err) = result {
            log::error!("Could not write frame: {}", err);
            self.error = Some(err);
        }
    }

    /// First write error, if any, and the writer back.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn render(&mut self, frame: &AnimationFrame) {
        self.write_line(frame);
    }

    fn status(&mut self, status: PlaybackStatus) {
        self.write_line(&StatusLine {
            status: format!("{:?}", status),
        });
    }
}

pub fn run(
    settings: Settings,
    format: OutputFormat,
    start: bool,
    stop_requested: bool,
) -> Result<PlaybackStatus, Box<dyn Error>> {
    let session = ConvolutionSession::new(settings)?;
    let mut driver = AnimationDriver::new(&session);

    let stop = StopSignal::new();
    if stop_requested {
        stop.stop();
    }

    let status = match format {
        OutputFormat::Summary => {
            let running = start && !stop_requested;
            let frames = if running {
                shift_indices(session.total_steps(), driver.skip()).count()
            } else {
                1
            };

            let mut sink = SummarySink::new(frames as u64);
            driver.invoke(start, &stop, &mut sink, &mut ThreadPacer)
        }
        OutputFormat::Jsonl => {
            let mut sink = JsonLinesSink::new(io::stdout().lock());
            sink.write_header(&session);
            let status = driver.invoke(start, &stop, &mut sink, &mut ThreadPacer);
            sink.finish()?;
            status
        }
    };

    Ok(status)
}
