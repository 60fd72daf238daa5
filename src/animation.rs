//! Playback of the sliding visualisation.
//!
//! The driver is re-entered on every external event with the currently observed
//! start request and stop signal. It either shows the idle midpoint frame or plays
//! a complete run, then falls back to idle. Progress is never kept between calls.

use crate::frame::{AnimationFrame, ConvolutionSession};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Shift indices between two displayed frames come from this many steps per second.
const STEPS_PER_SECOND: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Static midpoint frame was shown
    Idle,
    /// A run has started; frames follow
    Running,
    /// Every frame of a run was shown
    Done,
    /// A run was cut short by the stop signal
    Stopped,
}

/// Receives frames from the driver, e.g. a chart or a terminal.
pub trait FrameSink {
    fn render(&mut self, frame: &AnimationFrame);

    fn status(&mut self, _status: PlaybackStatus) {}
}

/// Delay between frames.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

/// External stop channel shared between the driver and whoever controls it.
#[derive(Debug, Default, Clone)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Shift indices advanced per displayed frame: `max(1, round(100 / fps))`.
///
/// Halfway cases round to even, so 40 fps advances by 2 and 8 fps by 12.
pub fn skip_for_fps(fps: u32) -> usize {
    let fps = fps.max(1) as f64;
    ((STEPS_PER_SECOND / fps).round_ties_even() as usize).max(1)
}

pub fn frame_delay(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}

/// `0, skip, 2 * skip, ...` strictly below `total_steps`.
pub fn shift_indices(total_steps: usize, skip: usize) -> impl Iterator<Item = usize> {
    (0..total_steps).step_by(skip.max(1))
}

pub struct AnimationDriver<'a> {
    session: &'a ConvolutionSession,
    fps: u32,
}

impl<'a> AnimationDriver<'a> {
    pub fn new(session: &'a ConvolutionSession) -> Self {
        AnimationDriver {
            session,
            fps: session.settings().fps,
        }
    }

    pub fn skip(&self) -> usize {
        skip_for_fps(self.fps)
    }

    /// Frame shown while idle
    pub fn idle_frame(&self) -> AnimationFrame {
        self.session.frame(self.session.midpoint())
    }

    /// Runs when `start` is requested and no stop is observed, otherwise shows the
    /// idle frame. Returns once the driver is idle again.
    pub fn invoke(
        &mut self,
        start: bool,
        stop: &StopSignal,
        sink: &mut dyn FrameSink,
        pacer: &mut dyn Pacer,
    ) -> PlaybackStatus {
        let status = if start && !stop.is_stopped() {
            self.run(stop, sink, pacer)
        } else {
            sink.render(&self.idle_frame());
            PlaybackStatus::Idle
        };

        sink.status(status);
        status
    }

    fn run(
        &mut self,
        stop: &StopSignal,
        sink: &mut dyn FrameSink,
        pacer: &mut dyn Pacer,
    ) -> PlaybackStatus {
        sink.status(PlaybackStatus::Running);

        let skip = self.skip();
        let delay = frame_delay(self.fps);
        log::info!(
            "Animation started: {} steps, skip {}, {:?} per frame",
            self.session.total_steps(),
            skip,
            delay
        );

        let mut status = PlaybackStatus::Done;
        for index in shift_indices(self.session.total_steps(), skip) {
            if stop.is_stopped() {
                log::info!("Animation stopped before shift index {}", index);
                status = PlaybackStatus::Stopped;
                break;
            }

            sink.render(&self.session.frame(index));
            pacer.pause(delay);
        }

        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Settings;

    #[derive(Default)]
    struct RecordingSink {
        indices: Vec<usize>,
        statuses: Vec<PlaybackStatus>,
    }

    impl FrameSink for RecordingSink {
        fn render(&mut self, frame: &AnimationFrame) {
            self.indices.push(frame.shift_index);
        }

        fn status(&mut self, status: PlaybackStatus) {
            self.statuses.push(status);
        }
    }

    #[derive(Default)]
    struct RecordingPacer {
        delays: Vec<Duration>,
    }

    impl Pacer for RecordingPacer {
        fn pause(&mut self, delay: Duration) {
            self.delays.push(delay);
        }
    }

    /// Raises the stop signal after a fixed number of pauses.
    struct StoppingPacer {
        stop: StopSignal,
        after: usize,
        pauses: usize,
    }

    impl Pacer for StoppingPacer {
        fn pause(&mut self, _delay: Duration) {
            self.pauses += 1;
            if self.pauses == self.after {
                self.stop.stop();
            }
        }
    }

    fn session(duration_secs: u32, fps: u32) -> ConvolutionSession {
        ConvolutionSession::new(Settings {
            duration_secs,
            fps,
            ..Settings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_skip_for_fps() {
        assert_eq!(skip_for_fps(50), 2);
        assert_eq!(skip_for_fps(100), 1);
        assert_eq!(skip_for_fps(1), 100);
        assert_eq!(skip_for_fps(30), 3);
        assert_eq!(skip_for_fps(40), 2);
        assert_eq!(skip_for_fps(8), 12);
        assert_eq!(skip_for_fps(3), 33);
        assert_eq!(skip_for_fps(0), 100);
    }

    #[test]
    fn test_frame_delay() {
        assert_eq!(frame_delay(50), Duration::from_millis(20));
        assert_eq!(frame_delay(1), Duration::from_secs(1));
    }

    #[test]
    fn test_shift_indices() {
        let indices: Vec<usize> = shift_indices(7, 3).collect();
        assert_eq!(indices, vec![0, 3, 6]);
        assert_eq!(shift_indices(199, 2).count(), 100);
    }

    #[test]
    fn test_idle_shows_midpoint() {
        let session = session(1, 50);
        let mut driver = AnimationDriver::new(&session);
        let mut sink = RecordingSink::default();
        let mut pacer = RecordingPacer::default();

        let status = driver.invoke(false, &StopSignal::new(), &mut sink, &mut pacer);

        assert_eq!(status, PlaybackStatus::Idle);
        assert_eq!(sink.indices, vec![99]);
        assert!(pacer.delays.is_empty());
        assert_eq!(sink.statuses, vec![PlaybackStatus::Idle]);
    }

    #[test]
    fn test_stop_observed_at_entry() {
        let session = session(1, 50);
        let mut driver = AnimationDriver::new(&session);
        let mut sink = RecordingSink::default();
        let mut pacer = RecordingPacer::default();
        let stop = StopSignal::new();
        stop.stop();

        let status = driver.invoke(true, &stop, &mut sink, &mut pacer);

        assert_eq!(status, PlaybackStatus::Idle);
        assert_eq!(sink.indices, vec![99]);
    }

    #[test]
    fn test_full_run() {
        let session = session(1, 50);
        let mut driver = AnimationDriver::new(&session);
        let mut sink = RecordingSink::default();
        let mut pacer = RecordingPacer::default();

        let status = driver.invoke(true, &StopSignal::new(), &mut sink, &mut pacer);

        assert_eq!(status, PlaybackStatus::Done);
        assert_eq!(sink.indices, (0..199).step_by(2).collect::<Vec<_>>());
        assert_eq!(
            sink.statuses,
            vec![PlaybackStatus::Running, PlaybackStatus::Done]
        );
        assert_eq!(pacer.delays.len(), 100);
        assert!(pacer.delays.iter().all(|&d| d == Duration::from_millis(20)));
    }

    #[test]
    fn test_stop_between_frames() {
        let session = session(1, 100);
        let mut driver = AnimationDriver::new(&session);
        let mut sink = RecordingSink::default();
        let stop = StopSignal::new();
        let mut pacer = StoppingPacer {
            stop: stop.clone(),
            after: 3,
            pauses: 0,
        };

        let status = driver.invoke(true, &stop, &mut sink, &mut pacer);

        assert_eq!(status, PlaybackStatus::Stopped);
        assert_eq!(sink.indices, vec![0, 1, 2]);
        assert_eq!(
            sink.statuses,
            vec![PlaybackStatus::Running, PlaybackStatus::Stopped]
        );
    }

    #[test]
    fn test_stop_signal_reset() {
        let stop = StopSignal::new();
        let observer = stop.clone();
        stop.stop();
        assert!(observer.is_stopped());
        observer.reset();
        assert!(!stop.is_stopped());
    }
}
