mod interaction_plot;
mod result_plot;
mod util;

use crate::convolution_plotter::interaction_plot::InteractionPlot;
use crate::convolution_plotter::result_plot::ResultPlot;
use egui::{CentralPanel, CollapsingHeader, ComboBox, Context, SidePanel, Slider, Ui};
use signal_convolutor::animation::AnimationDriver;
use signal_convolutor::params::{
    AMPLITUDE_RANGE, DURATION_RANGE, FPS_RANGE, FREQUENCY_RANGE, OFFSET_RANGE,
};
use signal_convolutor::{
    AnimationFrame, ConvolutionSession, FrameSink, PlaybackStatus, Settings, StopSignal,
    ThreadPacer, WaveShape, WaveformSpec,
};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

const PLOT_HEIGHT: f32 = 220.0;

enum PlaybackMessage {
    Frame(AnimationFrame),
    Status(PlaybackStatus),
}

/// Forwards frames from the driver thread to the UI thread.
struct ChannelSink {
    sender: Sender<PlaybackMessage>,
    ctx: Context,
}

impl FrameSink for ChannelSink {
    fn render(&mut self, frame: &AnimationFrame) {
        // A closed channel means the plotter has moved on to other settings
        let _ = self.sender.send(PlaybackMessage::Frame(frame.clone()));
        self.ctx.request_repaint();
    }

    fn status(&mut self, status: PlaybackStatus) {
        let _ = self.sender.send(PlaybackMessage::Status(status));
        self.ctx.request_repaint();
    }
}

/// Keeps whatever the driver last produced on the UI thread.
#[derive(Default)]
struct LatestFrame {
    frame: Option<AnimationFrame>,
}

impl FrameSink for LatestFrame {
    fn render(&mut self, frame: &AnimationFrame) {
        self.frame = Some(frame.clone());
    }
}

struct Playback {
    stop: StopSignal,
    receiver: Receiver<PlaybackMessage>,
}

pub struct ConvolutionPlotter {
    settings: Settings,
    session: Option<Arc<ConvolutionSession>>,
    interaction_plot: Option<InteractionPlot>,
    result_plot: Option<ResultPlot>,
    frame: Option<AnimationFrame>,
    playback: Option<Playback>,
    status: String,
}

impl ConvolutionPlotter {
    pub fn render(&mut self, ctx: &Context) {
        self.receive_frames();

        let mut changed = false;
        let mut start = false;
        let mut stop = false;

        SidePanel::left("settings_panel").show(ctx, |ui| {
            changed = self.settings_ui(ui);
        });

        CentralPanel::default().show(ctx, |ui| {
            ui.heading("Signal Convolutor");
            ui.horizontal(|ui| {
                start = ui.button("Start").clicked();
                stop = ui.button("Stop").clicked();
                ui.label(&self.status);
            });

            match (&self.frame, &self.interaction_plot, &self.result_plot) {
                (Some(frame), Some(interaction_plot), Some(result_plot)) => {
                    interaction_plot.draw(ui, frame, PLOT_HEIGHT);
                    result_plot.draw(ui, frame, PLOT_HEIGHT);
                }
                _ => {
                    ui.label("Nothing to show for these settings.");
                }
            }
        });

        if changed {
            self.recompute();
        } else if stop {
            self.stop_playback();
            self.show_idle();
        } else if start {
            self.start_playback(ctx);
        }
    }

    fn settings_ui(&mut self, ui: &mut Ui) -> bool {
        let mut changed = false;

        ui.heading("Global Settings");
        changed |= ui
            .add(
                Slider::new(&mut self.settings.duration_secs, DURATION_RANGE)
                    .text("Duration (s)")
                    .step_by(1.0),
            )
            .changed();
        changed |= ui
            .add(Slider::new(&mut self.settings.fps, FPS_RANGE).text("Anim Speed"))
            .on_hover_text("Frames per second (approx)")
            .changed();

        CollapsingHeader::new("Signal 1 (Stationary)")
            .default_open(true)
            .show(ui, |ui| {
                changed |= waveform_ui(ui, "1", &mut self.settings.signal1);
            });

        CollapsingHeader::new("Signal 2 (Sliding)")
            .default_open(true)
            .show(ui, |ui| {
                changed |= waveform_ui(ui, "2", &mut self.settings.signal2);
            });

        changed
    }

    /// Rebuilds everything derived from the settings and falls back to idle.
    fn recompute(&mut self) {
        self.stop_playback();

        match ConvolutionSession::new(self.settings) {
            Ok(session) => {
                self.interaction_plot = Some(InteractionPlot::new(&session));
                self.result_plot = Some(ResultPlot::new(&session));
                self.session = Some(Arc::new(session));
            }
            Err(err) => {
                log::error!("Could not compute convolution: {}", err);
                self.session = None;
                self.interaction_plot = None;
                self.result_plot = None;
                self.frame = None;
                self.status = err.to_string();
                return;
            }
        }

        self.show_idle();
    }

    fn show_idle(&mut self) {
        let Some(session) = &self.session else {
            return;
        };

        let mut sink = LatestFrame::default();
        AnimationDriver::new(session).invoke(false, &StopSignal::new(), &mut sink, &mut ThreadPacer);
        self.frame = sink.frame;
        self.status.clear();
    }

    fn start_playback(&mut self, ctx: &Context) {
        self.stop_playback();

        let Some(session) = self.session.clone() else {
            return;
        };

        let (sender, receiver) = mpsc::channel();
        let stop = StopSignal::new();
        let mut sink = ChannelSink {
            sender,
            ctx: ctx.clone(),
        };

        let driver_stop = stop.clone();
        thread::spawn(move || {
            let mut driver = AnimationDriver::new(&session);
            driver.invoke(true, &driver_stop, &mut sink, &mut ThreadPacer);
        });

        self.playback = Some(Playback { stop, receiver });
    }

    fn stop_playback(&mut self) {
        if let Some(playback) = self.playback.take() {
            playback.stop.stop();
        }
    }

    fn receive_frames(&mut self) {
        let Some(playback) = &self.playback else {
            return;
        };

        let mut finished = None;
        loop {
            match playback.receiver.try_recv() {
                Ok(PlaybackMessage::Frame(frame)) => self.frame = Some(frame),
                Ok(PlaybackMessage::Status(status)) => finished = Some(status),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if matches!(finished, None | Some(PlaybackStatus::Running)) {
                        finished = Some(PlaybackStatus::Stopped);
                    }
                    break;
                }
            }
        }

        match finished {
            Some(PlaybackStatus::Done) => {
                self.playback = None;
                self.status = "Done!".to_string();
            }
            Some(PlaybackStatus::Stopped) | Some(PlaybackStatus::Idle) => {
                self.playback = None;
                self.show_idle();
            }
            Some(PlaybackStatus::Running) => {
                self.status = "Running...".to_string();
            }
            None => {}
        }
    }

    pub(crate) fn new(settings: Settings) -> Self {
        let mut plotter = ConvolutionPlotter {
            settings,
            session: None,
            interaction_plot: None,
            result_plot: None,
            frame: None,
            playback: None,
            status: String::new(),
        };
        plotter.recompute();
        plotter
    }
}

fn waveform_ui(ui: &mut Ui, label: &str, spec: &mut WaveformSpec) -> bool {
    let mut changed = false;

    ComboBox::from_label(format!("Type {}", label))
        .selected_text(spec.shape.name())
        .show_ui(ui, |ui| {
            for shape in WaveShape::ALL {
                changed |= ui
                    .selectable_value(&mut spec.shape, shape, shape.name())
                    .changed();
            }
        });

    changed |= ui
        .add(
            Slider::new(&mut spec.frequency, FREQUENCY_RANGE)
                .text(format!("Freq {}", label))
                .step_by(0.1),
        )
        .changed();
    changed |= ui
        .add(
            Slider::new(&mut spec.amplitude, AMPLITUDE_RANGE)
                .text(format!("Amp {}", label))
                .step_by(0.1),
        )
        .changed();
    changed |= ui
        .add(
            Slider::new(&mut spec.x_offset, OFFSET_RANGE)
                .text(format!("X-Off {}", label))
                .step_by(0.1),
        )
        .changed();
    changed |= ui
        .add(
            Slider::new(&mut spec.y_offset, OFFSET_RANGE)
                .text(format!("Y-Off {}", label))
                .step_by(0.1),
        )
        .changed();

    changed
}
