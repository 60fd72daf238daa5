use crate::convolution_plotter::util::{calculate_bounds, to_plot_points};
use eframe::epaint::Color32;
use egui::{Ui, Vec2b};
use egui_plot::{Line, Plot, PlotBounds, PlotPoints, Points};
use signal_convolutor::{AnimationFrame, ConvolutionSession};

const BACKGROUND_COLOR: Color32 = Color32::from_gray(0xee);
const PROGRESS_COLOR: Color32 = Color32::from_rgb(0, 128, 0);

/// Bottom panel: the whole convolution faintly, the part already swept and the
/// current point.
#[derive(Clone, Debug)]
pub(crate) struct ResultPlot {
    full_curve: Vec<[f64; 2]>,
    bounds: PlotBounds,
}

impl ResultPlot {
    pub(crate) fn draw(&self, ui: &mut Ui, frame: &AnimationFrame, height: f32) {
        let plot = Plot::new("result_plot")
            .height(height)
            .x_axis_label("Time (s)")
            .y_axis_label("Conv")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .auto_bounds(Vec2b::FALSE)
            .allow_double_click_reset(false)
            .allow_boxed_zoom(false);

        plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(self.bounds);

            plot_ui.line(
                Line::new(PlotPoints::new(self.full_curve.clone())).color(BACKGROUND_COLOR),
            );
            plot_ui.line(
                Line::new(PlotPoints::new(to_plot_points(
                    &frame.result_time,
                    &frame.result_so_far,
                )))
                .color(PROGRESS_COLOR)
                .width(2.0),
            );

            let (t, value) = frame.current_point;
            plot_ui.points(Points::new(vec![[t, value]]).radius(5.0).color(Color32::RED));
        });
    }

    pub(crate) fn new(session: &ConvolutionSession) -> Self {
        let convolution = session.convolution();
        let end = convolution.time.last().copied().unwrap_or(0.0);

        ResultPlot {
            full_curve: to_plot_points(&convolution.time, &convolution.values),
            bounds: calculate_bounds((0.0, end), &convolution.values),
        }
    }
}
