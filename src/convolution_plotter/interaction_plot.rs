use crate::convolution_plotter::util::{calculate_bounds, to_plot_points, value_range};
use eframe::epaint::Color32;
use egui::{Ui, Vec2b};
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};
use signal_convolutor::{AnimationFrame, ConvolutionSession};

const SIGNAL1_COLOR: Color32 = Color32::from_rgb(0x1f, 0x77, 0xb4);
const SIGNAL2_COLOR: Color32 = Color32::from_rgb(0xff, 0x7f, 0x0e);
const PRODUCT_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 77, 0, 77);

/// Top panel: both signals over `tau` and the area of their product.
#[derive(Clone, Debug)]
pub(crate) struct InteractionPlot {
    bounds: PlotBounds,
}

impl InteractionPlot {
    pub(crate) fn draw(&self, ui: &mut Ui, frame: &AnimationFrame, height: f32) {
        let plot = Plot::new("interaction_plot")
            .height(height)
            .legend(Legend::default())
            .show_x(false)
            .y_axis_label("Amp")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .auto_bounds(Vec2b::FALSE)
            .allow_double_click_reset(false)
            .allow_boxed_zoom(false);

        ui.label("Interaction (Flip & Slide)");
        plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(self.bounds);

            let product = Line::new(PlotPoints::new(to_plot_points(&frame.tau, &frame.product)))
                .color(PRODUCT_COLOR)
                .fill(0.0)
                .name("Product");
            let signal1 = Line::new(PlotPoints::new(to_plot_points(&frame.tau, &frame.signal1)))
                .color(SIGNAL1_COLOR)
                .name("Signal 1");
            let signal2 = Line::new(PlotPoints::new(to_plot_points(&frame.tau, &frame.sliding)))
                .color(SIGNAL2_COLOR)
                .width(3.0)
                .name("Signal 2");

            plot_ui.line(product);
            plot_ui.line(signal1);
            plot_ui.line(signal2);
        });
    }

    /// Bounds wide enough for every frame of `session`, so the axes stay put while
    /// Signal 2 slides.
    pub(crate) fn new(session: &ConvolutionSession) -> Self {
        let (min1, max1) = value_range(&session.signal1().values);
        let (min2, max2) = value_range(&session.signal2().values);
        // Outside the window the sliding signal is zero
        let (min2, max2) = (min2.min(0.0), max2.max(0.0));

        let y_values = [
            min1,
            max1,
            min2,
            max2,
            min1 * min2,
            min1 * max2,
            max1 * min2,
            max1 * max2,
        ];

        InteractionPlot {
            bounds: calculate_bounds((0.0, session.settings().duration()), &y_values),
        }
    }
}
