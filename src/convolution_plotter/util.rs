use egui_plot::PlotBounds;

/// Fraction of the data span added around every side of a plot.
const MARGIN: f64 = 0.1;

/// Smallest and largest finite value, `(0.0, 0.0)` for an empty slice.
pub(crate) fn value_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for &value in values.iter().filter(|v| v.is_finite()) {
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }

    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

pub(crate) fn calculate_bounds(x_range: (f64, f64), y_values: &[f64]) -> PlotBounds {
    let (min_x, max_x) = x_range;
    let (mut min_y, mut max_y) = value_range(y_values);

    let span = max_y - min_y;
    let pad = if span > 0.0 { span * MARGIN } else { 1.0 };
    min_y -= pad;
    max_y += pad;

    PlotBounds::from_min_max([min_x, min_y], [max_x, max_y])
}

pub(crate) fn to_plot_points(x: &[f64], y: &[f64]) -> Vec<[f64; 2]> {
    x.iter().zip(y).map(|(&x, &y)| [x, y]).collect()
}
