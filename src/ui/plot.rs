use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::data::model::{FiniteSizeErrors, Observable};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Log-log error plot (central panel)
// ---------------------------------------------------------------------------

/// egui_plot has linear axes only, so points are placed at their log10 and the
/// tick labels are rendered back as powers of ten.
pub fn log10_points(errors: &FiniteSizeErrors, observable: Observable) -> Vec<[f64; 2]> {
    errors
        .plottable_points(observable)
        .into_iter()
        .map(|(l, err)| [l.log10(), err.log10()])
        .collect()
}

fn power_of_ten(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    let v = 10f64.powf(mark.value);
    if (1.0..1e4).contains(&v) {
        format!("{v:.0}")
    } else {
        format!("{v:.0e}")
    }
}

/// Render the log-log plot in the central panel.
pub fn error_plot(ui: &mut Ui, state: &AppState) {
    if state.errors.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No finite-size rows in this file");
        });
        return;
    }

    Plot::new("error_plot")
        .legend(Legend::default())
        .x_axis_label("L")
        .y_axis_label("|X(L) - X(∞)|")
        .x_axis_formatter(power_of_ten)
        .y_axis_formatter(power_of_ten)
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for style in state.visible_styles() {
                let color: Color32 = style.color.into();
                let name = style.observable.label();
                let pts = log10_points(&state.errors, style.observable);

                let line_points: PlotPoints = pts.iter().copied().collect();
                let line = Line::new(line_points)
                    .name(name)
                    .color(color)
                    .width(1.5);
                plot_ui.line(line);

                let marker_points: PlotPoints = pts.into_iter().collect();
                let markers = Points::new(marker_points)
                    .name(name)
                    .color(color)
                    .shape(style.marker.into())
                    .filled(true)
                    .radius(4.0);
                plot_ui.points(markers);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_mapped_to_log10() {
        let errors = FiniteSizeErrors {
            sizes: vec![10, 100],
            free_energy: vec![0.1, 0.0],
            energy: vec![1e-3, 1e-4],
        };
        let fe = log10_points(&errors, Observable::FreeEnergy);
        assert_eq!(fe.len(), 1);
        assert!((fe[0][0] - 1.0).abs() < 1e-12);
        assert!((fe[0][1] + 1.0).abs() < 1e-12);

        let e = log10_points(&errors, Observable::Energy);
        assert_eq!(e.len(), 2);
        assert!((e[1][0] - 2.0).abs() < 1e-12);
        assert!((e[1][1] + 4.0).abs() < 1e-12);
    }
}
