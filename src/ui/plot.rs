use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, Points};

use crate::state::{AppState, FigureKind, GroupData, WEIGHT_VIEW_RANGE};

// ---------------------------------------------------------------------------
// Central panel – weight figures
// ---------------------------------------------------------------------------

/// Render the active figure in the central panel.
pub fn weight_figure(ui: &mut Ui, state: &AppState) {
    let groups = state.loaded_groups();
    if groups.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open the female and male datasets to view weight figures");
        });
        return;
    }

    match state.figure {
        FigureKind::Histograms => weight_histograms(ui, &groups),
        FigureKind::BoxPlot => weight_boxplot(ui, &groups),
    }
}

// ---------------------------------------------------------------------------
// Stacked histograms (one panel per group)
// ---------------------------------------------------------------------------

/// Two stacked weight histograms, 30 bins each, view spanning 40–150 kg.
/// Values outside the view range stay in the data; only the display clips.
fn weight_histograms(ui: &mut Ui, groups: &[&GroupData]) {
    let panel_height = ui.available_height() / groups.len() as f32 - 24.0;

    for data in groups {
        ui.strong(format!("{} weights distribution", data.group.display_name()));

        let bars: Vec<Bar> = data
            .histogram
            .iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.count as f64)
                    .width(bin.width())
                    .fill(data.group.color())
            })
            .collect();

        let chart = BarChart::new(bars)
            .color(data.group.color())
            .name(data.group.display_name());

        Plot::new(format!("weight_hist_{}", data.group.label()))
            .legend(Legend::default())
            .x_axis_label("Weight (kg)")
            .y_axis_label("Frequency")
            .include_x(WEIGHT_VIEW_RANGE.0)
            .include_x(WEIGHT_VIEW_RANGE.1)
            .include_y(0.0)
            .height(panel_height)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(chart);
            });
    }
}

// ---------------------------------------------------------------------------
// Box-and-whisker comparison
// ---------------------------------------------------------------------------

/// Paired box-and-whisker plot of weights, one box per group.
fn weight_boxplot(ui: &mut Ui, groups: &[&GroupData]) {
    ui.strong("Box-and-whisker plot of weights");

    // Group names at fixed x positions 1, 2, ... for the axis labels.
    let names: Vec<&'static str> = groups.iter().map(|d| d.group.display_name()).collect();

    Plot::new("weight_boxplot")
        .legend(Legend::default())
        .y_axis_label("Weight (kg)")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round() as i64;
            if (mark.value - idx as f64).abs() < 1e-6 && idx >= 1 && (idx as usize) <= names.len()
            {
                names[idx as usize - 1].to_string()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            for (i, data) in groups.iter().enumerate() {
                let x = (i + 1) as f64;
                let b = &data.box_stats;

                let elem = BoxElem::new(
                    x,
                    BoxSpread::new(b.whisker_low, b.q1, b.median, b.q3, b.whisker_high),
                )
                .name(data.group.display_name())
                .box_width(0.5)
                .whisker_width(0.25)
                .fill(data.group.color())
                .stroke(Stroke::new(1.5, data.group.color().to_opaque()));

                plot_ui.box_plot(
                    BoxPlot::new(vec![elem]).name(data.group.display_name()),
                );

                if !b.outliers.is_empty() {
                    let points: Vec<[f64; 2]> =
                        b.outliers.iter().map(|&y| [x, y]).collect();
                    plot_ui.points(
                        Points::new(points)
                            .color(data.group.color().to_opaque())
                            .radius(2.5),
                    );
                }
            }
        });
}
