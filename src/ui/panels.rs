use eframe::egui::{self, Color32, Grid, RichText, ScrollArea, Ui};

use crate::state::{AppState, FigureKind, Group};

// ---------------------------------------------------------------------------
// Left side panel – dataset info and statistics
// ---------------------------------------------------------------------------

/// Render the left datasets panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Datasets");
    ui.separator();

    if state.loaded_groups().is_empty() {
        ui.label("No dataset loaded.");
        ui.label("Use File → Open, or pass paths on the command line.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for data in state.loaded_groups() {
                ui.strong(data.group.display_name());
                ui.label(format!("Source: {}", data.source.display()));
                ui.label(format!(
                    "{} subjects, {} malformed rows skipped",
                    data.table.len(),
                    data.table.dropped_rows
                ));
                ui.label(format!("{} columns", data.table.columns.len()));

                let s = &data.summary;
                Grid::new(format!("stats_{}", data.group.label()))
                    .num_columns(2)
                    .show(ui, |ui: &mut Ui| {
                        ui.label("mean");
                        ui.label(format!("{:.2} kg", s.mean));
                        ui.end_row();
                        ui.label("median");
                        ui.label(format!("{:.2} kg", s.median));
                        ui.end_row();
                        ui.label("std dev");
                        ui.label(format!("{:.2} kg", s.std_dev));
                        ui.end_row();
                        ui.label("min");
                        ui.label(format!("{:.2} kg", s.min));
                        ui.end_row();
                        ui.label("max");
                        ui.label(format!("{:.2} kg", s.max));
                        ui.end_row();
                    });

                ui.separator();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open female dataset…").clicked() {
                open_file_dialog(state, Group::Female);
                ui.close_menu();
            }
            if ui.button("Open male dataset…").clicked() {
                open_file_dialog(state, Group::Male);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .selectable_label(state.figure == FigureKind::Histograms, "Histograms")
            .clicked()
        {
            state.figure = FigureKind::Histograms;
        }
        if ui
            .selectable_label(state.figure == FigureKind::BoxPlot, "Box plot")
            .clicked()
        {
            state.figure = FigureKind::BoxPlot;
        }

        ui.separator();

        for data in state.loaded_groups() {
            ui.label(format!(
                "{}: {} subjects",
                data.group.display_name(),
                data.table.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, group: Group) {
    let title = format!("Open {} body-measurement data", group.label());
    let file = rfd::FileDialog::new()
        .set_title(&title)
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open_group(group, &path);
    }
}
