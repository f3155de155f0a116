use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::chart::plan::RenderPlan;
use crate::state::AppState;

/// Selector entry for the aggregate view.
const WORLD: &str = "World (all countries)";

// ---------------------------------------------------------------------------
// Left side panel – country selector and values
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Country");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut selection = state.selected_country.clone();
    egui::ComboBox::from_id_salt("country")
        .selected_text(selection.as_deref().unwrap_or(WORLD))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selection, None, WORLD);
            for name in &state.countries {
                ui.selectable_value(&mut selection, Some(name.clone()), name.as_str());
            }
        });
    if selection != state.selected_country {
        state.select_country(selection);
    }

    ui.separator();

    if let Some(plan) = &state.plan {
        values_table(ui, plan);
    }
}

/// Year-by-year values of the charted series.
fn values_table(ui: &mut Ui, plan: &RenderPlan) {
    ui.strong(format!("{} · max {:.2}", plan.title, plan.maximum));

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .columns(Column::auto(), plan.series.len())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Year");
            });
            for (measure, _) in &plan.series {
                header.col(|ui: &mut Ui| {
                    ui.strong(measure.to_string());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, plan.years().len(), |mut row| {
                let i = row.index();
                row.col(|ui: &mut Ui| {
                    ui.label(plan.years()[i].to_string());
                });
                for (_, series) in &plan.series {
                    row.col(|ui: &mut Ui| {
                        ui.label(format_rate(series.values[i]));
                    });
                }
            });
        });
}

fn format_rate(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        "NaN".to_string()
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.plan.is_some(), egui::Button::new("Export SVG…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records, {} countries, {} rows dropped",
                ds.len(),
                state.countries.len(),
                ds.issues.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open death-rate data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(plan) = &state.plan else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export chart")
        .set_file_name(format!("{}.svg", plan.title))
        .add_filter("SVG", &["svg"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = crate::export::write_svg(&path, plan, &state.config.layout) {
            log::error!("Failed to export chart: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
