use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use democracy_atlas::color::category_color;
use democracy_atlas::data::model::Category;

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – page selector and filter widgets
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Settings");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Page selector ----
            ui.strong("Page");
            egui::ComboBox::from_id_salt("view")
                .selected_text(state.view.title())
                .show_ui(ui, |ui: &mut Ui| {
                    for view in View::ALL {
                        ui.selectable_value(&mut state.view, view, view.title());
                    }
                });
            ui.separator();

            // ---- Regime-type filter ----
            let n_selected = state.filters.categories.len();
            let header_text = format!("Regime type  ({n_selected}/{})", Category::ALL.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("category_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_none();
                        }
                    });

                    for category in Category::ALL {
                        let mut checked = state.filters.categories.contains(&category);
                        let text = RichText::new(category.label()).color(category_color(category));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_category(category);
                        }
                    }
                });

            // ---- Score window ----
            egui::CollapsingHeader::new(RichText::new("Democracy index range").strong())
                .id_salt("score_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    let (floor, ceil) = state.table().score_extent().unwrap_or((0.0, 10.0));
                    let mut lo = state.filters.score_min;
                    let mut hi = state.filters.score_max;
                    let lo_changed = ui
                        .add(egui::Slider::new(&mut lo, floor..=ceil).text("min"))
                        .changed();
                    let hi_changed = ui
                        .add(egui::Slider::new(&mut hi, floor..=ceil).text("max"))
                        .changed();
                    if lo_changed || hi_changed {
                        state.set_score_range(lo, hi);
                    }
                    if ui.small_button("Reset filters").clicked() {
                        state.reset_filters();
                    }
                });

            // ---- Reference country ----
            egui::CollapsingHeader::new(RichText::new("Reference country").strong())
                .id_salt("reference")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    let names: Vec<String> = state.table().names().map(str::to_string).collect();
                    egui::ComboBox::from_id_salt("reference_country")
                        .selected_text(&state.reference)
                        .show_ui(ui, |ui: &mut Ui| {
                            for name in names {
                                let selected = state.reference == name;
                                if ui.selectable_label(selected, &name).clicked() {
                                    state.reference = name;
                                }
                            }
                        });
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export table…").clicked() {
                save_file_dialog(state, false);
                ui.close_menu();
            }
            if ui.button("Export filtered countries…").clicked() {
                save_file_dialog(state, true);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Open renewable-energy CSV…").clicked() {
                open_energy_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} countries loaded, {} visible",
            state.table().len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState, filtered_only: bool) {
    let file = rfd::FileDialog::new()
        .set_title("Export countries")
        .set_directory(&state.config.export_dir)
        .set_file_name("democracy_geo_data.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        state.export(&path, filtered_only);
    }
}

pub fn open_energy_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open renewable-energy data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_energy(&path);
    }
}
