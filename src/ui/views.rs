use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use democracy_atlas::color::{category_color, region_color};
use democracy_atlas::data::catalog::population_ranking;
use democracy_atlas::data::export::COLUMNS;
use democracy_atlas::data::model::{Dataset, Record};
use democracy_atlas::data::{query, stats};

use crate::state::{AppState, View};
use crate::ui::plot;

/// Render the active page in the central panel.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(state.view.title());
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.view {
            View::Dashboard => dashboard(ui, state),
            View::Map => map(ui, state),
            View::Statistics => statistics(ui, state),
            View::Search => search(ui, state),
            View::Table => raw_table(ui, state),
            View::Population => population(ui),
            View::Energy => energy(ui, state),
        });
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn dashboard(ui: &mut Ui, state: &AppState) {
    let table = state.table();

    if let Some(s) = stats::summary(table) {
        ui.horizontal(|ui: &mut Ui| {
            metric(ui, "Countries", s.count.to_string());
            metric(ui, "Mean index", format!("{:.2}", s.mean));
            metric(ui, "Highest", format!("{:.2}", s.max));
            metric(ui, "Lowest", format!("{:.2}", s.min));
        });
    }
    ui.add_space(8.0);

    ui.strong("Regime types");
    egui::Grid::new("category_counts").striped(true).show(ui, |ui: &mut Ui| {
        for (category, n) in stats::category_counts(table) {
            ui.label(RichText::new(category.label()).color(category_color(category)));
            ui.label(format!("{n} countries"));
            ui.end_row();
        }
    });
    ui.add_space(8.0);

    ui.strong("Filtering and comparison");
    let filtered = state.filtered();
    if filtered.is_empty() {
        ui.label(RichText::new("No country matches the selected filters.").italics());
    } else {
        ui.columns(2, |cols| {
            cols[0].label("All countries");
            plot::world_map(&mut cols[0], "map_all", table, None, false, 300.0);
            cols[1].label(format!("Filtered ({} countries)", filtered.len()));
            plot::world_map(&mut cols[1], "map_filtered", &filtered, None, false, 300.0);
        });
    }
    ui.add_space(8.0);

    nearest_section(ui, state);
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(label);
            ui.heading(value);
        });
    });
}

fn nearest_section(ui: &mut Ui, state: &AppState) {
    ui.strong("Distance-based comparison");
    let neighbors = match state.neighbors() {
        Ok(n) => n,
        Err(e) => {
            ui.colored_label(egui::Color32::RED, e.to_string());
            return;
        }
    };
    let table = state.table();
    let reference = table.get(&state.reference);

    ui.columns(2, |cols| {
        cols[0].label(format!(
            "{} closest countries to {}:",
            neighbors.len(),
            state.reference
        ));
        for n in &neighbors {
            cols[0].label(format!(
                "• {} (index {:.2}, distance {:.1})",
                n.record.name(),
                n.record.score(),
                n.distance
            ));
        }

        let mut idx: Vec<usize> = Vec::with_capacity(neighbors.len() + 1);
        for name in reference
            .map(Record::name)
            .into_iter()
            .chain(neighbors.iter().map(|n| n.record.name()))
        {
            if let Some(i) = table.names().position(|m| m == name) {
                idx.push(i);
            }
        }
        let nearby = table.subset(&idx);
        plot::world_map(&mut cols[1], "map_nearby", &nearby, reference, true, 300.0);
    });
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

fn map(ui: &mut Ui, state: &AppState) {
    let filtered = state.filtered();
    ui.label(format!(
        "Democracy index by location ({} of {} countries)",
        filtered.len(),
        state.table().len()
    ));
    plot::world_map(ui, "map_full", &filtered, None, false, 560.0);
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

fn statistics(ui: &mut Ui, state: &AppState) {
    let filtered = state.filtered();

    ui.strong("Score distribution");
    plot::score_histogram(ui, &filtered, 20);
    ui.add_space(8.0);

    ui.strong("By region (latitude band)");
    egui::Grid::new("region_stats").striped(true).show(ui, |ui: &mut Ui| {
        ui.strong("Region");
        ui.strong("Countries");
        ui.strong("Mean");
        ui.strong("Std dev");
        ui.end_row();
        for s in stats::region_stats(&filtered) {
            ui.label(RichText::new(s.region.label()).color(region_color(s.region)));
            ui.label(s.count.to_string());
            ui.label(format!("{:.2}", s.mean));
            ui.label(s.std_dev.map_or("–".to_string(), |v| format!("{v:.2}")));
            ui.end_row();
        }
    });
    ui.add_space(8.0);

    let k = state.config.rank_size;
    ui.columns(2, |cols| {
        cols[0].strong(format!("Top {k}"));
        ranking(&mut cols[0], "top_k", &query::top_k(&filtered, k));
        cols[1].strong(format!("Bottom {k}"));
        ranking(&mut cols[1], "bottom_k", &query::bottom_k(&filtered, k));
    });
}

fn ranking(ui: &mut Ui, id: &str, records: &[&Record]) {
    egui::Grid::new(id).striped(true).show(ui, |ui: &mut Ui| {
        for (i, r) in records.iter().enumerate() {
            ui.label(format!("{}.", i + 1));
            ui.label(r.name());
            ui.label(format!("{:.2}", r.score()));
            ui.label(RichText::new(r.category().label()).color(category_color(r.category())));
            ui.end_row();
        }
    });
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn search(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Country name:");
        ui.text_edit_singleline(&mut state.search_query);
    });
    ui.add_space(6.0);

    let hits = state.search_results();
    if hits.is_empty() {
        ui.label(format!("No country matches '{}'.", state.search_query));
        return;
    }

    let table = state.table();
    for &i in &hits {
        let Some(r) = table.records().get(i) else {
            continue;
        };
        ui.group(|ui: &mut Ui| {
            ui.strong(r.name());
            ui.label(format!("Democracy index: {}", r.score()));
            ui.label(RichText::new(r.category().label()).color(category_color(r.category())));
            ui.label(format!("Region: {}", r.region()));
            let p = r.position();
            ui.label(format!("Latitude {}, longitude {}", p.latitude, p.longitude));
        });
    }
}

// ---------------------------------------------------------------------------
// Raw table
// ---------------------------------------------------------------------------

fn raw_table(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Export table…").clicked() {
            crate::ui::panels::save_file_dialog(state, false);
        }
        if ui.button("Export filtered…").clicked() {
            crate::ui::panels::save_file_dialog(state, true);
        }
    });
    ui.add_space(6.0);

    let filtered = state.filtered();
    record_table(ui, &filtered);
}

fn record_table(ui: &mut Ui, dataset: &Dataset) {
    let rows = dataset.records();
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .columns(Column::auto(), COLUMNS.len() - 1)
        .header(20.0, |mut header| {
            for title in COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                let p = r.position();
                row.col(|ui: &mut Ui| {
                    ui.label(r.name());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", r.score()));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.3}", p.latitude));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.3}", p.longitude));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(
                        RichText::new(r.category().label()).color(category_color(r.category())),
                    );
                });
                row.col(|ui: &mut Ui| {
                    ui.label(r.region().label());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Auxiliary datasets
// ---------------------------------------------------------------------------

fn population(ui: &mut Ui) {
    ui.label("World population top 10, 2024 (millions)");
    plot::population_chart(ui, population_ranking());
}

fn energy(ui: &mut Ui, state: &mut AppState) {
    if ui.button("Open renewable-energy CSV…").clicked() {
        crate::ui::panels::open_energy_dialog(state);
    }
    ui.add_space(6.0);

    match &state.energy {
        None => {
            ui.label("No renewable-energy table loaded (File → Open renewable-energy CSV…).");
        }
        Some(table) if table.is_empty() => {
            ui.label("The loaded file has no rows.");
        }
        Some(table) => {
            ui.label("Renewable share of electricity generation by country (%)");
            plot::energy_chart(ui, &table.ranked());
        }
    }
}
