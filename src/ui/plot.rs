use eframe::egui::{Align2, Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, MarkerShape, Plot, PlotPoint, Points, Text};

use democracy_atlas::color::{category_color, generate_palette};
use democracy_atlas::data::model::{Category, Dataset, EnergyShare, PopulationEntry, Record};
use democracy_atlas::data::stats::histogram;

/// Countries always labelled on the full map.
const LABELLED: [&str; 5] = ["United States", "China", "Russia", "South Korea", "Norway"];

// ---------------------------------------------------------------------------
// Map (longitude × latitude scatter)
// ---------------------------------------------------------------------------

/// Scatter every record on a longitude/latitude plane, coloured by regime
/// type and sized by score. `reference` is drawn as a red star. Only a few
/// well-known countries are named unless `label_all` is set.
pub fn world_map(
    ui: &mut Ui,
    id: &str,
    dataset: &Dataset,
    reference: Option<&Record>,
    label_all: bool,
    height: f32,
) {
    Plot::new(id)
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for category in Category::ALL {
                for record in dataset.records().iter().filter(|r| r.category() == category) {
                    let p = record.position();
                    plot_ui.points(
                        Points::new(vec![[p.longitude, p.latitude]])
                            .name(category.label())
                            .color(category_color(category))
                            .radius(2.0 + record.score().max(0.0) as f32 * 0.6)
                            .filled(true),
                    );
                }
            }

            for record in dataset.records() {
                if label_all || LABELLED.contains(&record.name()) {
                    let p = record.position();
                    plot_ui.text(
                        Text::new(PlotPoint::new(p.longitude, p.latitude), record.name())
                            .anchor(Align2::LEFT_BOTTOM),
                    );
                }
            }

            if let Some(r) = reference {
                let p = r.position();
                plot_ui.points(
                    Points::new(vec![[p.longitude, p.latitude]])
                        .name(format!("{} (reference)", r.name()))
                        .shape(MarkerShape::Asterisk)
                        .color(Color32::RED)
                        .radius(10.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Score histogram
// ---------------------------------------------------------------------------

/// Stacked histogram of scores, one series per regime type.
pub fn score_histogram(ui: &mut Ui, dataset: &Dataset, bins: usize) {
    let (lo, hi) = (0.0, 10.0);
    let width = (hi - lo) / bins as f64;

    Plot::new("score_histogram")
        .legend(Legend::default())
        .height(300.0)
        .x_axis_label("Democracy index")
        .y_axis_label("Countries")
        .show(ui, |plot_ui| {
            let charts: Vec<BarChart> = Category::ALL
                .iter()
                .map(|&category| {
                    let scores = dataset
                        .records()
                        .iter()
                        .filter(|r| r.category() == category)
                        .map(|r| r.score());
                    let bars = histogram(scores, lo, hi, bins)
                        .into_iter()
                        .enumerate()
                        .map(|(i, n)| Bar::new(lo + (i as f64 + 0.5) * width, n as f64))
                        .collect();
                    BarChart::new(bars)
                        .width(width * 0.95)
                        .name(category.label())
                        .color(category_color(category))
                })
                .collect();

            let mut stacked: Vec<BarChart> = Vec::with_capacity(charts.len());
            for chart in charts {
                let below: Vec<&BarChart> = stacked.iter().collect();
                let chart = chart.stack_on(&below);
                stacked.push(chart);
            }
            for chart in stacked {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Ranked bar charts
// ---------------------------------------------------------------------------

/// Bar per country, labelled above the bar.
fn labelled_bars(ui: &mut Ui, id: &str, y_label: &str, rows: &[(String, f64)], color: Color32) {
    Plot::new(id)
        .height(400.0)
        .y_axis_label(y_label)
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let bars = rows
                .iter()
                .enumerate()
                .map(|(i, (name, value))| Bar::new(i as f64, *value).name(name).fill(color))
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).width(0.7));

            for (i, (name, value)) in rows.iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(i as f64, *value), name.as_str())
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

pub fn population_chart(ui: &mut Ui, ranking: &[PopulationEntry]) {
    let rows: Vec<(String, f64)> = ranking
        .iter()
        .map(|e| (e.country.to_string(), e.millions as f64))
        .collect();
    labelled_bars(
        ui,
        "population_chart",
        "Population (millions)",
        &rows,
        Color32::from_rgb(65, 105, 225),
    );
}

pub fn energy_chart(ui: &mut Ui, ranked: &[&EnergyShare]) {
    let rows: Vec<(String, f64)> = ranked
        .iter()
        .map(|e| (e.country.clone(), e.renewable_percentage))
        .collect();
    let color = generate_palette(3)[1];
    labelled_bars(ui, "energy_chart", "Renewable share (%)", &rows, color);
}
