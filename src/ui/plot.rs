use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoints, Points};

use crate::state::AppState;
use crate::summary::BarSeries;

// ---------------------------------------------------------------------------
// Summary bar chart
// ---------------------------------------------------------------------------

/// Draw one bar per label. Bars sit at x = 0, 1, 2, ... and the x axis maps
/// those positions back to their labels.
pub fn bar_chart(ui: &mut Ui, series: &BarSeries, color: Color32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(series.title);
    });

    let bars: Vec<Bar> = series
        .labels
        .iter()
        .zip(&series.values)
        .enumerate()
        .map(|(i, (label, &value))| {
            Bar::new(i as f64, value as f64)
                .name(label)
                .fill(color)
                .width(0.8)
        })
        .collect();

    let labels = series.labels.clone();
    Plot::new(("summary_bars", series.title))
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            label_at(&labels, mark.value)
        })
        .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            integer_tick(mark.value)
        })
        .include_y(0.0)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color));
        });
}

/// The label whose bar sits at `x`, or nothing between bars.
fn label_at(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Only whole-number ticks get a label.
fn integer_tick(y: f64) -> String {
    if (y - y.round()).abs() > 1e-6 {
        String::new()
    } else {
        format!("{}", y.round() as i64)
    }
}

// ---------------------------------------------------------------------------
// Geographic chart
// ---------------------------------------------------------------------------

/// Plot every geolocated active record at (longitude, latitude), coloured
/// by `fall`.
pub fn geo_chart(ui: &mut Ui, state: &AppState) {
    let records = state.active_records();

    let mut groups: Vec<(String, Vec<[f64; 2]>)> = Vec::new();
    for r in &records {
        let Some((long, lat)) = r.coordinates() else {
            continue;
        };
        let key = r.fall.clone().unwrap_or_else(|| "Unknown".to_string());
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, points)) => points.push([long, lat]),
            None => groups.push((key, vec![[long, lat]])),
        }
    }

    if groups.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No geolocated strikes");
        });
        return;
    }
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    Plot::new("geo_chart")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (fall, points) in groups {
                let color = state.fall_colors.color_for(&fall);
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(&fall)
                        .color(color)
                        .radius(2.0),
                );
            }
        });
}
