use eframe::egui::{self, Color32, Frame, Margin, RichText, Ui};

use crate::state::AppState;
use crate::summary::{SummaryTab, SummaryView};
use crate::summary::view::{LOADING_TEXT, NO_DATA_TEXT};

use super::plot;
use super::widgets::Label;

// ---------------------------------------------------------------------------
// Left side panel – search widgets
// ---------------------------------------------------------------------------

/// Render the search panel. Any edit recomputes the summary.
pub fn search_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Search");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut changed = false;

    ui.add(Label::new("Name or class").hover("Case-insensitive substring match"));
    changed |= ui.text_edit_singleline(&mut state.search.query).changed();
    ui.add_space(8.0);

    ui.add(Label::new("Year range").hover("Inclusive; records without a valid year are excluded"));
    changed |= year_bound(ui, "From", &mut state.search.year_from, 1800);
    changed |= year_bound(ui, "To", &mut state.search.year_to, 2013);
    ui.add_space(8.0);

    if ui.button("Clear").clicked() {
        state.search.clear();
        changed = true;
    }

    if changed {
        state.refilter();
    }

    ui.separator();
    if state.search.is_active() {
        let n = state.filtered_indices.len();
        if n == 0 {
            ui.label("No matches, showing all records.");
        } else {
            ui.label(format!("{n} matching records"));
        }
    }
}

/// A checkbox enabling an optional year bound plus its value editor.
fn year_bound(ui: &mut Ui, name: &str, bound: &mut Option<i32>, initial: i32) -> bool {
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        let mut enabled = bound.is_some();
        if ui.checkbox(&mut enabled, name).changed() {
            *bound = enabled.then_some(initial);
            changed = true;
        }
        if let Some(year) = bound {
            changed |= ui
                .add(egui::DragValue::new(year).range(0..=3000))
                .changed();
        }
    });
    changed
}

// ---------------------------------------------------------------------------
// Summary card – tabs plus the active view
// ---------------------------------------------------------------------------

/// Render the tab row and whatever the active tab shows.
pub fn summary_card(ui: &mut Ui, state: &mut AppState) {
    match state.summary_view() {
        SummaryView::Loading => {
            placeholder(ui, LOADING_TEXT);
            return;
        }
        SummaryView::NoData => {
            placeholder(ui, NO_DATA_TEXT);
            return;
        }
        SummaryView::Card(_) | SummaryView::Bars(_) => {}
    }

    ui.horizontal(|ui: &mut Ui| {
        for tab in SummaryTab::ALL {
            if ui
                .selectable_label(state.tabs.is_active(tab), tab.title())
                .clicked()
            {
                state.select_tab(tab);
            }
        }
    });
    ui.add_space(6.0);

    // Re-read after a possible tab change this frame.
    match state.summary_view() {
        SummaryView::Card(text) => highlight(ui, &text, state.display.bar_color32()),
        SummaryView::Bars(series) => plot::bar_chart(ui, &series, state.display.bar_color32()),
        SummaryView::Loading | SummaryView::NoData => {}
    }
}

fn placeholder(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(text).color(Color32::GRAY).size(18.0));
    });
}

fn highlight(ui: &mut Ui, text: &str, fill: Color32) {
    ui.vertical_centered(|ui: &mut Ui| {
        Frame::new()
            .fill(fill)
            .corner_radius(12.0)
            .inner_margin(Margin::same(20))
            .show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(text).color(Color32::WHITE).strong().size(28.0));
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
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.add(&mut state.search_toggle);
        ui.add(&mut state.table_toggle);

        ui.separator();

        if state.loading {
            ui.spinner();
        } else if let Some(ds) = &state.dataset {
            let source = ds
                .source
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{source}: {} records loaded, {} shown",
                ds.len(),
                state.active_len()
            ));
            let classes = &state.summary.by_class;
            if !classes.is_empty() {
                ui.label(format!("{} classes", classes.len()));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open meteorite data")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.begin_load(path);
    }
}
