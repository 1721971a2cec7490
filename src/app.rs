use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StarfallApp {
    pub state: AppState,
}

impl StarfallApp {
    /// Build the app and start loading `startup_file`, if any.
    pub fn new(config: &Config, startup_file: Option<PathBuf>) -> Self {
        let mut state = AppState::new(config.display.clone());
        if let Some(path) = startup_file {
            state.begin_load(path);
        }
        Self { state }
    }
}

impl eframe::App for StarfallApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();
        if self.state.loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: search ----
        if self.state.search_toggle.is_on() {
            egui::SidePanel::left("search_panel")
                .default_width(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::search_panel(ui, &mut self.state);
                });
        }

        // ---- Bottom panel: records table ----
        if self.state.table_toggle.is_on() && !self.state.loading {
            egui::TopBottomPanel::bottom("records_table")
                .resizable(true)
                .default_height(220.0)
                .show(ctx, |ui| {
                    let records = self.state.active_records();
                    table::records_table(ui, &records);
                });
        }

        // ---- Central panel: summary on top, map below ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let summary_height = ui.available_height() * 0.55;
            ui.allocate_ui(egui::vec2(ui.available_width(), summary_height), |ui| {
                panels::summary_card(ui, &mut self.state);
            });
            ui.separator();
            if !self.state.loading {
                plot::geo_chart(ui, &self.state);
            }
        });
    }
}
