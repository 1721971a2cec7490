use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};

use anyhow::Result;

use crate::color::ColorMap;
use crate::config::DisplayConfig;
use crate::data::aggregate::{aggregate, Summary};
use crate::data::filter::{filtered_indices, SearchState};
use crate::data::loader;
use crate::data::model::{Dataset, Record};
use crate::summary::{self, SummaryTab, SummaryView, TabSelector, ViewInput};
use crate::ui::widgets::ToggleButton;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file has been loaded).
    pub dataset: Option<Dataset>,

    /// Current search constraints.
    pub search: SearchState,

    /// Indices of records matching an active search (empty when inactive).
    pub filtered_indices: Vec<usize>,

    /// Aggregates of the active records, recomputed on every input change.
    pub summary: Summary,

    /// Which summary tab is shown.
    pub tabs: TabSelector,

    /// Colours for the geographic chart, keyed by `fall`.
    pub fall_colors: ColorMap,

    /// Display settings from the config file.
    pub display: DisplayConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,

    /// Receiver for the in-flight load, if any.
    pending: Option<Receiver<Result<Dataset>>>,

    pub search_toggle: ToggleButton,
    pub table_toggle: ToggleButton,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DisplayConfig::default())
    }
}

impl AppState {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            dataset: None,
            search: SearchState::default(),
            filtered_indices: Vec::new(),
            summary: Summary::default(),
            tabs: TabSelector::new(display.default_tab),
            fall_colors: ColorMap::default(),
            display,
            status_message: None,
            loading: false,
            pending: None,
            search_toggle: ToggleButton::new("Search", true),
            table_toggle: ToggleButton::new("Records", false),
        }
    }

    /// Ingest a newly loaded dataset and recompute everything derived from it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.fall_colors = ColorMap::new(dataset.records.iter().filter_map(|r| r.fall.as_deref()));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    /// Recompute the filtered indices and the summary.
    ///
    /// Must be called whenever the dataset or the search changes.
    pub fn refilter(&mut self) {
        self.filtered_indices = match &self.dataset {
            Some(ds) => filtered_indices(ds, &self.search),
            None => Vec::new(),
        };
        self.summary = aggregate(self.active_records());
    }

    /// The records the summary describes: the search result when it is
    /// non-empty, otherwise the whole dataset.
    pub fn active_records(&self) -> Vec<&Record> {
        let Some(ds) = &self.dataset else {
            return Vec::new();
        };
        if self.filtered_indices.is_empty() {
            ds.records.iter().collect()
        } else {
            self.filtered_indices
                .iter()
                .filter_map(|&i| ds.records.get(i))
                .collect()
        }
    }

    /// Length of the active sequence.
    pub fn active_len(&self) -> usize {
        match &self.dataset {
            Some(ds) if self.filtered_indices.is_empty() => ds.len(),
            Some(_) => self.filtered_indices.len(),
            None => 0,
        }
    }

    pub fn select_tab(&mut self, tab: SummaryTab) {
        self.tabs.select(tab);
    }

    /// What the summary card shows right now.
    pub fn summary_view(&self) -> SummaryView {
        summary::render(
            self.tabs.active(),
            ViewInput {
                loading: self.loading,
                record_count: self.active_len(),
                summary: &self.summary,
                mass_unit: &self.display.mass_unit,
            },
        )
    }

    // -- Loading -------------------------------------------------------------

    /// Start loading `path` on a worker thread.
    pub fn begin_load(&mut self, path: PathBuf) {
        log::info!("Opening {}", path.display());
        self.loading = true;
        self.status_message = None;
        self.pending = Some(loader::spawn_load(path));
    }

    /// Check for a finished load. Returns `true` when state changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.finish_load(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.finish_load(Err(anyhow::anyhow!("loader thread exited unexpectedly")));
                true
            }
        }
    }

    fn finish_load(&mut self, result: Result<Dataset>) {
        match result {
            Ok(dataset) => {
                log::info!("Loaded {} records", dataset.len());
                let empty = dataset.is_empty();
                self.set_dataset(dataset);
                if empty {
                    log::warn!("File contains no records");
                    self.status_message = Some("File contains no records".into());
                }
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let mk = |name: &str, class: &str, mass: &str, year: &str| Record {
            name: Some(name.into()),
            recclass: Some(class.into()),
            mass: Some(mass.into()),
            year: Some(year.into()),
            fall: Some("Fell".into()),
            ..Default::default()
        };
        Dataset::new(vec![
            mk("Aachen", "L5", "21", "1880-01-01T00:00:00.000"),
            mk("Aarhus", "H6", "720", "1951-01-01T00:00:00.000"),
            mk("Abee", "EH4", "107000", "1952-01-01T00:00:00.000"),
        ])
    }

    #[test]
    fn test_set_dataset_aggregates_everything() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        assert_eq!(state.active_len(), 3);
        assert_eq!(state.summary.by_year.len(), 3);
        assert_eq!(state.summary.average_mass, (21.0 + 720.0 + 107000.0) / 3.0);
    }

    #[test]
    fn test_search_narrows_the_summary() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.search.query = "aa".into();
        state.refilter();

        assert_eq!(state.filtered_indices, vec![0, 1]);
        assert_eq!(state.active_len(), 2);
        assert_eq!(state.summary.by_class.total(), 2);
        assert_eq!(state.summary.average_mass, (21.0 + 720.0) / 2.0);
    }

    #[test]
    fn test_search_with_no_match_falls_back_to_full_set() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.search.query = "zzz".into();
        state.refilter();

        assert!(state.filtered_indices.is_empty());
        assert_eq!(state.active_len(), 3);
    }

    #[test]
    fn test_number_tab_counts_active_records() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.select_tab(SummaryTab::Number);
        assert_eq!(
            state.summary_view(),
            SummaryView::Card("Total Number of Strikes: 3".into())
        );
    }

    #[test]
    fn test_no_dataset_shows_no_data() {
        let state = AppState::default();
        assert_eq!(state.summary_view(), SummaryView::NoData);
    }

    #[test]
    fn test_loading_flag_shows_placeholder() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.loading = true;
        assert_eq!(state.summary_view(), SummaryView::Loading);
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.begin_load(PathBuf::from("does-not-exist.json"));
        assert!(state.loading);

        let rx = state.pending.take().unwrap();
        state.finish_load(rx.recv().unwrap());

        assert!(!state.loading);
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
        assert_eq!(state.active_len(), 3);
    }

    #[test]
    fn test_empty_file_is_reported() {
        let mut state = AppState::default();
        state.finish_load(Ok(Dataset::new(Vec::new())));

        assert!(!state.loading);
        assert_eq!(state.status_message.as_deref(), Some("File contains no records"));
        assert_eq!(state.summary_view(), SummaryView::NoData);
    }

    #[test]
    fn test_default_tab_from_config() {
        let display = DisplayConfig {
            default_tab: SummaryTab::Mass,
            ..Default::default()
        };
        let state = AppState::new(display);
        assert_eq!(state.tabs.active(), SummaryTab::Mass);
    }
}
