use crate::data::aggregate::Summary;

use super::format::format_locale;
use super::tab::SummaryTab;

/// Labels and bar heights for one chart, plus its title.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

/// What the summary card should draw this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryView {
    /// A load is still pending; nothing derived is shown.
    Loading,
    /// No records to summarise.
    NoData,
    /// A single highlighted line of text (strike count, average mass).
    Card(String),
    /// A bar chart.
    Bars(BarSeries),
}

pub const LOADING_TEXT: &str = "Loading...";
pub const NO_DATA_TEXT: &str = "No data available";

/// Everything the renderer reads.
#[derive(Debug, Clone, Copy)]
pub struct ViewInput<'a> {
    pub loading: bool,
    /// Length of the active record sequence.
    pub record_count: usize,
    pub summary: &'a Summary,
    pub mass_unit: &'a str,
}

/// Pick the display for `tab`.
///
/// Loading wins over everything, then an empty sequence, then the tab.
pub fn render(tab: SummaryTab, input: ViewInput<'_>) -> SummaryView {
    if input.loading {
        return SummaryView::Loading;
    }
    if input.record_count == 0 {
        return SummaryView::NoData;
    }

    match tab {
        SummaryTab::Number => {
            SummaryView::Card(format!("Total Number of Strikes: {}", input.record_count))
        }
        SummaryTab::Mass => SummaryView::Card(format!(
            "Average Meteorite Mass: {} {}",
            format_locale(input.summary.average_mass),
            input.mass_unit
        )),
        SummaryTab::Year => {
            let (labels, values) = input
                .summary
                .by_year
                .iter()
                .map(|(year, count)| (year.to_string(), *count))
                .unzip();
            SummaryView::Bars(BarSeries {
                title: tab.title(),
                labels,
                values,
            })
        }
        SummaryTab::Class => {
            let (labels, values) = input
                .summary
                .by_class
                .iter()
                .map(|(label, count)| (label.to_string(), count))
                .unzip();
            SummaryView::Bars(BarSeries {
                title: tab.title(),
                labels,
                values,
            })
        }
    }
}
